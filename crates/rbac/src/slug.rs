//! Slug derivation for global roles.
//!
//! The server owns slug uniqueness; the client only derives a suggestion
//! from the role name while the user has not touched the slug field.

/// Derive a slug from a display name.
///
/// Rules: lowercase; ASCII letters and digits pass through; whitespace,
/// underscores and hyphens become a single hyphen; everything else is
/// stripped; no leading/trailing hyphen. The result is idempotent:
/// slugifying a valid slug returns it unchanged.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(ch);
        } else if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
        }
        // Any other character ("!", "؟", emoji, Arabic script) is stripped.
    }

    out
}

/// Slug form field with an explicit manual-override flag.
///
/// While untouched, the slug tracks the name; after the first manual edit it
/// stops following name changes for the rest of the form session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugField {
    value: String,
    overridden: bool,
}

impl SlugField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_overridden(&self) -> bool {
        self.overridden
    }

    /// React to a name change: re-derive unless the user took over.
    pub fn name_changed(&mut self, name: &str) {
        if !self.overridden {
            self.value = slugify(name);
        }
    }

    /// React to the user typing in the slug field directly.
    pub fn manual_edit(&mut self, raw: &str) {
        self.overridden = true;
        self.value = raw.trim().to_string();
    }

    /// Hand control back to auto-derivation (e.g. a "reset" affordance).
    pub fn reset(&mut self, name: &str) {
        self.overridden = false;
        self.value = slugify(name);
    }
}
