//! Bilingual (Arabic/English) locale primitives.
//!
//! Every user-facing name in the system carries both locales; which one is
//! displayed is a presentation decision, so the pair travels together through
//! the whole client core.

use serde::{Deserialize, Serialize};

/// Supported interface languages.
///
/// The language is sent to the server as both an `Accept-Language` header and
/// a `lang` query parameter so error messages come back localized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ar,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ar => "ar",
        }
    }

    /// Whether this language renders right-to-left.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Lang::Ar)
    }
}

impl core::fmt::Display for Lang {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string carried in both locales.
///
/// The wire format uses suffixed fields (`name_en` / `name_ar`), so this type
/// is usually embedded with `#[serde(flatten)]` plus a field prefix, or built
/// from the two raw fields by the owning model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Resolve the text for a language, falling back to the other locale when
    /// the requested one is empty (a common state for half-filled records).
    pub fn get(&self, lang: Lang) -> &str {
        let (primary, fallback) = match lang {
            Lang::En => (&self.en, &self.ar),
            Lang::Ar => (&self.ar, &self.en),
        };
        if primary.is_empty() { fallback } else { primary }
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.ar.is_empty()
    }
}
