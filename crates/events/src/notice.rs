//! The notices that flow over the bus.

use serde::{Deserialize, Serialize};

use mizan_core::InstitutionId;

/// Cross-component change notice.
///
/// Listeners must treat a notice as "re-read what you depend on", not as a
/// data carrier: payloads identify *what* changed, never carry the new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The selected institution changed (`None` means back to system scope).
    ///
    /// Settings-dependent views must wait for re-resolution before reading.
    InstitutionChanged {
        institution_id: Option<InstitutionId>,
    },

    /// A settings batch was saved successfully for the given scope.
    SettingsUpdated {
        institution_id: Option<InstitutionId>,
    },

    /// The session was established or cleared (login/logout).
    SessionChanged,
}
