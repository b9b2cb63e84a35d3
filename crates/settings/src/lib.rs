//! `mizan-settings` — institution-scoped settings resolution and persistence.
//!
//! The console shows one consistent settings bundle for "the currently
//! selected institution" (or system-wide when none is selected). Resolution
//! overlays three layers: hard-coded defaults ← the institution record's own
//! fields ← matching setting rows, fetched in a single large-page call.
//! Saves go out as one batch upsert; the batch is atomic from the client's
//! point of view.

pub mod bundle;
pub mod coerce;
pub mod keys;
pub mod record;
pub mod resolver;

pub use bundle::{
    AppearanceSettings, CompanySettings, FinancialSettings, NotificationSettings,
    SecuritySettings, SettingsBundle, TaxSettings,
};
pub use coerce::{coerce_bool, coerce_int, coerce_string};
pub use record::{SettingRecord, SettingScope, SettingUpsert, SettingValueType};
pub use resolver::{ResolvedScope, SettingsService};
