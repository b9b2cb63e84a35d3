//! Well-known storage keys.
//!
//! Kept in one place so the facade and any migration code agree on names.
//! The `legacy_` keys predate the batched settings sync and survive only as
//! an offline fallback for the two tax flags.

pub const AUTH_TOKEN: &str = "auth_token";
pub const CURRENT_USER: &str = "current_user";
pub const SELECTED_INSTITUTION: &str = "selected_institution_id";
pub const INSTITUTIONS_CACHE: &str = "institutions_cache";
pub const COMPANY_DISPLAY_NAME: &str = "company_display_name";
pub const LEGACY_PRICES_INCLUDE_TAX: &str = "legacy_prices_include_tax";
pub const LEGACY_PRICE_MODIFICATION_INCLUDES_TAX: &str = "legacy_price_modification_includes_tax";
