//! The resolved, strongly-typed settings bundle.

use serde_json::{Value, json};

use mizan_core::{Lang, LocalizedText};
use mizan_institutions::{Institution, SystemType, UpdateInstitution};

use crate::coerce::{coerce_bool, coerce_int, coerce_string};
use crate::keys;

/// Company identity shown on invoices, headers and print-outs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompanySettings {
    pub name: LocalizedText,
    pub activity: LocalizedText,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub tax_number: String,
    pub registry_number: String,
    pub currency: String,
    pub logo_url: String,
    pub system_type: SystemType,
}

impl CompanySettings {
    /// Overlay the institution record's own fields as the baseline.
    pub fn apply_institution_baseline(&mut self, institution: &Institution) {
        self.name = institution.name();
        self.activity = institution.activity();
        self.phone = institution.phone.clone();
        self.email = institution.email.clone();
        self.address = institution.address.clone();
        self.tax_number = institution.tax_number.clone();
        self.registry_number = institution.registry_number.clone();
        self.currency = institution.currency.clone();
        self.logo_url = institution.logo_url.clone().unwrap_or_default();
        self.system_type = institution.system_type;
    }

    /// The institution-record update issued after a successful batch save so
    /// the baseline stays consistent with what was just saved.
    pub fn to_institution_update(&self) -> UpdateInstitution {
        UpdateInstitution {
            name_en: self.name.en.clone(),
            name_ar: self.name.ar.clone(),
            activity_en: self.activity.en.clone(),
            activity_ar: self.activity.ar.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            system_type: self.system_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialSettings {
    pub default_currency: String,
    pub prices_include_tax: bool,
    pub price_modification_includes_tax: bool,
}

impl Default for FinancialSettings {
    fn default() -> Self {
        Self {
            default_currency: "SAR".to_string(),
            prices_include_tax: false,
            price_modification_includes_tax: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSettings {
    pub vat_enabled: bool,
    pub default_vat_rate: String,
}

impl Default for TaxSettings {
    fn default() -> Self {
        Self {
            vat_enabled: true,
            default_vat_rate: "15".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub low_stock_alerts: bool,
    pub invoice_notifications: bool,
    pub email_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            low_stock_alerts: true,
            invoice_notifications: true,
            email_notifications: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecuritySettings {
    pub session_timeout_minutes: i64,
    pub password_min_length: i64,
    pub require_password_change: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            session_timeout_minutes: 30,
            password_min_length: 8,
            require_password_change: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppearanceSettings {
    pub theme: String,
    pub default_lang: Lang,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            default_lang: Lang::En,
        }
    }
}

/// The whole resolved bundle, one domain per console settings tab.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsBundle {
    pub company: CompanySettings,
    pub financial: FinancialSettings,
    pub tax: TaxSettings,
    pub notifications: NotificationSettings,
    pub security: SecuritySettings,
    pub appearance: AppearanceSettings,
}

impl SettingsBundle {
    /// Apply one fetched value onto the bundle. Unknown keys are ignored —
    /// rows written by newer builds must not break older ones.
    pub fn apply(&mut self, key: &str, value: &Value) {
        match key {
            keys::COMPANY_NAME_EN => self.company.name.en = coerce_string(value),
            keys::COMPANY_NAME_AR => self.company.name.ar = coerce_string(value),
            keys::COMPANY_ACTIVITY_EN => self.company.activity.en = coerce_string(value),
            keys::COMPANY_ACTIVITY_AR => self.company.activity.ar = coerce_string(value),
            keys::COMPANY_PHONE => self.company.phone = coerce_string(value),
            keys::COMPANY_EMAIL => self.company.email = coerce_string(value),
            keys::COMPANY_ADDRESS => self.company.address = coerce_string(value),
            keys::COMPANY_TAX_NUMBER => self.company.tax_number = coerce_string(value),
            keys::COMPANY_REGISTRY_NUMBER => self.company.registry_number = coerce_string(value),
            keys::COMPANY_CURRENCY => self.company.currency = coerce_string(value),
            keys::COMPANY_LOGO_URL => self.company.logo_url = coerce_string(value),
            keys::COMPANY_SYSTEM_TYPE => {
                if let Ok(system_type) =
                    serde_json::from_value::<SystemType>(Value::String(coerce_string(value)))
                {
                    self.company.system_type = system_type;
                }
            }
            keys::DEFAULT_CURRENCY => self.financial.default_currency = coerce_string(value),
            keys::PRICES_INCLUDE_TAX => self.financial.prices_include_tax = coerce_bool(value),
            keys::PRICE_MODIFICATION_INCLUDES_TAX => {
                self.financial.price_modification_includes_tax = coerce_bool(value)
            }
            keys::VAT_ENABLED => self.tax.vat_enabled = coerce_bool(value),
            keys::DEFAULT_VAT_RATE => self.tax.default_vat_rate = coerce_string(value),
            keys::LOW_STOCK_ALERTS => self.notifications.low_stock_alerts = coerce_bool(value),
            keys::INVOICE_NOTIFICATIONS => {
                self.notifications.invoice_notifications = coerce_bool(value)
            }
            keys::EMAIL_NOTIFICATIONS => {
                self.notifications.email_notifications = coerce_bool(value)
            }
            keys::SESSION_TIMEOUT_MINUTES => {
                self.security.session_timeout_minutes =
                    coerce_int(value, self.security.session_timeout_minutes)
            }
            keys::PASSWORD_MIN_LENGTH => {
                self.security.password_min_length =
                    coerce_int(value, self.security.password_min_length)
            }
            keys::REQUIRE_PASSWORD_CHANGE => {
                self.security.require_password_change = coerce_bool(value)
            }
            keys::THEME => self.appearance.theme = coerce_string(value),
            keys::DEFAULT_LANG => {
                if coerce_string(value) == "ar" {
                    self.appearance.default_lang = Lang::Ar;
                } else {
                    self.appearance.default_lang = Lang::En;
                }
            }
            _ => {}
        }
    }

    /// Current value of a tracked key, typed for the wire.
    pub fn value_for(&self, key: &str) -> Option<Value> {
        let value = match key {
            keys::COMPANY_NAME_EN => json!(self.company.name.en),
            keys::COMPANY_NAME_AR => json!(self.company.name.ar),
            keys::COMPANY_ACTIVITY_EN => json!(self.company.activity.en),
            keys::COMPANY_ACTIVITY_AR => json!(self.company.activity.ar),
            keys::COMPANY_PHONE => json!(self.company.phone),
            keys::COMPANY_EMAIL => json!(self.company.email),
            keys::COMPANY_ADDRESS => json!(self.company.address),
            keys::COMPANY_TAX_NUMBER => json!(self.company.tax_number),
            keys::COMPANY_REGISTRY_NUMBER => json!(self.company.registry_number),
            keys::COMPANY_CURRENCY => json!(self.company.currency),
            keys::COMPANY_LOGO_URL => json!(self.company.logo_url),
            keys::COMPANY_SYSTEM_TYPE => serde_json::to_value(self.company.system_type).ok()?,
            keys::DEFAULT_CURRENCY => json!(self.financial.default_currency),
            keys::PRICES_INCLUDE_TAX => json!(self.financial.prices_include_tax),
            keys::PRICE_MODIFICATION_INCLUDES_TAX => {
                json!(self.financial.price_modification_includes_tax)
            }
            keys::VAT_ENABLED => json!(self.tax.vat_enabled),
            keys::DEFAULT_VAT_RATE => json!(self.tax.default_vat_rate),
            keys::LOW_STOCK_ALERTS => json!(self.notifications.low_stock_alerts),
            keys::INVOICE_NOTIFICATIONS => json!(self.notifications.invoice_notifications),
            keys::EMAIL_NOTIFICATIONS => json!(self.notifications.email_notifications),
            keys::SESSION_TIMEOUT_MINUTES => json!(self.security.session_timeout_minutes),
            keys::PASSWORD_MIN_LENGTH => json!(self.security.password_min_length),
            keys::REQUIRE_PASSWORD_CHANGE => json!(self.security.require_password_change),
            keys::THEME => json!(self.appearance.theme),
            keys::DEFAULT_LANG => json!(self.appearance.default_lang.as_str()),
            _ => return None,
        };
        Some(value)
    }
}
