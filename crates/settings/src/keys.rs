//! The fixed list of tracked setting keys.
//!
//! Every save sends this whole list; resolution overlays exactly these keys.
//! Adding a setting means adding a constant, a [`TrackedKey`] row, and the
//! two match arms in [`crate::bundle`].

use crate::record::SettingValueType;

// company
pub const COMPANY_NAME_EN: &str = "company_name_en";
pub const COMPANY_NAME_AR: &str = "company_name_ar";
pub const COMPANY_ACTIVITY_EN: &str = "company_activity_en";
pub const COMPANY_ACTIVITY_AR: &str = "company_activity_ar";
pub const COMPANY_PHONE: &str = "company_phone";
pub const COMPANY_EMAIL: &str = "company_email";
pub const COMPANY_ADDRESS: &str = "company_address";
pub const COMPANY_TAX_NUMBER: &str = "company_tax_number";
pub const COMPANY_REGISTRY_NUMBER: &str = "company_registry_number";
pub const COMPANY_CURRENCY: &str = "company_currency";
pub const COMPANY_LOGO_URL: &str = "company_logo_url";
pub const COMPANY_SYSTEM_TYPE: &str = "company_system_type";

// financial
pub const DEFAULT_CURRENCY: &str = "default_currency";
pub const PRICES_INCLUDE_TAX: &str = "prices_include_tax";
pub const PRICE_MODIFICATION_INCLUDES_TAX: &str = "price_modification_includes_tax";

// tax
pub const VAT_ENABLED: &str = "vat_enabled";
pub const DEFAULT_VAT_RATE: &str = "default_vat_rate";

// notifications
pub const LOW_STOCK_ALERTS: &str = "low_stock_alerts";
pub const INVOICE_NOTIFICATIONS: &str = "invoice_notifications";
pub const EMAIL_NOTIFICATIONS: &str = "email_notifications";

// security
pub const SESSION_TIMEOUT_MINUTES: &str = "session_timeout_minutes";
pub const PASSWORD_MIN_LENGTH: &str = "password_min_length";
pub const REQUIRE_PASSWORD_CHANGE: &str = "require_password_change";

// appearance
pub const THEME: &str = "theme";
pub const DEFAULT_LANG: &str = "default_lang";

/// Descriptor of one tracked setting.
pub struct TrackedKey {
    pub key: &'static str,
    pub group: &'static str,
    pub value_type: SettingValueType,
    pub label_en: &'static str,
    pub label_ar: &'static str,
}

const fn tracked(
    key: &'static str,
    group: &'static str,
    value_type: SettingValueType,
    label_en: &'static str,
    label_ar: &'static str,
) -> TrackedKey {
    TrackedKey {
        key,
        group,
        value_type,
        label_en,
        label_ar,
    }
}

/// Every setting the console tracks, in save order.
pub const TRACKED: &[TrackedKey] = &[
    tracked(COMPANY_NAME_EN, "company", SettingValueType::String, "Company name (English)", "اسم الشركة (إنجليزي)"),
    tracked(COMPANY_NAME_AR, "company", SettingValueType::String, "Company name (Arabic)", "اسم الشركة (عربي)"),
    tracked(COMPANY_ACTIVITY_EN, "company", SettingValueType::String, "Business activity (English)", "النشاط التجاري (إنجليزي)"),
    tracked(COMPANY_ACTIVITY_AR, "company", SettingValueType::String, "Business activity (Arabic)", "النشاط التجاري (عربي)"),
    tracked(COMPANY_PHONE, "company", SettingValueType::String, "Phone", "الهاتف"),
    tracked(COMPANY_EMAIL, "company", SettingValueType::String, "Email", "البريد الإلكتروني"),
    tracked(COMPANY_ADDRESS, "company", SettingValueType::Text, "Address", "العنوان"),
    tracked(COMPANY_TAX_NUMBER, "company", SettingValueType::String, "Tax number", "الرقم الضريبي"),
    tracked(COMPANY_REGISTRY_NUMBER, "company", SettingValueType::String, "Commercial registry number", "رقم السجل التجاري"),
    tracked(COMPANY_CURRENCY, "company", SettingValueType::String, "Currency", "العملة"),
    tracked(COMPANY_LOGO_URL, "company", SettingValueType::String, "Logo URL", "رابط الشعار"),
    tracked(COMPANY_SYSTEM_TYPE, "company", SettingValueType::String, "System type", "نوع النظام"),
    tracked(DEFAULT_CURRENCY, "financial", SettingValueType::String, "Default currency", "العملة الافتراضية"),
    tracked(PRICES_INCLUDE_TAX, "financial", SettingValueType::Boolean, "Prices include tax", "الأسعار شاملة الضريبة"),
    tracked(PRICE_MODIFICATION_INCLUDES_TAX, "financial", SettingValueType::Boolean, "Price modification includes tax", "تعديل السعر شامل الضريبة"),
    tracked(VAT_ENABLED, "tax", SettingValueType::Boolean, "VAT enabled", "تفعيل ضريبة القيمة المضافة"),
    tracked(DEFAULT_VAT_RATE, "tax", SettingValueType::String, "Default VAT rate", "نسبة الضريبة الافتراضية"),
    tracked(LOW_STOCK_ALERTS, "notifications", SettingValueType::Boolean, "Low stock alerts", "تنبيهات انخفاض المخزون"),
    tracked(INVOICE_NOTIFICATIONS, "notifications", SettingValueType::Boolean, "Invoice notifications", "إشعارات الفواتير"),
    tracked(EMAIL_NOTIFICATIONS, "notifications", SettingValueType::Boolean, "Email notifications", "إشعارات البريد الإلكتروني"),
    tracked(SESSION_TIMEOUT_MINUTES, "security", SettingValueType::Integer, "Session timeout (minutes)", "مهلة الجلسة (دقائق)"),
    tracked(PASSWORD_MIN_LENGTH, "security", SettingValueType::Integer, "Minimum password length", "الحد الأدنى لطول كلمة المرور"),
    tracked(REQUIRE_PASSWORD_CHANGE, "security", SettingValueType::Boolean, "Require periodic password change", "طلب تغيير كلمة المرور دورياً"),
    tracked(THEME, "appearance", SettingValueType::String, "Theme", "المظهر"),
    tracked(DEFAULT_LANG, "appearance", SettingValueType::String, "Default language", "اللغة الافتراضية"),
];
