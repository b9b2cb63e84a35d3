//! Client configuration.

use mizan_core::Lang;

/// Settings-list fetches use one large page instead of per-key requests.
pub const SETTINGS_PAGE_SIZE: u32 = 500;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST service, without a trailing slash.
    pub base_url: String,
    /// Interface language; drives server-side error localization.
    pub lang: Lang,
    /// Default page size for list endpoints.
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            lang: Lang::default(),
            page_size: 15,
        }
    }
}

impl ApiConfig {
    /// Build the config from environment variables, falling back to defaults:
    /// `MIZAN_API_URL`, `MIZAN_LANG` (`en`/`ar`), `MIZAN_PAGE_SIZE`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("MIZAN_API_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(lang) = std::env::var("MIZAN_LANG") {
            if lang.eq_ignore_ascii_case("ar") {
                config.lang = Lang::Ar;
            }
        }
        if let Ok(size) = std::env::var("MIZAN_PAGE_SIZE") {
            if let Ok(size) = size.parse::<u32>() {
                if size > 0 {
                    config.page_size = size;
                }
            }
        }

        config
    }

    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }
}
