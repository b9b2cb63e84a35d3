//! Typed facade over the raw key/value port.
//!
//! Business code never spells storage keys or JSON-encodes by hand; it goes
//! through `ClientStore`, which owns the key names and the encoding for each
//! piece of persisted client state.

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use mizan_core::InstitutionId;

use crate::keys;
use crate::store::KeyValueStore;

/// Shared handle to the persisted client state.
#[derive(Clone)]
pub struct ClientStore {
    inner: Arc<dyn KeyValueStore>,
}

impl ClientStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    // ── auth ────────────────────────────────────────────────────────────

    pub async fn auth_token(&self) -> anyhow::Result<Option<String>> {
        self.inner.get(keys::AUTH_TOKEN).await
    }

    pub async fn set_auth_token(&self, token: &str) -> anyhow::Result<()> {
        self.inner.put(keys::AUTH_TOKEN, token).await
    }

    pub async fn clear_auth_token(&self) -> anyhow::Result<()> {
        self.inner.remove(keys::AUTH_TOKEN).await
    }

    pub async fn cached_user<T: DeserializeOwned>(&self) -> anyhow::Result<Option<T>> {
        self.get_json(keys::CURRENT_USER).await
    }

    pub async fn set_cached_user<T: Serialize>(&self, user: &T) -> anyhow::Result<()> {
        self.put_json(keys::CURRENT_USER, user).await
    }

    pub async fn clear_cached_user(&self) -> anyhow::Result<()> {
        self.inner.remove(keys::CURRENT_USER).await
    }

    // ── institution selection ───────────────────────────────────────────

    pub async fn selected_institution(&self) -> anyhow::Result<Option<InstitutionId>> {
        let raw = self.inner.get(keys::SELECTED_INSTITUTION).await?;
        match raw {
            Some(raw) => {
                let id = raw
                    .parse::<InstitutionId>()
                    .with_context(|| format!("corrupt selected institution id {raw:?}"))?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Persist the selection immediately so a reload preserves it.
    pub async fn set_selected_institution(
        &self,
        id: Option<InstitutionId>,
    ) -> anyhow::Result<()> {
        match id {
            Some(id) => {
                self.inner
                    .put(keys::SELECTED_INSTITUTION, &id.to_string())
                    .await
            }
            None => self.inner.remove(keys::SELECTED_INSTITUTION).await,
        }
    }

    // ── display caches ──────────────────────────────────────────────────

    pub async fn cached_institutions<T: DeserializeOwned>(&self) -> anyhow::Result<Option<T>> {
        self.get_json(keys::INSTITUTIONS_CACHE).await
    }

    pub async fn set_cached_institutions<T: Serialize>(&self, list: &T) -> anyhow::Result<()> {
        self.put_json(keys::INSTITUTIONS_CACHE, list).await
    }

    pub async fn company_display_name(&self) -> anyhow::Result<Option<String>> {
        self.inner.get(keys::COMPANY_DISPLAY_NAME).await
    }

    pub async fn set_company_display_name(&self, name: &str) -> anyhow::Result<()> {
        self.inner.put(keys::COMPANY_DISPLAY_NAME, name).await
    }

    // ── legacy tax flags (offline fallback) ─────────────────────────────

    pub async fn legacy_prices_include_tax(&self) -> anyhow::Result<Option<bool>> {
        self.get_legacy_flag(keys::LEGACY_PRICES_INCLUDE_TAX).await
    }

    pub async fn set_legacy_prices_include_tax(&self, value: bool) -> anyhow::Result<()> {
        self.inner
            .put(keys::LEGACY_PRICES_INCLUDE_TAX, bool_str(value))
            .await
    }

    pub async fn legacy_price_modification_includes_tax(&self) -> anyhow::Result<Option<bool>> {
        self.get_legacy_flag(keys::LEGACY_PRICE_MODIFICATION_INCLUDES_TAX)
            .await
    }

    pub async fn set_legacy_price_modification_includes_tax(
        &self,
        value: bool,
    ) -> anyhow::Result<()> {
        self.inner
            .put(keys::LEGACY_PRICE_MODIFICATION_INCLUDES_TAX, bool_str(value))
            .await
    }

    // ── helpers ─────────────────────────────────────────────────────────

    async fn get_legacy_flag(&self, key: &str) -> anyhow::Result<Option<bool>> {
        // The legacy flags were written by older builds as "true"/"1".
        Ok(self
            .inner
            .get(key)
            .await?
            .map(|raw| matches!(raw.as_str(), "true" | "1")))
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match self.inner.get(key).await? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("corrupt JSON under client state key {key:?}"))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("failed to encode client state key {key:?}"))?;
        self.inner.put(key, &raw).await
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
