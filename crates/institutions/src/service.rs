//! Institution service: directory calls plus the selected-institution state.

use mizan_client::{ApiClient, ApiResult, Paged};
use mizan_core::InstitutionId;
use mizan_events::{Notice, SharedBus, publish_or_log};
use mizan_storage::ClientStore;

use crate::model::{Institution, UpdateInstitution};

/// CRUD over `/institutions` plus durable institution selection.
#[derive(Clone)]
pub struct InstitutionService {
    api: ApiClient,
    store: ClientStore,
    bus: SharedBus,
}

impl InstitutionService {
    pub fn new(api: ApiClient, store: ClientStore, bus: SharedBus) -> Self {
        Self { api, store, bus }
    }

    /// Fetch one page of institutions and refresh the local cache.
    ///
    /// Cache writes are best-effort: a storage hiccup must not fail a
    /// successful fetch.
    pub async fn list(&self, page: u32) -> ApiResult<Paged<Institution>> {
        let per_page = self.api.config().page_size;
        let result: Paged<Institution> = self
            .api
            .get_paged("/institutions", page, per_page, &[])
            .await?;

        if let Err(err) = self.store.set_cached_institutions(&result.data).await {
            tracing::warn!(?err, "failed to cache institution list");
        }

        Ok(result)
    }

    /// The last successfully fetched institution list, if any.
    pub async fn cached_list(&self) -> anyhow::Result<Vec<Institution>> {
        Ok(self
            .store
            .cached_institutions::<Vec<Institution>>()
            .await?
            .unwrap_or_default())
    }

    pub async fn fetch(&self, id: InstitutionId) -> ApiResult<Institution> {
        self.api.get(&format!("/institutions/{id}"), &[]).await
    }

    /// Update the institution record's own fields.
    ///
    /// The cached company display name follows the confirmed record so
    /// navigation headers stay correct without a reload.
    pub async fn update(
        &self,
        id: InstitutionId,
        payload: &UpdateInstitution,
    ) -> ApiResult<Institution> {
        let updated: Institution = self
            .api
            .put(&format!("/institutions/{id}"), payload)
            .await?;

        let display_name = updated.name().get(self.api.config().lang).to_string();
        if let Err(err) = self.store.set_company_display_name(&display_name).await {
            tracing::warn!(?err, "failed to cache company display name");
        }

        Ok(updated)
    }

    /// Change the selected institution (`None` returns to system scope).
    ///
    /// The selection is persisted before the notice goes out, so a listener
    /// that reloads immediately sees the new id.
    pub async fn select(&self, id: Option<InstitutionId>) -> anyhow::Result<()> {
        self.store.set_selected_institution(id).await?;
        publish_or_log(&self.bus, Notice::InstitutionChanged { institution_id: id });
        Ok(())
    }

    pub async fn selected(&self) -> anyhow::Result<Option<InstitutionId>> {
        self.store.selected_institution().await
    }
}
