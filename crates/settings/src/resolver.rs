//! Settings resolution and batched persistence.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;
use tokio::sync::Mutex;

use mizan_client::{ApiClient, ApiResult, Paged};
use mizan_client::config::SETTINGS_PAGE_SIZE;
use mizan_core::{InstitutionId, SettingId};
use mizan_events::{Notice, SharedBus, publish_or_log};
use mizan_institutions::InstitutionService;
use mizan_storage::ClientStore;

use crate::bundle::SettingsBundle;
use crate::keys;
use crate::record::{SettingRecord, SettingScope, SettingUpsert};

/// The scope a resolution ran under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedScope {
    #[default]
    System,
    Institution(InstitutionId),
}

impl ResolvedScope {
    fn institution_id(&self) -> Option<InstitutionId> {
        match self {
            ResolvedScope::System => None,
            ResolvedScope::Institution(id) => Some(*id),
        }
    }

    fn setting_scope(&self) -> SettingScope {
        match self {
            ResolvedScope::System => SettingScope::System,
            ResolvedScope::Institution(_) => SettingScope::Institution,
        }
    }
}

#[derive(Debug, Default)]
struct ResolverState {
    bundle: SettingsBundle,
    records: BTreeMap<String, SettingRecord>,
    scope: ResolvedScope,
}

/// Resolves and persists the settings bundle for the selected scope.
///
/// Wiring: subscribe to the notice bus and call [`SettingsService::resolve`]
/// again whenever [`Notice::InstitutionChanged`] arrives — dependent views
/// must not read settings between the notice and the finished resolution.
#[derive(Clone)]
pub struct SettingsService {
    api: ApiClient,
    institutions: InstitutionService,
    store: ClientStore,
    bus: SharedBus,
    state: Arc<Mutex<ResolverState>>,
}

impl SettingsService {
    pub fn new(
        api: ApiClient,
        institutions: InstitutionService,
        store: ClientStore,
        bus: SharedBus,
    ) -> Self {
        Self {
            api,
            institutions,
            store,
            bus,
            state: Arc::new(Mutex::new(ResolverState::default())),
        }
    }

    /// The last resolved bundle (defaults before the first resolution).
    pub async fn current(&self) -> SettingsBundle {
        self.state.lock().await.bundle.clone()
    }

    pub async fn current_scope(&self) -> ResolvedScope {
        self.state.lock().await.scope
    }

    /// Resolve the bundle for the currently selected institution (or system
    /// scope when none is selected).
    ///
    /// Never fails: a read error falls back to defaults plus the two legacy
    /// tax flags from local storage. Missing settings for a fresh
    /// institution are expected, not exceptional — nothing is surfaced to
    /// the user from here.
    pub async fn resolve(&self) -> SettingsBundle {
        let scope = match self.store.selected_institution().await {
            Ok(Some(id)) => ResolvedScope::Institution(id),
            Ok(None) => ResolvedScope::System,
            Err(err) => {
                tracing::debug!(?err, "selected institution unreadable; using system scope");
                ResolvedScope::System
            }
        };

        let mut bundle = SettingsBundle::default();

        // The institution record must land before the settings fetch: it is
        // the baseline the rows overlay.
        if let ResolvedScope::Institution(id) = scope {
            match self.institutions.fetch(id).await {
                Ok(institution) => bundle.company.apply_institution_baseline(&institution),
                Err(err) => {
                    tracing::debug!(?err, institution = %id, "institution fetch failed; falling back");
                    return self.fallback(scope, bundle).await;
                }
            }
        }

        let records = match self.fetch_settings(scope).await {
            Ok(records) => records,
            Err(err) => {
                tracing::debug!(?err, "settings fetch failed; falling back");
                return self.fallback(scope, bundle).await;
            }
        };

        let mut by_key = BTreeMap::new();
        for record in records {
            bundle.apply(&record.key, &record.value);
            by_key.insert(record.key.clone(), record);
        }

        let mut state = self.state.lock().await;
        state.bundle = bundle.clone();
        state.records = by_key;
        state.scope = scope;
        bundle
    }

    /// Persist the whole tracked list as one batch upsert.
    ///
    /// Atomic from the client's view: on failure nothing cached changes and
    /// the caller keeps the user's in-memory edits. On success the record
    /// cache is replaced from the response, the institution record is
    /// aligned with the company domain, and a [`Notice::SettingsUpdated`]
    /// goes out.
    pub async fn save(&self, bundle: &SettingsBundle) -> ApiResult<()> {
        let scope = self.state.lock().await.scope;

        let upserts = compose_upserts(bundle, scope);
        let saved: Vec<SettingRecord> = self
            .api
            .post("/settings/batch", &json!({ "settings": upserts }))
            .await?;

        {
            let mut state = self.state.lock().await;
            state.bundle = bundle.clone();
            state.records = saved
                .into_iter()
                .map(|record| (record.key.clone(), record))
                .collect();
        }

        // Keep the baseline consistent for the next resolution. The batch
        // already succeeded, so a failure here degrades the baseline only
        // until the next save; it does not fail the operation.
        if let ResolvedScope::Institution(id) = scope {
            let update = bundle.company.to_institution_update();
            if let Err(err) = self.institutions.update(id, &update).await {
                tracing::warn!(?err, institution = %id, "institution baseline update failed");
            }
        }

        // Mirror the two legacy flags so the offline fallback stays fresh.
        if let Err(err) = self
            .store
            .set_legacy_prices_include_tax(bundle.financial.prices_include_tax)
            .await
        {
            tracing::warn!(?err, "failed to mirror legacy tax flag");
        }
        if let Err(err) = self
            .store
            .set_legacy_price_modification_includes_tax(
                bundle.financial.price_modification_includes_tax,
            )
            .await
        {
            tracing::warn!(?err, "failed to mirror legacy tax flag");
        }

        publish_or_log(
            &self.bus,
            Notice::SettingsUpdated {
                institution_id: scope.institution_id(),
            },
        );
        Ok(())
    }

    /// Create one setting row outside the batch path.
    ///
    /// Used for ad-hoc rows (scripts, one-off admin edits); the bundle and
    /// record cache pick the row up immediately.
    pub async fn create_one(&self, upsert: &SettingUpsert) -> ApiResult<SettingRecord> {
        let record: SettingRecord = self.api.post("/settings", upsert).await?;
        self.absorb(&record).await;
        Ok(record)
    }

    /// Update one existing row in place.
    pub async fn update_one(
        &self,
        id: SettingId,
        upsert: &SettingUpsert,
    ) -> ApiResult<SettingRecord> {
        let record: SettingRecord = self.api.put(&format!("/settings/{id}"), upsert).await?;
        self.absorb(&record).await;
        Ok(record)
    }

    async fn absorb(&self, record: &SettingRecord) {
        let mut state = self.state.lock().await;
        state.bundle.apply(&record.key, &record.value);
        state.records.insert(record.key.clone(), record.clone());
    }

    async fn fetch_settings(&self, scope: ResolvedScope) -> ApiResult<Vec<SettingRecord>> {
        let mut query: Vec<(&str, String)> = vec![(
            "scope",
            match scope {
                ResolvedScope::System => "system".to_string(),
                ResolvedScope::Institution(_) => "institution".to_string(),
            },
        )];
        if let Some(id) = scope.institution_id() {
            query.push(("institution_id", id.to_string()));
        }

        // One large page instead of per-key requests.
        let page: Paged<SettingRecord> = self
            .api
            .get_paged("/settings", 1, SETTINGS_PAGE_SIZE, &query)
            .await?;
        Ok(page.data)
    }

    /// Read-failure path: defaults, plus the two legacy boolean flags from
    /// local storage when present.
    async fn fallback(&self, scope: ResolvedScope, mut bundle: SettingsBundle) -> SettingsBundle {
        if let Ok(Some(flag)) = self.store.legacy_prices_include_tax().await {
            bundle.financial.prices_include_tax = flag;
        }
        if let Ok(Some(flag)) = self.store.legacy_price_modification_includes_tax().await {
            bundle.financial.price_modification_includes_tax = flag;
        }

        let mut state = self.state.lock().await;
        state.bundle = bundle.clone();
        state.records.clear();
        state.scope = scope;
        bundle
    }
}

fn compose_upserts(bundle: &SettingsBundle, scope: ResolvedScope) -> Vec<SettingUpsert> {
    keys::TRACKED
        .iter()
        .filter_map(|tracked| {
            let value = bundle.value_for(tracked.key)?;
            Some(SettingUpsert {
                key: tracked.key.to_string(),
                value,
                value_type: tracked.value_type,
                group: tracked.group.to_string(),
                scope: scope.setting_scope(),
                institution_id: scope.institution_id(),
                label_en: tracked.label_en.to_string(),
                label_ar: tracked.label_ar.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mizan_client::{ApiConfig, Method, MockTransport, StaticToken};
    use mizan_events::{InMemoryNoticeBus, NoticeBus};
    use mizan_storage::MemoryStore;

    struct Fixture {
        service: SettingsService,
        transport: Arc<MockTransport>,
        store: ClientStore,
        bus: SharedBus,
    }

    fn fixture() -> Fixture {
        let transport = Arc::new(MockTransport::new());
        let api = ApiClient::new(
            transport.clone(),
            Arc::new(StaticToken("tok".to_string())),
            ApiConfig::default(),
        );
        let store = ClientStore::new(Arc::new(MemoryStore::new()));
        let bus: SharedBus = Arc::new(InMemoryNoticeBus::new());
        let institutions = InstitutionService::new(api.clone(), store.clone(), bus.clone());
        let service = SettingsService::new(api, institutions, store.clone(), bus.clone());
        Fixture {
            service,
            transport,
            store,
            bus,
        }
    }

    fn institution_json() -> serde_json::Value {
        json!({
            "id": 7,
            "name_en": "Acme",
            "name_ar": "أكمي",
            "activity_en": "Retail trade",
            "activity_ar": "تجارة التجزئة",
            "phone": "0500000000",
            "email": "info@acme.example",
            "tax_number": "310000000000003",
            "system_type": "retail",
            "currency": "SAR"
        })
    }

    fn setting_row(id: i64, key: &str, value: serde_json::Value) -> serde_json::Value {
        json!({
            "id": id,
            "key": key,
            "value": value,
            "value_type": "string",
            "group": "company",
            "scope": "institution",
            "institution_id": 7
        })
    }

    #[tokio::test]
    async fn system_scope_resolves_without_institution_fetch() {
        let f = fixture();
        f.transport.enqueue_data(json!({ "data": [] }));

        let bundle = f.service.resolve().await;

        assert_eq!(bundle.tax.default_vat_rate, "15");
        let requests = f.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/settings");
        assert_eq!(requests[0].query_param("scope"), Some("system"));
        assert_eq!(requests[0].query_param("institution_id"), None);
    }

    #[tokio::test]
    async fn selecting_institution_seven_fetches_in_order_and_uses_baseline() {
        let f = fixture();
        f.store
            .set_selected_institution(Some(InstitutionId::new(7)))
            .await
            .unwrap();

        f.transport.enqueue_data(institution_json());
        f.transport.enqueue_data(json!({ "data": [] }));

        let bundle = f.service.resolve().await;

        // Institution fetch strictly precedes the settings fetch.
        let requests = f.transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].path, "/institutions/7");
        assert_eq!(requests[1].path, "/settings");
        assert_eq!(requests[1].query_param("scope"), Some("institution"));
        assert_eq!(requests[1].query_param("institution_id"), Some("7"));
        assert_eq!(
            requests[1].query_param("per_page"),
            Some(SETTINGS_PAGE_SIZE.to_string().as_str())
        );

        // Empty settings list: company from the institution's raw fields,
        // tax from hard-coded defaults.
        assert_eq!(bundle.company.name.en, "Acme");
        assert_eq!(bundle.tax.default_vat_rate, "15");
    }

    #[tokio::test]
    async fn setting_row_overrides_institution_baseline() {
        let f = fixture();
        f.store
            .set_selected_institution(Some(InstitutionId::new(7)))
            .await
            .unwrap();

        f.transport.enqueue_data(institution_json());
        f.transport.enqueue_data(json!({
            "data": [setting_row(1, keys::COMPANY_NAME_EN, json!("Acme Co"))]
        }));

        let bundle = f.service.resolve().await;
        assert_eq!(bundle.company.name.en, "Acme Co");
        // Untouched company fields keep the baseline.
        assert_eq!(bundle.company.phone, "0500000000");
    }

    #[tokio::test]
    async fn read_failure_falls_back_to_legacy_flags() {
        let f = fixture();
        f.store.set_legacy_prices_include_tax(true).await.unwrap();
        f.transport.enqueue_network_error("connection refused");

        let bundle = f.service.resolve().await;

        assert!(bundle.financial.prices_include_tax);
        assert!(!bundle.financial.price_modification_includes_tax);
        // Other domains silently keep their defaults.
        assert_eq!(bundle.security.session_timeout_minutes, 30);
    }

    #[tokio::test]
    async fn failed_batch_save_leaves_cached_state_untouched() {
        let f = fixture();
        f.transport.enqueue_data(json!({ "data": [] }));
        let resolved = f.service.resolve().await;

        let mut edited = resolved.clone();
        edited.tax.default_vat_rate = "5".to_string();

        f.transport
            .enqueue_rejection("The given data was invalid.", json!({}));
        let err = f.service.save(&edited).await.unwrap_err();
        assert!(!err.is_retryable());

        // The cached bundle still reflects the pre-save state; the caller
        // keeps `edited` in memory so the user loses nothing.
        assert_eq!(f.service.current().await, resolved);
    }

    #[tokio::test]
    async fn successful_save_batches_updates_baseline_and_notifies() {
        let f = fixture();
        f.store
            .set_selected_institution(Some(InstitutionId::new(7)))
            .await
            .unwrap();
        f.transport.enqueue_data(institution_json());
        f.transport.enqueue_data(json!({ "data": [] }));
        let resolved = f.service.resolve().await;

        let sub = f.bus.subscribe();
        let mut edited = resolved.clone();
        edited.financial.prices_include_tax = true;

        // Batch response, then the institution baseline update response.
        f.transport.enqueue_data(json!([
            setting_row(1, keys::PRICES_INCLUDE_TAX, json!(true))
        ]));
        f.transport.enqueue_data(institution_json());

        f.service.save(&edited).await.unwrap();

        let requests = f.transport.requests();
        let batch = &requests[2];
        assert_eq!(batch.path, "/settings/batch");
        assert_eq!(batch.method, Method::Post);
        let sent = batch.body.as_ref().unwrap()["settings"].as_array().unwrap();
        // The entire tracked list goes out, not a diff.
        assert_eq!(sent.len(), keys::TRACKED.len());
        assert!(sent.iter().all(|s| s["scope"] == "institution"));

        let baseline_update = &requests[3];
        assert_eq!(baseline_update.path, "/institutions/7");
        assert_eq!(baseline_update.method, Method::Put);

        assert_eq!(f.service.current().await, edited);
        assert_eq!(
            f.store.legacy_prices_include_tax().await.unwrap(),
            Some(true)
        );
        assert_eq!(
            sub.try_recv().unwrap(),
            Notice::SettingsUpdated {
                institution_id: Some(InstitutionId::new(7))
            }
        );
    }

    #[tokio::test]
    async fn single_row_update_refreshes_bundle_and_cache() {
        let f = fixture();
        f.transport.enqueue_data(json!({ "data": [] }));
        f.service.resolve().await;

        f.transport.enqueue_data(setting_row(3, keys::THEME, json!("dark")));
        let record = f
            .service
            .update_one(
                SettingId::new(3),
                &SettingUpsert {
                    key: keys::THEME.to_string(),
                    value: json!("dark"),
                    value_type: crate::record::SettingValueType::String,
                    group: "appearance".to_string(),
                    scope: SettingScope::System,
                    institution_id: None,
                    label_en: "Theme".to_string(),
                    label_ar: "المظهر".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(record.key, keys::THEME);
        assert_eq!(f.transport.requests()[1].path, "/settings/3");
        assert_eq!(f.transport.requests()[1].method, Method::Put);
        assert_eq!(f.service.current().await.appearance.theme, "dark");
    }

    #[tokio::test]
    async fn institution_change_notice_triggers_full_re_resolution() {
        let f = fixture();
        let sub = f.bus.subscribe();

        // No selection yet: system scope.
        f.transport.enqueue_data(json!({ "data": [] }));
        f.service.resolve().await;
        assert_eq!(f.service.current_scope().await, ResolvedScope::System);

        // The institution service persists the id, then notifies.
        let institutions = InstitutionService::new(
            ApiClient::new(
                f.transport.clone(),
                Arc::new(StaticToken("tok".to_string())),
                ApiConfig::default(),
            ),
            f.store.clone(),
            f.bus.clone(),
        );
        institutions
            .select(Some(InstitutionId::new(7)))
            .await
            .unwrap();
        assert_eq!(
            sub.try_recv().unwrap(),
            Notice::InstitutionChanged {
                institution_id: Some(InstitutionId::new(7))
            }
        );

        // The listener reacts by re-resolving; the new scope sticks.
        f.transport.enqueue_data(institution_json());
        f.transport.enqueue_data(json!({ "data": [] }));
        let bundle = f.service.resolve().await;

        assert_eq!(
            f.service.current_scope().await,
            ResolvedScope::Institution(InstitutionId::new(7))
        );
        assert_eq!(bundle.company.name.en, "Acme");
    }
}
