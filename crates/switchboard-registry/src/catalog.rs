//! Cached model and voice discovery.
//!
//! Each provider gets one [`CatalogEntry`] holding its fetched models,
//! voices, a loading flag, and the last fetch error. Failed refreshes keep
//! the previously cached lists so consumers can keep rendering stale data
//! alongside the error.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use switchboard_core::{Capability, ModelInfo, VoiceInfo};

use crate::table::DescriptorTable;
use crate::validator::SharedStore;

/// Per-provider cache state.
#[derive(Clone, Debug, Default)]
pub struct CatalogEntry {
    pub models: Vec<ModelInfo>,
    pub voices: Vec<VoiceInfo>,
    pub loading: bool,
    pub last_error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Model/voice cache over the descriptor table and credential store.
#[derive(Clone)]
pub struct ModelCatalog {
    table: Arc<DescriptorTable>,
    store: SharedStore,
    entries: Arc<RwLock<HashMap<String, CatalogEntry>>>,
}

impl ModelCatalog {
    pub fn new(table: Arc<DescriptorTable>, store: SharedStore) -> Self {
        Self {
            table,
            store,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetch and cache the model list for `id`.
    ///
    /// Providers without the `ListModels` capability yield an empty list
    /// without touching the network or recording an error. Fetch failures
    /// record `last_error`, keep the stale cache, and return empty.
    pub async fn fetch_models(&self, id: &str) -> Vec<ModelInfo> {
        let Some(descriptor) = self.table.get(id).cloned() else {
            self.record_error(id, format!("unknown provider '{id}'"));
            return Vec::new();
        };
        if !descriptor.supports(Capability::ListModels) {
            return Vec::new();
        }
        let Some(config) = self.config_for(id) else {
            self.record_error(id, format!("provider '{id}' has no stored configuration"));
            return Vec::new();
        };

        self.set_loading(id, true);
        let result = descriptor.adapter.list_models(&config).await;
        match result {
            Ok(mut models) => {
                for model in &mut models {
                    model.provider = id.to_string();
                }
                debug!(provider = id, count = models.len(), "model list refreshed");
                let mut entries = self.entries.write().unwrap();
                let entry = entries.entry(id.to_string()).or_default();
                entry.models = models.clone();
                entry.loading = false;
                entry.last_error = None;
                entry.fetched_at = Some(Utc::now());
                models
            }
            Err(e) => {
                warn!(provider = id, error = %e, "model list fetch failed");
                let mut entries = self.entries.write().unwrap();
                let entry = entries.entry(id.to_string()).or_default();
                entry.loading = false;
                entry.last_error = Some(e.to_string());
                Vec::new()
            }
        }
    }

    /// Fetch and cache the voice list for `id`. Same state rules as
    /// [`fetch_models`](Self::fetch_models), gated on `ListVoices`.
    pub async fn fetch_voices(&self, id: &str) -> Vec<VoiceInfo> {
        let Some(descriptor) = self.table.get(id).cloned() else {
            self.record_error(id, format!("unknown provider '{id}'"));
            return Vec::new();
        };
        if !descriptor.supports(Capability::ListVoices) {
            return Vec::new();
        }
        let Some(config) = self.config_for(id) else {
            self.record_error(id, format!("provider '{id}' has no stored configuration"));
            return Vec::new();
        };

        self.set_loading(id, true);
        let result = descriptor.adapter.list_voices(&config).await;
        match result {
            Ok(mut voices) => {
                for voice in &mut voices {
                    voice.provider = id.to_string();
                }
                debug!(provider = id, count = voices.len(), "voice list refreshed");
                let mut entries = self.entries.write().unwrap();
                let entry = entries.entry(id.to_string()).or_default();
                entry.voices = voices.clone();
                entry.loading = false;
                entry.last_error = None;
                entry.fetched_at = Some(Utc::now());
                voices
            }
            Err(e) => {
                warn!(provider = id, error = %e, "voice list fetch failed");
                let mut entries = self.entries.write().unwrap();
                let entry = entries.entry(id.to_string()).or_default();
                entry.loading = false;
                entry.last_error = Some(e.to_string());
                Vec::new()
            }
        }
    }

    /// Cached models for `id` (possibly stale after a failed refresh).
    pub fn models(&self, id: &str) -> Vec<ModelInfo> {
        self.entries
            .read()
            .unwrap()
            .get(id)
            .map(|e| e.models.clone())
            .unwrap_or_default()
    }

    /// Cached voices for `id`.
    pub fn voices(&self, id: &str) -> Vec<VoiceInfo> {
        self.entries
            .read()
            .unwrap()
            .get(id)
            .map(|e| e.voices.clone())
            .unwrap_or_default()
    }

    pub fn is_loading(&self, id: &str) -> bool {
        self.entries
            .read()
            .unwrap()
            .get(id)
            .map(|e| e.loading)
            .unwrap_or(false)
    }

    pub fn last_error(&self, id: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap()
            .get(id)
            .and_then(|e| e.last_error.clone())
    }

    /// When the last successful fetch for `id` completed.
    pub fn fetched_at(&self, id: &str) -> Option<DateTime<Utc>> {
        self.entries
            .read()
            .unwrap()
            .get(id)
            .and_then(|e| e.fetched_at)
    }

    /// Drop all cached state for `id`.
    pub fn clear(&self, id: &str) {
        self.entries.write().unwrap().remove(id);
    }

    fn config_for(&self, id: &str) -> Option<switchboard_core::ProviderConfig> {
        self.store.read().unwrap().get(id).cloned()
    }

    /// Starting a fetch also clears the previous error; a stale diagnostic
    /// must not stay visible while a new attempt is in flight.
    fn set_loading(&self, id: &str, loading: bool) {
        let mut entries = self.entries.write().unwrap();
        let entry = entries.entry(id.to_string()).or_default();
        entry.loading = loading;
        if loading {
            entry.last_error = None;
        }
    }

    fn record_error(&self, id: &str, message: String) {
        let mut entries = self.entries.write().unwrap();
        let entry = entries.entry(id.to_string()).or_default();
        entry.loading = false;
        entry.last_error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use switchboard_core::{
        CredentialStore, ProviderCategory, ProviderConfig, ValidationOutcome,
    };

    use crate::descriptor::{ProviderAdapter, ProviderClient, ProviderDescriptor};

    /// Adapter that succeeds on the first fetch and fails afterwards.
    struct FlakyAdapter {
        failing: AtomicBool,
    }

    impl FlakyAdapter {
        fn new() -> Self {
            Self {
                failing: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl ProviderAdapter for FlakyAdapter {
        async fn validate(&self, _config: &ProviderConfig) -> ValidationOutcome {
            ValidationOutcome::ok()
        }

        async fn list_models(&self, _config: &ProviderConfig) -> anyhow::Result<Vec<ModelInfo>> {
            if self.failing.swap(true, Ordering::SeqCst) {
                anyhow::bail!("connection refused")
            }
            Ok(vec![ModelInfo::new("m-1"), ModelInfo::new("m-2")])
        }

        async fn list_voices(&self, _config: &ProviderConfig) -> anyhow::Result<Vec<VoiceInfo>> {
            Ok(vec![VoiceInfo {
                id: "v-1".into(),
                name: "Aria".into(),
                provider: String::new(),
                languages: vec!["en".into()],
                gender: None,
                preview_url: None,
            }])
        }

        async fn create_client(
            &self,
            _id: &str,
            _config: &ProviderConfig,
        ) -> anyhow::Result<Box<dyn ProviderClient>> {
            anyhow::bail!("not used in these tests")
        }
    }

    fn descriptor(id: &'static str, capabilities: &'static [Capability]) -> ProviderDescriptor {
        ProviderDescriptor {
            id,
            category: ProviderCategory::Chat,
            name: id,
            name_key: "settings.providers.test.name",
            description: "",
            description_key: "settings.providers.test.description",
            capabilities,
            adapter: Arc::new(FlakyAdapter::new()),
        }
    }

    fn catalog(descriptors: Vec<ProviderDescriptor>, configured: &[&str]) -> ModelCatalog {
        let table = Arc::new(DescriptorTable::new(descriptors));
        let store = Arc::new(RwLock::new(CredentialStore::open(None)));
        for id in configured {
            store
                .write()
                .unwrap()
                .set(id, ProviderConfig::with_api_key("sk-1"))
                .unwrap();
        }
        ModelCatalog::new(table, store)
    }

    #[tokio::test]
    async fn test_failed_refresh_preserves_stale_models() {
        let catalog = catalog(
            vec![descriptor("alpha", &[Capability::ListModels])],
            &["alpha"],
        );

        let first = catalog.fetch_models("alpha").await;
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].provider, "alpha");
        assert!(catalog.last_error("alpha").is_none());
        assert!(catalog.fetched_at("alpha").is_some());

        let second = catalog.fetch_models("alpha").await;
        assert!(second.is_empty());
        assert_eq!(
            catalog.last_error("alpha").as_deref(),
            Some("connection refused")
        );
        // stale cache survives the failure
        assert_eq!(catalog.models("alpha").len(), 2);
        assert!(!catalog.is_loading("alpha"));
    }

    #[tokio::test]
    async fn test_missing_capability_yields_empty_without_error() {
        let catalog = catalog(vec![descriptor("alpha", &[])], &["alpha"]);
        let models = catalog.fetch_models("alpha").await;
        assert!(models.is_empty());
        assert!(catalog.last_error("alpha").is_none());
    }

    #[tokio::test]
    async fn test_missing_config_records_error() {
        let catalog = catalog(vec![descriptor("alpha", &[Capability::ListModels])], &[]);
        let models = catalog.fetch_models("alpha").await;
        assert!(models.is_empty());
        assert!(catalog
            .last_error("alpha")
            .unwrap()
            .contains("no stored configuration"));
    }

    #[tokio::test]
    async fn test_providers_keep_isolated_state() {
        let catalog = catalog(
            vec![
                descriptor("alpha", &[Capability::ListModels]),
                descriptor("beta", &[Capability::ListModels]),
            ],
            &["alpha"],
        );

        catalog.fetch_models("alpha").await;
        catalog.fetch_models("beta").await; // no config, records an error

        assert_eq!(catalog.models("alpha").len(), 2);
        assert!(catalog.last_error("alpha").is_none());
        assert!(catalog.models("beta").is_empty());
        assert!(catalog.last_error("beta").is_some());
    }

    #[tokio::test]
    async fn test_voices_tagged_with_provider_id() {
        let catalog = catalog(
            vec![descriptor("speech", &[Capability::ListVoices])],
            &["speech"],
        );
        let voices = catalog.fetch_voices("speech").await;
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].provider, "speech");
    }

    #[tokio::test]
    async fn test_fetch_start_clears_previous_error() {
        use std::sync::atomic::AtomicUsize;
        use std::time::Duration;

        /// Fails on the first call, then succeeds slowly.
        struct RecoveringAdapter {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl ProviderAdapter for RecoveringAdapter {
            async fn validate(&self, _config: &ProviderConfig) -> ValidationOutcome {
                ValidationOutcome::ok()
            }

            async fn list_models(
                &self,
                _config: &ProviderConfig,
            ) -> anyhow::Result<Vec<ModelInfo>> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    anyhow::bail!("connection refused")
                }
                tokio::time::sleep(Duration::from_millis(60)).await;
                Ok(vec![ModelInfo::new("m-1")])
            }

            async fn create_client(
                &self,
                _id: &str,
                _config: &ProviderConfig,
            ) -> anyhow::Result<Box<dyn ProviderClient>> {
                anyhow::bail!("not used in these tests")
            }
        }

        let table = Arc::new(DescriptorTable::new(vec![ProviderDescriptor {
            id: "alpha",
            category: ProviderCategory::Chat,
            name: "alpha",
            name_key: "settings.providers.test.name",
            description: "",
            description_key: "settings.providers.test.description",
            capabilities: &[Capability::ListModels],
            adapter: Arc::new(RecoveringAdapter {
                calls: AtomicUsize::new(0),
            }),
        }]));
        let store = Arc::new(RwLock::new(CredentialStore::open(None)));
        store
            .write()
            .unwrap()
            .set("alpha", ProviderConfig::with_api_key("sk-1"))
            .unwrap();
        let catalog = ModelCatalog::new(table, store);

        catalog.fetch_models("alpha").await;
        assert_eq!(
            catalog.last_error("alpha").as_deref(),
            Some("connection refused")
        );

        let refetch = {
            let catalog = catalog.clone();
            tokio::spawn(async move { catalog.fetch_models("alpha").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        // mid-flight: loading is up and the old diagnostic is gone
        assert!(catalog.is_loading("alpha"));
        assert!(catalog.last_error("alpha").is_none());

        let models = refetch.await.unwrap();
        assert_eq!(models.len(), 1);
        assert!(catalog.last_error("alpha").is_none());
        assert!(!catalog.is_loading("alpha"));
    }

    #[tokio::test]
    async fn test_clear_drops_cached_state() {
        let catalog = catalog(
            vec![descriptor("alpha", &[Capability::ListModels])],
            &["alpha"],
        );
        catalog.fetch_models("alpha").await;
        assert!(!catalog.models("alpha").is_empty());

        catalog.clear("alpha");
        assert!(catalog.models("alpha").is_empty());
        assert!(catalog.fetched_at("alpha").is_none());
    }
}
