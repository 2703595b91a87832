//! The provider registry — composition root over the descriptor table,
//! credential store, validators, status tracker, and model catalog.
//!
//! Consumers hold one [`ProviderRegistry`] and drive everything through it.
//! Only two failure classes propagate out of the registry: unknown/missing
//! lookups and client instantiation failures. Every other fault (network,
//! bad responses, invalid credentials) degrades into queryable state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use switchboard_core::{
    Capability, CredentialStore, ModelInfo, ProviderCategory, ProviderConfig, RegistryError,
    ValidationOutcome, VoiceInfo,
};

use crate::availability::filter_available;
use crate::catalog::ModelCatalog;
use crate::descriptor::{
    ProgressSink, ProviderClient, ProviderDescriptor, ProviderMetadata, TranslateFn,
};
use crate::status::ConfigurationStatusTracker;
use crate::table::DescriptorTable;
use crate::validator::{DebouncedValidator, SharedStore, Validator, DEFAULT_QUIET_PERIOD};

pub struct ProviderRegistry {
    table: Arc<DescriptorTable>,
    store: SharedStore,
    validator: Validator,
    debounced: DebouncedValidator,
    tracker: ConfigurationStatusTracker,
    catalog: ModelCatalog,
    /// Store snapshot from the last sync, used to detect which providers
    /// actually changed. Deep equality over the full configuration value,
    /// unknown fields included.
    snapshots: Arc<RwLock<HashMap<String, ProviderConfig>>>,
    translate: Option<TranslateFn>,
}

impl ProviderRegistry {
    pub fn new(store: CredentialStore) -> Self {
        Self::with_table(Arc::new(DescriptorTable::builtin()), store, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_table(
        table: Arc<DescriptorTable>,
        store: CredentialStore,
        quiet_period: Duration,
    ) -> Self {
        let store: SharedStore = Arc::new(RwLock::new(store));
        let validator = Validator::new(table.clone(), store.clone());
        Self {
            debounced: DebouncedValidator::new(validator.clone(), quiet_period),
            tracker: ConfigurationStatusTracker::new(),
            catalog: ModelCatalog::new(table.clone(), store.clone()),
            snapshots: Arc::new(RwLock::new(HashMap::new())),
            translate: None,
            table,
            store,
            validator,
        }
    }

    /// Install a localization lookup for display names and descriptions.
    pub fn with_translator(mut self, translate: TranslateFn) -> Self {
        self.translate = Some(translate);
        self
    }

    // ─────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────

    /// First synchronization after construction. Safe to call again; it is
    /// the same operation as [`sync`](Self::sync).
    pub async fn init(&self) {
        info!(providers = self.table.len(), "initializing provider registry");
        self.sync().await;
    }

    /// Reconcile derived state with the credential store.
    ///
    /// On any observed store mutation the configured state of *every*
    /// provider is re-derived (an unchanged entry can still flip when its
    /// live endpoint does). Model/voice refetching stays scoped to the ids
    /// whose configuration actually changed, per the deep-equality snapshot
    /// diff.
    pub async fn sync(&self) {
        let current = self.store.read().unwrap().snapshot();
        let changed: Vec<String> = {
            let previous = self.snapshots.read().unwrap();
            self.table
                .iter()
                .map(|d| d.id.to_string())
                .filter(|id| previous.get(id) != current.get(id))
                .collect()
        };
        if changed.is_empty() {
            return;
        }
        debug!(changed = changed.len(), "syncing provider configurations");

        self.tracker.refresh_all(&self.validator, &self.table).await;

        for id in &changed {
            if !self.tracker.is_configured(id) {
                continue;
            }
            let Some(descriptor) = self.table.get(id) else {
                continue;
            };
            if descriptor.supports(Capability::ListModels) {
                self.catalog.fetch_models(id).await;
            }
            if descriptor.supports(Capability::ListVoices) {
                self.catalog.fetch_voices(id).await;
            }
        }

        *self.snapshots.write().unwrap() = current;
    }

    // ─────────────────────────────────────────────
    // Metadata and listings
    // ─────────────────────────────────────────────

    /// Localized metadata for `id`. Falls back to the static name and
    /// description when no translator is installed or the key is unknown.
    pub fn metadata(&self, id: &str) -> Result<ProviderMetadata, RegistryError> {
        let descriptor = self
            .table
            .get(id)
            .ok_or_else(|| RegistryError::UnknownProvider(id.to_string()))?;
        Ok(self.metadata_for(descriptor))
    }

    fn metadata_for(&self, descriptor: &ProviderDescriptor) -> ProviderMetadata {
        let resolve = |key: &str, fallback: &str| match &self.translate {
            Some(translate) => translate(key, fallback),
            None => fallback.to_string(),
        };
        ProviderMetadata {
            id: descriptor.id.to_string(),
            category: descriptor.category,
            name: resolve(descriptor.name_key, descriptor.name),
            description: resolve(descriptor.description_key, descriptor.description),
            capabilities: descriptor.capabilities.to_vec(),
        }
    }

    /// All providers in `category`, in table order.
    pub fn list_by_category(&self, category: ProviderCategory) -> Vec<ProviderMetadata> {
        self.table
            .by_category(category)
            .iter()
            .map(|d| self.metadata_for(d))
            .collect()
    }

    /// Providers in `category` whose availability predicate holds.
    pub async fn list_available(&self, category: ProviderCategory) -> Vec<ProviderMetadata> {
        filter_available(&self.table.by_category(category))
            .await
            .iter()
            .map(|d| self.metadata_for(d))
            .collect()
    }

    /// Providers in `category` that are currently configured.
    pub fn list_configured(&self, category: ProviderCategory) -> Vec<ProviderMetadata> {
        self.table
            .by_category(category)
            .iter()
            .filter(|d| self.tracker.is_configured(d.id))
            .map(|d| self.metadata_for(d))
            .collect()
    }

    // ─────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────

    /// Seed `id` with its adapter's default options if no entry exists yet.
    /// Idempotent: an existing entry is never touched.
    pub async fn initialize_provider(&self, id: &str) -> Result<(), RegistryError> {
        let descriptor = self
            .table
            .get(id)
            .ok_or_else(|| RegistryError::UnknownProvider(id.to_string()))?;
        let seeded = {
            let mut store = self.store.write().unwrap();
            let existed = store.contains(id);
            if !existed {
                store.initialize(id, descriptor.adapter.default_options())?;
            }
            !existed
        };
        if seeded {
            info!(provider = id, "seeded default configuration");
            self.sync().await;
        }
        Ok(())
    }

    /// Stored configuration for `id`, if any.
    pub fn config(&self, id: &str) -> Option<ProviderConfig> {
        self.store.read().unwrap().get(id).cloned()
    }

    /// Persist `config` for `id` and reconcile derived state.
    pub async fn set_config(&self, id: &str, config: ProviderConfig) -> Result<(), RegistryError> {
        if self.table.get(id).is_none() {
            return Err(RegistryError::UnknownProvider(id.to_string()));
        }
        self.store.write().unwrap().set(id, config)?;
        self.sync().await;
        Ok(())
    }

    /// Replace `id`'s configuration wholesale with the adapter defaults.
    ///
    /// A full replacement, not a merge: custom fields the defaults do not
    /// mention are gone afterwards. Cached validation and catalog state for
    /// the provider is dropped too.
    pub async fn reset_to_defaults(&self, id: &str) -> Result<(), RegistryError> {
        let descriptor = self
            .table
            .get(id)
            .ok_or_else(|| RegistryError::UnknownProvider(id.to_string()))?;
        info!(provider = id, "resetting configuration to defaults");
        self.store
            .write()
            .unwrap()
            .replace(id, descriptor.adapter.default_options())?;
        self.debounced.clear(id);
        self.catalog.clear(id);
        self.sync().await;
        Ok(())
    }

    // ─────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────

    /// Queue a debounced validation of `id`.
    pub fn request_validation(&self, id: &str) -> tokio::task::JoinHandle<()> {
        self.debounced.request(id)
    }

    /// Validate `id` immediately.
    pub async fn validate_now(&self, id: &str) -> Result<ValidationOutcome, RegistryError> {
        self.debounced.validate_now(id).await
    }

    pub fn is_validating(&self, id: &str) -> bool {
        self.debounced.is_validating(id)
    }

    pub fn last_outcome(&self, id: &str) -> Option<ValidationOutcome> {
        self.debounced.last_outcome(id)
    }

    /// Derived configured state from the last sync/refresh.
    pub fn is_configured(&self, id: &str) -> bool {
        self.tracker.is_configured(id)
    }

    // ─────────────────────────────────────────────
    // Models and voices
    // ─────────────────────────────────────────────

    pub async fn fetch_models(&self, id: &str) -> Vec<ModelInfo> {
        self.catalog.fetch_models(id).await
    }

    pub fn models(&self, id: &str) -> Vec<ModelInfo> {
        self.catalog.models(id)
    }

    pub async fn fetch_voices(&self, id: &str) -> Vec<VoiceInfo> {
        self.catalog.fetch_voices(id).await
    }

    pub fn voices(&self, id: &str) -> Vec<VoiceInfo> {
        self.catalog.voices(id)
    }

    pub fn is_loading(&self, id: &str) -> bool {
        self.catalog.is_loading(id)
    }

    pub fn last_error(&self, id: &str) -> Option<String> {
        self.catalog.last_error(id)
    }

    pub fn fetched_at(&self, id: &str) -> Option<DateTime<Utc>> {
        self.catalog.fetched_at(id)
    }

    /// Load/download a model on the provider side, reporting progress through
    /// `progress`.
    pub async fn load_model(
        &self,
        id: &str,
        model: &str,
        progress: ProgressSink,
    ) -> anyhow::Result<()> {
        let descriptor = self
            .table
            .get(id)
            .ok_or_else(|| RegistryError::UnknownProvider(id.to_string()))?;
        let config = self
            .config(id)
            .ok_or_else(|| RegistryError::MissingConfig(id.to_string()))?;
        descriptor.adapter.load_model(&config, model, progress).await
    }

    // ─────────────────────────────────────────────
    // Instantiation
    // ─────────────────────────────────────────────

    /// Create a client for `id` from its stored configuration.
    ///
    /// This is the one operation whose adapter failure propagates to the
    /// caller instead of degrading into state.
    pub async fn create_instance(&self, id: &str) -> Result<Box<dyn ProviderClient>, RegistryError> {
        let descriptor = self
            .table
            .get(id)
            .ok_or_else(|| RegistryError::UnknownProvider(id.to_string()))?;
        let config = self
            .config(id)
            .ok_or_else(|| RegistryError::MissingConfig(id.to_string()))?;

        descriptor
            .adapter
            .create_client(id, &config)
            .await
            .map_err(|source| {
                error!(provider = id, error = %source, "client instantiation failed");
                RegistryError::Instantiation {
                    id: id.to_string(),
                    source,
                }
            })
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
