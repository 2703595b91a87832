//! Provider descriptors and the adapter trait — the seam between the generic
//! registry and vendor-specific networking code.
//!
//! A [`ProviderDescriptor`] is immutable metadata defined at process start.
//! Its [`ProviderAdapter`] is the only place the registry calls out to vendor
//! code; everything behind it is a black box with the contracts below.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use switchboard_core::types::LoadProgress;
use switchboard_core::{
    Capability, ModelInfo, ProviderCategory, ProviderConfig, ValidationOutcome, VoiceInfo,
};

/// Callback invoked with progress reports while a model is being loaded.
pub type ProgressSink = Arc<dyn Fn(LoadProgress) + Send + Sync>;

/// Localization lookup: `translate(key, fallback)` returns the resolved string
/// or the fallback when the key is unknown. Supplied externally; the registry
/// never embeds display copy logic beyond this key/fallback selection.
pub type TranslateFn = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

// ─────────────────────────────────────────────
// Adapter trait
// ─────────────────────────────────────────────

/// Behavior hooks for one provider.
///
/// Contracts:
/// - `validate` never fails — network errors and bad responses become
///   `ValidationOutcome { valid: false, .. }`.
/// - `list_models` / `list_voices` / `load_model` may fail; callers absorb
///   those failures into state. They are only invoked when the descriptor
///   declares the matching [`Capability`].
/// - `create_client` is the one hook whose failure propagates to callers.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Initial configuration for a fresh entry (e.g. the default base URL).
    fn default_options(&self) -> ProviderConfig {
        ProviderConfig::default()
    }

    /// Check whether `config` is usable. Always resolves.
    async fn validate(&self, config: &ProviderConfig) -> ValidationOutcome;

    /// Enumerate the provider's models.
    async fn list_models(&self, _config: &ProviderConfig) -> anyhow::Result<Vec<ModelInfo>> {
        Ok(Vec::new())
    }

    /// Enumerate the provider's voices.
    async fn list_voices(&self, _config: &ProviderConfig) -> anyhow::Result<Vec<VoiceInfo>> {
        Ok(Vec::new())
    }

    /// Download/load a model on the provider side, reporting progress.
    async fn load_model(
        &self,
        _config: &ProviderConfig,
        model: &str,
        _progress: ProgressSink,
    ) -> anyhow::Result<()> {
        anyhow::bail!("loading model '{model}' is not supported by this provider")
    }

    /// Environment-dependent availability predicate (platform, local hardware).
    ///
    /// Default: always available. An `Err` is treated as "not available" by
    /// the availability filter, never as a fatal registry error.
    async fn is_available(&self) -> anyhow::Result<bool> {
        Ok(true)
    }

    /// Produce an opaque client handle for this provider.
    async fn create_client(
        &self,
        id: &str,
        config: &ProviderConfig,
    ) -> anyhow::Result<Box<dyn ProviderClient>>;
}

/// Opaque client handle returned by [`ProviderAdapter::create_client`].
///
/// Callers outside this crate drive the actual vendor SDK through it; the
/// registry only guarantees identity and endpoint accessors.
pub trait ProviderClient: fmt::Debug + Send + Sync {
    /// Id of the provider this client talks to.
    fn provider_id(&self) -> &str;

    /// Resolved endpoint the client is bound to.
    fn base_url(&self) -> &str;
}

// ─────────────────────────────────────────────
// Descriptor
// ─────────────────────────────────────────────

/// Static metadata + behavior hooks for one provider.
///
/// Invariant: `id` is unique across the whole descriptor table (enforced by
/// [`crate::table::DescriptorTable::new`]).
#[derive(Clone)]
pub struct ProviderDescriptor {
    /// Unique, stable identity key across all maps.
    pub id: &'static str,
    /// Which kind of service this provider offers.
    pub category: ProviderCategory,
    /// Static display name (localization fallback).
    pub name: &'static str,
    /// Localization key for the display name.
    pub name_key: &'static str,
    /// Static description (localization fallback).
    pub description: &'static str,
    /// Localization key for the description.
    pub description_key: &'static str,
    /// Declared capability set. Absence means "not supported", not an error.
    pub capabilities: &'static [Capability],
    /// Behavior hooks.
    pub adapter: Arc<dyn ProviderAdapter>,
}

impl ProviderDescriptor {
    /// Whether this provider declares `capability`.
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// Descriptor enriched with localized display strings, as returned by
/// [`crate::registry::ProviderRegistry::metadata`].
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderMetadata {
    pub id: String,
    pub category: ProviderCategory,
    pub name: String,
    pub description: String,
    pub capabilities: Vec<Capability>,
}
