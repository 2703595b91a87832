//! Core types for Switchboard — typed replacements for the untyped per-provider
//! bags the original settings layer used.
//!
//! Categories and capabilities are closed enums so missing-capability handling
//! is exhaustive at compile time instead of ad hoc optional-function checks.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Categories & capabilities
// ─────────────────────────────────────────────

/// Which kind of service a provider offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderCategory {
    /// Chat / completion backends.
    Chat,
    /// Embedding backends.
    Embedding,
    /// Text-to-speech backends.
    Speech,
    /// Speech-to-text backends.
    Transcription,
}

impl ProviderCategory {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderCategory::Chat => "Chat",
            ProviderCategory::Embedding => "Embedding",
            ProviderCategory::Speech => "Speech",
            ProviderCategory::Transcription => "Transcription",
        }
    }
}

/// Optional abilities a provider can declare beyond plain instantiation.
///
/// Absence of a capability means "not supported", never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// The provider can enumerate its models.
    ListModels,
    /// The provider can enumerate its voices (speech providers).
    ListVoices,
    /// The provider can download/load a model on demand (local servers).
    LoadModel,
}

// ─────────────────────────────────────────────
// Discovery results
// ─────────────────────────────────────────────

/// One model offered by a provider.
///
/// `provider` is always stamped with the owning provider id by the catalog,
/// overriding whatever the vendor call returned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            provider: String::new(),
            description: None,
            context_length: None,
            deprecated: false,
        }
    }
}

impl ModelInfo {
    /// Minimal model entry — name defaults to the id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            ..Default::default()
        }
    }
}

/// One voice offered by a speech provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceInfo {
    pub id: String,
    pub name: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

// ─────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────

/// Result of checking a provider's stored configuration.
///
/// Produced fresh on every validation call, never persisted. Validation
/// *always* resolves to one of these — network failures and hook panics are
/// converted into `valid: false`, never surfaced as errors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    /// Whether the configuration is usable.
    pub valid: bool,
    /// Human-readable diagnostic when invalid (may include remediation hints).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Individual field-level problems, when there are several.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    /// A passing outcome.
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
            errors: Vec::new(),
        }
    }

    /// A failing outcome with a single reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
            errors: Vec::new(),
        }
    }

    /// A failing outcome carrying several field-level errors.
    ///
    /// The summary reason is the errors joined with "; ".
    pub fn fail_all(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            reason: Some(errors.join("; ")),
            errors,
        }
    }
}

/// Progress report emitted while a local provider downloads a model.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadProgress {
    /// Model being loaded.
    pub model: String,
    /// Phase label (e.g. "pulling", "done").
    pub phase: String,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
