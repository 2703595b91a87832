//! Per-provider configuration schema.
//!
//! Every provider stores one [`ProviderConfig`]. The shape is conventionally
//! `apiKey` / `baseUrl` / `headers`, but providers are free to carry extra
//! fields — those land in the flattened `extra` map and survive save/load
//! untouched, so the typed struct never loses data it does not understand.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Connection configuration for a single provider (API key, base URL, headers).
///
/// Deep-equality comparisons (change detection in the registry) use the derived
/// `PartialEq`, which includes the extra-field map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for authentication. Empty = not set.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    /// API base URL (absolute, scheme + host).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Extra HTTP headers to send with each request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Provider-specific fields we don't model. Preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProviderConfig {
    /// Config with only an API key set.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Config with only a base URL set.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Whether an API key is present.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Whether a non-empty base URL is present.
    pub fn has_base_url(&self) -> bool {
        self.base_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Base URL with any trailing slash removed, for path joining.
    pub fn base_url_trimmed(&self) -> Option<&str> {
        self.base_url.as_deref().map(|u| u.trim_end_matches('/'))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
