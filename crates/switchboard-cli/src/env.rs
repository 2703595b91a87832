//! Environment variable overrides for provider credentials.
//!
//! Overrides are overlaid on the in-memory store only; they never end up in
//! the credentials file.
//!
//! Env var format: `SWITCHBOARD_PROVIDERS__<ID>__<FIELD>` (double underscore
//! as delimiter, id uppercased with `-` mapped to `_`).
//!
//! Examples:
//! - `SWITCHBOARD_PROVIDERS__ANTHROPIC__API_KEY` → anthropic api key
//! - `SWITCHBOARD_PROVIDERS__OLLAMA__BASE_URL` → ollama endpoint
//! - `SWITCHBOARD_PROVIDERS__GROQ_WHISPER__API_KEY` → groq-whisper api key

use switchboard_core::CredentialStore;
use switchboard_registry::table::builtin_descriptors;

/// Overlay `SWITCHBOARD_PROVIDERS__*` env vars onto the store.
pub fn apply_env_overrides(store: &mut CredentialStore) {
    for descriptor in builtin_descriptors() {
        apply_provider_env(store, descriptor.id);
    }
}

fn apply_provider_env(store: &mut CredentialStore, id: &str) {
    let env_id = id.to_uppercase().replace('-', "_");
    let api_key = std::env::var(format!("SWITCHBOARD_PROVIDERS__{env_id}__API_KEY")).ok();
    let base_url = std::env::var(format!("SWITCHBOARD_PROVIDERS__{env_id}__BASE_URL")).ok();
    if api_key.is_none() && base_url.is_none() {
        return;
    }

    let mut config = store.get(id).cloned().unwrap_or_default();
    if let Some(val) = api_key {
        config.api_key = val;
    }
    if let Some(val) = base_url {
        config.base_url = Some(val);
    }
    store.overlay(id, config);
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
