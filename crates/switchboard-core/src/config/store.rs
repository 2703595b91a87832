//! Durable credential store — one JSON document mapping provider id to its
//! configuration, surviving process restarts.
//!
//! On disk the mapping lives under the fixed logical key
//! `settings/credentials/providers`, so the file can later grow sibling
//! records without a migration. No schema versioning is performed; unknown
//! fields inside each config are preserved by the schema's flatten map.
//!
//! Loading is tolerant: a missing or corrupt file yields an empty store with
//! a warning, never an error. Saving happens on every mutation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::schema::ProviderConfig;

/// Logical key the provider-credentials record is namespaced under.
pub const CREDENTIALS_KEY: &str = "settings/credentials/providers";

/// Durable mapping from provider id to its configuration.
#[derive(Debug)]
pub struct CredentialStore {
    /// Backing file. `None` = ephemeral (tests, embedding without persistence).
    path: Option<PathBuf>,
    entries: HashMap<String, ProviderConfig>,
}

impl CredentialStore {
    /// Open a store, loading existing entries from `path` if present.
    ///
    /// Pass `None` for an ephemeral in-memory store.
    pub fn open(path: Option<&Path>) -> Self {
        let entries = match path {
            Some(p) => load_entries(p),
            None => HashMap::new(),
        };
        Self {
            path: path.map(PathBuf::from),
            entries,
        }
    }

    /// Read a provider's stored configuration.
    pub fn get(&self, id: &str) -> Option<&ProviderConfig> {
        self.entries.get(id)
    }

    /// Whether an entry exists for this provider.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Store a provider's configuration and persist.
    pub fn set(&mut self, id: &str, config: ProviderConfig) -> std::io::Result<()> {
        self.entries.insert(id.to_string(), config);
        self.save()
    }

    /// Create an entry seeded from `defaults` if none exists yet.
    ///
    /// Idempotent: calling twice has no additional effect, and an existing
    /// entry is never overwritten. Returns the entry either way.
    pub fn initialize(
        &mut self,
        id: &str,
        defaults: ProviderConfig,
    ) -> std::io::Result<&ProviderConfig> {
        if !self.entries.contains_key(id) {
            debug!(provider = id, "seeding credential entry from defaults");
            self.entries.insert(id.to_string(), defaults);
            self.save()?;
        }
        Ok(&self.entries[id])
    }

    /// Overlay an entry in memory only, without persisting. Used for
    /// environment-variable overrides that must not end up in the file.
    pub fn overlay(&mut self, id: &str, config: ProviderConfig) {
        self.entries.insert(id.to_string(), config);
    }

    /// Overwrite an entry entirely with `defaults` — a full replace, not a
    /// merge. Used by reset-to-defaults.
    pub fn replace(&mut self, id: &str, defaults: ProviderConfig) -> std::io::Result<()> {
        self.entries.insert(id.to_string(), defaults);
        self.save()
    }

    /// Snapshot of all entries, for deep-equality change detection.
    pub fn snapshot(&self) -> HashMap<String, ProviderConfig> {
        self.entries.clone()
    }

    /// Ids that currently have an entry.
    pub fn ids(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Persist the current entries (pretty-printed camelCase JSON).
    fn save(&self) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let document = serde_json::json!({ CREDENTIALS_KEY: &self.entries });
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(path, json)?;
        debug!(path = %path.display(), entries = self.entries.len(), "credentials saved");
        Ok(())
    }
}

/// Load entries from disk, falling back to empty on any failure.
fn load_entries(path: &Path) -> HashMap<String, ProviderConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no credential file, starting empty");
        return HashMap::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read credential file");
            return HashMap::new();
        }
    };

    let raw: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse credential file");
            return HashMap::new();
        }
    };

    match raw.get(CREDENTIALS_KEY) {
        Some(record) => match serde_json::from_value(record.clone()) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "failed to deserialize credential record");
                HashMap::new()
            }
        },
        None => HashMap::new(),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
