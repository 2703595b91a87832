//! Derived configured/not-configured state per provider.
//!
//! The tracker never stores configurations itself; it caches the boolean
//! result of running each provider's validation so UI surfaces can answer
//! "is this provider ready?" without re-validating on every read.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::task::JoinSet;
use tracing::debug;

use crate::table::DescriptorTable;
use crate::validator::Validator;

/// Cached configured-state map, refreshed by re-running validation.
#[derive(Clone, Default)]
pub struct ConfigurationStatusTracker {
    configured: Arc<RwLock<HashMap<String, bool>>>,
}

impl ConfigurationStatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` validated successfully on the last refresh. Unknown ids
    /// report false.
    pub fn is_configured(&self, id: &str) -> bool {
        self.configured
            .read()
            .unwrap()
            .get(id)
            .copied()
            .unwrap_or(false)
    }

    /// Current view of the whole map.
    pub fn snapshot(&self) -> HashMap<String, bool> {
        self.configured.read().unwrap().clone()
    }

    /// Re-derive the configured state for `ids` by running their validations
    /// concurrently. A validation error (unknown provider, missing config)
    /// records false rather than surfacing.
    pub async fn refresh(&self, validator: &Validator, ids: &[String]) {
        let mut set = JoinSet::new();
        for id in ids {
            let validator = validator.clone();
            let id = id.clone();
            set.spawn(async move {
                let configured = match validator.validate(&id).await {
                    Ok(outcome) => outcome.valid,
                    Err(_) => false,
                };
                (id, configured)
            });
        }

        while let Some(joined) = set.join_next().await {
            if let Ok((id, configured)) = joined {
                debug!(provider = %id, configured, "configuration state refreshed");
                self.configured.write().unwrap().insert(id, configured);
            }
        }
    }

    /// Re-derive the configured state for every provider in the table.
    ///
    /// Run on any observed credential mutation: a provider whose entry did
    /// not change can still flip state when its live endpoint does.
    pub async fn refresh_all(&self, validator: &Validator, table: &DescriptorTable) {
        let ids: Vec<String> = table.iter().map(|d| d.id.to_string()).collect();
        self.refresh(validator, &ids).await;
    }
}
