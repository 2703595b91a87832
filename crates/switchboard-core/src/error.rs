//! Error taxonomy for the registry.
//!
//! Almost everything in Switchboard degrades to state instead of erroring:
//! validation failures become [`crate::types::ValidationOutcome`]s, discovery
//! failures become a recorded last-error string, availability-check failures
//! become "unavailable". Only two things are allowed to escape to callers as
//! actual errors — a lookup of an unknown/unconfigured provider, and a client
//! instantiation failure — because the dependent workflow cannot proceed
//! without them.

use thiserror::Error;

/// Errors that propagate out of the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No descriptor with this id exists in the table.
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    /// The descriptor exists but no configuration has been stored for it.
    #[error("provider '{0}' has no stored configuration")]
    MissingConfig(String),

    /// `create_client` failed — the one capability-hook failure that surfaces.
    #[error("failed to create client for provider '{id}'")]
    Instantiation {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    /// The credential store could not be persisted.
    #[error("credential store I/O error")]
    Store(#[from] std::io::Error),
}

impl RegistryError {
    /// Whether this is one of the two not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegistryError::UnknownProvider(_) | RegistryError::MissingConfig(_)
        )
    }
}
