//! Core types and storage for Switchboard.
//!
//! This crate holds everything the registry and CLI share:
//!
//! - [`types`] — provider categories, capability set, model/voice info,
//!   validation outcomes
//! - [`error::RegistryError`] — the small set of errors that propagate to callers
//! - [`config`] — the per-provider configuration schema and the durable
//!   [`config::CredentialStore`]
//! - [`utils`] — data directory resolution

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

// Re-export key types for convenience
pub use config::{CredentialStore, ProviderConfig};
pub use error::RegistryError;
pub use types::{Capability, ModelInfo, ProviderCategory, ValidationOutcome, VoiceInfo};
