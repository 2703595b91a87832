//! Provider configuration — schema and durable storage.
//!
//! # Usage
//! ```no_run
//! use switchboard_core::config::{CredentialStore, ProviderConfig};
//!
//! let mut store = CredentialStore::open(None);
//! store.set("openai", ProviderConfig::with_api_key("sk-123")).unwrap();
//! assert!(store.get("openai").is_some());
//! ```

pub mod schema;
pub mod store;

// Re-export key types
pub use schema::ProviderConfig;
pub use store::{CredentialStore, CREDENTIALS_KEY};
