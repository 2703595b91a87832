//! Provider registry and lifecycle engine for Switchboard.
//!
//! # Architecture
//!
//! - [`descriptor`] — [`descriptor::ProviderDescriptor`] metadata plus the
//!   [`descriptor::ProviderAdapter`] trait every vendor integration implements
//! - [`adapters`] — the generic HTTP adapter covering OpenAI-style cloud and
//!   local endpoints
//! - [`table`] — the static built-in descriptor table
//! - [`validator`] — one-shot and debounced configuration validation
//! - [`status`] — derived configured/not-configured state per provider
//! - [`catalog`] — cached model/voice discovery with loading and error state
//! - [`availability`] — environment-dependent filtering of the descriptor table
//! - [`registry::ProviderRegistry`] — the composition root consumers talk to

pub mod adapters;
pub mod availability;
pub mod catalog;
pub mod descriptor;
pub mod registry;
pub mod status;
pub mod table;
pub mod validator;

// Re-export main types for convenience
pub use adapters::HttpAdapter;
pub use availability::filter_available;
pub use catalog::ModelCatalog;
pub use descriptor::{
    ProgressSink, ProviderAdapter, ProviderClient, ProviderDescriptor, ProviderMetadata,
    TranslateFn,
};
pub use registry::ProviderRegistry;
pub use status::ConfigurationStatusTracker;
pub use table::DescriptorTable;
pub use validator::{DebouncedValidator, Validator, DEFAULT_QUIET_PERIOD};
