//! Switchboard CLI — entry point.
//!
//! # Commands
//!
//! - `switchboard status` — show every provider and its configuration state
//! - `switchboard init <id>` — seed a provider with its default options
//! - `switchboard set <id> [--api-key K] [--base-url U]` — update credentials
//! - `switchboard reset <id>` — reset a provider to defaults
//! - `switchboard validate <id>` — validate a provider's configuration
//! - `switchboard models <id>` / `voices <id>` — list discovered models/voices
//! - `switchboard pull <id> <model>` — download a model on a local provider

mod env;
mod provider_cmd;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

use switchboard_core::utils::get_credentials_path;
use switchboard_core::CredentialStore;
use switchboard_registry::ProviderRegistry;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Switchboard — AI provider registry and credential manager
#[derive(Parser)]
#[command(name = "switchboard", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every provider and its configuration state
    Status,

    /// Seed a provider with its default options (no-op if already present)
    Init {
        /// Provider id (e.g. "anthropic", "ollama")
        id: String,
    },

    /// Update a provider's stored credentials
    Set {
        /// Provider id
        id: String,

        /// API key to store
        #[arg(long)]
        api_key: Option<String>,

        /// Endpoint base URL to store
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Reset a provider's configuration to its defaults
    Reset {
        /// Provider id
        id: String,
    },

    /// Validate a provider's stored configuration
    Validate {
        /// Provider id
        id: String,
    },

    /// List a provider's models
    Models {
        /// Provider id
        id: String,

        /// Re-fetch instead of using the cached list
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },

    /// List a provider's voices
    Voices {
        /// Provider id
        id: String,

        /// Re-fetch instead of using the cached list
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },

    /// Download a model on a local provider
    Pull {
        /// Provider id
        id: String,

        /// Model name to download
        model: String,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let registry = build_registry().await;

    match cli.command {
        Commands::Status => status::run(&registry).await,
        Commands::Init { id } => provider_cmd::init(&registry, &id).await,
        Commands::Set { id, api_key, base_url } => {
            provider_cmd::set(&registry, &id, api_key, base_url).await
        }
        Commands::Reset { id } => provider_cmd::reset(&registry, &id).await,
        Commands::Validate { id } => provider_cmd::validate(&registry, &id).await,
        Commands::Models { id, refresh } => provider_cmd::models(&registry, &id, refresh).await,
        Commands::Voices { id, refresh } => provider_cmd::voices(&registry, &id, refresh).await,
        Commands::Pull { id, model } => provider_cmd::pull(&registry, &id, &model).await,
    }
}

/// Open the credential store, apply environment overrides, and bring the
/// registry's derived state up to date.
async fn build_registry() -> ProviderRegistry {
    let path = get_credentials_path();
    tracing::debug!(path = %path.display(), "opening credential store");
    let mut store = CredentialStore::open(Some(&path));
    env::apply_env_overrides(&mut store);

    let registry = ProviderRegistry::new(store);
    registry.init().await;
    registry
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("switchboard=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
