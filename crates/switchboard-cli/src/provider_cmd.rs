//! Provider management commands: init, set, reset, validate, models, voices,
//! pull.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use switchboard_registry::ProviderRegistry;

/// `switchboard init <id>` — seed defaults if no entry exists yet.
pub async fn init(registry: &ProviderRegistry, id: &str) -> Result<()> {
    registry
        .initialize_provider(id)
        .await
        .with_context(|| format!("failed to initialize provider '{id}'"))?;
    println!("{} {id} initialized", "✓".green());
    Ok(())
}

/// `switchboard set <id>` — update stored credentials.
pub async fn set(
    registry: &ProviderRegistry,
    id: &str,
    api_key: Option<String>,
    base_url: Option<String>,
) -> Result<()> {
    if api_key.is_none() && base_url.is_none() {
        bail!("nothing to set: pass --api-key and/or --base-url");
    }

    let mut config = registry.config(id).unwrap_or_default();
    if let Some(val) = api_key {
        config.api_key = val;
    }
    if let Some(val) = base_url {
        config.base_url = Some(val);
    }
    registry
        .set_config(id, config)
        .await
        .with_context(|| format!("failed to update provider '{id}'"))?;

    let state = if registry.is_configured(id) {
        format!("{} configured", "✓".green())
    } else {
        format!("{}", "· incomplete".yellow())
    };
    println!("{id}: {state}");
    Ok(())
}

/// `switchboard reset <id>` — replace the configuration with defaults.
pub async fn reset(registry: &ProviderRegistry, id: &str) -> Result<()> {
    registry
        .reset_to_defaults(id)
        .await
        .with_context(|| format!("failed to reset provider '{id}'"))?;
    println!("{} {id} reset to defaults", "✓".green());
    Ok(())
}

/// `switchboard validate <id>` — run validation and print the outcome.
pub async fn validate(registry: &ProviderRegistry, id: &str) -> Result<()> {
    let outcome = registry
        .validate_now(id)
        .await
        .with_context(|| format!("cannot validate provider '{id}'"))?;

    if outcome.valid {
        println!("{} {id} is valid", "✓".green());
    } else {
        println!("{} {id} is not valid", "✗".red());
        if let Some(reason) = &outcome.reason {
            println!("  {}", reason.dimmed());
        }
        for error in &outcome.errors {
            println!("  - {}", error.dimmed());
        }
        std::process::exit(1);
    }
    Ok(())
}

/// `switchboard models <id>` — list models (cached or refreshed).
pub async fn models(registry: &ProviderRegistry, id: &str, refresh: bool) -> Result<()> {
    let models = if refresh || registry.models(id).is_empty() {
        registry.fetch_models(id).await
    } else {
        registry.models(id)
    };

    if let Some(error) = registry.last_error(id) {
        println!("{} {}", "!".yellow(), error.dimmed());
    }
    if models.is_empty() {
        println!("no models for {id}");
        return Ok(());
    }
    for model in models {
        let mut line = format!("  {:<40} {}", model.id, model.name.dimmed());
        if model.deprecated {
            line.push_str(&format!(" {}", "(deprecated)".red()));
        }
        println!("{line}");
    }
    if let Some(at) = registry.fetched_at(id) {
        println!("  {}", format!("fetched {}", at.to_rfc3339()).dimmed());
    }
    Ok(())
}

/// `switchboard voices <id>` — list voices (cached or refreshed).
pub async fn voices(registry: &ProviderRegistry, id: &str, refresh: bool) -> Result<()> {
    let voices = if refresh || registry.voices(id).is_empty() {
        registry.fetch_voices(id).await
    } else {
        registry.voices(id)
    };

    if let Some(error) = registry.last_error(id) {
        println!("{} {}", "!".yellow(), error.dimmed());
    }
    if voices.is_empty() {
        println!("no voices for {id}");
        return Ok(());
    }
    for voice in voices {
        let languages = voice.languages.join(", ");
        println!("  {:<28} {} {}", voice.id, voice.name, languages.dimmed());
    }
    Ok(())
}

/// `switchboard pull <id> <model>` — download a model on a local provider.
pub async fn pull(registry: &ProviderRegistry, id: &str, model: &str) -> Result<()> {
    println!("pulling {} from {id}...", model.bold());
    registry
        .load_model(
            id,
            model,
            Arc::new(|progress| {
                println!("  {:<10} {}", progress.phase.dimmed(), progress.model);
            }),
        )
        .await
        .with_context(|| format!("failed to pull '{model}' from '{id}'"))?;
    println!("{} {model} ready", "✓".green());
    Ok(())
}
