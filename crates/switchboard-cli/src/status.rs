//! `switchboard status` — show every provider and its configuration state.

use anyhow::Result;
use colored::Colorize;

use switchboard_core::utils::get_credentials_path;
use switchboard_core::ProviderCategory;
use switchboard_registry::ProviderRegistry;

const CATEGORIES: [ProviderCategory; 4] = [
    ProviderCategory::Chat,
    ProviderCategory::Embedding,
    ProviderCategory::Speech,
    ProviderCategory::Transcription,
];

/// Run the status command.
pub async fn run(registry: &ProviderRegistry) -> Result<()> {
    let credentials_path = get_credentials_path();

    println!();
    println!("{}", "Switchboard Status".cyan().bold());
    println!();

    let exists = credentials_path.exists();
    println!(
        "  {:<14} {} {}",
        "Credentials:".bold(),
        credentials_path.display(),
        if exists {
            "✓".green().to_string()
        } else {
            "(not found)".dimmed().to_string()
        }
    );

    for category in CATEGORIES {
        let providers = registry.list_by_category(category);
        if providers.is_empty() {
            continue;
        }

        println!();
        println!("  {}", format!("{}:", category.label()).bold());
        for provider in providers {
            let state = if registry.is_configured(&provider.id) {
                format!("{} configured", "✓".green())
            } else if registry.config(&provider.id).is_some() {
                format!("{}", "· incomplete".yellow())
            } else {
                format!("{}", "· not configured".dimmed())
            };
            println!("    {:<20} {}", provider.name, state);
        }
    }

    println!();
    Ok(())
}
