use anyhow::{Context, Result};
use tracing::info;

use cachegate::config::CachegateConfig;
use cachegate::config_discovery::discover_config;
use std::path::PathBuf;

use crate::cli::ConfigCommand;

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Example => example(),
        ConfigCommand::Validate { path } => validate(path),
    }
}

fn example() -> Result<()> {
    println!("{}", CachegateConfig::example()?);
    Ok(())
}

fn validate(path: Option<String>) -> Result<()> {
    let path = match path {
        Some(path) => PathBuf::from(path),
        None => {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            discover_config(&current_dir)?
                .ok_or_else(|| anyhow::anyhow!("No cachegate.toml found"))?
        }
    };

    info!("Validating config file: {}", path.display());

    let config = CachegateConfig::from_file(&path)?;
    config.validate()?;

    println!("✓ Configuration file is valid: {}", path.display());
    println!("\nSummary:");
    println!("  - Manifest: {}", config.check.manifest);
    println!(
        "  - Workspace root: {}",
        config.workspace.root.as_deref().unwrap_or("(current directory)")
    );
    if config.check.jobs == 0 {
        println!("  - Jobs: auto");
    } else {
        println!("  - Jobs: {}", config.check.jobs);
    }
    println!("  - Format: {}", config.check.format);

    Ok(())
}
