use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::CachegateConfig;

pub const CONFIG_FILE_NAME: &str = "cachegate.toml";

/// Discovers Cachegate configuration by traversing up the directory tree
///
/// Falls back to `~/.config/cachegate/config.toml`.
pub fn discover_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    if let Some(found) = find_in_ancestors(start_dir) {
        return Ok(Some(found));
    }

    if let Some(home) = dirs::home_dir() {
        let global_config = home.join(".config/cachegate/config.toml");
        if global_config.exists() {
            return Ok(Some(global_config));
        }
    }

    Ok(None)
}

fn find_in_ancestors(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.exists())
}

/// Loads configuration with auto-discovery support
///
/// If `explicit_path` is provided, loads config from that path.
/// Otherwise, auto-discovers config by traversing up directory tree from cwd.
///
/// Returns Ok(None) if no config is found (neither explicit nor discovered).
pub fn load_config_with_discovery(explicit_path: Option<&str>) -> Result<Option<CachegateConfig>> {
    let config = if let Some(config_path) = explicit_path {
        CachegateConfig::from_file(config_path)?
    } else {
        let current_dir = std::env::current_dir()
            .context("Failed to get current directory for config discovery")?;

        match discover_config(&current_dir)? {
            Some(discovered_path) => CachegateConfig::from_file(&discovered_path)?,
            None => return Ok(None),
        }
    };

    config.validate()?;
    Ok(Some(config))
}
