use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

use crate::config::Config;

/// `--config` wins over the default location
fn resolve_path(config_path: Option<&str>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(PathBuf::from(path)),
        None => Config::config_file(),
    }
}

pub async fn show_config(config_path: Option<&str>) -> Result<()> {
    let path = resolve_path(config_path)?;
    let config = Config::load_from(&path)?;
    let config_str = toml::to_string_pretty(&config)?;

    println!("Current Configuration ({})", path.display());
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);

    Ok(())
}

pub async fn edit_config(config_path: Option<&str>) -> Result<()> {
    let path = resolve_path(config_path)?;

    if !path.exists() {
        Config::default().save_to(&path)?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;

    // Reject edits that no longer parse
    Config::load_from(&path)?;

    if status.success() {
        println!("✅ Configuration saved!");
    }

    Ok(())
}

pub async fn init_config(config_path: Option<&str>, force: bool) -> Result<()> {
    let path = resolve_path(config_path)?;

    if path.exists() && !force {
        println!("Configuration file already exists at: {}", path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save_to(&path)?;

    println!("✅ Configuration initialized at: {}", path.display());
    println!();
    println!("You can edit it with: sportclub config edit");

    Ok(())
}
