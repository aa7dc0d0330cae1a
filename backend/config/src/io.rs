//! Config file read/write and first-run generation.

use crate::schema::NapsignConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the napsign config directory.
/// Priority: `NAPSIGN_CONFIG_DIR` env > `~/.napsign/`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NAPSIGN_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".napsign");
    }
    PathBuf::from(".napsign")
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Write the default config file if none exists yet, so a fresh install has
/// a template to edit. Does nothing when the file is already present.
pub async fn ensure_config(path: &Path) -> Result<()> {
    if path.exists() {
        debug!(path = %path.display(), "Config file exists, skipping generation");
        return Ok(());
    }
    write_config(&NapsignConfig::default(), path).await?;
    info!(path = %path.display(), "Generated default config file");
    Ok(())
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<NapsignConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(NapsignConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: NapsignConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config TOML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Write config to disk atomically (write to temp file, rename).
pub async fn write_config(config: &NapsignConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    let toml = toml::to_string_pretty(config)
        .with_context(|| "Failed to serialize config to TOML")?;

    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, toml.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path).await.with_context(|| {
        format!("Failed to rename temp config to: {}", path.display())
    })?;

    Ok(())
}
