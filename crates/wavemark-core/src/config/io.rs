//! YAML configuration files
//!
//! Works for any serde configuration type; the display settings in
//! [`super::SegmentDisplayConfig`] are the main user.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read and parse a YAML configuration file
pub fn read_config<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    serde_yaml::from_str(&contents).with_context(|| format!("Failed to parse config: {:?}", path))
}

/// Load configuration, falling back to defaults
///
/// A missing file is not an error. Unreadable or invalid files are logged
/// and replaced by `T::default()`.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::info!("No config at {:?}, using defaults", path);
        return T::default();
    }

    read_config(path).unwrap_or_else(|e| {
        log::warn!("{:#}, using defaults", e);
        T::default()
    })
}

/// Write configuration as YAML, creating missing parent directories
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }
    std::fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("Saved config to {:?}", path);
    Ok(())
}
