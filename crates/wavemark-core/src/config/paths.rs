//! Path utilities for wavemark configuration files

use std::path::PathBuf;

/// Config file name inside the config directory
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Get the default config directory
///
/// Returns: `~/.config/wavemark` (falls back to the home directory, then `.`)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("wavemark")
}

/// Get the default config file path
///
/// Returns: `~/.config/wavemark/config.yaml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILENAME)
}
