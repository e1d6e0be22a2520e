//! Standard locations for moodtune files

use std::path::PathBuf;

/// Directory holding moodtune's configuration
///
/// Returns: `~/.config/moodtune` (platform config dir, home as fallback)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("moodtune")
}

/// Get the default config file path
///
/// Returns: `~/.config/moodtune/config.yaml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}
