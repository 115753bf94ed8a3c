//! Controller configuration schema and loader
//!
//! Configuration is stored as YAML.
//! Default location: ~/.config/dualshock/config.yaml (platform config dir)

use crate::scheduler::DEFAULT_POLL_INTERVAL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DualShockConfig {
    /// Vendor id override as a hex token (e.g. "054c")
    ///
    /// Together with `product_id`, bypasses the known-controller list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,

    /// Product id override as a hex token (e.g. "09cc")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    /// Delay between polling reads in milliseconds
    pub poll_interval_ms: u64,

    /// Start polling as soon as a device is open
    pub start_polling: bool,
}

impl Default for DualShockConfig {
    fn default() -> Self {
        Self {
            vendor_id: None,
            product_id: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            start_polling: true,
        }
    }
}

impl DualShockConfig {
    /// Vendor/product override, only when both tokens are non-empty
    pub fn device_override(&self) -> Option<(&str, &str)> {
        let vendor = self.vendor_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let product = self.product_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((vendor, product))
    }

    /// Poll interval, never zero
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// Get the default config file path
///
/// Returns: <config dir>/dualshock/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dualshock")
        .join("config.yaml")
}

/// Load configuration from a YAML file
///
/// Never fails: a missing file means defaults (autodetect, polling on),
/// and an unreadable or malformed one falls back to defaults with a warning.
pub fn load_config(path: &Path) -> DualShockConfig {
    let config = match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str::<DualShockConfig>(&contents).unwrap_or_else(|e| {
            log::warn!("config: ignoring malformed {:?}: {}", path, e);
            DualShockConfig::default()
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("config: no file at {:?}, using defaults", path);
            DualShockConfig::default()
        }
        Err(e) => {
            log::warn!("config: cannot read {:?}: {}", path, e);
            DualShockConfig::default()
        }
    };

    let device = match config.device_override() {
        Some((vendor, product)) => format!("{} {}", vendor, product),
        None => "autodetect".to_string(),
    };
    log::info!(
        "config: device {}, poll every {:?}{}",
        device,
        config.poll_interval(),
        if config.start_polling { "" } else { " (manual start)" }
    );
    config
}

/// Save configuration to a YAML file, creating parent directories
pub fn save_config(config: &DualShockConfig, path: &Path) -> anyhow::Result<()> {
    use anyhow::Context;

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {:?}", path))?;

    log::info!("config: saved to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("dualshock-config-test-{}-{}", std::process::id(), name))
            .join("config.yaml")
    }

    #[test]
    fn test_default_config() {
        let config = DualShockConfig::default();
        assert_eq!(config.device_override(), None);
        assert_eq!(config.poll_interval(), DEFAULT_POLL_INTERVAL);
        assert!(config.start_polling);
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
vendor_id: "054c"
product_id: "09cc"
poll_interval_ms: 8
start_polling: false
"#;
        let config: DualShockConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.device_override(), Some(("054c", "09cc")));
        assert_eq!(config.poll_interval(), Duration::from_millis(8));
        assert!(!config.start_polling);
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let config: DualShockConfig = serde_yaml::from_str("poll_interval_ms: 2\n").unwrap();
        assert_eq!(config.device_override(), None);
        assert_eq!(config.poll_interval_ms, 2);
        assert!(config.start_polling);
    }

    #[test]
    fn test_override_needs_both_ids() {
        let config = DualShockConfig {
            vendor_id: Some("054c".to_string()),
            product_id: Some("  ".to_string()),
            ..DualShockConfig::default()
        };
        assert_eq!(config.device_override(), None);
    }

    #[test]
    fn test_zero_interval_clamped() {
        let config = DualShockConfig {
            poll_interval_ms: 0,
            ..DualShockConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_path("missing");
        assert_eq!(load_config(&path), DualShockConfig::default());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let path = temp_path("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "poll_interval_ms: [not, a, number]\n").unwrap();

        assert_eq!(load_config(&path), DualShockConfig::default());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_unreadable_path_gives_defaults() {
        // A directory where the file should be
        let path = temp_path("unreadable");
        std::fs::create_dir_all(&path).unwrap();

        assert_eq!(load_config(&path), DualShockConfig::default());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let config = DualShockConfig {
            vendor_id: Some("054c".to_string()),
            product_id: Some("05c4".to_string()),
            poll_interval_ms: 10,
            start_polling: false,
        };

        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path), config);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
