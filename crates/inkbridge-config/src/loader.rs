//! Config file loading.

use crate::devices::{DeviceProfile, builtin_profiles, find_profile};
use crate::model::BridgeConfig;
use inkbridge_errors::{ConfigError, ErrorContext, InkBridgeError, ResultExt};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Json => "json",
        }
    }
}

impl BridgeConfig {
    /// Parse and validate a document.
    pub fn from_str_as(text: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: BridgeConfig = match format {
            ConfigFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| ConfigError::parse("yaml", e))?
            }
            ConfigFormat::Json => {
                serde_json::from_str(text).map_err(|e| ConfigError::parse("json", e))?
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Load, parse and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, InkBridgeError> {
        let format = ConfigFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)
            .context(ErrorContext::new("read_config").with("path", path.display().to_string()))?;
        let config = Self::from_str_as(&text, format)?;
        info!(
            path = %path.display(),
            format = format.name(),
            devices = config.devices.len(),
            "loaded bridge config"
        );
        Ok(config)
    }

    pub fn to_string_as(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| ConfigError::parse("yaml", e))
            }
            ConfigFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| ConfigError::parse("json", e))
            }
        }
    }

    /// User profiles followed by built-ins whose names are not shadowed.
    pub fn profiles(&self) -> Result<Vec<DeviceProfile>, ConfigError> {
        let mut all = self.devices.clone();
        for builtin in builtin_profiles()? {
            if find_profile(&self.devices, &builtin.name).is_err() {
                all.push(builtin);
            } else {
                debug!(profile = %builtin.name, "built-in profile shadowed by config");
            }
        }
        Ok(all)
    }

    pub fn profile(&self, name: &str) -> Result<DeviceProfile, ConfigError> {
        let all = self.profiles()?;
        find_profile(&all, name).cloned()
    }
}
