use std::path::Path;
use std::time::Duration;

pub const ASSET_ROOT_ENV: &str = "MATERIAL_PANEL_ASSETS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory (relative to the crate) or `http(s)://` base URL holding the catalogs.
    pub asset_root: String,
    pub load_timeout_ms: u64,
    pub surface_width: u32,
    pub surface_height: u32,
    /// Degrees of camera yaw per pixel of horizontal drag.
    pub orbit_sensitivity: f32,
    pub orbit_radius: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            asset_root: "data".to_string(),
            load_timeout_ms: 30_000,
            surface_width: 1000,
            surface_height: 1000,
            orbit_sensitivity: 0.5,
            orbit_radius: 5.0,
        }
    }
}

impl AppConfig {
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// First CLI argument names an optional JSON config; the asset root env var wins over both.
    pub fn from_args_and_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::args().nth(1) {
            Some(path) => {
                log::info!("Loading config from {}", path);
                Self::from_file(Path::new(&path))?
            }
            None => Self::default(),
        };
        config.apply_asset_root_override(std::env::var(ASSET_ROOT_ENV).ok());
        Ok(config)
    }

    fn apply_asset_root_override(&mut self, root: Option<String>) {
        if let Some(root) = root.filter(|value| !value.trim().is_empty()) {
            log::info!("Asset root overridden by {}: {}", ASSET_ROOT_ENV, root);
            self.asset_root = root;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut path = std::env::temp_dir();
        path.push(format!("material_panel_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "asset_root": "https://example.com/data", "load_timeout_ms": 500 }"#)
            .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.asset_root, "https://example.com/data");
        assert_eq!(config.load_timeout(), Duration::from_millis(500));
        assert_eq!(config.surface_width, 1000);
        assert_eq!(config.orbit_sensitivity, 0.5);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let mut path = std::env::temp_dir();
        path.push(format!("material_panel_bad_config_{}.json", std::process::id()));
        std::fs::write(&path, "{ asset_root: ").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_reports_read_error() {
        let path = Path::new("/nonexistent/material-panel.json");
        assert!(matches!(
            AppConfig::from_file(path),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn blank_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_asset_root_override(Some("  ".to_string()));
        assert_eq!(config.asset_root, "data");
        config.apply_asset_root_override(Some("/srv/assets".to_string()));
        assert_eq!(config.asset_root, "/srv/assets");
    }
}
