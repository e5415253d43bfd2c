//! Dashboard configuration, read from `<config_dir>/posboard/config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine:
//!
//! ```toml
//! [api]
//! base_url = "https://dummyjson.com"
//!
//! [pages]
//! products = 12
//!
//! [mock]
//! seed = 42
//! ```
//!
//! `POSBOARD_API_URL` overrides `api.base_url`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "POSBOARD_API_URL";

/// Upstream API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the demo JSON API.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dummyjson.com".to_string(),
        }
    }
}

/// Page size of each list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSizes {
    /// Product grid.
    pub products: usize,
    /// Orders built from carts.
    pub sales: usize,
    /// Customer directory.
    pub customers: usize,
    /// Staff accounts.
    pub users: usize,
    /// Stock list.
    pub inventory: usize,
    /// Floor plan.
    pub tables: usize,
    /// Kitchen queue.
    pub kitchen: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            products: 12,
            sales: 10,
            customers: 10,
            users: 10,
            inventory: 10,
            tables: 10,
            kitchen: 10,
        }
    }
}

/// Mock data settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Fixed seed for reproducible fixtures; random when unset.
    pub seed: Option<u64>,
}

/// Session persistence settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the session file lives; the platform data dir when unset.
    pub path: Option<PathBuf>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// `[api]`
    pub api: ApiConfig,
    /// `[pages]`
    pub pages: PageSizes,
    /// `[mock]`
    pub mock: MockConfig,
    /// `[session]`
    pub session: SessionConfig,
}

impl DashboardConfig {
    /// Loads the user's configuration file, falling back to defaults when
    /// it does not exist, then applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path()?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads configuration from an explicit path. No overrides are applied.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Writes the user's configuration file, creating its directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path()?)
    }

    /// Writes configuration to an explicit path, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(write_err)?;
        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`DashboardConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            tracing::debug!(%url, "api.base_url overridden from environment");
            self.api.base_url = url;
        }
    }
}

/// `<config_dir>/posboard/config.toml`.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir.join("posboard").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.api.base_url, "https://dummyjson.com");
        assert_eq!(config.pages.products, 12);
        assert_eq!(config.pages.customers, 10);
        assert_eq!(config.mock.seed, None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[pages]\nproducts = 24\n\n[mock]\nseed = 7\n").unwrap();

        let config = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(config.pages.products, 24);
        assert_eq!(config.pages.sales, 10);
        assert_eq!(config.mock.seed, Some(7));
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = DashboardConfig::default();
        config.session.path = Some(dir.path().join("session.json"));
        config.pages.kitchen = 6;

        config.save_to(&path).unwrap();
        assert_eq!(DashboardConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[pages\nproducts = ").unwrap();
        assert!(matches!(
            DashboardConfig::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let err = DashboardConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_env_override() {
        let mut config = DashboardConfig::default();
        config.apply_overrides(|key| {
            (key == API_URL_ENV).then(|| "http://localhost:8080".to_string())
        });
        assert_eq!(config.api.base_url, "http://localhost:8080");

        config.apply_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }
}
