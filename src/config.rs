// Application configuration
//
// Optional JSON file, every field defaulted:
//
// {
//   "factors_path": "factors.csv",
//   "default_country": "India",
//   "bind_addr": "0.0.0.0:3000"
// }

use crate::factors::{EmissionFactorTable, DEFAULT_COUNTRY};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV or JSON factor table; `None` uses the built-in table.
    pub factors_path: Option<PathBuf>,

    /// Country preselected in the UIs and used by `calc` without `--country`.
    pub default_country: String,

    /// Listen address for the HTTP server.
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            factors_path: None,
            default_country: DEFAULT_COUNTRY.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Config file if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        factors_path: Option<PathBuf>,
        default_country: Option<String>,
        bind_addr: Option<String>,
    ) -> Self {
        if let Some(path) = factors_path {
            self.factors_path = Some(path);
        }
        if let Some(country) = default_country {
            self.default_country = country;
        }
        if let Some(addr) = bind_addr {
            self.bind_addr = addr;
        }
        self
    }

    /// Load the configured table and check the default country is in it.
    pub fn factor_table(&self) -> Result<EmissionFactorTable> {
        let table = match &self.factors_path {
            Some(path) => EmissionFactorTable::load(path)
                .with_context(|| format!("Failed to load factor table {}", path.display()))?,
            None => EmissionFactorTable::builtin(),
        };

        if !table.contains(&self.default_country) {
            bail!(
                "Default country '{}' is not in the factor table (available: {})",
                self.default_country,
                table.countries().join(", ")
            );
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.factors_path, None);
        assert_eq!(config.default_country, "India");
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"bind_addr": "127.0.0.1:8080"}"#).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.default_country, "India");
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let config = AppConfig::default().with_overrides(
            Some(PathBuf::from("factors.csv")),
            None,
            Some("127.0.0.1:9000".to_string()),
        );

        assert_eq!(config.factors_path, Some(PathBuf::from("factors.csv")));
        assert_eq!(config.default_country, "India");
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_builtin_factor_table() {
        let table = AppConfig::default().factor_table().unwrap();
        assert!(table.contains("India"));
    }

    #[test]
    fn test_default_country_must_exist() {
        let config = AppConfig::default().with_overrides(None, Some("Atlantis".to_string()), None);

        let err = config.factor_table().unwrap_err();
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = AppConfig::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }
}
