//! TOML configuration.
//!
//! Every section is optional; a missing file is only an error when the user
//! asked for one explicitly with `--config`.
//!
//! ```toml
//! [phone]
//! region = "SE"
//!
//! [output]
//! emit = "per-mimetype"   # or "per-contact"
//!
//! [logging]
//! filter = "warn"
//! ```

use anyhow::{Context, Result};
use phonenumber::country;
use serde::Deserialize;
use std::path::Path;

use crate::aggregate::EmitMode;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub phone: PhoneConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PhoneConfig {
    /// ISO 3166-1 alpha-2 region used for numbers without a country prefix.
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
        }
    }
}

fn default_region() -> String {
    "SE".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub emit: EmitMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "warn".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validated()
}

impl Config {
    /// Check and normalize values loaded from any source.
    pub fn validated(mut self) -> Result<Self> {
        let region = self.phone.region.trim().to_ascii_uppercase();
        if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
            anyhow::bail!(
                "phone.region must be a two-letter country code, got '{}'",
                self.phone.region
            );
        }
        if region.parse::<country::Id>().is_err() {
            anyhow::bail!("phone.region '{}' is not a known country code", region);
        }
        self.phone.region = region;

        if self.logging.filter.trim().is_empty() {
            anyhow::bail!("logging.filter must not be empty");
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("droid-contacts.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = load_config(&write(&tmp, "")).unwrap();
        assert_eq!(cfg.phone.region, "SE");
        assert_eq!(cfg.output.emit, EmitMode::PerMimetype);
        assert_eq!(cfg.logging.filter, "warn");
    }

    #[test]
    fn test_full_file() {
        let tmp = TempDir::new().unwrap();
        let cfg = load_config(&write(
            &tmp,
            "[phone]\nregion = \"no\"\n\n[output]\nemit = \"per-contact\"\n\n[logging]\nfilter = \"debug\"\n",
        ))
        .unwrap();
        assert_eq!(cfg.phone.region, "NO");
        assert_eq!(cfg.output.emit, EmitMode::PerContact);
        assert_eq!(cfg.logging.filter, "debug");
    }

    #[test]
    fn test_bad_region_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(&write(&tmp, "[phone]\nregion = \"SWE\"\n")).unwrap_err();
        assert!(err.to_string().contains("phone.region"));
    }

    #[test]
    fn test_unknown_region_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(&write(&tmp, "[phone]\nregion = \"XX\"\n")).unwrap_err();
        assert!(err.to_string().contains("not a known country code"));
    }

    #[test]
    fn test_unknown_region_rejected_without_file() {
        let mut cfg = Config::default();
        cfg.phone.region = "xx".to_string();
        assert!(cfg.validated().is_err());
    }

    #[test]
    fn test_unknown_emit_mode_rejected() {
        let tmp = TempDir::new().unwrap();
        assert!(load_config(&write(&tmp, "[output]\nemit = \"merged\"\n")).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/droid-contacts.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
