use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Coloured status lines
    #[default]
    Human,
    /// One JSON object per result
    Json,
}

/// Settings read from `config.toml`
///
/// Every field is optional; command-line flags override them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// aura executable (`~` and `$VARS` are expanded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aura_path: Option<String>,

    /// User to build packages as
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_user: Option<String>,

    /// Remove make dependencies after building
    pub delmakedeps: bool,

    /// Keep installing after a failure
    pub keep_going: bool,

    /// Output format
    pub format: OutputFormat,
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        Ok(paths::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from an explicit path, or from the default location
    ///
    /// A missing file at the default location means defaults. A missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    log::debug!("No config at {}, using defaults", path.display());
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    /// Load config from a file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config format in {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Expanded aura path, if configured
    pub fn aura_path(&self) -> Option<PathBuf> {
        self.aura_path.as_deref().map(paths::expand)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
aura_path = "/opt/aura/bin/aura"
build_user = "builder"
delmakedeps = true
keep_going = true
format = "json"
"#,
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.aura_path(), Some(PathBuf::from("/opt/aura/bin/aura")));
        assert_eq!(config.build_user.as_deref(), Some("builder"));
        assert!(config.delmakedeps);
        assert!(config.keep_going);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_empty_config_is_default() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "delmakedeps = true\n");

        let config = Config::load_from(&path).unwrap();
        assert!(config.delmakedeps);
        assert!(!config.keep_going);
        assert_eq!(config.format, OutputFormat::Human);
        assert_eq!(config.aura_path, None);
    }

    #[test]
    fn test_invalid_config_errors() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "format = \"xml\"\n");
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid config format"));
    }

    #[test]
    fn test_unknown_key_errors() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "builduser = \"x\"\n");
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            build_user: Some("builder".to_string()),
            keep_going: true,
            ..Config::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
    }
}
