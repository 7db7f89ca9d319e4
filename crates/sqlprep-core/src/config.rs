//! Configuration schema (sqlprep.toml)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use crate::dialect::Dialect;

/// DDL files processed when the config does not list any
pub const DEFAULT_FILES: [&str; 4] = ["ddl.sql", "ddl_postgres.sql", "ddl_sqlite.sql", "ddl_oracle.sql"];

/// Default directory holding the DDL files
pub const DEFAULT_BASE_DIR: &str = "src/main/resources/sql";

/// Seed split settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// First occurrence of this text starts the seed data
    pub marker: String,

    /// Substring of the DDL file name replaced to derive the seed file name
    pub rename_from: String,

    /// Replacement for `rename_from`
    pub rename_to: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            marker: "INSERT INTO ce_config".to_string(),
            rename_from: "ddl".to_string(),
            rename_to: "seed".to_string(),
        }
    }
}

impl SplitConfig {
    /// Derive the seed file name (every occurrence of `rename_from` is replaced)
    pub fn seed_file_name(&self, file: &str) -> String {
        if self.rename_from.is_empty() {
            return file.to_string();
        }
        file.replace(&self.rename_from, &self.rename_to)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the DDL files
    pub base_dir: PathBuf,

    /// DDL file names, relative to `base_dir`, processed in order
    pub files: Vec<String>,

    /// Seed split settings
    pub split: SplitConfig,

    /// Per-file dialect overrides (file name -> dialect)
    pub dialects: BTreeMap<String, Dialect>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
            split: SplitConfig::default(),
            dialects: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    ///
    /// A relative `base_dir` is resolved against the directory holding the file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config = Self::from_toml(&contents)?;

        if config.base_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.base_dir = parent.join(&config.base_dir);
            }
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Reject settings the passes cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.split.marker.is_empty() {
            return Err(ConfigError::Invalid("split.marker must not be empty".to_string()));
        }

        if let Some(file) = self.files.iter().find(|f| Path::new(f).is_absolute()) {
            return Err(ConfigError::Invalid(format!(
                "file '{}' must be relative to base_dir",
                file
            )));
        }

        Ok(())
    }

    /// Dialect for a file: explicit override first, then name-based detection
    pub fn dialect_for(&self, file: &str) -> Option<Dialect> {
        self.dialects
            .get(file)
            .copied()
            .or_else(|| Dialect::from_file_name(file))
    }

    /// Full path of a configured file
    pub fn file_path(&self, file: &str) -> PathBuf {
        self.base_dir.join(file)
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.files, DEFAULT_FILES);
        assert_eq!(config.split.marker, "INSERT INTO ce_config");
        assert_eq!(config.base_dir, PathBuf::from(DEFAULT_BASE_DIR));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            files = ["ddl_sqlite.sql"]

            [split]
            marker = "INSERT INTO ce_seed"
            "#,
        )
        .unwrap();

        assert_eq!(config.files, vec!["ddl_sqlite.sql".to_string()]);
        assert_eq!(config.split.marker, "INSERT INTO ce_seed");
        assert_eq!(config.split.rename_to, "seed");
        assert_eq!(config.base_dir, PathBuf::from(DEFAULT_BASE_DIR));
    }

    #[test]
    fn dialect_override_wins() {
        let config = Config::from_toml(
            r#"
            [dialects]
            "ddl.sql" = "sqlite"
            "#,
        )
        .unwrap();

        assert_eq!(config.dialect_for("ddl.sql"), Some(Dialect::Sqlite));
        assert_eq!(config.dialect_for("ddl_oracle.sql"), Some(Dialect::Oracle));
        assert_eq!(config.dialect_for("other.sql"), None);
    }

    #[test]
    fn seed_file_name_replaces_every_occurrence() {
        let split = SplitConfig::default();
        assert_eq!(split.seed_file_name("ddl_sqlite.sql"), "seed_sqlite.sql");
        assert_eq!(split.seed_file_name("ddl.sql"), "seed.sql");
        assert_eq!(split.seed_file_name("ddl_ddl.sql"), "seed_seed.sql");
    }

    #[test]
    fn empty_marker_is_rejected() {
        let err = Config::from_toml("[split]\nmarker = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut config = Config::default();
        config.dialects.insert("ddl.sql".to_string(), Dialect::Postgres);

        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn relative_base_dir_resolves_against_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqlprep.toml");
        std::fs::write(&path, "base_dir = \"sql\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.base_dir, dir.path().join("sql"));
    }
}
