//! Compiler configuration — runtime naming and file discovery settings
//! loaded from ~/.qtc/config.yaml.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::template::emit::{Target, DEFAULT_RUNTIME};

/// Configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Go package name of the writer runtime, as referenced in generated code.
    #[serde(default = "Config::default_runtime")]
    pub runtime: String,
    /// Import path of the writer runtime.
    #[serde(default = "Config::default_runtime_import")]
    pub runtime_import: String,
    /// Template file extension, without the dot.
    #[serde(default = "Config::default_extension")]
    pub extension: String,
    /// Prepend the generated-code notice, package clause and import.
    #[serde(default = "Config::default_header")]
    pub header: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Config {
    /// Load config from the standard path (~/.qtc/config.yaml).
    /// Returns None if the file is missing or unreadable.
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        let content = std::fs::read_to_string(path).ok()?;
        serde_yaml::from_str(&content).ok()
    }

    /// Load config from an explicit path, reporting any failure.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn target(&self) -> Target {
        Target::new(self.runtime.clone())
    }

    fn default_runtime() -> String {
        DEFAULT_RUNTIME.to_string()
    }

    fn default_runtime_import() -> String {
        "github.com/valyala/quicktemplate".to_string()
    }

    fn default_extension() -> String {
        "qtpl".to_string()
    }

    fn default_header() -> bool {
        true
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime: Self::default_runtime(),
            runtime_import: Self::default_runtime_import(),
            extension: Self::default_extension(),
            header: Self::default_header(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".qtc").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.runtime, "quicktemplate");
        assert_eq!(config.extension, "qtpl");
        assert!(config.header);
        assert_eq!(config.target(), Target::default());
    }

    #[test]
    fn partial_yaml_config() {
        let config: Config = serde_yaml::from_str("runtime: qt\n").unwrap();
        assert_eq!(config.runtime, "qt");
        assert_eq!(config.runtime_import, "github.com/valyala/quicktemplate");
        assert!(config.header);
    }

    #[test]
    fn serialize_deserialize() {
        let config = Config {
            header: false,
            ..Config::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qtc.yaml");
        std::fs::write(&path, "extension: tpl\nheader: false\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.extension, "tpl");
        assert!(!config.header);
    }

    #[test]
    fn load_from_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_from_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "header: [not a bool\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn read_error_cause_is_not_repeated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = Config::load_from(&path).unwrap_err();
        let cause = std::error::Error::source(&err).unwrap().to_string();
        let rendered = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(rendered.matches("cannot read config").count(), 1);
        assert_eq!(rendered.matches(cause.as_str()).count(), 1, "{rendered}");
    }

    #[test]
    fn load_does_not_panic() {
        // ~/.qtc/config.yaml may or may not exist on the test machine.
        let _ = Config::load();
    }
}
