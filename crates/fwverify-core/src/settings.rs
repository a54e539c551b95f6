use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::backend::BackendKind;
use crate::error::Result;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendCfg,
    pub logging: LogCfg,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendCfg {
    pub kind: BackendKind,
    /// openssl executable used by the openssl backend
    pub openssl_path: PathBuf,
}

impl Default for BackendCfg {
    fn default() -> Self {
        Self {
            kind: BackendKind::Native,
            openssl_path: PathBuf::from("openssl"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogCfg {
    /// tracing filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LogCfg {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(config_path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let r = toml::from_str(raw)?;
        Ok(r)
    }
}
