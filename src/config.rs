use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Name of the connection string the storage uses.
pub const DEFAULT_CONNECTION: &str = "DefaultConnection";

/// Contents of the settings file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    #[serde(default)]
    pub connection_strings: HashMap<String, String>,

    /// Seed fixture to use instead of the built-in one.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("can't read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Configuration(format!("can't parse {}: {}", path.display(), e)))
    }

    /// Settings holding a single `DefaultConnection`.
    pub fn with_connection(url: &str) -> Self {
        Self {
            connection_strings: HashMap::from([(DEFAULT_CONNECTION.to_string(), url.to_string())]),
            seed_file: None,
        }
    }

    pub fn connection_string(&self, name: &str) -> Result<&str> {
        match self.connection_strings.get(name).map(|s| s.trim()) {
            Some(s) if !s.is_empty() => Ok(s),
            Some(_) => Err(Error::Configuration(format!(
                "connection string {name:?} is empty"
            ))),
            None => Err(Error::Configuration(format!(
                "connection string {name:?} not found"
            ))),
        }
    }
}
