use std::fs;
use std::path::Path;

use serde::Deserialize;

use crm_core::common::error::{CrmError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Upper bound on one whole import batch, in seconds. Candidates already
    /// written when the bound trips stay written.
    pub batch_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_timeout_seconds: 30,
        }
    }
}

impl Config {
    /// Load from the given toml file, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            CrmError::Config(format!("failed to read '{}': {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            CrmError::Config(format!("failed to parse '{}': {e}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.import.batch_timeout_seconds, 30);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[import]\nbatch_timeout_seconds = 5").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.import.batch_timeout_seconds, 5);
        assert_eq!(config.server.port, 3000);
    }
}
