//! JSON settings file adapter.
//!
//! Implements [`ConfigPort`] over a read-only JSON file.  A missing file
//! yields defaults; every field is optional, so a file naming only `fps`
//! overrides only the frame rate.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::PetConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse and validate settings text.
    pub fn parse(text: &str) -> Result<PetConfig, ConfigError> {
        let config: PetConfig = serde_json::from_str(text).map_err(|e| {
            warn!("Config: {}", e);
            ConfigError::Corrupted
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<PetConfig, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let config = Self::parse(&text)?;
                info!("Config: loaded {}", self.path.display());
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Config: {} not found, using defaults", self.path.display());
                Ok(PetConfig::default())
            }
            Err(e) => {
                warn!("Config: cannot read {}: {}", self.path.display(), e);
                Err(ConfigError::Io)
            }
        }
    }
}
