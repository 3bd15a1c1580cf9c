//! Run configuration, read from TOML and overridable from the command line
//!
//! ```toml
//! codel_size = 4
//! max_steps = 1000000
//! dump_program = false
//! ```

use crate::error::CodelError;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Raw pixels per codel edge
    pub codel_size: u32,
    /// Stop after this many steps; unlimited when absent
    pub max_steps: Option<u64>,
    /// Print the block listing before running
    pub dump_program: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            codel_size: 1,
            max_steps: None,
            dump_program: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Config, CodelError> {
        let config: Config = toml::from_str(text).map_err(|e| CodelError::Config(e.to_string()))?;
        if config.codel_size == 0 {
            return Err(CodelError::Config("codel_size must be at least 1".to_string()));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Config, CodelError> {
        debug!("loading configuration from {}", path.display());
        let text = fs::read_to_string(path)
            .map_err(|e| CodelError::Config(format!("{}: {e}", path.display())))?;
        Config::from_toml_str(&text)
    }
}
