use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::types::AnyResult;
use crate::configs::*;

const CONFIG_CANDIDATES: [&str; 2] = ["config.toml", "config.default.toml"];

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
  #[serde(default)]
  pub server: ServerConfig,
  #[serde(default)]
  pub logging: Option<LoggingConfig>,
  #[serde(default)]
  pub player: PlayerConfig,
  #[serde(default)]
  pub parties: PartiesConfig,
}

impl Config {
  /// Loads the first config file found in the working directory, or the
  /// built-in defaults when there is none.
  pub fn load() -> AnyResult<Self> {
    let Some(config_path) = CONFIG_CANDIDATES
      .iter()
      .copied()
      .find(|path| Path::new(path).exists())
    else {
      crate::log_println!("No config.toml found, using built-in defaults");
      return Ok(Self::default());
    };

    crate::log_println!("Loading configuration from: {}", config_path);

    let config_str = std::fs::read_to_string(config_path)?;
    if config_str.trim().is_empty() {
      return Err(format!("{} is empty", config_path).into());
    }

    Self::from_toml(&config_str)
  }

  pub fn from_toml(config_str: &str) -> AnyResult<Self> {
    Ok(toml::from_str(config_str)?)
  }
}
