//! Application configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plex::ClientIdentity;

/// Errors raised while loading or validating configuration.
///
/// A missing or empty client identifier is a startup precondition failure;
/// callers are expected to abort rather than continue without it.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to parse config file: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("config is missing the stable client identifier")]
  MissingClientId,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
  /// Stable client identifier registered with plex.tv. Required; generated
  /// once at install time and never regenerated.
  pub client_id: String,

  /// Product name reported to the service.
  #[serde(default = "default_product")]
  pub product: String,

  /// Product version reported to the service.
  #[serde(default = "default_version")]
  pub version: String,
}

fn default_product() -> String {
  "ReelSwipe".to_string()
}

fn default_version() -> String {
  env!("CARGO_PKG_VERSION").to_string()
}

impl AppConfig {
  /// Load and validate configuration from a JSON file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let bytes = fs::read(path)?;
    let config: Self = serde_json::from_slice(&bytes)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate configuration values.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.client_id.trim().is_empty() {
      return Err(ConfigError::MissingClientId);
    }
    Ok(())
  }

  /// Build the client identity sent with every request.
  pub fn identity(&self) -> ClientIdentity {
    ClientIdentity {
      client_id: self.client_id.clone(),
      product: self.product.clone(),
      version: self.version.clone(),
    }
  }
}
