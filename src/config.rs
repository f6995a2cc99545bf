//! Configuration management for the Contactos server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is loaded first if present; `dotenvy` does not write to stdout,
//! which the MCP transport owns.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Where contacts are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// A JSON data file on disk
    File,
    /// Process memory only; contents are lost on exit
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("Must be 'file' or 'memory', got: {}", other)),
        }
    }
}

/// Configuration for the Contactos server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend (default: file)
    pub storage: StorageBackend,

    /// JSON data file used by the file backend (default: "contactos.json")
    pub data_file: PathBuf,

    /// Log level used when `RUST_LOG` is unset (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CONTACTOS_STORAGE`: `file` or `memory` (default: `file`)
    /// - `CONTACTOS_DATA_FILE`: data file path (default: `contactos.json`)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let storage = match env::var("CONTACTOS_STORAGE") {
            Ok(val) => val.parse::<StorageBackend>().map_err(|reason| {
                ConfigError::InvalidValue {
                    var: "CONTACTOS_STORAGE".to_string(),
                    reason,
                }
            })?,
            Err(_) => StorageBackend::File,
        };

        let data_file = match env::var("CONTACTOS_DATA_FILE") {
            Ok(val) if val.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "CONTACTOS_DATA_FILE".to_string(),
                    reason: "Cannot be empty".to_string(),
                });
            }
            Ok(val) => PathBuf::from(val),
            Err(_) => Self::default().data_file,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            storage,
            data_file,
            log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageBackend::File,
            data_file: PathBuf::from("contactos.json"),
            log_level: "error".to_string(),
        }
    }
}
