use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::extraction::extractor::{
    ExtractorConfig, DEFAULT_CHUNK_DELIMITERS, DEFAULT_FUZZY_THRESHOLD,
};
use crate::pipeline::service::DEFAULT_TOP_K;

/// Application-level constants
pub const APP_NAME: &str = "SymptoCheck";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_MODEL_DIR: &str = "resources/model";
const DB_FILE: &str = "predictions.db";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "symptocheck_lib=info,symptocheck=info,tower_http=warn"
}

/// ~/SymptoCheck/ on all platforms. Falls back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

pub fn default_db_path() -> PathBuf {
    app_data_dir().join(DB_FILE)
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must be an integer between 0 and 100, got {value}")]
    InvalidThreshold { var: &'static str, value: String },

    #[error("{var} must be a positive integer, got {value}")]
    InvalidTopK { var: &'static str, value: String },
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub model_dir: PathBuf,
    pub db_path: PathBuf,
    pub extractor: ExtractorConfig,
    pub top_k: usize,
    /// Optional directory of static frontend files served at `/`.
    pub static_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset and blank values fall back
    /// to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = match get("SYMPTOCHECK_ADDR") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidAddr {
                var: "SYMPTOCHECK_ADDR",
                value,
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 5000)),
        };

        let fuzzy_threshold = match get("SYMPTOCHECK_FUZZY_THRESHOLD") {
            Some(value) => value
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|t| *t <= 100)
                .ok_or(ConfigError::InvalidThreshold {
                    var: "SYMPTOCHECK_FUZZY_THRESHOLD",
                    value,
                })?,
            None => DEFAULT_FUZZY_THRESHOLD,
        };

        let top_k = match get("SYMPTOCHECK_TOP_K") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|k| *k >= 1)
                .ok_or(ConfigError::InvalidTopK {
                    var: "SYMPTOCHECK_TOP_K",
                    value,
                })?,
            None => DEFAULT_TOP_K,
        };

        // Delimiters are taken verbatim: whitespace is a legal delimiter.
        let chunk_delimiters = lookup("SYMPTOCHECK_CHUNK_DELIMITERS")
            .unwrap_or_else(|| DEFAULT_CHUNK_DELIMITERS.to_string());

        Ok(Self {
            addr,
            model_dir: get("SYMPTOCHECK_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR)),
            db_path: get("SYMPTOCHECK_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            extractor: ExtractorConfig {
                fuzzy_threshold,
                chunk_delimiters,
            },
            top_k,
            static_dir: get("SYMPTOCHECK_STATIC_DIR").map(PathBuf::from),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            db_path: default_db_path(),
            extractor: ExtractorConfig::default(),
            top_k: DEFAULT_TOP_K,
            static_dir: None,
        }
    }
}
