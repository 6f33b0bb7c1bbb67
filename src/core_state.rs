//! Application state shared by every HTTP handler.
//!
//! `CoreState` is built once at startup and wrapped in `Arc`. The
//! prediction service is immutable; only the history connection needs a
//! lock.

use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use thiserror::Error;

use crate::config::{AppConfig, ConfigError};
use crate::db::{self, DatabaseError, PredictionRecord};
use crate::model::{self, ModelError};
use crate::pipeline::extraction::SynonymTable;
use crate::pipeline::service::{PredictionService, ServiceBuildError};

pub struct CoreState {
    pub service: PredictionService,
    history: Mutex<Connection>,
    pub config: AppConfig,
}

impl CoreState {
    pub fn new(service: PredictionService, history: Connection, config: AppConfig) -> Self {
        Self {
            service,
            history: Mutex::new(history),
            config,
        }
    }

    /// Load the model bundle, build the service and open the history
    /// database, as described by `config`.
    pub fn load(config: AppConfig) -> Result<Self, StartupError> {
        let bundle = model::load_bundle(&config.model_dir)?;
        let service = PredictionService::from_bundle(
            bundle,
            SynonymTable::default(),
            &config.extractor,
            config.top_k,
        )?;
        let history = db::open_database(&config.db_path)?;
        tracing::info!(db = %config.db_path.display(), "Prediction history ready");
        Ok(Self::new(service, history, config))
    }

    /// Lock the history connection.
    pub fn history(&self) -> Result<MutexGuard<'_, Connection>, CoreError> {
        self.history.lock().map_err(|_| CoreError::LockPoisoned)
    }

    /// Persist a prediction. Failures are logged; the caller's response
    /// does not depend on history.
    pub fn record_prediction(&self, record: &PredictionRecord) -> bool {
        let result = self
            .history()
            .and_then(|conn| db::save_prediction(&conn, record).map_err(CoreError::Database));
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(id = %record.id, error = %e, "Failed to save prediction history");
                false
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Anything that stops the server from starting.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
    #[error("Service error: {0}")]
    Service(#[from] ServiceBuildError),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
