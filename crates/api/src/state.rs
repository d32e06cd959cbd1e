use std::sync::Arc;

use climate_core::alert::{AlertEvaluator, ThresholdAlertEvaluator};
use climate_core::device_secret::{ConfiguredSecretValidator, SecretValidator};
use climate_core::error::CoreError;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Holds the two collaborators of the reading intake path behind trait
/// objects, so any implementation (including test fakes) can be injected.
#[derive(Clone)]
pub struct AppState {
    /// Authenticates device secrets.
    pub secret_validator: Arc<dyn SecretValidator>,
    /// Computes alerts for accepted readings.
    pub alert_evaluator: Arc<dyn AlertEvaluator>,
}

impl AppState {
    pub fn new(
        secret_validator: Arc<dyn SecretValidator>,
        alert_evaluator: Arc<dyn AlertEvaluator>,
    ) -> Self {
        Self {
            secret_validator,
            alert_evaluator,
        }
    }

    /// Build state with the default collaborators configured from `config`.
    ///
    /// Fails if the configured alert thresholds are inconsistent.
    pub fn from_config(config: &ServerConfig) -> Result<Self, CoreError> {
        let secret_validator = ConfiguredSecretValidator::new(&config.device_secrets);
        let alert_evaluator = ThresholdAlertEvaluator::new(config.alert_thresholds)?;
        Ok(Self::new(
            Arc::new(secret_validator),
            Arc::new(alert_evaluator),
        ))
    }
}
