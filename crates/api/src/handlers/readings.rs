//! Handlers for the `/readings` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use climate_core::alert::Alert;
use climate_core::reading::DeviceReadingRequest;

use crate::error::AppResult;
use crate::middleware::device_secret::AuthenticatedDevice;
use crate::state::AppState;

/// POST /readings/evaluate
///
/// Evaluate a sensor reading from a device and return the alerts it raises.
///
/// Checks run in a fixed order and stop at the first failure:
/// device secret (401), then firmware version format (400). A reading that
/// passes both is handed to the alert evaluator exactly once and its result
/// is returned as the body.
pub async fn evaluate(
    State(state): State<AppState>,
    _device: AuthenticatedDevice,
    payload: Result<Json<DeviceReadingRequest>, JsonRejection>,
) -> AppResult<Json<Vec<Alert>>> {
    let Json(reading) = payload?;

    let version = reading.validate().inspect_err(|_| {
        tracing::info!(
            firmware_version = %reading.firmware_version,
            "Reading rejected: malformed firmware version"
        );
    })?;

    match version {
        Some(version) => tracing::debug!(
            firmware_version = %version,
            pre_release = version.is_pre_release(),
            "Reading accepted"
        ),
        None => tracing::debug!(
            firmware_version = %reading.firmware_version,
            "Reading accepted with oversized version numbers"
        ),
    }

    let alerts = state.alert_evaluator.get_alerts(&reading)?;
    tracing::debug!(alert_count = alerts.len(), "Reading evaluated");

    Ok(Json(alerts))
}
