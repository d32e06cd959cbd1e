//! Sensor reading payload submitted by devices.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::firmware::FirmwareVersion;

/// A single sensor reading plus device metadata.
///
/// Transient: created per request and dropped once the response is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceReadingRequest {
    /// Ambient temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Firmware version reported by the device (semantic version).
    pub firmware_version: String,
}

impl DeviceReadingRequest {
    /// Check the fields that must hold before the reading is evaluated.
    ///
    /// Returns the parsed firmware version, or `None` when the version matches
    /// the semantic versioning grammar but a numeric component does not fit
    /// in a `u64`. Only a grammar mismatch is an error.
    ///
    /// Sensor values are not range-checked here; out-of-range values are
    /// reported as alerts rather than rejected.
    pub fn validate(&self) -> Result<Option<FirmwareVersion>, CoreError> {
        match FirmwareVersion::parse(&self.firmware_version) {
            Ok(version) => Ok(Some(version)),
            Err(CoreError::Validation(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
