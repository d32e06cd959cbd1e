//! Alert evaluation for device readings.
//!
//! The intake path delegates to an [`AlertEvaluator`] once a reading has
//! passed authentication and format checks. [`ThresholdAlertEvaluator`] is
//! the default implementation: it raises one alert per violated range.

use serde::Serialize;

use crate::error::CoreError;
use crate::reading::DeviceReadingRequest;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Physical range the temperature sensor can report, in degrees Celsius.
pub const TEMPERATURE_SENSOR_RANGE: Band = Band::new(-10.0, 50.0);

/// Physical range the humidity sensor can report, in percent.
pub const HUMIDITY_SENSOR_RANGE: Band = Band::new(0.0, 100.0);

/// Default safe temperature band.
pub const DEFAULT_TEMPERATURE_SAFE_BAND: Band = Band::new(10.0, 35.0);

/// Default safe humidity band.
pub const DEFAULT_HUMIDITY_SAFE_BAND: Band = Band::new(25.0, 75.0);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Kind of condition an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertType {
    /// Humidity outside what the sensor can physically report.
    HumiditySensorOutOfRange,
    /// Temperature outside what the sensor can physically report.
    TemperatureSensorOutOfRange,
    /// Plausible temperature outside the safe band.
    DangerousTemperatureLevel,
    /// Plausible humidity outside the safe band.
    DangerousHumidityLevel,
}

impl AlertType {
    /// Human-readable message attached to alerts of this type.
    pub fn message(self) -> &'static str {
        match self {
            Self::HumiditySensorOutOfRange => "Humidity sensor is out of range.",
            Self::TemperatureSensorOutOfRange => "Temperature sensor is out of range.",
            Self::DangerousTemperatureLevel => "Temperature is at a dangerous level.",
            Self::DangerousHumidityLevel => "Humidity is at a dangerous level.",
        }
    }
}

/// A single alert raised by a reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub alert_type: AlertType,
    pub message: String,
}

impl From<AlertType> for Alert {
    fn from(alert_type: AlertType) -> Self {
        Self {
            alert_type,
            message: alert_type.message().to_string(),
        }
    }
}

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within `[min, max]`. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn within(&self, outer: &Band) -> bool {
        outer.contains(self.min) && outer.contains(self.max)
    }
}

// ---------------------------------------------------------------------------
// Evaluator seam
// ---------------------------------------------------------------------------

/// Computes the alerts a reading should raise.
///
/// Called at most once per accepted request, with the full reading. Errors
/// are surfaced to the caller as internal errors.
pub trait AlertEvaluator: Send + Sync {
    fn get_alerts(&self, reading: &DeviceReadingRequest) -> Result<Vec<Alert>, CoreError>;
}

/// Safe bands used by [`ThresholdAlertEvaluator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertThresholds {
    pub temperature_safe: Band,
    pub humidity_safe: Band,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            temperature_safe: DEFAULT_TEMPERATURE_SAFE_BAND,
            humidity_safe: DEFAULT_HUMIDITY_SAFE_BAND,
        }
    }
}

impl AlertThresholds {
    /// Each safe band must be non-empty and lie inside its sensor range.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_band(
            "temperature",
            &self.temperature_safe,
            &TEMPERATURE_SENSOR_RANGE,
        )?;
        validate_band("humidity", &self.humidity_safe, &HUMIDITY_SENSOR_RANGE)
    }
}

fn validate_band(name: &str, band: &Band, sensor: &Band) -> Result<(), CoreError> {
    if !(band.min < band.max) {
        return Err(CoreError::Validation(format!(
            "{name} safe band minimum ({}) must be less than maximum ({})",
            band.min, band.max
        )));
    }
    if !band.within(sensor) {
        return Err(CoreError::Validation(format!(
            "{name} safe band [{}, {}] must lie within sensor range [{}, {}]",
            band.min, band.max, sensor.min, sensor.max
        )));
    }
    Ok(())
}

/// Range-based evaluator.
///
/// Sensor-range violations take priority: a value outside its sensor range
/// never also raises a dangerous-level alert.
#[derive(Debug, Clone)]
pub struct ThresholdAlertEvaluator {
    thresholds: AlertThresholds,
}

impl ThresholdAlertEvaluator {
    pub fn new(thresholds: AlertThresholds) -> Result<Self, CoreError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }
}

impl AlertEvaluator for ThresholdAlertEvaluator {
    fn get_alerts(&self, reading: &DeviceReadingRequest) -> Result<Vec<Alert>, CoreError> {
        let humidity_plausible = HUMIDITY_SENSOR_RANGE.contains(reading.humidity);
        let temperature_plausible = TEMPERATURE_SENSOR_RANGE.contains(reading.temperature);

        let raised = [
            (!humidity_plausible, AlertType::HumiditySensorOutOfRange),
            (!temperature_plausible, AlertType::TemperatureSensorOutOfRange),
            (
                temperature_plausible
                    && !self.thresholds.temperature_safe.contains(reading.temperature),
                AlertType::DangerousTemperatureLevel,
            ),
            (
                humidity_plausible && !self.thresholds.humidity_safe.contains(reading.humidity),
                AlertType::DangerousHumidityLevel,
            ),
        ];

        Ok(raised
            .into_iter()
            .filter(|(hit, _)| *hit)
            .map(|(_, alert_type)| Alert::from(alert_type))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
