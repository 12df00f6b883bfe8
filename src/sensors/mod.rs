pub mod service;

use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::db::models::NewSensorReading;

pub use service::SensorService;

/// Request body for `POST /api/sensor`.
///
/// Every field is optional on the wire so a missing field can be told apart
/// from a zero or `false` value. `null` counts as missing.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    /// Degrees Celsius
    #[schema(required = true)]
    pub temperature: Option<f64>,
    /// Relative humidity percentage
    #[schema(required = true)]
    pub humidity: Option<f64>,
    /// Raw MQ135 analog value; also stored as `airQuality`.
    #[schema(required = true)]
    pub gas_analog: Option<f64>,
    /// MQ135 digital threshold output
    #[schema(required = true)]
    pub gas_digital: Option<f64>,
    /// `true` when either gas channel detected a hazard.
    #[schema(required = true)]
    pub detected: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("incomplete sensor data, missing: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl IngestRequest {
    pub fn validate(&self) -> Result<NewSensorReading, ValidationError> {
        match (
            self.temperature,
            self.humidity,
            self.gas_analog,
            self.gas_digital,
            self.detected,
        ) {
            (Some(t), Some(h), Some(ga), Some(gd), Some(d)) => {
                Ok(NewSensorReading::new(t, h, ga, gd, d))
            }
            _ => Err(ValidationError { missing: self.missing_fields() }),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("temperature", self.temperature.is_none()),
            ("humidity", self.humidity.is_none()),
            ("gasAnalog", self.gas_analog.is_none()),
            ("gasDigital", self.gas_digital.is_none()),
            ("detected", self.detected.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}
