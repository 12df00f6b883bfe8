use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SensorReadingDto {
    pub id: Uuid,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Always equal to `gasAnalog`.
    pub air_quality: f64,
    pub gas_analog: f64,
    pub gas_digital: f64,
    pub detected: bool,
    /// Server-assigned write time (RFC3339).
    pub timestamp: DateTime<Utc>,
}

/// Response for a successful `POST /api/sensor`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngestResponse {
    pub message: String,
    pub data: SensorReadingDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<crate::db::models::SensorReading> for SensorReadingDto {
    fn from(r: crate::db::models::SensorReading) -> Self {
        Self {
            id: r.id,
            temperature: r.temperature,
            humidity: r.humidity,
            air_quality: r.air_quality,
            gas_analog: r.gas_analog,
            gas_digital: r.gas_digital,
            detected: r.detected,
            timestamp: r.timestamp,
        }
    }
}
