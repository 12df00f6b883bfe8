use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored reading. Rows are append-only; nothing updates or deletes them.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: Uuid,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Copy of `gas_analog` kept for older dashboard consumers.
    pub air_quality: f64,
    /// Raw MQ135 analog value
    pub gas_analog: f64,
    /// MQ135 digital threshold output
    pub gas_digital: f64,
    /// Either gas channel crossed its alarm threshold.
    pub detected: bool,
    /// Assigned by the store when the write is accepted.
    pub timestamp: DateTime<Utc>,
}

/// A validated reading that has not been persisted yet.
///
/// Fields are private so `air_quality` can only ever be derived from
/// `gas_analog`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSensorReading {
    temperature: f64,
    humidity: f64,
    gas_analog: f64,
    gas_digital: f64,
    detected: bool,
}

impl NewSensorReading {
    pub fn new(
        temperature: f64,
        humidity: f64,
        gas_analog: f64,
        gas_digital: f64,
        detected: bool,
    ) -> Self {
        Self { temperature, humidity, gas_analog, gas_digital, detected }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn air_quality(&self) -> f64 {
        self.gas_analog
    }

    pub fn gas_analog(&self) -> f64 {
        self.gas_analog
    }

    pub fn gas_digital(&self) -> f64 {
        self.gas_digital
    }

    pub fn detected(&self) -> bool {
        self.detected
    }

    /// Attach the store-assigned identity to produce the persisted record.
    pub fn into_stored(self, id: Uuid, timestamp: DateTime<Utc>) -> SensorReading {
        SensorReading {
            id,
            temperature: self.temperature,
            humidity: self.humidity,
            air_quality: self.air_quality(),
            gas_analog: self.gas_analog,
            gas_digital: self.gas_digital,
            detected: self.detected,
            timestamp,
        }
    }
}
