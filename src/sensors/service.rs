use tracing::{error, info};

use super::{IngestRequest, ValidationError};
use crate::{
    db::models::SensorReading,
    store::{ReadingStore, StoreError},
};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct SensorService {
    store: ReadingStore,
}

impl SensorService {
    pub fn new(store: ReadingStore) -> Self {
        Self { store }
    }

    /// Validates `request`, derives `air_quality` from `gas_analog` and
    /// persists one reading. Nothing is written when validation fails.
    pub async fn ingest(&self, request: &IngestRequest) -> Result<SensorReading, IngestError> {
        let reading = request.validate()?;

        let stored = self.store.insert(reading).await.inspect_err(|e| {
            error!(error = %e, "Failed to store sensor reading");
        })?;

        info!(
            id = %stored.id,
            temperature = stored.temperature,
            humidity = stored.humidity,
            gas_analog = stored.gas_analog,
            gas_digital = stored.gas_digital,
            status = hazard_status(stored.detected),
            "Sensor reading stored"
        );

        Ok(stored)
    }

    /// The `limit` most recent readings, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<SensorReading>, StoreError> {
        self.store.recent(limit).await.inspect_err(|e| {
            error!(error = %e, "Failed to fetch sensor readings");
        })
    }
}

#[inline]
pub(crate) fn hazard_status(detected: bool) -> &'static str {
    if detected {
        "hazard"
    } else {
        "safe"
    }
}
