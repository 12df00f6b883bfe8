use sqlx::PgPool;

use super::StoreError;
use crate::db::models::{NewSensorReading, SensorReading};

/// `sensor_readings` table access.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, reading: NewSensorReading) -> Result<SensorReading, StoreError> {
        let row = sqlx::query_as::<_, SensorReading>(
            r#"
            INSERT INTO sensor_readings
                (temperature, humidity, air_quality, gas_analog, gas_digital, detected)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, temperature, humidity, air_quality,
                      gas_analog, gas_digital, detected, "timestamp"
            "#,
        )
        .bind(reading.temperature())
        .bind(reading.humidity())
        .bind(reading.air_quality())
        .bind(reading.gas_analog())
        .bind(reading.gas_digital())
        .bind(reading.detected())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<SensorReading>, StoreError> {
        let rows = sqlx::query_as::<_, SensorReading>(
            r#"
            SELECT id, temperature, humidity, air_quality,
                   gas_analog, gas_digital, detected, "timestamp"
            FROM sensor_readings
            ORDER BY "timestamp" DESC, seq DESC
            LIMIT $1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
