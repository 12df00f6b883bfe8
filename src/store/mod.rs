pub mod memory;
pub mod postgres;

use sqlx::PgPool;
use thiserror::Error;

use crate::db::models::{NewSensorReading, SensorReading};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The initial connection failed and the process is running degraded.
    #[error("store is unavailable")]
    Unavailable,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handle to the reading collection, shared by every request handler.
///
/// Cloning is cheap; all variants share their underlying state.
#[derive(Clone, Debug)]
pub enum ReadingStore {
    Postgres(PgStore),
    Memory(MemoryStore),
    Unavailable,
}

impl ReadingStore {
    pub fn postgres(pool: PgPool) -> Self {
        Self::Postgres(PgStore::new(pool))
    }

    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    pub fn unavailable() -> Self {
        Self::Unavailable
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    /// Persist one reading. The store assigns `id` and `timestamp`.
    pub async fn insert(&self, reading: NewSensorReading) -> Result<SensorReading, StoreError> {
        match self {
            Self::Postgres(store) => store.insert(reading).await,
            Self::Memory(store) => Ok(store.insert(reading).await),
            Self::Unavailable => Err(StoreError::Unavailable),
        }
    }

    /// Up to `limit` readings ordered by `timestamp` descending.
    pub async fn recent(&self, limit: i64) -> Result<Vec<SensorReading>, StoreError> {
        match self {
            Self::Postgres(store) => store.recent(limit).await,
            Self::Memory(store) => Ok(store.recent(limit).await),
            Self::Unavailable => Err(StoreError::Unavailable),
        }
    }
}
