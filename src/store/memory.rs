use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::models::{NewSensorReading, SensorReading};

/// In-process reading collection used by tests in place of PostgreSQL.
///
/// Wrapped in `Arc` so clones share the same readings. Insertion order is
/// kept, so readings stamped within the same clock tick still come back in
/// write order.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Vec<SensorReading>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, reading: NewSensorReading) -> SensorReading {
        let mut readings = self.inner.write().await;
        // Stamp under the write lock so timestamps follow write order.
        let stored = reading.into_stored(Uuid::new_v4(), Utc::now());
        readings.push(stored.clone());
        stored
    }

    /// Newest first. A non-positive `limit` yields nothing.
    pub async fn recent(&self, limit: i64) -> Vec<SensorReading> {
        let take = usize::try_from(limit).unwrap_or(0);
        self.inner.read().await.iter().rev().take(take).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
