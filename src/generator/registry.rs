//! In-memory store of the most recent batch per user, addressed by handle.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::batch::CredentialRecord;
use crate::domain::{BatchHandle, UserId};

/// Export stamp carried alongside a parked batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchMetadata {
    pub base_name: String,
    pub comment: String,
    pub users_generated: i32,
    pub generated_by: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StoredBatch {
    pub handle: BatchHandle,
    pub records: Arc<Vec<CredentialRecord>>,
    pub metadata: BatchMetadata,
    last_access: Instant,
}

/// One slot per user: parking a new batch replaces the previous one.
#[derive(Clone)]
pub struct BatchRegistry {
    slots: Arc<RwLock<HashMap<UserId, StoredBatch>>>,
    ttl: Duration,
}

impl BatchRegistry {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn put(
        &self,
        owner: UserId,
        records: Vec<CredentialRecord>,
        metadata: BatchMetadata,
    ) -> BatchHandle {
        let handle = BatchHandle::new();
        let batch = StoredBatch {
            handle,
            records: Arc::new(records),
            metadata,
            last_access: Instant::now(),
        };

        if let Some(previous) = self.slots.write().await.insert(owner, batch) {
            tracing::debug!(
                user_id = %owner,
                replaced = %previous.handle,
                "Replaced previously generated batch"
            );
        }

        handle
    }

    /// Returns the owner's batch if `handle` is still the current one and
    /// has not expired. A successful lookup refreshes the inactivity timer.
    pub async fn get(&self, owner: UserId, handle: BatchHandle) -> Option<StoredBatch> {
        let mut slots = self.slots.write().await;

        let expired = match slots.get(&owner) {
            Some(batch) if batch.handle != handle => return None,
            Some(batch) => batch.last_access.elapsed() >= self.ttl,
            None => return None,
        };

        if expired {
            slots.remove(&owner);
            return None;
        }

        let batch = slots.get_mut(&owner)?;
        batch.last_access = Instant::now();
        Some(batch.clone())
    }

    /// Drops every batch idle for longer than the TTL.
    pub async fn prune_expired(&self) -> usize {
        let mut slots = self.slots.write().await;
        let before = slots.len();
        slots.retain(|_, batch| batch.last_access.elapsed() < self.ttl);
        before - slots.len()
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(by: &str) -> BatchMetadata {
        BatchMetadata {
            base_name: "user".to_string(),
            comment: "lobby".to_string(),
            users_generated: 1,
            generated_by: by.to_string(),
            generated_at: Utc::now(),
        }
    }

    fn records(name: &str) -> Vec<CredentialRecord> {
        vec![CredentialRecord {
            username: name.to_string(),
            password: "1234".to_string(),
            ip_address: "10.0.0.1".to_string(),
            comment: "lobby".to_string(),
        }]
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let registry = BatchRegistry::new(Duration::from_secs(60));
        let owner = UserId::new(1);

        let handle = registry.put(owner, records("user1"), metadata("admin")).await;
        let batch = registry.get(owner, handle).await.unwrap();

        assert_eq!(batch.handle, handle);
        assert_eq!(batch.records[0].username, "user1");
        assert_eq!(batch.metadata.generated_by, "admin");
    }

    #[tokio::test]
    async fn test_second_batch_replaces_first() {
        let registry = BatchRegistry::new(Duration::from_secs(60));
        let owner = UserId::new(1);

        let first = registry.put(owner, records("a1"), metadata("admin")).await;
        let second = registry.put(owner, records("b1"), metadata("admin")).await;

        assert!(registry.get(owner, first).await.is_none());
        assert_eq!(
            registry.get(owner, second).await.unwrap().records[0].username,
            "b1"
        );
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_batches_are_private_to_owner() {
        let registry = BatchRegistry::new(Duration::from_secs(60));

        let handle = registry
            .put(UserId::new(1), records("a1"), metadata("alice"))
            .await;

        assert!(registry.get(UserId::new(2), handle).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_batch_is_dropped() {
        let registry = BatchRegistry::new(Duration::ZERO);
        let owner = UserId::new(1);

        let handle = registry.put(owner, records("a1"), metadata("admin")).await;

        assert!(registry.get(owner, handle).await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_prune_expired() {
        let registry = BatchRegistry::new(Duration::ZERO);
        registry
            .put(UserId::new(1), records("a1"), metadata("a"))
            .await;
        registry
            .put(UserId::new(2), records("b1"), metadata("b"))
            .await;

        assert_eq!(registry.prune_expired().await, 2);
        assert!(registry.is_empty().await);
    }
}
