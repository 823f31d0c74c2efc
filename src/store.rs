//! Claim store boundary.
//!
//! The persistent record store is an external hosted service; the core
//! only needs an exact raw-text lookup for the duplicate gate and an
//! insert. `MemoryStore` backs tests and the CLI's offline check.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::ClaimRecord;

/// Errors reported by a claim store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(String),
}

/// A stored claim: the record plus its store-assigned id.
#[derive(Debug, Clone)]
pub struct StoredClaim {
    pub id: i64,
    pub record: ClaimRecord,
}

/// External claim store contract.
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Exact raw-text equality lookup; at most one record.
    async fn find_by_raw_text(&self, raw_text: &str) -> Result<Option<StoredClaim>, StoreError>;

    /// Persist a record, returning it with its assigned id.
    async fn insert(&self, record: &ClaimRecord) -> Result<StoredClaim, StoreError>;
}

/// In-memory claim store.
#[derive(Default)]
pub struct MemoryStore {
    claims: RwLock<Vec<StoredClaim>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClaimStore for MemoryStore {
    async fn find_by_raw_text(&self, raw_text: &str) -> Result<Option<StoredClaim>, StoreError> {
        let claims = self.claims.read().await;
        Ok(claims
            .iter()
            .find(|stored| stored.record.raw_text == raw_text)
            .cloned())
    }

    async fn insert(&self, record: &ClaimRecord) -> Result<StoredClaim, StoreError> {
        let mut claims = self.claims.write().await;
        let stored = StoredClaim {
            id: claims.len() as i64 + 1,
            record: record.clone(),
        };
        claims.push(stored.clone());
        Ok(stored)
    }
}
