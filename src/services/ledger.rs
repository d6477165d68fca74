// src/services/ledger.rs
use crate::error::BillingError;
use crate::models::{CallRecord, FeeRecord};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// One complete, self-consistent ledger: the calls it was derived from and
/// their fees.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub calls: Vec<CallRecord>,
    pub fees: Vec<FeeRecord>,
    /// `None` when the fees were restored from disk rather than computed in this run.
    pub computed_at: Option<DateTime<Utc>>,
}

impl LedgerSnapshot {
    pub fn computed(calls: Vec<CallRecord>, fees: Vec<FeeRecord>) -> Self {
        Self {
            calls,
            fees,
            computed_at: Some(Utc::now()),
        }
    }
}

/// Holds the current ledger. Publishing swaps the whole snapshot, so readers
/// always see either the previous or the new ledger in full.
#[derive(Debug, Default)]
pub struct FeeLedger {
    current: RwLock<Arc<LedgerSnapshot>>,
}

impl FeeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Arc<LedgerSnapshot> {
        self.current.read().await.clone()
    }

    pub async fn publish(&self, snapshot: LedgerSnapshot) -> Arc<LedgerSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write().await = snapshot.clone();
        snapshot
    }

    /// Restores the last persisted ledger. Returns `false` when none exists yet.
    pub async fn prime(&self, storage: &dyn Storage) -> Result<bool, BillingError> {
        let Some(fees) = storage.load_fees().await? else {
            info!("No persisted ledger found, waiting for first recompute");
            return Ok(false);
        };

        let calls = storage.load_calls().await?;
        info!("📒 Ledger restored: {} fee records, {} calls", fees.len(), calls.len());

        self.publish(LedgerSnapshot {
            calls,
            fees,
            computed_at: None,
        })
        .await;

        Ok(true)
    }
}
