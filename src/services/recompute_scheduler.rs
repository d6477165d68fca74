// src/services/recompute_scheduler.rs
use crate::error::BillingError;
use crate::services::ledger::{FeeLedger, LedgerSnapshot};
use crate::services::{rating, Catalog};
use crate::storage::Storage;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info};

/// Rebuilds the whole fee ledger on a fixed period.
pub struct RecomputeScheduler {
    storage: Arc<dyn Storage>,
    catalog: Arc<Catalog>,
    ledger: Arc<FeeLedger>,
    period: Duration,
    // Held for a whole cycle so timer and manual runs never interleave.
    cycle_lock: Mutex<()>,
}

impl RecomputeScheduler {
    pub fn new(
        storage: Arc<dyn Storage>,
        catalog: Arc<Catalog>,
        ledger: Arc<FeeLedger>,
        period: Duration,
    ) -> Self {
        Self {
            storage,
            catalog,
            ledger,
            period,
            cycle_lock: Mutex::new(()),
        }
    }

    /// Runs one recompute cycle: re-read calls, rate them all, persist, then publish.
    ///
    /// The in-memory ledger only changes once the persisted copy has been
    /// written, so a failed cycle leaves the previous ledger in place.
    /// Concurrent callers run one after another, so publishes follow call order.
    pub async fn run_cycle(&self) -> Result<Arc<LedgerSnapshot>, BillingError> {
        let _cycle = self.cycle_lock.lock().await;

        let calls = self.storage.load_calls().await?;
        let fees = rating::recompute_all(&calls, &self.catalog);

        self.storage.save_fees(&fees).await?;

        debug!("Recomputed {} fee records from {} calls", fees.len(), calls.len());
        Ok(self.ledger.publish(LedgerSnapshot::computed(calls, fees)).await)
    }

    /// Spawns the recompute loop for the lifetime of the process.
    /// The first cycle runs immediately.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        info!("⏱️  Starting ledger recompute every {:?}", self.period);

        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(&self) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if let Err(e) = self.run_cycle().await {
                error!("❌ Ledger recompute failed, keeping previous ledger: {}", e);
            }
        }
    }
}
