// src/engine.rs
use crate::services::{Catalog, FeeLedger, QueryService, RecomputeScheduler};
use crate::storage::Storage;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// The wired core: catalog, ledger, recompute scheduler and query service
/// sharing one storage backend.
pub struct BillingEngine {
    pub storage: Arc<dyn Storage>,
    pub catalog: Arc<Catalog>,
    pub ledger: Arc<FeeLedger>,
    pub scheduler: Arc<RecomputeScheduler>,
    pub query: Arc<QueryService>,
}

impl BillingEngine {
    /// Seeds missing collections, loads the catalog and restores the last
    /// persisted ledger. Does not start the timer.
    ///
    /// Never fails: storage problems are logged and the engine starts with
    /// whatever could be read.
    pub async fn bootstrap(storage: Arc<dyn Storage>, recompute_interval: Duration) -> Self {
        if let Err(e) = storage.seed_missing().await {
            warn!("⚠️  Could not seed sample data: {}", e);
        }

        let catalog = Arc::new(Catalog::load(storage.as_ref()).await);
        let ledger = Arc::new(FeeLedger::new());

        if let Err(e) = ledger.prime(storage.as_ref()).await {
            warn!("⚠️  Could not restore persisted ledger, starting empty: {}", e);
        }

        let scheduler = Arc::new(RecomputeScheduler::new(
            storage.clone(),
            catalog.clone(),
            ledger.clone(),
            recompute_interval,
        ));

        let query = Arc::new(QueryService::new(catalog.clone(), ledger.clone()));

        info!("✅ Billing engine ready");

        Self {
            storage,
            catalog,
            ledger,
            scheduler,
            query,
        }
    }
}
