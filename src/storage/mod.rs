// src/storage/mod.rs
pub mod json_file;
pub mod fixtures;

pub use json_file::JsonFileStorage;

use crate::error::BillingError;
use crate::models::{CallRecord, FeeRecord, LongDistanceRate, User};
use async_trait::async_trait;

/// Persisted collections backing the catalog and the fee ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    /// Writes the sample fixture for every reference collection that does not exist yet.
    async fn seed_missing(&self) -> Result<(), BillingError>;

    async fn load_users(&self) -> Result<Vec<User>, BillingError>;

    async fn load_rates(&self) -> Result<Vec<LongDistanceRate>, BillingError>;

    /// Reads every well-formed call record, skipping entries that cannot be identified.
    async fn load_calls(&self) -> Result<Vec<CallRecord>, BillingError>;

    /// `None` when no ledger has been persisted yet.
    async fn load_fees(&self) -> Result<Option<Vec<FeeRecord>>, BillingError>;

    /// Replaces the persisted ledger in one step.
    async fn save_fees(&self, fees: &[FeeRecord]) -> Result<(), BillingError>;

    async fn append_call(&self, call: &CallRecord) -> Result<(), BillingError>;
}
