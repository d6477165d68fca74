// src/services/mod.rs
pub mod catalog;
pub mod rating;
pub mod ledger;
pub mod recompute_scheduler;
pub mod query;
pub mod call_simulator;

pub use catalog::Catalog;
pub use ledger::{FeeLedger, LedgerSnapshot};
pub use recompute_scheduler::RecomputeScheduler;
pub use query::QueryService;
pub use call_simulator::CallSimulator;
