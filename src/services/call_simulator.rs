// src/services/call_simulator.rs
//! Call Simulator producing call-detail records without a telephony backend.
//!
//! Appends one random call between two known users to the call collection
//! at random intervals, so the recompute cycle has live growth to pick up.

use crate::config::SimulatorConfig;
use crate::error::BillingError;
use crate::models::{CallRecord, CallType};
use crate::services::Catalog;
use crate::storage::Storage;
use chrono::Local;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{error, info, warn};

const LOCAL_CALL_PROBABILITY: f64 = 0.7;
const MIN_DURATION_SECS: f64 = 10.0;
const MAX_DURATION_SECS: f64 = 600.0;
const FALLBACK_AREA_CODE: &str = "010";
const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CallSimulator {
    storage: Arc<dyn Storage>,
    catalog: Arc<Catalog>,
    config: SimulatorConfig,
}

impl CallSimulator {
    pub fn new(storage: Arc<dyn Storage>, catalog: Arc<Catalog>, config: SimulatorConfig) -> Self {
        Self {
            storage,
            catalog,
            config,
        }
    }

    /// Builds one call between catalog users. `None` when the catalog has no users.
    pub fn generate_call<R: Rng>(&self, rng: &mut R, call_id: String, start_time: String) -> Option<CallRecord> {
        let users = self.catalog.users();
        let caller = users.choose(rng)?;

        // Prefer someone else; a single-user catalog calls itself.
        let others: Vec<_> = users
            .iter()
            .filter(|u| u.phone_number != caller.phone_number)
            .collect();
        let callee = others
            .choose(rng)
            .map(|u| u.phone_number.clone())
            .unwrap_or_else(|| caller.phone_number.clone());

        let (call_type, long_distance_area_code) = if rng.gen_bool(LOCAL_CALL_PROBABILITY) {
            (CallType::Local, None)
        } else {
            let area_code = self
                .catalog
                .rates()
                .choose(rng)
                .map(|r| r.area_code.clone())
                .unwrap_or_else(|| FALLBACK_AREA_CODE.to_string());
            (CallType::LongDistance, Some(area_code))
        };

        Some(CallRecord {
            call_id,
            caller_number: caller.phone_number.clone(),
            callee_number: callee,
            start_time,
            duration_seconds: random_duration_seconds(rng),
            call_type,
            long_distance_area_code,
        })
    }

    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.run().await {
                error!("Call simulator stopped: {}", e);
            }
        })
    }

    async fn run(&self) -> Result<(), BillingError> {
        if self.catalog.users().is_empty() {
            warn!("⚠️  No users in catalog, call simulator disabled");
            return Ok(());
        }

        let existing = self.storage.load_calls().await?;
        let mut next_index = next_call_index(&existing);
        let mut rng = StdRng::from_entropy();

        info!(
            "📞 Call simulator started: {} existing calls, next id C{:04}, interval {:?}..{:?}",
            existing.len(),
            next_index,
            self.config.min_interval,
            self.config.max_interval
        );

        loop {
            let wait = random_interval(&mut rng, self.config.min_interval, self.config.max_interval);
            tokio::time::sleep(wait).await;

            let call_id = format!("C{:04}", next_index);
            let start_time = Local::now().format(START_TIME_FORMAT).to_string();

            let Some(call) = self.generate_call(&mut rng, call_id, start_time) else {
                return Ok(());
            };

            match self.storage.append_call(&call).await {
                Ok(()) => {
                    next_index += 1;
                    info!(
                        "📝 Simulated call {}: {} -> {} [{}] {}s",
                        call.call_id,
                        call.caller_number,
                        call.callee_number,
                        call.call_type.as_str(),
                        call.duration_seconds
                    );
                }
                Err(e) => error!("❌ Failed to append simulated call {}: {}", call.call_id, e),
            }
        }
    }
}

/// Next numeric suffix after the last record's `C`-prefixed id, or one past
/// the record count when that id is not numeric.
pub fn next_call_index(calls: &[CallRecord]) -> u64 {
    match calls.last() {
        None => 1,
        Some(last) => last
            .call_id
            .trim_matches('C')
            .parse::<u64>()
            .map(|n| n + 1)
            .unwrap_or(calls.len() as u64 + 1),
    }
}

/// Skewed towards short calls: `10 + r² * 590` seconds.
fn random_duration_seconds<R: Rng>(rng: &mut R) -> u64 {
    let r: f64 = rng.gen();
    (MIN_DURATION_SECS + r * r * (MAX_DURATION_SECS - MIN_DURATION_SECS)) as u64
}

fn random_interval<R: Rng>(rng: &mut R, min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    Duration::from_secs_f64(rng.gen_range(min.as_secs_f64()..=max.as_secs_f64()))
}
