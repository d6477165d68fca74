// src/services/query.rs
use crate::models::{CallDetail, FeeSummary, User};
use crate::services::rating::round_money;
use crate::services::{Catalog, FeeLedger};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Read-only lookups over the catalog and the current ledger.
pub struct QueryService {
    catalog: Arc<Catalog>,
    ledger: Arc<FeeLedger>,
}

impl QueryService {
    pub fn new(catalog: Arc<Catalog>, ledger: Arc<FeeLedger>) -> Self {
        Self { catalog, ledger }
    }

    pub fn find_users_by_name(&self, query: &str) -> Vec<User> {
        self.catalog.find_users_by_name(query)
    }

    pub fn get_user_name(&self, phone_number: &str) -> String {
        self.catalog.user_name(phone_number).to_string()
    }

    /// Totals the fees of calls placed by `phone_number`. Sums are rounded
    /// once after accumulation.
    pub async fn fee_summary(&self, phone_number: &str) -> FeeSummary {
        let snapshot = self.ledger.snapshot().await;

        let (local, long) = snapshot
            .fees
            .iter()
            .filter(|fee| fee.caller_number == phone_number)
            .fold((Decimal::ZERO, Decimal::ZERO), |(local, long), fee| {
                (local + fee.local_fee, long + fee.long_distance_fee)
            });

        let local_sum = round_money(local);
        let long_distance_sum = round_money(long);

        FeeSummary {
            phone_number: phone_number.to_string(),
            user_name: self.get_user_name(phone_number),
            local_sum,
            long_distance_sum,
            total_sum: round_money(local_sum + long_distance_sum),
        }
    }

    /// Calls placed by `phone_number` in the order they were appended.
    pub async fn call_details(&self, phone_number: &str) -> Vec<CallDetail> {
        let snapshot = self.ledger.snapshot().await;

        snapshot
            .calls
            .iter()
            .filter(|call| call.caller_number == phone_number)
            .map(|call| CallDetail {
                call_id: call.call_id.clone(),
                caller_number: call.caller_number.clone(),
                caller_name: self.get_user_name(&call.caller_number),
                callee_number: call.callee_number.clone(),
                callee_name: self.get_user_name(&call.callee_number),
                start_time: call.start_time.clone(),
                duration_seconds: call.duration_seconds,
                call_type: call.call_type,
                long_distance_area_code: call.long_distance_area_code.clone(),
            })
            .collect()
    }
}
