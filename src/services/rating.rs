// src/services/rating.rs
//! Call rating: duration to billable minutes, tiered local fee, and
//! per-minute long-distance fee by area code.

use crate::models::{CallRecord, CallType, FeeRecord};
use crate::services::Catalog;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// Flat charge covering the first `LOCAL_BASE_MINUTES` of any call.
const LOCAL_BASE_FEE: Decimal = Decimal::from_parts(50, 0, 0, false, 2);
const LOCAL_BASE_MINUTES: u64 = 3;
/// Charge per started block of `LOCAL_BLOCK_MINUTES` beyond the base.
const LOCAL_BLOCK_FEE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);
const LOCAL_BLOCK_MINUTES: u64 = 3;

/// Rounds a monetary amount to cents, ties to even.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Started minutes. A 0-second call bills 0 minutes.
pub fn billable_minutes(duration_seconds: u64) -> u64 {
    duration_seconds.div_ceil(60)
}

pub fn local_fee(minutes: u64) -> Decimal {
    if minutes <= LOCAL_BASE_MINUTES {
        return LOCAL_BASE_FEE;
    }

    let extra_blocks = (minutes - LOCAL_BASE_MINUTES).div_ceil(LOCAL_BLOCK_MINUTES);
    LOCAL_BASE_FEE + Decimal::from(extra_blocks) * LOCAL_BLOCK_FEE
}

/// Rate times minutes. A product that does not fit a `Decimal` is logged
/// and priced as zero.
pub fn long_distance_fee(call: &CallRecord, catalog: &Catalog, minutes: u64) -> Decimal {
    match call.call_type {
        CallType::Local => Decimal::ZERO,
        CallType::LongDistance => {
            let rate = catalog.rate_for(call.long_distance_area_code.as_deref());
            rate.checked_mul(Decimal::from(minutes)).unwrap_or_else(|| {
                warn!(
                    "⚠️  Long-distance fee overflows for call {} ({} min at {}), pricing as zero",
                    call.call_id, minutes, rate
                );
                Decimal::ZERO
            })
        }
    }
}

/// Prices a single call. Each component is rounded to cents before the
/// total is taken, so `total_fee == local_fee + long_distance_fee` exactly.
pub fn rate_call(call: &CallRecord, catalog: &Catalog) -> FeeRecord {
    let minutes = billable_minutes(call.duration_seconds);

    let local = round_money(local_fee(minutes));
    let mut long = round_money(long_distance_fee(call, catalog, minutes));

    if local.checked_add(long).is_none() {
        warn!("⚠️  Total fee overflows for call {}, pricing long distance as zero", call.call_id);
        long = Decimal::ZERO;
    }

    FeeRecord {
        call_id: call.call_id.clone(),
        caller_number: call.caller_number.clone(),
        callee_number: call.callee_number.clone(),
        user_name: catalog.user_name(&call.caller_number).to_string(),
        local_fee: local,
        long_distance_fee: long,
        total_fee: round_money(local + long),
    }
}

/// Rebuilds the full ledger from the given calls, in call order.
pub fn recompute_all(calls: &[CallRecord], catalog: &Catalog) -> Vec<FeeRecord> {
    calls.iter().map(|call| rate_call(call, catalog)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::storage::fixtures;
    use rust_decimal_macros::dec;

    fn catalog() -> Catalog {
        Catalog::new(fixtures::sample_users(), fixtures::sample_rates())
    }

    fn call(id: &str, seconds: u64, call_type: CallType, area_code: Option<&str>) -> CallRecord {
        CallRecord {
            call_id: id.to_string(),
            caller_number: "13800000001".to_string(),
            callee_number: "13800000002".to_string(),
            start_time: "2025-11-18 09:00:10".to_string(),
            duration_seconds: seconds,
            call_type,
            long_distance_area_code: area_code.map(str::to_string),
        }
    }

    #[test]
    fn test_billable_minutes() {
        assert_eq!(billable_minutes(0), 0);
        assert_eq!(billable_minutes(1), 1);
        assert_eq!(billable_minutes(59), 1);
        assert_eq!(billable_minutes(60), 1);
        assert_eq!(billable_minutes(61), 2);
        assert_eq!(billable_minutes(125), 3);
        assert_eq!(billable_minutes(170), 3);
    }

    #[test]
    fn test_local_fee_tiers() {
        assert_eq!(local_fee(0), dec!(0.50));
        assert_eq!(local_fee(1), dec!(0.50));
        assert_eq!(local_fee(3), dec!(0.50));
        assert_eq!(local_fee(4), dec!(0.70));
        assert_eq!(local_fee(6), dec!(0.70));
        assert_eq!(local_fee(7), dec!(0.90));
        assert_eq!(local_fee(10), dec!(1.10));
    }

    #[test]
    fn test_zero_second_call_pays_flat_local_fee() {
        let fee = rate_call(&call("C1", 0, CallType::LongDistance, Some("010")), &catalog());

        assert_eq!(fee.local_fee, dec!(0.50));
        assert_eq!(fee.long_distance_fee, Decimal::ZERO);
        assert_eq!(fee.total_fee, dec!(0.50));
    }

    #[test]
    fn test_long_distance_call() {
        let fee = rate_call(&call("C1", 125, CallType::LongDistance, Some("010")), &catalog());

        assert_eq!(fee.local_fee, dec!(0.50));
        assert_eq!(fee.long_distance_fee, dec!(1.80));
        assert_eq!(fee.total_fee, dec!(2.30));
        assert_eq!(fee.user_name, "张三");
    }

    #[test]
    fn test_unknown_area_code_prices_free() {
        let fee = rate_call(&call("C1", 600, CallType::LongDistance, Some("999")), &catalog());

        assert_eq!(fee.long_distance_fee, Decimal::ZERO);
        assert_eq!(fee.total_fee, fee.local_fee);
    }

    #[test]
    fn test_local_call_ignores_rates() {
        let fee = rate_call(&call("C1", 170, CallType::Local, None), &catalog());

        assert_eq!(fee.long_distance_fee, Decimal::ZERO);
        assert_eq!(fee.total_fee, dec!(0.50));
    }

    #[test]
    fn test_components_rounded_before_total() {
        let catalog = Catalog::new(
            Vec::new(),
            vec![crate::models::LongDistanceRate::new("099", "Test", dec!(0.125))],
        );
        let fee = rate_call(&call("C1", 60, CallType::LongDistance, Some("099")), &catalog);

        assert_eq!(fee.long_distance_fee, dec!(0.12));
        assert_eq!(fee.total_fee, dec!(0.62));
        assert_eq!(fee.user_name, crate::services::catalog::UNKNOWN_USER);
    }

    #[test]
    fn test_overflowing_long_distance_fee_prices_as_zero() {
        let catalog = Catalog::new(
            Vec::new(),
            vec![crate::models::LongDistanceRate::new("099", "Test", Decimal::MAX)],
        );
        let call = call("C1", u64::MAX, CallType::LongDistance, Some("099"));
        let minutes = billable_minutes(call.duration_seconds);

        assert_eq!(long_distance_fee(&call, &catalog, minutes), Decimal::ZERO);

        let fee = rate_call(&call, &catalog);
        assert_eq!(fee.long_distance_fee, Decimal::ZERO);
        assert_eq!(fee.total_fee, fee.local_fee);
    }

    #[test]
    fn test_recompute_all_is_idempotent() {
        let catalog = Catalog::new(vec![User::new("U1", "张三", "13800000001")], fixtures::sample_rates());
        let calls = fixtures::sample_calls();

        let first = serde_json::to_vec(&recompute_all(&calls, &catalog)).unwrap();
        let second = serde_json::to_vec(&recompute_all(&calls, &catalog)).unwrap();

        assert_eq!(first, second);
    }
}
