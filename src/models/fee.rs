// src/models/fee.rs
use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;

/// Priced call. Always derived by the rating engine, never edited by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecord {
    pub call_id: String,
    pub caller_number: String,
    pub callee_number: String,
    pub user_name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub local_fee: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub long_distance_fee: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_fee: Decimal,
}
