// src/models/mod.rs
pub mod user;
pub mod rate;
pub mod call;
pub mod fee;

pub use user::User;
pub use rate::LongDistanceRate;
pub use call::{CallRecord, CallType};
pub use fee::FeeRecord;

use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// String field of a loosely-typed JSON row; numbers are kept as their text,
/// anything else reads as empty.
pub(crate) fn json_text(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

// ==================== Query results ====================

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    pub phone_number: String,
    pub user_name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub local_sum: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub long_distance_sum: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_sum: Decimal,
}

/// A caller's call record with both parties' display names resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallDetail {
    pub call_id: String,
    pub caller_number: String,
    pub caller_name: String,
    pub callee_number: String,
    pub callee_name: String,
    pub start_time: String,
    pub duration_seconds: u64,
    pub call_type: CallType,
    pub long_distance_area_code: Option<String>,
}

// ==================== API DTOs ====================

#[derive(Debug, Deserialize)]
pub struct UserSearchQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNameResponse {
    pub phone_number: String,
    pub user_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeResponse {
    pub success: bool,
    pub calls: usize,
    pub fees: usize,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
