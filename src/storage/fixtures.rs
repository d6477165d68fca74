// src/storage/fixtures.rs
//! Deterministic sample data written when a collection is missing on disk,
//! so the engine can run standalone.

use crate::models::{CallRecord, CallType, LongDistanceRate, User};
use rust_decimal::Decimal;

pub fn sample_users() -> Vec<User> {
    vec![
        User::new("U001", "张三", "13800000001"),
        User::new("U002", "李四", "13800000002"),
        User::new("U003", "王五", "01088880000"),
        User::new("U004", "张三丰", "13900000003"),
    ]
}

pub fn sample_rates() -> Vec<LongDistanceRate> {
    vec![
        LongDistanceRate::new("010", "北京", Decimal::new(60, 2)),
        LongDistanceRate::new("021", "上海", Decimal::new(65, 2)),
        LongDistanceRate::new("020", "广州", Decimal::new(70, 2)),
    ]
}

pub fn sample_calls() -> Vec<CallRecord> {
    vec![
        CallRecord {
            call_id: "C001".to_string(),
            caller_number: "13800000001".to_string(),
            callee_number: "01088880000".to_string(),
            start_time: "2025-11-18 09:00:10".to_string(),
            duration_seconds: 125,
            call_type: CallType::LongDistance,
            long_distance_area_code: Some("010".to_string()),
        },
        CallRecord {
            call_id: "C002".to_string(),
            caller_number: "13800000001".to_string(),
            callee_number: "13800000002".to_string(),
            start_time: "2025-11-18 10:15:05".to_string(),
            duration_seconds: 170,
            call_type: CallType::Local,
            long_distance_area_code: None,
        },
        CallRecord {
            call_id: "C003".to_string(),
            caller_number: "13800000002".to_string(),
            callee_number: "02166668888".to_string(),
            start_time: "2025-11-18 11:20:30".to_string(),
            duration_seconds: 59,
            call_type: CallType::LongDistance,
            long_distance_area_code: Some("021".to_string()),
        },
    ]
}
