// src/models/call.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use super::json_text;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CallType {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "long-distance")]
    LongDistance,
}

impl CallType {
    /// Only the exact `long-distance` tag is long distance; anything else
    /// prices as a local call.
    pub fn from_str(s: &str) -> Self {
        match s {
            "long-distance" => CallType::LongDistance,
            _ => CallType::Local,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CallType::Local => "local",
            CallType::LongDistance => "long-distance",
        }
    }
}

/// Call-detail record as appended by the external producer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub call_id: String,
    pub caller_number: String,
    pub callee_number: String,
    pub start_time: String,
    pub duration_seconds: u64,
    pub call_type: CallType,
    pub long_distance_area_code: Option<String>,
}

impl CallRecord {
    /// Builds a record from loosely-typed JSON.
    ///
    /// Returns `None` when the value is not an object or has no `callId`.
    /// Missing or non-numeric durations become 0 and an area code attached
    /// to a local call is dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let call_id = match obj.get("callId")? {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        let text = |key: &str| json_text(obj, key);

        let call_type = obj
            .get("callType")
            .and_then(Value::as_str)
            .map(CallType::from_str)
            .unwrap_or(CallType::Local);

        let long_distance_area_code = match call_type {
            CallType::LongDistance => Some(text("longDistanceAreaCode")).filter(|c| !c.is_empty()),
            CallType::Local => None,
        };

        Some(Self {
            call_id,
            caller_number: text("callerNumber"),
            callee_number: text("calleeNumber"),
            start_time: text("startTime"),
            duration_seconds: parse_duration(obj.get("durationSeconds")),
            call_type,
            long_distance_area_code,
        })
    }
}

fn parse_duration(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_well_formed_record() {
        let call = CallRecord::from_value(&json!({
            "callId": "C001",
            "callerNumber": "13800000001",
            "calleeNumber": "01088880000",
            "startTime": "2025-11-18 09:00:10",
            "durationSeconds": 125,
            "callType": "long-distance",
            "longDistanceAreaCode": "010"
        }))
        .unwrap();

        assert_eq!(call.duration_seconds, 125);
        assert_eq!(call.call_type, CallType::LongDistance);
        assert_eq!(call.long_distance_area_code.as_deref(), Some("010"));
    }

    #[test]
    fn test_malformed_duration_defaults_to_zero() {
        for duration in [json!("abc"), json!(-5), json!(null), json!([1])] {
            let call = CallRecord::from_value(&json!({
                "callId": "C009",
                "callerNumber": "1",
                "durationSeconds": duration,
            }))
            .unwrap();
            assert_eq!(call.duration_seconds, 0);
        }

        let call = CallRecord::from_value(&json!({"callId": "C010", "durationSeconds": "61"})).unwrap();
        assert_eq!(call.duration_seconds, 61);
    }

    #[test]
    fn test_local_call_drops_area_code() {
        let call = CallRecord::from_value(&json!({
            "callId": "C002",
            "callType": "local",
            "longDistanceAreaCode": "010"
        }))
        .unwrap();

        assert_eq!(call.call_type, CallType::Local);
        assert!(call.long_distance_area_code.is_none());
    }

    #[test]
    fn test_call_type_tag_is_exact() {
        assert_eq!(CallType::from_str("long-distance"), CallType::LongDistance);
        for tag in ["Long-Distance", "long_distance", "longdistance", " long-distance", "LOCAL", ""] {
            assert_eq!(CallType::from_str(tag), CallType::Local, "tag {:?}", tag);
        }
    }

    #[test]
    fn test_missing_call_id_is_rejected() {
        assert!(CallRecord::from_value(&json!({"callerNumber": "1"})).is_none());
        assert!(CallRecord::from_value(&json!("C001")).is_none());
    }

    #[test]
    fn test_serializes_call_type_and_null_area_code() {
        let call = CallRecord::from_value(&json!({"callId": "C002", "callType": "local"})).unwrap();
        let value = serde_json::to_value(&call).unwrap();

        assert_eq!(value["callType"], "local");
        assert!(value["longDistanceAreaCode"].is_null());
    }
}
