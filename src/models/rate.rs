// src/models/rate.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use rust_decimal::Decimal;
use std::str::FromStr;
use super::json_text;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LongDistanceRate {
    pub area_code: String,
    pub area_name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub rate_per_minute: Decimal,
}

impl LongDistanceRate {
    pub fn new(area_code: &str, area_name: &str, rate_per_minute: Decimal) -> Self {
        Self {
            area_code: area_code.to_string(),
            area_name: area_name.to_string(),
            rate_per_minute,
        }
    }

    /// Builds a rate from loosely-typed JSON.
    ///
    /// Returns `None` when the value is not an object or has no `areaCode`.
    /// A missing, negative or non-numeric `ratePerMinute` reads as zero.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let area_code = json_text(obj, "areaCode");
        if area_code.is_empty() {
            return None;
        }

        let rate_per_minute = match obj.get("ratePerMinute") {
            Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
                .or_else(|_| Decimal::from_scientific(&n.to_string()))
                .ok(),
            Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        }
        .filter(|r| !r.is_sign_negative())
        .unwrap_or(Decimal::ZERO);

        Some(Self {
            area_code,
            area_name: json_text(obj, "areaName"),
            rate_per_minute,
        })
    }

    /// Per-minute rate for `area_code`, or zero when the code is absent or unknown.
    pub fn lookup(rates: &[LongDistanceRate], area_code: Option<&str>) -> Decimal {
        let Some(code) = area_code.filter(|c| !c.is_empty()) else {
            return Decimal::ZERO;
        };

        rates
            .iter()
            .find(|r| r.area_code == code)
            .map(|r| r.rate_per_minute)
            .unwrap_or(Decimal::ZERO)
    }
}
