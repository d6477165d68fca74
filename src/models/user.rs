// src/models/user.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use super::json_text;

/// Subscriber registered in the catalog. Phone numbers identify call ownership.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub user_name: String,
    pub phone_number: String,
}

impl User {
    pub fn new(user_id: &str, user_name: &str, phone_number: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            phone_number: phone_number.to_string(),
        }
    }

    /// Builds a user from loosely-typed JSON; missing fields read as empty.
    /// Returns `None` only when the value is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        Some(Self {
            user_id: json_text(obj, "userId"),
            user_name: json_text(obj, "userName"),
            phone_number: json_text(obj, "phoneNumber"),
        })
    }
}
