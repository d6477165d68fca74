// src/error.rs
use thiserror::Error;
use actix_web::{http::StatusCode, ResponseError, HttpResponse};
use serde_json::json;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error on {path}: {source}")]
    Serialization {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BillingError {
    pub fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        BillingError::Io { path: path.to_string(), source }
    }

    pub fn serialization(path: impl std::fmt::Display, source: serde_json::Error) -> Self {
        BillingError::Serialization { path: path.to_string(), source }
    }

    fn error_code(&self) -> &str {
        match self {
            BillingError::Io { .. } => "storage_error",
            BillingError::Serialization { .. } => "serialization_error",
            BillingError::Config(_) => "config_error",
            BillingError::InvalidRequest(_) => "invalid_request",
            BillingError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for BillingError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        HttpResponse::build(status_code).json(json!({
            "error": self.error_code(),
            "message": self.to_string(),
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            BillingError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
