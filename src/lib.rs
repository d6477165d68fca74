// src/lib.rs
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod services;
pub mod engine;
pub mod api;

pub use engine::BillingEngine;
pub use error::BillingError;
