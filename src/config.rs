// src/config.rs
use crate::error::BillingError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub recompute_interval: Duration,
    pub simulator: SimulatorConfig,
}

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub enabled: bool,
    pub min_interval: Duration,
    pub max_interval: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_interval: Duration::from_secs(2),
            max_interval: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, BillingError> {
        dotenv::dotenv().ok();

        let recompute_secs: u64 = parse_var("RECOMPUTE_INTERVAL_SECS", 5)?;
        if recompute_secs == 0 {
            return Err(BillingError::Config(
                "RECOMPUTE_INTERVAL_SECS must be greater than 0".to_string(),
            ));
        }

        let min_secs: u64 = parse_var("CALL_SIMULATOR_MIN_INTERVAL_SECS", 2)?;
        let max_secs: u64 = parse_var("CALL_SIMULATOR_MAX_INTERVAL_SECS", 10)?;
        if min_secs > max_secs {
            return Err(BillingError::Config(format!(
                "CALL_SIMULATOR_MIN_INTERVAL_SECS ({}) exceeds CALL_SIMULATOR_MAX_INTERVAL_SECS ({})",
                min_secs, max_secs
            )));
        }

        Ok(Config {
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "production".to_string()),
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 9000)?,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            recompute_interval: Duration::from_secs(recompute_secs),
            simulator: SimulatorConfig {
                enabled: parse_var("CALL_SIMULATOR_ENABLED", false)?,
                min_interval: Duration::from_secs(min_secs),
                max_interval: Duration::from_secs(max_secs),
            },
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, BillingError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| BillingError::Config(format!("{} has invalid value '{}'", name, raw))),
        _ => Ok(default),
    }
}
