// src/storage/json_file.rs
use super::{fixtures, Storage};
use crate::error::BillingError;
use crate::models::{CallRecord, FeeRecord, LongDistanceRate, User};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

pub const USERS_FILE: &str = "users.json";
pub const RATES_FILE: &str = "rates.json";
pub const CALLS_FILE: &str = "calls.json";
pub const FEES_FILE: &str = "fees.json";

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Serialize)]
struct UsersFile {
    users: Vec<User>,
}

#[derive(Serialize)]
struct RatesFile {
    #[serde(rename = "longDistanceRates")]
    long_distance_rates: Vec<LongDistanceRate>,
}

#[derive(Serialize, Deserialize)]
struct CallsFile {
    #[serde(rename = "callRecords", default)]
    call_records: Vec<Value>,
}

#[derive(Deserialize)]
struct FeesFile {
    #[serde(default)]
    fees: Vec<FeeRecord>,
}

#[derive(Serialize)]
struct FeesFileRef<'a> {
    fees: &'a [FeeRecord],
}

/// Rows stored under `key`; a missing or non-array key reads as no rows.
fn rows<'a>(doc: &'a Value, key: &str) -> &'a [Value] {
    doc.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Human-readable JSON collections kept side by side in one data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    async fn exists(&self, file: &str) -> Result<bool, BillingError> {
        let path = self.path(file);
        match tokio::fs::metadata(&path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(BillingError::io(path.display(), e)),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, BillingError> {
        let path = self.path(file);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| BillingError::io(path.display(), e))?;

        serde_json::from_slice(&bytes).map_err(|e| BillingError::serialization(path.display(), e))
    }

    /// Writes to a sibling temp file and renames it into place, so readers
    /// never see a partially written collection. Each write gets its own
    /// temp file.
    async fn write_json<T: Serialize + ?Sized>(&self, file: &str, data: &T) -> Result<(), BillingError> {
        let path = self.path(file);
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp_path = self.path(&format!(".{}.{}.{}.tmp", file, std::process::id(), seq));

        let bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| BillingError::serialization(path.display(), e))?;

        tokio::fs::write(&tmp_path, bytes)
            .await
            .map_err(|e| BillingError::io(tmp_path.display(), e))?;

        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(BillingError::io(path.display(), e));
        }

        debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn seed_missing(&self) -> Result<(), BillingError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| BillingError::io(self.dir.display(), e))?;

        if !self.exists(USERS_FILE).await? {
            self.write_json(USERS_FILE, &UsersFile { users: fixtures::sample_users() }).await?;
            info!("🌱 Seeded sample users into {}", self.path(USERS_FILE).display());
        }

        if !self.exists(RATES_FILE).await? {
            self.write_json(RATES_FILE, &RatesFile { long_distance_rates: fixtures::sample_rates() })
                .await?;
            info!("🌱 Seeded sample rates into {}", self.path(RATES_FILE).display());
        }

        if !self.exists(CALLS_FILE).await? {
            let call_records = fixtures::sample_calls()
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| BillingError::serialization(CALLS_FILE, e))?;
            self.write_json(CALLS_FILE, &CallsFile { call_records }).await?;
            info!("🌱 Seeded sample calls into {}", self.path(CALLS_FILE).display());
        }

        Ok(())
    }

    async fn load_users(&self) -> Result<Vec<User>, BillingError> {
        let doc: Value = self.read_json(USERS_FILE).await?;

        Ok(rows(&doc, "users")
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let user = User::from_value(raw);
                if user.is_none() {
                    warn!("⚠️  Skipping malformed user at index {}: {}", index, raw);
                }
                user
            })
            .collect())
    }

    async fn load_rates(&self) -> Result<Vec<LongDistanceRate>, BillingError> {
        let doc: Value = self.read_json(RATES_FILE).await?;

        Ok(rows(&doc, "longDistanceRates")
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let rate = LongDistanceRate::from_value(raw);
                if rate.is_none() {
                    warn!("⚠️  Skipping malformed rate at index {}: {}", index, raw);
                }
                rate
            })
            .collect())
    }

    async fn load_calls(&self) -> Result<Vec<CallRecord>, BillingError> {
        let file: CallsFile = self.read_json(CALLS_FILE).await?;

        let mut calls = Vec::with_capacity(file.call_records.len());
        for (index, raw) in file.call_records.iter().enumerate() {
            match CallRecord::from_value(raw) {
                Some(call) => calls.push(call),
                None => warn!("⚠️  Skipping malformed call record at index {}: {}", index, raw),
            }
        }

        Ok(calls)
    }

    async fn load_fees(&self) -> Result<Option<Vec<FeeRecord>>, BillingError> {
        if !self.exists(FEES_FILE).await? {
            return Ok(None);
        }

        let file: FeesFile = self.read_json(FEES_FILE).await?;
        Ok(Some(file.fees))
    }

    async fn save_fees(&self, fees: &[FeeRecord]) -> Result<(), BillingError> {
        self.write_json(FEES_FILE, &FeesFileRef { fees }).await
    }

    async fn append_call(&self, call: &CallRecord) -> Result<(), BillingError> {
        let mut file: CallsFile = if self.exists(CALLS_FILE).await? {
            self.read_json(CALLS_FILE).await?
        } else {
            CallsFile { call_records: Vec::new() }
        };

        let value = serde_json::to_value(call).map_err(|e| BillingError::serialization(CALLS_FILE, e))?;
        file.call_records.push(value);

        self.write_json(CALLS_FILE, &file).await
    }
}
