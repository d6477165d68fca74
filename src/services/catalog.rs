// src/services/catalog.rs
use crate::models::{LongDistanceRate, User};
use crate::storage::Storage;
use rust_decimal::Decimal;
use tracing::{error, info};

/// Display name returned when a phone number has no registered owner.
pub const UNKNOWN_USER: &str = "unknown user";

/// Reference data loaded once at startup and never mutated during a run.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    users: Vec<User>,
    rates: Vec<LongDistanceRate>,
}

impl Catalog {
    pub fn new(users: Vec<User>, rates: Vec<LongDistanceRate>) -> Self {
        Self { users, rates }
    }

    /// Loads users and rates. A collection that cannot be read is logged and
    /// left empty; lookups against it then miss instead of failing.
    pub async fn load(storage: &dyn Storage) -> Self {
        let users = storage.load_users().await.unwrap_or_else(|e| {
            error!("❌ Could not load users, catalog has none: {}", e);
            Vec::new()
        });
        let rates = storage.load_rates().await.unwrap_or_else(|e| {
            error!("❌ Could not load long-distance rates, all area codes price as free: {}", e);
            Vec::new()
        });

        info!("📇 Catalog loaded: {} users, {} long-distance rates", users.len(), rates.len());

        Self::new(users, rates)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn rates(&self) -> &[LongDistanceRate] {
        &self.rates
    }

    /// Name of the first user owning `phone_number`, or [`UNKNOWN_USER`].
    pub fn user_name(&self, phone_number: &str) -> &str {
        self.users
            .iter()
            .find(|u| u.phone_number == phone_number)
            .map(|u| u.user_name.as_str())
            .unwrap_or(UNKNOWN_USER)
    }

    /// Case-sensitive substring match on user names, in catalog order.
    /// A blank query matches nobody.
    pub fn find_users_by_name(&self, query: &str) -> Vec<User> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        self.users
            .iter()
            .filter(|u| u.user_name.contains(query))
            .cloned()
            .collect()
    }

    pub fn rate_for(&self, area_code: Option<&str>) -> Decimal {
        LongDistanceRate::lookup(&self.rates, area_code)
    }
}
