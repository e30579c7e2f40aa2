// Time-bounded cache for the contributor list.
// Serves a stored list until it expires, refreshes from the remote source,
// and falls back to the last stored list when the refresh fails.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::github::{ContributorInfo, ContributorSource};

use super::store::KeyValueStore;

/// How long a fetched contributor list stays fresh: 1 hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Store key holding the serialized contributor list.
pub const DATA_KEY: &str = "contributors_cache";

/// Store key holding the expiry instant in epoch milliseconds.
pub const EXPIRY_KEY: &str = "contributors_cache_expires_at";

/// Cache settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub data_key: String,
    pub expiry_key: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            data_key: DATA_KEY.to_string(),
            expiry_key: EXPIRY_KEY.to_string(),
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Stored contributor list with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    pub value: Vec<ContributorInfo>,
    /// A record whose expiry is missing or unreadable is treated as expired.
    pub expires_at: DateTime<Utc>,
}

impl CacheRecord {
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// How a lookup was satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Stored list within its TTL.
    Cached(Vec<ContributorInfo>),
    /// Just fetched from the remote source.
    Fresh(Vec<ContributorInfo>),
    /// Fetch failed, serving the last stored list.
    Stale(Vec<ContributorInfo>),
    /// Fetch failed and nothing was stored.
    Empty,
}

impl CacheOutcome {
    pub fn into_contributors(self) -> Vec<ContributorInfo> {
        match self {
            CacheOutcome::Cached(list) | CacheOutcome::Fresh(list) | CacheOutcome::Stale(list) => {
                list
            }
            CacheOutcome::Empty => Vec::new(),
        }
    }

    /// Whether the lookup fell back after a failed fetch.
    pub fn is_degraded(&self) -> bool {
        matches!(self, CacheOutcome::Stale(_) | CacheOutcome::Empty)
    }
}

/// Contributor list cache over an injected source and store.
pub struct ContributorCache<S, K> {
    source: S,
    store: K,
    config: CacheConfig,
    // Held while refreshing so overlapping misses share one fetch.
    refresh: Mutex<()>,
}

impl<S: ContributorSource, K: KeyValueStore> ContributorCache<S, K> {
    pub fn new(source: S, store: K, config: CacheConfig) -> Self {
        Self {
            source,
            store,
            config,
            refresh: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Contributor list, possibly stale or empty. Never fails.
    pub async fn get_contributors(&self) -> Vec<ContributorInfo> {
        self.resolve().await.into_contributors()
    }

    /// Look up the contributor list, reporting how it was obtained.
    pub async fn resolve(&self) -> CacheOutcome {
        if let Some(record) = self.record() {
            if record.is_valid(Utc::now()) {
                debug!("contributor cache hit");
                return CacheOutcome::Cached(record.value);
            }
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        let previous = self.record();
        if let Some(record) = &previous {
            if record.is_valid(Utc::now()) {
                debug!("contributor cache refreshed by concurrent caller");
                return CacheOutcome::Cached(record.value.clone());
            }
        }

        debug!("contributor cache miss, fetching");
        match self.source.fetch_contributors().await {
            Ok(contributors) => {
                if let Err(e) = self.store_record(&contributors) {
                    warn!("failed to store contributor cache: {e}");
                }
                info!(count = contributors.len(), "fetched contributors");
                CacheOutcome::Fresh(contributors)
            }
            Err(e) => match previous {
                Some(record) => {
                    warn!("contributor fetch failed, serving stale list: {e}");
                    CacheOutcome::Stale(record.value)
                }
                None => {
                    warn!("contributor fetch failed, nothing cached: {e}");
                    CacheOutcome::Empty
                }
            },
        }
    }

    /// Read the stored record, if there is a usable one.
    pub fn record(&self) -> Option<CacheRecord> {
        let data = match self.store.get(&self.config.data_key) {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(e) => {
                warn!("failed to read contributor cache: {e}");
                return None;
            }
        };

        let value: Vec<ContributorInfo> = match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(e) => {
                warn!("ignoring corrupt contributor cache: {e}");
                return None;
            }
        };

        let expires_at = self
            .store
            .get(&self.config.expiry_key)
            .ok()
            .flatten()
            .and_then(|ms| ms.trim().parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        Some(CacheRecord { value, expires_at })
    }

    /// Persist a freshly fetched list, value and expiry in one write.
    fn store_record(&self, contributors: &[ContributorInfo]) -> Result<()> {
        let expires_at = expiry_from(Utc::now(), self.config.ttl);
        let data = serde_json::to_string(contributors)?;
        let expiry = expires_at.timestamp_millis().to_string();

        self.store.set_many(&[
            (self.config.data_key.as_str(), data.as_str()),
            (self.config.expiry_key.as_str(), expiry.as_str()),
        ])
    }
}

fn expiry_from(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
