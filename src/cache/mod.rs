// Cache module for the contributor list.
// Key/value storage backends and the time-bounded contributor cache.

pub mod contributors;
pub mod paths;
pub mod store;

pub use contributors::{
    CacheConfig, CacheOutcome, CacheRecord, ContributorCache, DATA_KEY, DEFAULT_TTL, EXPIRY_KEY,
};
pub use paths::{cache_dir, store_path};
pub use store::{FileStore, KeyValueStore, MemoryStore};
