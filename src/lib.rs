// Analysis and lookup helpers behind the data package explorer.
// Ranks extracted words and caches the project's contributor list.

pub mod analysis;
pub mod cache;
pub mod discord;
pub mod error;
pub mod github;
pub mod report;

pub use analysis::{FrequencyEntry, TokenTree, favorite_words, rank};
pub use cache::{
    CacheConfig, CacheOutcome, ContributorCache, FileStore, KeyValueStore, MemoryStore,
};
pub use error::{LensError, Result};
pub use github::{ContributorInfo, ContributorSource, GitHubClient};
