// GitHub API response types.
// Raw contributor records and the normalized form stored in the cache.

use serde::{Deserialize, Serialize};

/// Contributor record as returned by `/repos/{owner}/{repo}/contributors`.
///
/// Only the fields we project are declared; a record missing any of them
/// fails to decode.
#[derive(Debug, Clone, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// Normalized contributor shown on the credits page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorInfo {
    pub username: String,
    pub avatar_url: String,
    pub profile_url: String,
}

impl From<Contributor> for ContributorInfo {
    fn from(contributor: Contributor) -> Self {
        Self {
            username: contributor.login,
            avatar_url: contributor.avatar_url,
            profile_url: contributor.html_url,
        }
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
