// GitHub API endpoint functions.
// Typed contributor fetch plus the source seam used by the contributor cache.

use std::future::Future;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Contributor, ContributorInfo};

/// Anything that can produce a fresh contributor list.
pub trait ContributorSource {
    fn fetch_contributors(&self) -> impl Future<Output = Result<Vec<ContributorInfo>>> + Send;
}

impl<T: ContributorSource + ?Sized> ContributorSource for &T {
    fn fetch_contributors(&self) -> impl Future<Output = Result<Vec<ContributorInfo>>> + Send {
        (**self).fetch_contributors()
    }
}

impl GitHubClient {
    /// Get contributors for a repository.
    pub async fn get_contributors(&self, owner: &str, repo: &str) -> Result<Vec<Contributor>> {
        let response = self
            .get(&format!("/repos/{}/{}/contributors", owner, repo))
            .await?;
        // Decode from text so shape errors surface as Json errors.
        let body = response.text().await?;
        let contributors: Vec<Contributor> = serde_json::from_str(&body)?;
        Ok(contributors)
    }
}

impl ContributorSource for GitHubClient {
    async fn fetch_contributors(&self) -> Result<Vec<ContributorInfo>> {
        let (owner, repo) = self.repository();
        let contributors = self.get_contributors(owner, repo).await?;
        Ok(contributors.into_iter().map(ContributorInfo::from).collect())
    }
}
