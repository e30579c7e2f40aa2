// GitHub API module.
// Client and types for reading the project's contributor list.

pub mod client;
pub mod endpoints;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::GitHubClient;
pub use endpoints::ContributorSource;
pub use types::*;
