// Error reports for packages that fail to load.
// Summarizes the package layout and prefills a GitHub issue.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Url;

use crate::error::{LensError, Result};
use crate::github::client::{DEFAULT_OWNER, DEFAULT_REPO};

const ISSUE_TITLE: &str = "[Auto-Report] Package Processing Error";
const ISSUE_LABELS: &str = "bug,auto-report";

/// Describe the top-level directories of a package.
pub fn file_structure_dump<S: AsRef<str>>(files: &[S]) -> String {
    if files.is_empty() {
        return "No files found in package".to_string();
    }

    let directories: BTreeSet<&str> = files
        .iter()
        .filter_map(|file| file.as_ref().split_once('/'))
        .map(|(first, _)| first)
        .filter(|first| !first.is_empty())
        .collect();

    let mut dump = format!("Total files: {}\n", files.len());
    dump.push_str(&format!("Root directories: {}\n\n", directories.len()));
    dump.push_str("Directory structure:\n```\n");
    for dir in &directories {
        dump.push_str(dir);
        dump.push_str("/\n");
    }
    dump.push_str("```");
    dump
}

/// URL of a new GitHub issue prefilled with the failure details.
pub fn issue_url(
    error_message: &str,
    file_structure: &str,
    user_agent: &str,
    reported_at: DateTime<Utc>,
) -> Result<String> {
    let body = format!(
        "**Error Message:**\n{}\n\n\
         **File Structure:**\n{}\n\n\
         **Browser:**\n{}\n\n\
         **Date:**\n{}\n\n\
         **Additional Information:**\n\
         Please add any additional details about your Discord package that might help us investigate this issue.\n",
        error_message,
        file_structure,
        user_agent,
        reported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    );

    let base = format!(
        "https://github.com/{}/{}/issues/new",
        DEFAULT_OWNER, DEFAULT_REPO
    );
    let url = Url::parse_with_params(
        &base,
        &[
            ("title", ISSUE_TITLE),
            ("body", body.as_str()),
            ("labels", ISSUE_LABELS),
        ],
    )
    .map_err(|e| LensError::Other(e.to_string()))?;

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_package() {
        let files: [&str; 0] = [];
        assert_eq!(file_structure_dump(&files), "No files found in package");
    }

    #[test]
    fn test_file_structure_dump() {
        let files = [
            "messages/c1/messages.json",
            "account/user.json",
            "README.txt",
            "messages/index.json",
            "/rooted.json",
            "servers/",
        ];

        assert_eq!(
            file_structure_dump(&files),
            "Total files: 6\nRoot directories: 3\n\nDirectory structure:\n```\naccount/\nmessages/\nservers/\n```"
        );
    }

    #[test]
    fn test_issue_url() {
        let reported_at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let url = issue_url("Unexpected token", "No files found in package", "curl/8.0", reported_at)
            .unwrap();

        assert!(url.starts_with(
            "https://github.com/Androz2091/discord-data-package-explorer/issues/new?"
        ));

        let parsed = Url::parse(&url).unwrap();
        let params: HashMap<String, String> = parsed.query_pairs().into_owned().collect();

        assert_eq!(params["title"], "[Auto-Report] Package Processing Error");
        assert_eq!(params["labels"], "bug,auto-report");
        let body = &params["body"];
        assert!(body.starts_with("**Error Message:**\nUnexpected token\n\n"));
        assert!(body.contains("**Browser:**\ncurl/8.0\n"));
        assert!(body.contains("**Date:**\n2023-11-14T22:13:20.123Z\n"));
    }
}
