//! Error types shared across the crate.
//!
//! Startup failures (`ConfigError`, `ManifestError`) abort the run before any
//! request is sent. `OperationError` is only ever captured per row and ends up
//! in the batch report; it never aborts the batch.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or incomplete run configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GitHub token not configured. Set GITHUB_TOKEN or pass --token.")]
    MissingToken,

    #[error("branch name must not be empty")]
    EmptyBranchName,

    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("nothing to do: both branch and release creation are disabled")]
    NothingEnabled,
}

/// A single bad line in the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub line: u64,
    pub message: String,
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Failure to load the CSV input.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("{} problem(s) found in input:\n{}", .0.len(), format_issues(.0))]
    InvalidRows(Vec<RowIssue>),
}

fn format_issues(issues: &[RowIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A failed call against the hosting API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The API answered with a non-success status and an error body.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }
}

impl From<octocrab::Error> for ApiError {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                let mut body = serde_json::json!({ "message": source.message });
                if let Some(url) = &source.documentation_url {
                    body["documentation_url"] = serde_json::Value::String(url.clone());
                }
                if let Some(errors) = &source.errors {
                    body["errors"] = serde_json::Value::Array(errors.clone());
                }
                ApiError::Status {
                    status: source.status_code.as_u16(),
                    body: body.to_string(),
                }
            }
            other => ApiError::Transport(other.to_string()),
        }
    }
}

/// Per-row failure of one of the two operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("Error fetching tag {tag} for repo {repo}: {source}")]
    TagLookup {
        repo: String,
        tag: String,
        #[source]
        source: ApiError,
    },

    #[error("Error creating branch '{branch}' from tag {tag} in repo {repo}: {source}")]
    BranchCreate {
        repo: String,
        tag: String,
        branch: String,
        #[source]
        source: ApiError,
    },

    #[error("Error creating release '{release_name}' for tag {tag} in repo {repo}: {source}")]
    ReleaseCreate {
        repo: String,
        tag: String,
        release_name: String,
        #[source]
        source: ApiError,
    },
}

impl OperationError {
    pub fn api_error(&self) -> &ApiError {
        match self {
            OperationError::TagLookup { source, .. }
            | OperationError::BranchCreate { source, .. }
            | OperationError::ReleaseCreate { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lookup_message_names_repo_and_tag() {
        let err = OperationError::TagLookup {
            repo: "acme/widgets".to_string(),
            tag: "v1.2.0".to_string(),
            source: ApiError::Status {
                status: 404,
                body: r#"{"message":"Not Found"}"#.to_string(),
            },
        };

        let message = err.to_string();
        assert!(message.contains("acme/widgets"));
        assert!(message.contains("v1.2.0"));
        assert!(message.contains("Not Found"));
        assert_eq!(err.api_error().status(), Some(404));
    }

    #[test]
    fn test_invalid_rows_lists_every_issue() {
        let err = ManifestError::InvalidRows(vec![
            RowIssue { line: 2, message: "tag is empty".to_string() },
            RowIssue { line: 5, message: "bad repo".to_string() },
        ]);

        let message = err.to_string();
        assert!(message.starts_with("2 problem(s) found in input"));
        assert!(message.contains("line 2: tag is empty"));
        assert!(message.contains("line 5: bad repo"));
    }

    #[test]
    fn test_transport_error_has_no_status() {
        assert_eq!(ApiError::Transport("connection refused".into()).status(), None);
    }
}
