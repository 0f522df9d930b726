//! The two per-row operations: cut a branch from a tag, publish a release.
//!
//! Both take the run [`Config`] explicitly and report failures as
//! [`OperationError`] values; neither prints nor panics.

use crate::config::Config;
use crate::error::OperationError;
use crate::github::{GitHubClientTrait, NewRelease, ReleaseInfo};
use crate::manifest::ReleaseRow;

/// A branch created from a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCreated {
    pub branch: String,
    pub sha: String,
}

/// Resolve the row's tag and create `refs/heads/{config.branch_name}` at it.
///
/// A failed tag lookup returns before the ref POST is attempted.
pub async fn create_branch_from_tag(
    client: &dyn GitHubClientTrait,
    config: &Config,
    row: &ReleaseRow,
) -> Result<BranchCreated, OperationError> {
    let sha = client
        .get_tag_sha(&row.repo, &row.tag)
        .await
        .map_err(|source| OperationError::TagLookup {
            repo: row.repo.to_string(),
            tag: row.tag.clone(),
            source,
        })?;

    client
        .create_branch_ref(&row.repo, &config.branch_name, &sha)
        .await
        .map_err(|source| OperationError::BranchCreate {
            repo: row.repo.to_string(),
            tag: row.tag.clone(),
            branch: config.branch_name.clone(),
            source,
        })?;

    Ok(BranchCreated {
        branch: config.branch_name.clone(),
        sha,
    })
}

/// Build the release payload for a row. Releases are never drafts or
/// prereleases.
pub fn release_for_row(row: &ReleaseRow) -> NewRelease {
    NewRelease {
        tag_name: row.tag.clone(),
        name: row.release_name.clone(),
        body: row.release_description.clone(),
        draft: false,
        prerelease: false,
    }
}

/// Publish a release for the row's tag
pub async fn create_release(
    client: &dyn GitHubClientTrait,
    row: &ReleaseRow,
) -> Result<ReleaseInfo, OperationError> {
    client
        .create_release(&row.repo, &release_for_row(row))
        .await
        .map_err(|source| OperationError::ReleaseCreate {
            repo: row.repo.to_string(),
            tag: row.tag.clone(),
            release_name: row.release_name.clone(),
            source,
        })
}
