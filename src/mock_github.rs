use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::github::{GitHubClientTrait, GitHubRepo, NewRelease, ReleaseInfo};

/// A call the mock received, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    GetTag { repo: String, tag: String },
    CreateRef { repo: String, ref_name: String, sha: String },
    CreateRelease { repo: String, release: NewRelease },
}

/// Mock GitHub client for testing that stores operations in memory
///
/// Tags must be registered with [`MockGitHubClient::add_tag`]; unknown tags
/// answer 404. Branches behave like the real API and fail with 422 when they
/// already exist.
#[derive(Debug, Clone, Default)]
pub struct MockGitHubClient {
    /// (repo, tag) -> sha
    tags: Arc<Mutex<HashMap<(String, String), String>>>,
    /// Existing refs per repo
    refs: Arc<Mutex<HashSet<(String, String)>>>,
    /// Repos whose release endpoint fails with this status
    failing_releases: Arc<Mutex<HashMap<String, u16>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    next_release_id: Arc<Mutex<u64>>,
}

impl MockGitHubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag that resolves to `sha`
    pub fn add_tag(&self, repo: &str, tag: &str, sha: &str) -> &Self {
        self.tags
            .lock()
            .unwrap()
            .insert((repo.to_string(), tag.to_string()), sha.to_string());
        self
    }

    /// Make release creation in `repo` fail with `status`
    pub fn fail_releases(&self, repo: &str, status: u16) -> &Self {
        self.failing_releases
            .lock()
            .unwrap()
            .insert(repo.to_string(), status);
        self
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Refs created through `create_branch_ref`
    pub fn created_refs(&self) -> Vec<(String, String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::CreateRef { repo, ref_name, sha } => Some((repo, ref_name, sha)),
                _ => None,
            })
            .collect()
    }

    /// Releases posted through `create_release`, successful or not
    pub fn posted_releases(&self) -> Vec<(String, NewRelease)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::CreateRelease { repo, release } => Some((repo, release)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn api_error(status: u16, message: &str) -> ApiError {
    ApiError::Status {
        status,
        body: serde_json::json!({ "message": message }).to_string(),
    }
}

#[async_trait]
impl GitHubClientTrait for MockGitHubClient {
    async fn get_tag_sha(&self, repo: &GitHubRepo, tag: &str) -> Result<String, ApiError> {
        let repo = repo.to_string();
        self.record(MockCall::GetTag {
            repo: repo.clone(),
            tag: tag.to_string(),
        });

        self.tags
            .lock()
            .unwrap()
            .get(&(repo, tag.to_string()))
            .cloned()
            .ok_or_else(|| api_error(404, "Not Found"))
    }

    async fn create_branch_ref(
        &self,
        repo: &GitHubRepo,
        branch: &str,
        sha: &str,
    ) -> Result<(), ApiError> {
        let repo = repo.to_string();
        let ref_name = format!("refs/heads/{}", branch);
        self.record(MockCall::CreateRef {
            repo: repo.clone(),
            ref_name: ref_name.clone(),
            sha: sha.to_string(),
        });

        let mut refs = self.refs.lock().unwrap();
        if !refs.insert((repo, ref_name)) {
            return Err(api_error(422, "Reference already exists"));
        }
        Ok(())
    }

    async fn create_release(
        &self,
        repo: &GitHubRepo,
        release: &NewRelease,
    ) -> Result<ReleaseInfo, ApiError> {
        let repo = repo.to_string();
        self.record(MockCall::CreateRelease {
            repo: repo.clone(),
            release: release.clone(),
        });

        if let Some(status) = self.failing_releases.lock().unwrap().get(&repo) {
            return Err(api_error(*status, "Validation Failed"));
        }

        let id = {
            let mut counter = self.next_release_id.lock().unwrap();
            *counter += 1;
            *counter
        };

        Ok(ReleaseInfo {
            id,
            html_url: Some(format!(
                "https://github.com/{}/releases/tag/{}",
                repo, release.tag_name
            )),
        })
    }
}
