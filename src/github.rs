use async_trait::async_trait;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::ApiError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository identifier in `owner/name` form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitHubRepo {
    pub owner: String,
    pub name: String,
}

impl FromStr for GitHubRepo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty()
                    && !name.is_empty()
                    && !name.contains('/')
                    && !s.chars().any(char::is_whitespace) =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(format!("repo_name '{}' is not in owner/repo form", s)),
        }
    }
}

impl fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Payload for `POST /repos/{repo}/releases`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

/// Subset of a created release we report back
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseInfo {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Debug, Serialize)]
struct NewRef<'a> {
    #[serde(rename = "ref")]
    ref_name: &'a str,
    sha: &'a str,
}

/// Route for the tag's ref, each `/`-separated part of the tag
/// percent-encoded so `#`, `?` and `%` stay in the path
pub fn tag_ref_route(repo: &GitHubRepo, tag: &str) -> Result<String, ApiError> {
    let mut url = Url::parse("http://localhost/repos")
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::Transport("cannot build tag route".to_string()))?
        .push(&repo.owner)
        .push(&repo.name)
        .extend(["git", "refs", "tags"])
        .extend(tag.split('/'));

    Ok(url.path().to_string())
}

/// Trait for the hosting API calls, so the driver can run against a mock
#[async_trait]
pub trait GitHubClientTrait: Send + Sync {
    /// Resolve `tag` to the SHA its reference points at.
    async fn get_tag_sha(&self, repo: &GitHubRepo, tag: &str) -> Result<String, ApiError>;

    /// Create `refs/heads/{branch}` pointing at `sha`.
    async fn create_branch_ref(
        &self,
        repo: &GitHubRepo,
        branch: &str,
        sha: &str,
    ) -> Result<(), ApiError>;

    async fn create_release(
        &self,
        repo: &GitHubRepo,
        release: &NewRelease,
    ) -> Result<ReleaseInfo, ApiError>;
}

/// GitHub API client wrapper
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Create a client authenticated with `token` against `api_url`
    pub fn new(token: &str, api_url: &str) -> Result<Self, ApiError> {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_url)?
            .build()?;

        Ok(Self { octocrab })
    }
}

#[async_trait]
impl GitHubClientTrait for GitHubClient {
    async fn get_tag_sha(&self, repo: &GitHubRepo, tag: &str) -> Result<String, ApiError> {
        let route = tag_ref_route(repo, tag)?;
        log::debug!("GET {}", route);

        let git_ref: GitRef = self.octocrab.get(route, None::<&()>).await?;

        log::debug!("Tag {} in {} resolves to {}", tag, repo, git_ref.object.sha);
        Ok(git_ref.object.sha)
    }

    async fn create_branch_ref(
        &self,
        repo: &GitHubRepo,
        branch: &str,
        sha: &str,
    ) -> Result<(), ApiError> {
        let route = format!("/repos/{}/{}/git/refs", repo.owner, repo.name);
        let ref_name = format!("refs/heads/{}", branch);
        log::debug!("POST {} ({} -> {})", route, ref_name, sha);

        let body = NewRef {
            ref_name: &ref_name,
            sha,
        };
        let _created: serde_json::Value = self.octocrab.post(route, Some(&body)).await?;

        Ok(())
    }

    async fn create_release(
        &self,
        repo: &GitHubRepo,
        release: &NewRelease,
    ) -> Result<ReleaseInfo, ApiError> {
        let route = format!("/repos/{}/{}/releases", repo.owner, repo.name);
        log::debug!("POST {} (tag {})", route, release.tag_name);

        let info: ReleaseInfo = self.octocrab.post(route, Some(release)).await?;

        Ok(info)
    }
}
