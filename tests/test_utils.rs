#![allow(dead_code)]

use assert_fs::prelude::*;
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const HEADER: &str = "repo_name,tag,release_name,release_description\n";
pub const TOKEN: &str = "test-token";

/// A temporary directory holding the CSV input for a run
pub struct TestInput {
    pub temp_dir: assert_fs::TempDir,
}

impl TestInput {
    /// Input file with only the header row
    pub fn header_only() -> Self {
        Self::with_rows(&[])
    }

    /// Input file with the header followed by `rows` (already CSV-formatted)
    pub fn with_rows(rows: &[&str]) -> Self {
        let input = Self {
            temp_dir: assert_fs::TempDir::new().unwrap(),
        };
        let mut content = HEADER.to_string();
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        input.write("rows.csv", &content);
        input
    }

    /// The acme/widgets v1.2.0 example row
    pub fn widgets() -> Self {
        Self::with_rows(&["acme/widgets,v1.2.0,Widgets 1.2.0,Bug fixes"])
    }

    pub fn write(&self, filename: &str, content: &str) -> &Self {
        self.temp_dir.child(filename).write_str(content).unwrap();
        self
    }

    pub fn csv_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("rows.csv")
    }
}

/// Tag lookup answering with `sha`
pub async fn mock_tag(server: &MockServer, repo: &str, tag: &str, sha: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/git/refs/tags/{}", repo, tag)))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ref": format!("refs/tags/{}", tag),
            "node_id": "MDM6UmVmcmVmcy90YWdzL3Yx",
            "url": format!("https://api.github.com/repos/{}/git/refs/tags/{}", repo, tag),
            "object": {
                "type": "commit",
                "sha": sha,
                "url": format!("https://api.github.com/repos/{}/git/commits/{}", repo, sha)
            }
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Tag lookup answering 404
pub async fn mock_missing_tag(server: &MockServer, repo: &str, tag: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/git/refs/tags/{}", repo, tag)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/git/refs#get-a-reference"
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Ref creation for `refs/heads/{branch}` at `sha`
pub async fn mock_create_ref(
    server: &MockServer,
    repo: &str,
    branch: &str,
    sha: &str,
    expected_calls: u64,
) {
    let ref_name = format!("refs/heads/{}", branch);
    Mock::given(method("POST"))
        .and(path(format!("/repos/{}/git/refs", repo)))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_json(json!({ "ref": ref_name, "sha": sha })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ref": ref_name,
            "node_id": "MDM6UmVmcmVmcy9oZWFkcy9icmFuY2g=",
            "url": format!("https://api.github.com/repos/{}/git/{}", repo, ref_name),
            "object": { "type": "commit", "sha": sha }
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Any ref creation in `repo`; used to assert that none happens
pub async fn forbid_create_ref(server: &MockServer, repo: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/repos/{}/git/refs", repo)))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

/// Release creation with the exact payload the tool sends
pub async fn mock_create_release(
    server: &MockServer,
    repo: &str,
    tag: &str,
    name: &str,
    body: &str,
    status: u16,
) {
    let response = if status == 201 {
        ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "tag_name": tag,
            "name": name,
            "html_url": format!("https://github.com/{}/releases/tag/{}", repo, tag)
        }))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{ "resource": "Release", "code": "already_exists", "field": "tag_name" }]
        }))
    };

    Mock::given(method("POST"))
        .and(path(format!("/repos/{}/releases", repo)))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_json(json!({
            "tag_name": tag,
            "name": name,
            "body": body,
            "draft": false,
            "prerelease": false
        })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}
