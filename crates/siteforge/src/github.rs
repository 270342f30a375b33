//! Hosting service client (GitHub REST API)

use crate::prelude::*;
use siteforge_core::github::{
    build_file_payload, classify_repo_creation, pages_payload, RepoCreation, UploadOutcome,
};

const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Branch every generated file is committed to, and the pages source branch
pub const TARGET_BRANCH: &str = "main";

/// GitHub configuration from environment variables
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub base_url: String,
    pub token: String,
    pub username: String,
}

impl GithubConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: std::env::var("GITHUB_API_BASE")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            token: std::env::var("GITHUB_TOKEN")
                .map_err(|_| eyre!("GITHUB_TOKEN environment variable not set"))?,
            username: std::env::var("GITHUB_USERNAME")
                .map_err(|_| eyre!("GITHUB_USERNAME environment variable not set"))?,
        })
    }

    /// Build a configuration around caller-supplied credentials
    ///
    /// Used by the serve mode, where credentials arrive with each request
    /// instead of living in the process environment.
    pub fn for_credentials(token: String, username: String) -> Self {
        Self {
            base_url: std::env::var("GITHUB_API_BASE")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            token,
            username,
        }
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, token: Option<String>, username: Option<String>) -> Self {
        if let Some(token) = token {
            self.token = token;
        }
        if let Some(username) = username {
            self.username = username;
        }
        self
    }
}

/// Create an authenticated HTTP client for the GitHub API
///
/// GitHub requires a User-Agent on every request and an API-version-scoped
/// Accept header on the endpoints used here.
pub fn create_github_client(config: &GithubConfig) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|e| eyre!("Invalid header value: {}", e))?,
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(
        "X-GitHub-Api-Version",
        HeaderValue::from_static("2022-11-28"),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static("siteforge"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Create a public auto-initialized repository under the authenticated user
///
/// A 422 (name already taken) is accepted and the existing repository is
/// reused as the upload target; any other non-created status stops the
/// pipeline before uploads begin.
pub async fn create_repository_data(
    client: &reqwest::Client,
    config: &GithubConfig,
    slug: &str,
) -> Result<RepoCreation> {
    let url = format!("{}/user/repos", config.base_url.trim_end_matches('/'));
    let payload = serde_json::json!({
        "name": slug,
        "private": false,
        "auto_init": true
    });

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| eyre!("Repository creation request failed: {}", e))?;

    match classify_repo_creation(response.status().as_u16()) {
        RepoCreation::Rejected(code) => {
            let body = response.text().await.unwrap_or_default();
            Err(eyre!("GitHub error [{}]: {}", code, body))
        }
        disposition => Ok(disposition),
    }
}

/// Upload one generated file to the repository
///
/// Returns the recorded per-file outcome; only a transport failure produces
/// an error here. Aggregation over outcomes is the caller's job.
pub async fn upload_file_data(
    client: &reqwest::Client,
    config: &GithubConfig,
    slug: &str,
    path: &str,
    content: &str,
) -> Result<UploadOutcome> {
    let url = format!(
        "{}/repos/{}/{}/contents/{}",
        config.base_url.trim_end_matches('/'),
        config.username,
        slug,
        path
    );
    let payload = build_file_payload(path, content, TARGET_BRANCH);

    let response = client
        .put(&url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| eyre!("Upload request for {} failed: {}", path, e))?;

    Ok(UploadOutcome {
        path: path.to_string(),
        status: response.status().as_u16(),
    })
}

/// Enable static-site publishing for the repository
pub async fn enable_pages_data(
    client: &reqwest::Client,
    config: &GithubConfig,
    slug: &str,
) -> Result<()> {
    let url = format!(
        "{}/repos/{}/{}/pages",
        config.base_url.trim_end_matches('/'),
        config.username,
        slug
    );
    let payload = pages_payload(TARGET_BRANCH, "/");

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| eyre!("Pages activation request failed: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Pages activation error [{}]: {}", status, body));
    }

    Ok(())
}
