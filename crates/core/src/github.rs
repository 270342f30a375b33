//! Payload construction and status classification for the GitHub REST API

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Disposition of a repository-creation response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoCreation {
    /// 201: the repository was created
    Created,
    /// 422: a repository with the same name already exists; it is reused
    AlreadyExists,
    /// Anything else stops the pipeline before any upload
    Rejected(u16),
}

/// Classify a repository-creation response status
pub fn classify_repo_creation(status: u16) -> RepoCreation {
    match status {
        201 => RepoCreation::Created,
        422 => RepoCreation::AlreadyExists,
        other => RepoCreation::Rejected(other),
    }
}

/// Request body for the create-or-update-contents endpoint
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FilePayload {
    pub message: String,
    pub content: String,
    pub branch: String,
}

/// Build the upload payload for one generated file
///
/// The contents endpoint requires the file body base64-encoded; the commit
/// message is fixed to `Add {path}`.
pub fn build_file_payload(path: &str, content: &str, branch: &str) -> FilePayload {
    FilePayload {
        message: format!("Add {path}"),
        content: base64::engine::general_purpose::STANDARD.encode(content),
        branch: branch.to_string(),
    }
}

/// Request body for the pages-activation endpoint
pub fn pages_payload(branch: &str, path: &str) -> serde_json::Value {
    serde_json::json!({ "source": { "branch": branch, "path": path } })
}

/// Predicted published-site URL (constructed, not confirmed)
pub fn site_url(username: &str, slug: &str) -> String {
    format!("https://{username}.github.io/{slug}")
}

/// Repository URL on github.com
pub fn repo_url(username: &str, slug: &str) -> String {
    format!("https://github.com/{username}/{slug}")
}

/// Recorded result of a single file upload
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UploadOutcome {
    pub path: String,
    pub status: u16,
}

impl UploadOutcome {
    pub fn succeeded(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Collect the paths whose upload did not succeed
pub fn failed_uploads(outcomes: &[UploadOutcome]) -> Vec<&str> {
    outcomes
        .iter()
        .filter(|outcome| !outcome.succeeded())
        .map(|outcome| outcome.path.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // classify_repo_creation tests
    // ============================================================================

    #[test]
    fn test_classify_created() {
        assert_eq!(classify_repo_creation(201), RepoCreation::Created);
    }

    #[test]
    fn test_classify_already_exists() {
        assert_eq!(classify_repo_creation(422), RepoCreation::AlreadyExists);
    }

    #[test]
    fn test_classify_forbidden_rejected() {
        assert_eq!(classify_repo_creation(403), RepoCreation::Rejected(403));
    }

    #[test]
    fn test_classify_server_error_rejected() {
        assert_eq!(classify_repo_creation(500), RepoCreation::Rejected(500));
    }

    #[test]
    fn test_classify_ok_is_not_created() {
        // Only 201 and 422 may proceed; a plain 200 is unexpected here.
        assert_eq!(classify_repo_creation(200), RepoCreation::Rejected(200));
    }

    // ============================================================================
    // build_file_payload tests
    // ============================================================================

    #[test]
    fn test_build_file_payload_encodes_base64() {
        let payload = build_file_payload("index.html", "<html></html>", "main");

        assert_eq!(payload.content, "PGh0bWw+PC9odG1sPg==");
        assert_eq!(payload.message, "Add index.html");
        assert_eq!(payload.branch, "main");
    }

    #[test]
    fn test_build_file_payload_css() {
        let payload = build_file_payload("style.css", "body { color: red; }", "main");
        assert_eq!(payload.content, "Ym9keSB7IGNvbG9yOiByZWQ7IH0=");
        assert_eq!(payload.message, "Add style.css");
    }

    #[test]
    fn test_build_file_payload_empty_content() {
        let payload = build_file_payload("empty.txt", "", "main");
        assert_eq!(payload.content, "");
    }

    #[test]
    fn test_file_payload_serializes() {
        let payload = build_file_payload("index.html", "hello", "main");
        let json = serde_json::to_string(&payload).unwrap();

        assert!(json.contains("\"message\":\"Add index.html\""));
        assert!(json.contains("\"content\":\"aGVsbG8=\""));
        assert!(json.contains("\"branch\":\"main\""));
    }

    // ============================================================================
    // pages_payload and URL tests
    // ============================================================================

    #[test]
    fn test_pages_payload_shape() {
        let payload = pages_payload("main", "/");
        assert_eq!(payload["source"]["branch"], "main");
        assert_eq!(payload["source"]["path"], "/");
    }

    #[test]
    fn test_site_url() {
        assert_eq!(site_url("alice", "my-site"), "https://alice.github.io/my-site");
    }

    #[test]
    fn test_repo_url() {
        assert_eq!(repo_url("alice", "my-site"), "https://github.com/alice/my-site");
    }

    // ============================================================================
    // upload outcome tests
    // ============================================================================

    fn outcome(path: &str, status: u16) -> UploadOutcome {
        UploadOutcome {
            path: path.to_string(),
            status,
        }
    }

    #[test]
    fn test_upload_outcome_succeeded() {
        assert!(outcome("index.html", 201).succeeded());
        assert!(outcome("index.html", 200).succeeded());
        assert!(!outcome("index.html", 500).succeeded());
        assert!(!outcome("index.html", 404).succeeded());
    }

    #[test]
    fn test_failed_uploads_empty_when_all_succeed() {
        let outcomes = vec![outcome("a.html", 201), outcome("b.css", 201)];
        assert!(failed_uploads(&outcomes).is_empty());
    }

    #[test]
    fn test_failed_uploads_collects_failures() {
        let outcomes = vec![
            outcome("a.html", 201),
            outcome("b.css", 500),
            outcome("c.md", 422),
        ];
        assert_eq!(failed_uploads(&outcomes), vec!["b.css", "c.md"]);
    }

    // ============================================================================
    // end-to-end fixture: prompt scenario from the upload contract
    // ============================================================================

    #[test]
    fn test_portfolio_scenario_values() {
        use crate::project::{parse_generated_project, slugify};

        let content = r#"{"repo_name":"My Site","files":{"index.html":"<html></html>"}}"#;
        let project = parse_generated_project(content).unwrap();
        let slug = slugify(&project.repo_name);

        assert_eq!(slug, "my-site");

        let payload = build_file_payload("index.html", &project.files["index.html"], "main");
        assert_eq!(payload.content, "PGh0bWw+PC9odG1sPg==");

        assert_eq!(site_url("alice", &slug), "https://alice.github.io/my-site");
        assert_eq!(repo_url("alice", &slug), "https://github.com/alice/my-site");
    }
}
