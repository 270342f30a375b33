//! Parsing and naming for generated website projects

use std::collections::BTreeMap;

/// A website description produced by the completion service
///
/// Files are keyed by relative path and held in a `BTreeMap`, so iteration
/// (and therefore upload order) is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedProject {
    pub repo_name: String,
    pub files: BTreeMap<String, String>,
}

/// Error type for rejecting a completion payload
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProjectParseError {
    #[error("completion content is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("completion content is not a JSON object")]
    NotAnObject,

    #[error("missing or non-string \"repo_name\" key")]
    MissingRepoName,

    #[error("missing \"files\" object")]
    MissingFiles,

    #[error("\"files\" object is empty")]
    EmptyFiles,

    #[error("file \"{0}\" has non-string content")]
    NonStringContent(String),
}

/// Parse the completion content into a typed project description
///
/// The content must be a JSON object with a string `repo_name` and a
/// non-empty `files` object mapping paths to string contents. Ambiguous
/// shapes are rejected here rather than surfacing later in the upload loop.
pub fn parse_generated_project(content: &str) -> Result<GeneratedProject, ProjectParseError> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| ProjectParseError::InvalidJson(e.to_string()))?;

    let object = value.as_object().ok_or(ProjectParseError::NotAnObject)?;

    let repo_name = object
        .get("repo_name")
        .and_then(|v| v.as_str())
        .ok_or(ProjectParseError::MissingRepoName)?
        .to_string();

    let file_entries = object
        .get("files")
        .and_then(|v| v.as_object())
        .ok_or(ProjectParseError::MissingFiles)?;

    if file_entries.is_empty() {
        return Err(ProjectParseError::EmptyFiles);
    }

    let mut files = BTreeMap::new();
    for (path, value) in file_entries {
        let text = value
            .as_str()
            .ok_or_else(|| ProjectParseError::NonStringContent(path.clone()))?;
        files.insert(path.clone(), text.to_string());
    }

    Ok(GeneratedProject { repo_name, files })
}

/// Derive a repository slug from a generated project name
///
/// Lowercases the name and replaces spaces and underscores with hyphens.
/// No further sanitization is applied.
pub fn slugify(repo_name: &str) -> String {
    repo_name.to_lowercase().replace([' ', '_'], "-")
}
