//! Completion service client (OpenRouter chat-completions API)

use crate::prelude::*;
use siteforge_core::openrouter::{build_chat_request, extract_content, ChatResponse};
use siteforge_core::project::{parse_generated_project, GeneratedProject};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "deepseek/deepseek-r1-0528:free";

/// Per-request timeout for the completion call
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Fixed instruction constraining the completion to the project JSON shape
const SYSTEM_PROMPT: &str = r##"You are a website project generator. Reply with JSON only:
{
  "repo_name": "short-project-name",
  "files": {
    "index.html": "<html>...</html>",
    "style.css": "body { ... }",
    "README.md": "# Name\n\nDescription"
  }
}"##;

/// OpenRouter configuration from environment variables
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl OpenRouterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("OPENROUTER_API_KEY")
                .map_err(|_| eyre!("OPENROUTER_API_KEY environment variable not set"))?,
            model: std::env::var("SITEFORGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }

    /// Build a configuration around a caller-supplied API key
    ///
    /// Used by the serve mode, where credentials arrive with each request
    /// instead of living in the process environment.
    pub fn for_key(api_key: String) -> Self {
        Self {
            base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key,
            model: std::env::var("SITEFORGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, api_key: Option<String>, model: Option<String>) -> Self {
        if let Some(key) = api_key {
            self.api_key = key;
        }
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}

/// Create an authenticated HTTP client for the completion service
pub fn create_completion_client(config: &OpenRouterConfig) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| eyre!("Invalid header value: {}", e))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Ask the completion service to describe a website project
///
/// Sends the fixed system instruction plus the user prompt, then parses the
/// first choice's content as the project JSON. Every failure (network,
/// timeout, non-success status, envelope or content parse) is terminal;
/// no retry is attempted.
pub async fn generate_project_data(
    config: &OpenRouterConfig,
    prompt: &str,
) -> Result<GeneratedProject> {
    let client = create_completion_client(config)?;
    let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
    let request = build_chat_request(&config.model, SYSTEM_PROMPT, prompt);

    let response = client
        .post(&url)
        .json(&request)
        .send()
        .await
        .map_err(|e| eyre!("Completion request failed: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Completion service error [{}]: {}", status, body));
    }

    let body_text = response
        .text()
        .await
        .map_err(|e| eyre!("Failed to read completion response: {}", e))?;

    let envelope: ChatResponse = serde_json::from_str(&body_text)
        .map_err(|e| eyre!("Failed to parse completion response: {}", e))?;

    let content = extract_content(envelope).map_err(|e| eyre!("{}", e))?;

    parse_generated_project(&content).map_err(|e| eyre!("Generated project rejected: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_pins_json_shape() {
        assert!(SYSTEM_PROMPT.contains("\"repo_name\""));
        assert!(SYSTEM_PROMPT.contains("\"files\""));
    }

    #[test]
    fn test_with_overrides_replaces_key_and_model() {
        let config = OpenRouterConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: "env-key".to_string(),
            model: DEFAULT_MODEL.to_string(),
        };

        let config = config.with_overrides(
            Some("cli-key".to_string()),
            Some("another/model".to_string()),
        );

        assert_eq!(config.api_key, "cli-key");
        assert_eq!(config.model, "another/model");
    }

    #[test]
    fn test_with_overrides_keeps_existing_values() {
        let config = OpenRouterConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: "env-key".to_string(),
            model: DEFAULT_MODEL.to_string(),
        };

        let config = config.with_overrides(None, None);

        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
