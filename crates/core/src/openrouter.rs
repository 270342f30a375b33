//! Request and response shapes for the chat-completions API

use serde::{Deserialize, Serialize};

/// A single message in a chat-completions conversation
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completions request body
#[derive(Debug, Serialize, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Chat-completions response envelope
#[derive(Debug, Deserialize, Clone)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One completion choice from the envelope
#[derive(Debug, Deserialize, Clone)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

/// The message carried by a completion choice
#[derive(Debug, Deserialize, Clone)]
pub struct ChatChoiceMessage {
    pub content: String,
}

/// Build the two-message conversation sent to the completion service
pub fn build_chat_request(model: &str, system: &str, prompt: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            },
        ],
    }
}

/// Extract the first choice's message content from a response envelope
pub fn extract_content(response: ChatResponse) -> Result<String, String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| "completion response contained no choices".to_string())
}
