use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::summarizer::Summarizer;
use crate::types::MessageRole;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

// Replies go straight into a chat message, keep them short
const MAX_TOKENS: u32 = 150;

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Message {
    fn new(role: MessageRole, content: &str) -> Self {
        Self {
            role,
            content: Some(content.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

fn build_request(model: &str, prompt: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            Message::new(MessageRole::System, SYSTEM_PROMPT),
            Message::new(MessageRole::User, prompt),
        ],
        max_tokens: MAX_TOKENS,
    }
}

/// Trimmed text of the first choice.
fn first_choice_text(response: CompletionResponse) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| BotError::CompletionResponse("No choices in response".to_string()))?;

    Ok(choice
        .message
        .content
        .map(|text| text.trim().to_string())
        .unwrap_or_default())
}

pub struct OpenAiClient {
    api_key: String,
    client: reqwest::Client,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            model,
        }
    }
}

#[async_trait]
impl Summarizer for OpenAiClient {
    async fn summarize(&self, prompt: &str) -> Result<String> {
        debug!(
            "Sending completion request ({} prompt characters)",
            prompt.len()
        );

        let request = build_request(&self.model, prompt);

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(BotError::CompletionApi { status, message });
        }

        let api_response: CompletionResponse = response.json().await?;
        let reply = first_choice_text(api_response)?;

        debug!("Received completion response");
        Ok(reply)
    }
}
