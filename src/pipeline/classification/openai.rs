//! Remote classification client (OpenAI-compatible chat completions).

use serde::{Deserialize, Serialize};

use super::ClassificationError;

/// Default model used for comment classification.
pub const DEFAULT_MODEL: &str = "gpt-5-nano";

/// Room for one JSON object with up to a batch worth of classifications.
const MAX_COMPLETION_TOKENS: u32 = 120;

/// Very low temperature for maximum labeling consistency.
const TEMPERATURE: f32 = 0.05;

/// Chat completion abstraction (allows mocking).
pub trait ChatClient: Send + Sync {
    /// Send one system + user message pair, return the assistant's reply.
    fn complete(&self, system: &str, user: &str) -> Result<String, ClassificationError>;
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, ClassificationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ClassificationError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Client for the public OpenAI API with the default model.
    pub fn default_remote(api_key: &str) -> Result<Self, ClassificationError> {
        Self::new("https://api.openai.com", api_key, DEFAULT_MODEL, 120)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_completion_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl ChatClient for OpenAiClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, ClassificationError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_completion_tokens: MAX_COMPLETION_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ClassificationError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    ClassificationError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    ClassificationError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClassificationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| ClassificationError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClassificationError::ResponseParsing("empty choices array".to_string()))
    }
}

/// Mock chat client for testing — replays a fixed sequence of outcomes,
/// then repeats the last one.
pub struct MockChatClient {
    replies: std::sync::Mutex<Vec<Result<String, ClassificationError>>>,
}

impl MockChatClient {
    /// Always return the same reply.
    pub fn new(reply: &str) -> Self {
        Self::with_sequence(vec![Ok(reply.to_string())])
    }

    /// Return the given outcomes in order; the final one sticks.
    pub fn with_sequence(replies: Vec<Result<String, ClassificationError>>) -> Self {
        assert!(!replies.is_empty(), "mock needs at least one reply");
        let mut replies = replies;
        replies.reverse();
        Self {
            replies: std::sync::Mutex::new(replies),
        }
    }
}

impl ChatClient for MockChatClient {
    fn complete(&self, _system: &str, _user: &str) -> Result<String, ClassificationError> {
        let mut replies = self.replies.lock().expect("mock lock");
        if replies.len() > 1 {
            replies.pop().expect("non-empty")
        } else {
            match replies.last().expect("non-empty") {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(ClassificationError::HttpClient(e.to_string())),
            }
        }
    }
}
