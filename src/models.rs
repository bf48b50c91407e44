use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::error::GatewayError;

// Gateway API request format
#[derive(Deserialize, Serialize, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub model: Option<String>,
    pub system: Option<String>,
}

// Gateway API response format
#[derive(Deserialize, Serialize, Clone)]
pub struct GenerateResponse {
    pub model: String,
    pub response: String,
    pub cached: bool,
}

// Chat-completions wire format (only the fields the gateway touches)
#[derive(Deserialize, Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

// Queued request - holds the resolved prompt + one-time response channel
pub struct QueuedRequest {
    pub model: String,
    pub prompt: String,
    pub system: Option<String>,
    pub response_tx: oneshot::Sender<Result<GenerateResponse, GatewayError>>,
}
