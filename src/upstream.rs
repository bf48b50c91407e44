use crate::error::GatewayError;
use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

// One chat-completions round trip. The bearer token rides only in the
// Authorization header; nothing returned from here may contain it.
pub async fn chat_completion(
    client: &reqwest::Client,
    api_url: &str,
    api_token: &str,
    model: &str,
    system: Option<&str>,
    prompt: &str,
) -> Result<String, GatewayError> {
    let mut messages = Vec::new();
    if let Some(system) = system {
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: system.to_string(),
        });
    }
    messages.push(ChatMessage {
        role: "user".to_string(),
        content: prompt.to_string(),
    });

    let payload = ChatCompletionRequest {
        model: model.to_string(),
        messages,
    };

    let res = client
        .post(api_url)
        .bearer_auth(api_token)
        .json(&payload)
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let detail = res.text().await.unwrap_or_default();
        return Err(GatewayError::UpstreamStatus {
            status: status.as_u16(),
            detail: truncate(&detail, 512),
        });
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| {
        if e.is_decode() {
            GatewayError::UnexpectedPayload(e.without_url().to_string())
        } else {
            GatewayError::from(e)
        }
    })?;

    extract_text(body)
}

// choices[0].message.content is the only field the gateway reads
pub fn extract_text(body: ChatCompletionResponse) -> Result<String, GatewayError> {
    body.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| GatewayError::UnexpectedPayload("no choices in response".to_string()))
}

// char-based so a cut in multibyte text never lands mid-codepoint
fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
