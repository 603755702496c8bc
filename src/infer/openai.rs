use std::time::Duration;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::Credentials, service};

pub const ROLE_USER: &str = "user";
pub const NO_RESPONSE_TEXT: &str = "No response received.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Response parsing failed: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("Error response from API ({status}): {body}")]
    ErrorResponse { status: StatusCode, body: Box<str> },
}

impl From<ApiError> for service::Error {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ErrorResponse { status, body } => service::Error::Upstream { status, body },
            other => service::Error::Internal(other.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OpenAIRequest<'a> {
    pub model: &'a str,
    pub messages: [OpenAIMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct OpenAIMessage<'a> {
    pub role: &'static str,
    pub content: Option<&'a str>,
}

// Every link may be missing; any gap falls back to NO_RESPONSE_TEXT.
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Option<Vec<OpenAIChoice>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<serde_json::Value>,
}

impl OpenAIResponse {
    fn into_content(self) -> Option<String> {
        match self.choices?.into_iter().next()?.message?.content? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(text),
            other => Some(other.to_string()),
        }
    }
}

/// Extracts `choices[0].message.content`, trimmed, from a completion response body.
/// Non-string content is rendered as its JSON text.
pub fn reply_text(body: &str) -> Result<Box<str>, ApiError> {
    if body.trim().is_empty() {
        return Ok(NO_RESPONSE_TEXT.into());
    }

    let response: Option<OpenAIResponse> = serde_json::from_str(body)?;
    Ok(response
        .and_then(OpenAIResponse::into_content)
        .map(|content| content.trim().into())
        .unwrap_or_else(|| NO_RESPONSE_TEXT.into()))
}

/// Completion API client. Cheap to clone; all clones share one connection pool.
/// Holds no per-request state: credentials travel with each call.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    model: Box<str>,
}

impl CompletionClient {
    pub fn new(model: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(
        &self,
        credentials: Credentials<'_>,
        message: Option<&str>,
    ) -> Result<Box<str>, ApiError> {
        let openai_request = OpenAIRequest {
            model: &self.model,
            messages: [OpenAIMessage {
                role: ROLE_USER,
                content: message,
            }],
        };

        let response = self
            .http
            .post(credentials.api_url)
            .bearer_auth(credentials.api_key)
            .json(&openai_request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::ErrorResponse {
                status,
                body: body.into(),
            });
        }

        reply_text(&body)
    }
}
