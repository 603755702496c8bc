use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::chatbot::dto::ErrorMessage;

pub const CONFIGURATION_ERROR_TEXT: &str = "Server configuration error.";
pub const UPSTREAM_ERROR_TEXT: &str = "Error processing request.";
pub const INTERNAL_ERROR_TEXT: &str = "Error sending message to chatbot.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("API key or URL is missing from configuration")]
    Configuration,
    #[error("Completion API responded with {status}: {body}")]
    Upstream { status: StatusCode, body: Box<str> },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Writes the operator-facing diagnostic for this error.
    /// Nothing logged here ever reaches the caller.
    pub fn report(&self) {
        match self {
            Error::Configuration => {
                tracing::error!("API key or URL is missing from configuration.");
            }
            Error::Upstream { status, body } => {
                tracing::error!(status = status.as_u16(), body = %body, "Completion API call failed");
            }
            Error::Internal(error) => {
                tracing::error!(error = ?error, "{}", INTERNAL_ERROR_TEXT);
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Configuration => {
                (StatusCode::INTERNAL_SERVER_ERROR, CONFIGURATION_ERROR_TEXT).into_response()
            }
            Error::Upstream { status, .. } => (status, UPSTREAM_ERROR_TEXT).into_response(),
            Error::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorMessage {
                    message: INTERNAL_ERROR_TEXT.into(),
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn split(error: Error) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn configuration_error_is_plain_500() {
        let (status, body) = split(Error::Configuration).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Server configuration error.");
    }

    #[tokio::test]
    async fn upstream_error_keeps_status_and_hides_body() {
        let (status, body) = split(Error::Upstream {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "{\"error\":\"quota exceeded for key sk-secret\"}".into(),
        })
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, "Error processing request.");
    }

    #[tokio::test]
    async fn internal_error_hides_detail() {
        let (status, body) = split(anyhow::anyhow!("connection reset by peer").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Error sending message to chatbot." }));
    }
}
