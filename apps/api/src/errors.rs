use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::RenderError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing CV file or empty job description. Caller-correctable.
    #[error("{0}")]
    MissingInput(String),

    /// The request body ran past the configured upload limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    /// The model replied, but not with a valid analysis object.
    #[error("Malformed analysis response: {0}")]
    MalformedAnalysisResponse(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(name) | StoreError::InvalidName(name) => AppError::NotFound(name),
            other => AppError::Storage(other.to_string()),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::EmptyContent => {
                AppError::MalformedAnalysisResponse("model returned no text".to_string())
            }
            other => AppError::ExternalService(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let details = self.to_string();
        match self {
            AppError::MissingInput(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, Json(json!({ "error": msg }))).into_response()
            }
            AppError::NotFound(name) => {
                tracing::debug!("Not found: {name}");
                (StatusCode::NOT_FOUND, "File not found").into_response()
            }
            AppError::Storage(_)
            | AppError::ExternalService(_)
            | AppError::MalformedAnalysisResponse(_) => {
                tracing::error!("{details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Server error",
                        "details": details,
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_input_is_400_with_error_field() {
        let response = AppError::MissingInput("Missing CV file".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing CV file");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_payload_too_large_is_413_with_error_field() {
        let response = AppError::PayloadTooLarge("CV file exceeds 10 bytes".into()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["error"], "CV file exceeds 10 bytes");
    }

    #[tokio::test]
    async fn test_server_errors_are_500_with_details() {
        for err in [
            AppError::Storage("disk full".into()),
            AppError::ExternalService("connection reset".into()),
            AppError::MalformedAnalysisResponse("expected value".into()),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = body_json(response).await;
            assert_eq!(body["error"], "Server error");
            assert!(body["details"].as_str().unwrap().len() > 0);
        }
    }

    #[tokio::test]
    async fn test_not_found_is_plain_text_404() {
        let response = AppError::NotFound("improved-1.pdf".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"File not found");
    }

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let err: AppError = StoreError::NotFound("x.pdf".into()).into();
        assert!(matches!(err, AppError::NotFound(_)));
        let err: AppError = StoreError::InvalidName("../x".into()).into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_store_io_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = StoreError::Io(io).into();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[test]
    fn test_empty_llm_reply_is_malformed() {
        let err: AppError = LlmError::EmptyContent.into();
        assert!(matches!(err, AppError::MalformedAnalysisResponse(_)));
        let err: AppError = LlmError::Api {
            status: 503,
            message: "overloaded".into(),
        }
        .into();
        assert!(matches!(err, AppError::ExternalService(_)));
    }
}
