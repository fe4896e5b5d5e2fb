//! # Todo Service エラー定義
//!
//! Todo Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | エラー | ステータス | `message` |
//! |--------|-----------|-----------|
//! | `InvalidPayload` | 400 | `invalid data`（`error` に詳細） |
//! | `Validation` | 400 | 検証メッセージ |
//! | `InvalidIdentifier` | 400 | `invalid id` |
//! | `StoreUnavailable` | 500 | 操作ごとのメッセージ（`error` に詳細） |
//! | `Internal` | 500 | `internal error`（`error` に詳細） |

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_domain::DomainError;
use todo_infra::InfraError;
use todo_shared::ErrorResponse;

/// ストア障害時の既定メッセージ
pub const DATABASE_ERROR_MESSAGE: &str = "database error";

/// Todo Service で発生するエラー
#[derive(Debug, Error)]
pub enum TodoError {
    /// リクエストボディを JSON として解釈できない
    #[error("不正なリクエストボディ: {0}")]
    InvalidPayload(String),

    /// 入力値の検証エラー
    #[error("検証エラー: {0}")]
    Validation(String),

    /// パスの ID を解釈できない
    #[error("不正な ID: {0}")]
    InvalidIdentifier(String),

    /// ストアとの通信に失敗
    #[error("ストアエラー: {source}")]
    StoreUnavailable {
        /// レスポンスの `message`
        message: &'static str,
        #[source]
        source:  InfraError,
    },

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl TodoError {
    /// レスポンスメッセージを指定してストアエラーを作成する
    pub fn store(message: &'static str, source: InfraError) -> Self {
        Self::StoreUnavailable { message, source }
    }
}

impl From<InfraError> for TodoError {
    fn from(source: InfraError) -> Self {
        Self::store(DATABASE_ERROR_MESSAGE, source)
    }
}

impl From<JsonRejection> for TodoError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidPayload(rejection.body_text())
    }
}

impl From<PathRejection> for TodoError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidIdentifier(rejection.body_text())
    }
}

impl From<DomainError> for TodoError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::InvalidIdentifier(msg) => Self::InvalidIdentifier(msg),
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            TodoError::InvalidPayload(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_error("invalid data", detail),
            ),
            TodoError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            TodoError::InvalidIdentifier(detail) => {
                tracing::debug!(%detail, "不正な ID を受信しました");
                (StatusCode::BAD_REQUEST, ErrorResponse::new("invalid id"))
            }
            TodoError::StoreUnavailable { message, source } => {
                tracing::error!(
                    error.kind = "store",
                    span_trace = %source.span_trace(),
                    "ストアエラー: {}",
                    source
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_error(message, source.to_string()),
                )
            }
            TodoError::Internal(detail) => {
                tracing::error!(error.kind = "internal", "内部エラー: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_error("internal error", detail),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn into_parts(err: TodoError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_payloadは400とerror詳細を返す() {
        let (status, body) = into_parts(TodoError::InvalidPayload("EOF".to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, ErrorResponse::with_error("invalid data", "EOF"));
    }

    #[tokio::test]
    async fn test_validationは400とメッセージのみを返す() {
        let err: TodoError = DomainError::Validation("title is required".to_string()).into();

        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, ErrorResponse::new("title is required"));
    }

    #[tokio::test]
    async fn test_invalid_identifierは詳細を隠して400を返す() {
        let err: TodoError = DomainError::InvalidIdentifier("\"abc\"".to_string()).into();

        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, ErrorResponse::new("invalid id"));
    }

    #[tokio::test]
    async fn test_infra_errorからの変換はdatabase_errorになる() {
        let err: TodoError = InfraError::dynamo_db("connection refused").into();

        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            ErrorResponse::with_error("database error", "dynamodb error: connection refused")
        );
    }

    #[tokio::test]
    async fn test_storeは指定したメッセージを返す() {
        let err = TodoError::store("failed to fetch todos", InfraError::dynamo_db("timeout"));

        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "failed to fetch todos");
        assert_eq!(body.error.as_deref(), Some("dynamodb error: timeout"));
    }

    #[tokio::test]
    async fn test_internalは500を返す() {
        let (status, body) = into_parts(TodoError::Internal("render failed".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, ErrorResponse::with_error("internal error", "render failed"));
    }
}
