//! # ヘルスチェックハンドラ
//!
//! Todo Service の稼働状態を確認するためのエンドポイント。
//!
//! - `/health`: Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready`: Readiness Check（DynamoDB への疎通を確認）

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use todo_infra::repository::TodoRepository;
use todo_shared::{CheckStatus, HealthResponse, ReadinessResponse};

/// ストア疎通確認のタイムアウト
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub repository: Arc<dyn TodoRepository>,
}

/// Readiness Check エンドポイント
///
/// DynamoDB への疎通を確認する。OK → 200、失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let mut checks = HashMap::new();
    checks.insert(
        "dynamodb".to_string(),
        check_dynamodb(state.repository.as_ref()).await,
    );

    let response = ReadinessResponse::from_checks(checks);
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

/// DynamoDB への疎通を確認する（タイムアウト: 5 秒）
async fn check_dynamodb(repository: &dyn TodoRepository) -> CheckStatus {
    match tokio::time::timeout(CHECK_TIMEOUT, repository.check_connection()).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: dynamodb check failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: dynamodb check timed out");
            CheckStatus::Error
        }
    }
}
