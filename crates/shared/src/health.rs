//! # ヘルスチェック共通型
//!
//! `/health`（liveness）と `/health/ready`（readiness）で使用するレスポンス型。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// ```
/// use todo_shared::HealthResponse;
///
/// let response = HealthResponse {
///     status:  "healthy".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` または `"unhealthy"`）
    pub status:  String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version: String,
}

/// 個別チェックの結果ステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

/// Readiness 全体のステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// 全依存サービスが利用可能
    Ready,
    /// 一部の依存サービスが利用不可
    NotReady,
}

/// Readiness Check レスポンス
///
/// `status` は全体のステータス、`checks` は依存先ごとの結果を示す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: ReadinessStatus,
    /// 個別チェック結果（キー: チェック名、値: ステータス）
    pub checks: HashMap<String, CheckStatus>,
}

impl ReadinessResponse {
    /// 個別チェック結果から全体ステータスを導出して作成する
    ///
    /// 1 つでも [`CheckStatus::Error`] があれば [`ReadinessStatus::NotReady`]。
    pub fn from_checks(checks: HashMap<String, CheckStatus>) -> Self {
        let status = if checks.values().all(|s| matches!(s, CheckStatus::Ok)) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };
        Self { status, checks }
    }

    /// 全依存サービスが利用可能か
    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_responseのserializeで正しいjson形状にする() {
        let response = HealthResponse {
            status:  "healthy".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": "healthy",
                "version": "0.1.0"
            })
        );
    }

    #[test]
    fn test_readiness_status_not_readyのserialize結果() {
        let json = serde_json::to_value(ReadinessStatus::NotReady).unwrap();
        assert_eq!(json, serde_json::json!("not_ready"));
    }

    #[test]
    fn test_from_checks_全てokならready() {
        let mut checks = HashMap::new();
        checks.insert("dynamodb".to_string(), CheckStatus::Ok);

        let response = ReadinessResponse::from_checks(checks);

        assert!(response.is_ready());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["checks"]["dynamodb"], "ok");
    }

    #[test]
    fn test_from_checks_errorを含むとnot_ready() {
        let mut checks = HashMap::new();
        checks.insert("dynamodb".to_string(), CheckStatus::Error);

        let response = ReadinessResponse::from_checks(checks);

        assert!(!response.is_ready());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "not_ready");
        assert_eq!(json["checks"]["dynamodb"], "error");
    }
}
