//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はアプリ側の責務（shared に axum 依存を入れない）
//! - 入力エラーは `{ "message" }`、原因を伴うエラーは `{ "message", "error" }`

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// `message` は利用者向けの短い説明、`error` は原因の詳細（ある場合のみ出力）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error:   Option<String>,
}

impl ErrorResponse {
    /// 原因を伴わないエラーレスポンスを作成する
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error:   None,
        }
    }

    /// 原因の詳細を伴うエラーレスポンスを作成する
    pub fn with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error:   Some(error.into()),
        }
    }
}
