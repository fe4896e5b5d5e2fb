//! # インフラ層エラー定義
//!
//! ドキュメントストア（DynamoDB）との通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! どの種別もアプリ層では「ストアを利用できない」（5xx）として扱う。
//! convenience constructor でエラーを生成すると、その時点のスパン情報が
//! 自動的にキャプチャされる。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// DynamoDB エラー
    ///
    /// 接続失敗、タイムアウト、サービスエラーなど。
    /// AWS SDK のエラー型はジェネリクスが深く `#[from]` が困難なため、
    /// 手動で String にマップする。
    #[error("dynamodb error: {0}")]
    DynamoDb(String),

    /// 格納済みアイテムの形式不正
    ///
    /// 必須属性の欠落や型の不一致など、アイテムを Todo に変換できない場合。
    #[error("invalid stored item: {0}")]
    InvalidItem(String),
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    fn with_kind(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    /// DynamoDB エラーを生成する
    pub fn dynamo_db(msg: impl Into<String>) -> Self {
        Self::with_kind(InfraErrorKind::DynamoDb(msg.into()))
    }

    /// アイテム形式不正エラーを生成する
    pub fn invalid_item(msg: impl Into<String>) -> Self {
        Self::with_kind(InfraErrorKind::InvalidItem(msg.into()))
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}
