//! # Todo Service 共有ユーティリティ
//!
//! Todo Service 全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, todo-service）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（`IntoResponse` 変換はアプリ側の責務）

pub mod api_response;
#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod health;
pub mod observability;

pub use api_response::{ApiResponse, MessageResponse};
pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
