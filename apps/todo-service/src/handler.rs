//! # HTTP ハンドラ
//!
//! Todo Service の HTTP エンドポイントを提供する。
//!
//! ## モジュール構成
//!
//! - `health`: ヘルスチェック（liveness / readiness）
//! - `home`: ランディングページ
//! - `todo`: Todo の CRUD

pub mod health;
pub mod home;
pub mod todo;

pub use health::{ReadinessState, health_check, readiness_check};
pub use home::{HomeState, home};
pub use todo::{TodoState, create_todo, delete_todo, list_todos, update_todo};
