//! # リポジトリ実装
//!
//! Todo の永続化を担当するリポジトリトレイトと DynamoDB 実装を提供する。
//!
//! ## 設計方針
//!
//! - **ストア抽象化**: DynamoDB 固有の処理（アイテム変換・条件式）をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod todo_repository;

pub use todo_repository::{DynamoDbTodoRepository, TodoRepository};
