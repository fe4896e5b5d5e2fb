//! # Todo インフラ層
//!
//! ドキュメントストア（DynamoDB）との接続・通信を担当する。
//!
//! ## 責務
//!
//! - **ストアクライアント**: DynamoDB クライアントの生成とテーブルの準備
//! - **リポジトリ実装**: Todo と DynamoDB アイテムの相互変換、CRUD 操作
//! - **テスト用ダブル**: `test-utils` feature でインメモリ実装を公開
//!
//! ## 依存関係
//!
//! ```text
//! todo-service → infra → domain
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todo_infra::{dynamodb, repository::DynamoDbTodoRepository};
//!
//! async fn setup() -> Result<(), todo_infra::InfraError> {
//!     let client = dynamodb::create_client("http://localhost:18000", "ap-northeast-1").await;
//!     dynamodb::ensure_todo_table(&client, "todo").await?;
//!     let repository = DynamoDbTodoRepository::new(client, "todo".to_string(), clock);
//!     Ok(())
//! }
//! ```

pub mod dynamodb;
pub mod error;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
