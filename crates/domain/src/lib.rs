//! # Todo ドメイン層
//!
//! Todo のドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! todo-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DynamoDB、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`todo`] - Todo エンティティと値オブジェクト
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use todo_domain::{DomainError, todo::TodoTitle};
//!
//! let title = TodoTitle::new("  buy milk ").unwrap();
//! assert_eq!(title.as_str(), "buy milk");
//!
//! assert!(matches!(TodoTitle::new("   "), Err(DomainError::Validation(_))));
//! ```

pub mod clock;
pub mod error;
pub mod todo;

pub use error::DomainError;
