//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗（空のタイトルなど） |
//! | `InvalidIdentifier` | 400 Bad Request | 識別子の形式が不正 |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値は構文的に正しいが、ビジネスルールに違反している場合に使用する。
    #[error("validation error: {0}")]
    Validation(String),

    /// 識別子の形式エラー
    ///
    /// 文字列が識別子のエンコーディング（UUID）に従っていない場合に使用する。
    /// ストアへの問い合わせ前に検出される。
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}
