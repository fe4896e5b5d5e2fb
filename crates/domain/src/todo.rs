//! # Todo
//!
//! タイトル・完了フラグ・作成日時を持つ Todo のドメインモデル。
//!
//! ## ライフサイクル
//!
//! ```text
//! 作成（id 採番・created_at 確定） → 更新（title / completed のみ）* → 削除（物理削除）
//! ```
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use todo_domain::todo::{Todo, TodoId, TodoTitle};
//!
//! let now = chrono::Utc::now();
//! let todo = Todo::new(TodoId::new(), TodoTitle::new("buy milk")?, false, now);
//!
//! let renamed = todo.clone().with_changes(TodoTitle::new("buy bread")?, true);
//! assert_eq!(renamed.id(), todo.id());
//! assert_eq!(renamed.created_at(), todo.created_at());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::DomainError;

// =========================================================================
// TodoId（識別子）
// =========================================================================

/// Todo の一意識別子
///
/// UUID v7 で採番する。文字列表現はハイフン区切り小文字の正準形。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct TodoId(Uuid);

impl TodoId {
    /// 新しい ID を生成する（UUID v7）
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 文字列から ID をパースする
    ///
    /// 前後の空白は除去する。UUID として解釈できない場合は
    /// [`DomainError::InvalidIdentifier`] を返す。
    pub fn parse_str(value: &str) -> Result<Self, DomainError> {
        let value = value.trim();
        Uuid::try_parse(value)
            .map(Self)
            .map_err(|e| DomainError::InvalidIdentifier(format!("{value:?}: {e}")))
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// TodoTitle（タイトル）
// =========================================================================

/// Todo のタイトル（値オブジェクト）
///
/// # 不変条件
///
/// - 前後の空白を除去した後で空文字列ではない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation("title is required".to_string()));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// Todo（エンティティ）
// =========================================================================

/// Todo エンティティ
///
/// # 不変条件
///
/// - `id` と `created_at` は作成後に変更されない
/// - `title` は常に空でない（[`TodoTitle`] が保証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:         TodoId,
    title:      TodoTitle,
    completed:  bool,
    created_at: DateTime<Utc>,
}

impl Todo {
    /// 新しい Todo を作成する
    pub fn new(id: TodoId, title: TodoTitle, completed: bool, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            completed,
            created_at: now,
        }
    }

    /// 永続化された値から Todo を復元する
    pub fn from_db(
        id: TodoId,
        title: TodoTitle,
        completed: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            completed,
            created_at,
        }
    }

    /// タイトルと完了フラグを置き換えた Todo を返す
    ///
    /// `id` と `created_at` は引き継がれる。
    pub fn with_changes(self, title: TodoTitle, completed: bool) -> Self {
        Self {
            title,
            completed,
            ..self
        }
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn title(&self) -> &TodoTitle {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    // ===== TodoId =====

    #[test]
    fn test_todo_id_newはuuid_v7を採番する() {
        let id = TodoId::new();

        let uuid = Uuid::parse_str(&id.to_string()).unwrap();
        assert_eq!(uuid.get_version_num(), 7);
    }

    #[test]
    fn test_todo_id_newは毎回異なるidを返す() {
        assert_ne!(TodoId::new(), TodoId::new());
    }

    #[test]
    fn test_todo_id_displayはハイフン区切り小文字の正準形() {
        let id = TodoId::parse_str("0190F3B2-7C4D-7A8E-9F01-23456789ABCD").unwrap();

        assert_eq!(id.to_string(), "0190f3b2-7c4d-7a8e-9f01-23456789abcd");
    }

    #[test]
    fn test_todo_id_parse_strは表示形式を復元できる() {
        let id = TodoId::new();
        let parsed = TodoId::parse_str(&id.to_string()).unwrap();

        assert_eq!(parsed, id);
    }

    #[test]
    fn test_todo_id_parse_strは前後の空白を無視する() {
        let parsed = TodoId::parse_str("  0190f3b2-7c4d-7a8e-9f01-23456789abcd ").unwrap();

        assert_eq!(parsed.to_string(), "0190f3b2-7c4d-7a8e-9f01-23456789abcd");
    }

    #[rstest]
    #[case::空文字列("")]
    #[case::空白のみ("   ")]
    #[case::objectid形式("5f43a1b2c3d4e5f6a7b8c9d0")]
    #[case::桁不足("0190f3b2-7c4d-7a8e-9f01")]
    #[case::非16進文字("zzzzzzzz-7c4d-7a8e-9f01-23456789abcd")]
    fn test_todo_id_parse_strは不正な文字列をinvalid_identifierにする(#[case] input: &str) {
        let result = TodoId::parse_str(input);

        assert!(matches!(result, Err(DomainError::InvalidIdentifier(_))));
    }

    // ===== TodoTitle =====

    #[test]
    fn test_todo_title_は前後の空白を除去する() {
        let title = TodoTitle::new("  buy milk\n").unwrap();

        assert_eq!(title.as_str(), "buy milk");
    }

    #[rstest]
    #[case::空文字列("")]
    #[case::空白のみ("   ")]
    #[case::タブと改行("\t\n")]
    fn test_todo_title_は空のタイトルをvalidationエラーにする(#[case] input: &str) {
        let result = TodoTitle::new(input);

        assert_eq!(
            result,
            Err(DomainError::Validation("title is required".to_string()))
        );
    }

    // ===== Todo =====

    #[test]
    fn test_todo_newで作成日時が設定される() {
        let todo = Todo::new(
            TodoId::new(),
            TodoTitle::new("test").unwrap(),
            false,
            fixed_now(),
        );

        assert_eq!(todo.title().as_str(), "test");
        assert!(!todo.completed());
        assert_eq!(todo.created_at(), fixed_now());
    }

    #[test]
    fn test_with_changesはidとcreated_atを変更しない() {
        let original = Todo::new(
            TodoId::new(),
            TodoTitle::new("test").unwrap(),
            false,
            fixed_now(),
        );

        let changed = original
            .clone()
            .with_changes(TodoTitle::new("test2").unwrap(), true);

        assert_eq!(changed.id(), original.id());
        assert_eq!(changed.created_at(), original.created_at());
        assert_eq!(changed.title().as_str(), "test2");
        assert!(changed.completed());
    }
}
