//! # API レスポンスエンベロープ
//!
//! 公開 API の成功レスポンス形式を提供する。
//!
//! - 参照系: `{ "data": T }`（[`ApiResponse`]）
//! - 更新系: `{ "message": "...", ...T }`（[`MessageResponse`]）

use serde::{Deserialize, Serialize};

/// 参照系 API の統一レスポンス型
///
/// ## 使用例
///
/// ```
/// use todo_shared::ApiResponse;
///
/// let response = ApiResponse::new("hello");
/// assert_eq!(response.data, "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// 更新系 API のレスポンス型
///
/// 人間向けの `message` と、操作結果のフィールドを同じ階層に並べる。
/// `body` は `#[serde(flatten)]` で展開されるため、構造体であること。
///
/// ```
/// use serde::Serialize;
/// use todo_shared::MessageResponse;
///
/// #[derive(Serialize)]
/// struct Deleted {
///     deleted: u64,
/// }
///
/// let response = MessageResponse::new("todo deleted successfully", Deleted { deleted: 1 });
/// let json = serde_json::to_value(&response).unwrap();
/// assert_eq!(json["deleted"], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse<T> {
    pub message: String,
    #[serde(flatten)]
    pub body:    T,
}

impl<T> MessageResponse<T> {
    /// 新しい `MessageResponse` を作成する
    pub fn new(message: impl Into<String>, body: T) -> Self {
        Self {
            message: message.into(),
            body,
        }
    }
}
