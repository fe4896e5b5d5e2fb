//! # Todo ハンドラ
//!
//! Todo の CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /todo` - Todo 一覧
//! - `POST /todo` - Todo 作成
//! - `PUT /todo/{id}` - Todo 更新（タイトル・完了フラグ）
//! - `DELETE /todo/{id}` - Todo 削除
//!
//! 更新・削除は事前の存在確認を行わず、影響を受けた件数をそのまま返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path,
        State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use todo_domain::todo::{Todo, TodoId, TodoTitle};
use todo_infra::repository::TodoRepository;
use todo_shared::{ApiResponse, MessageResponse};

use crate::error::TodoError;

/// 一覧取得失敗時のメッセージ
const LIST_FAILED_MESSAGE: &str = "failed to fetch todos";

/// Todo API の共有状態
pub struct TodoState {
    pub repository: Arc<dyn TodoRepository>,
}

// --- リクエスト/レスポンス型 ---

/// Todo 作成・更新リクエスト
///
/// `title` が無い場合は空文字列として扱い、検証で弾く。
/// 未知のフィールド（`id`, `created_at` など）は無視する。
#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    #[serde(default)]
    pub title:     String,
    #[serde(default)]
    pub completed: bool,
}

/// Todo DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TodoDto {
    pub id:         String,
    pub title:      String,
    pub completed:  bool,
    pub created_at: String,
}

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        Self {
            id:         todo.id().to_string(),
            title:      todo.title().as_str().to_string(),
            completed:  todo.completed(),
            created_at: todo.created_at().to_rfc3339(),
        }
    }
}

/// 作成結果
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatedBody {
    pub todo_id: String,
}

/// 更新結果
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdatedBody {
    pub updated: u64,
}

/// 削除結果
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DeletedBody {
    pub deleted: u64,
}

// --- ハンドラ ---

/// GET /todo
///
/// 格納されている全ての Todo を返す。
#[tracing::instrument(skip_all)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
) -> Result<impl IntoResponse, TodoError> {
    let todos = state
        .repository
        .list()
        .await
        .map_err(|e| TodoError::store(LIST_FAILED_MESSAGE, e))?;

    let items: Vec<TodoDto> = todos.iter().map(TodoDto::from).collect();

    Ok((StatusCode::OK, Json(ApiResponse::new(items))))
}

/// POST /todo
///
/// Todo を作成する。
///
/// ## レスポンス
///
/// - `201 Created`: 採番された ID
/// - `400 Bad Request`: JSON として不正、またはタイトルが空
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, TodoError> {
    let Json(req) = payload?;
    let title = TodoTitle::new(req.title)?;

    let todo = state.repository.create(title, req.completed).await?;

    tracing::info!(todo_id = %todo.id(), "Todo を作成しました");

    let response = MessageResponse::new(
        "todo created successfully",
        CreatedBody {
            todo_id: todo.id().to_string(),
        },
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /todo/{id}
///
/// Todo のタイトルと完了フラグを更新する。
/// ID はボディより先に検証する。
///
/// ## レスポンス
///
/// - `200 OK`: 変更件数（対象が無い、または値が同じなら 0）
/// - `400 Bad Request`: ID が不正、JSON として不正、またはタイトルが空
#[tracing::instrument(skip_all)]
pub async fn update_todo(
    State(state): State<Arc<TodoState>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, TodoError> {
    let Path(id) = path?;
    let id = TodoId::parse_str(&id)?;
    let Json(req) = payload?;
    let title = TodoTitle::new(req.title)?;

    let updated = state
        .repository
        .update(&id, &title, req.completed)
        .await?;

    tracing::info!(todo_id = %id, updated, "Todo を更新しました");

    let response = MessageResponse::new("todo updated successfully", UpdatedBody { updated });
    Ok((StatusCode::OK, Json(response)))
}

/// DELETE /todo/{id}
///
/// Todo を削除する。
///
/// ## レスポンス
///
/// - `200 OK`: 削除件数（対象が無ければ 0）
/// - `400 Bad Request`: ID が不正
#[tracing::instrument(skip_all)]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, TodoError> {
    let Path(id) = path?;
    let id = TodoId::parse_str(&id)?;

    let deleted = state.repository.delete(&id).await?;

    tracing::info!(todo_id = %id, deleted, "Todo を削除しました");

    let response = MessageResponse::new("todo deleted successfully", DeletedBody { deleted });
    Ok((StatusCode::OK, Json(response)))
}
