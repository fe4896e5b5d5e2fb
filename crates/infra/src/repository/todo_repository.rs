//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **DynamoDB**: Todo は 1 件 1 アイテムとして格納（PK = `id`）
//! - **件数セマンティクス**: 更新・削除は影響を受けた件数（0 または 1）を返し、
//!   対象が存在しないことをエラーとして扱わない
//! - **条件付き書き込み**: 更新は存在確認と差分確認を 1 回の `UpdateItem` で行う
//!
//! ## アイテム形式
//!
//! | 属性 | 型 | 内容 |
//! |---|---|---|
//! | `id` | S | UUID 文字列 |
//! | `title` | S | 前後の空白を除去したタイトル |
//! | `completed` | BOOL | 完了フラグ |
//! | `created_at` | S | RFC 3339 (UTC) |

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    Client,
    types::{AttributeValue, ReturnValue},
};
use chrono::{DateTime, Utc};
use todo_domain::{
    clock::Clock,
    todo::{Todo, TodoId, TodoTitle},
};

use crate::InfraError;

const ATTR_ID: &str = "id";
const ATTR_TITLE: &str = "title";
const ATTR_COMPLETED: &str = "completed";
const ATTR_CREATED_AT: &str = "created_at";

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// 格納されている全ての Todo を取得する
    async fn list(&self) -> Result<Vec<Todo>, InfraError>;

    /// 新しい Todo を作成する
    ///
    /// ID と作成日時はリポジトリが採番する。
    async fn create(&self, title: TodoTitle, completed: bool) -> Result<Todo, InfraError>;

    /// タイトルと完了フラグを更新する
    ///
    /// # 戻り値
    ///
    /// 変更された件数。対象が存在しない場合、または値が変わらない場合は 0。
    async fn update(
        &self,
        id: &TodoId,
        title: &TodoTitle,
        completed: bool,
    ) -> Result<u64, InfraError>;

    /// Todo を削除する
    ///
    /// # 戻り値
    ///
    /// 削除された件数。対象が存在しない場合は 0。
    async fn delete(&self, id: &TodoId) -> Result<u64, InfraError>;

    /// ストアへの疎通を確認する
    async fn check_connection(&self) -> Result<(), InfraError>;
}

/// DynamoDB 実装の TodoRepository
pub struct DynamoDbTodoRepository {
    client:     Client,
    table_name: String,
    clock:      Arc<dyn Clock>,
}

impl DynamoDbTodoRepository {
    pub fn new(client: Client, table_name: String, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            table_name,
            clock,
        }
    }
}

#[async_trait]
impl TodoRepository for DynamoDbTodoRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(table = %self.table_name))]
    async fn list(&self) -> Result<Vec<Todo>, InfraError> {
        let mut todos = Vec::new();
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;

        // LastEvaluatedKey が返らなくなるまでページを辿る
        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await
                .map_err(|e| InfraError::dynamo_db(format!("Todo 一覧の取得に失敗: {e}")))?;

            for item in output.items() {
                todos.push(convert_item_to_todo(item)?);
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key.clone()),
                _ => break,
            }
        }

        Ok(todos)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(table = %self.table_name))]
    async fn create(&self, title: TodoTitle, completed: bool) -> Result<Todo, InfraError> {
        let todo = Todo::new(TodoId::new(), title, completed, self.clock.now());

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(convert_todo_to_item(&todo)))
            .condition_expression("attribute_not_exists(#id)")
            .expression_attribute_names("#id", ATTR_ID)
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("Todo の作成に失敗: {e}")))?;

        Ok(todo)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(table = %self.table_name, %id))]
    async fn update(
        &self,
        id: &TodoId,
        title: &TodoTitle,
        completed: bool,
    ) -> Result<u64, InfraError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, AttributeValue::S(id.to_string()))
            .update_expression("SET #title = :title, #completed = :completed")
            .condition_expression(
                "attribute_exists(#id) AND (#title <> :title OR #completed <> :completed)",
            )
            .expression_attribute_names("#id", ATTR_ID)
            .expression_attribute_names("#title", ATTR_TITLE)
            .expression_attribute_names("#completed", ATTR_COMPLETED)
            .expression_attribute_values(":title", AttributeValue::S(title.as_str().to_string()))
            .expression_attribute_values(":completed", AttributeValue::Bool(completed))
            .send()
            .await;

        match result {
            Ok(_) => Ok(1),
            Err(err) => {
                // 条件不成立は「存在しない」または「変更なし」
                let condition_failed = err
                    .as_service_error()
                    .map(|e| e.is_conditional_check_failed_exception())
                    .unwrap_or(false);
                if condition_failed {
                    Ok(0)
                } else {
                    Err(InfraError::dynamo_db(format!("Todo の更新に失敗: {err}")))
                }
            }
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(table = %self.table_name, %id))]
    async fn delete(&self, id: &TodoId) -> Result<u64, InfraError> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(ATTR_ID, AttributeValue::S(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("Todo の削除に失敗: {e}")))?;

        let deleted = output
            .attributes()
            .map(|attrs| !attrs.is_empty())
            .unwrap_or(false);

        Ok(u64::from(deleted))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(table = %self.table_name))]
    async fn check_connection(&self) -> Result<(), InfraError> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| {
                InfraError::dynamo_db(format!(
                    "テーブル '{}' の確認に失敗: {e}",
                    self.table_name
                ))
            })?;

        Ok(())
    }
}

/// Todo を DynamoDB アイテムに変換する
fn convert_todo_to_item(todo: &Todo) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (ATTR_ID.to_string(), AttributeValue::S(todo.id().to_string())),
        (
            ATTR_TITLE.to_string(),
            AttributeValue::S(todo.title().as_str().to_string()),
        ),
        (
            ATTR_COMPLETED.to_string(),
            AttributeValue::Bool(todo.completed()),
        ),
        (
            ATTR_CREATED_AT.to_string(),
            AttributeValue::S(todo.created_at().to_rfc3339()),
        ),
    ])
}

/// DynamoDB アイテムを Todo に変換する
fn convert_item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<Todo, InfraError> {
    let id_str = get_s(item, ATTR_ID)?;
    let title_str = get_s(item, ATTR_TITLE)?;
    let completed = get_bool(item, ATTR_COMPLETED)?;
    let created_at_str = get_s(item, ATTR_CREATED_AT)?;

    let id = TodoId::parse_str(&id_str)
        .map_err(|e| InfraError::invalid_item(format!("id のパースに失敗: {e}")))?;
    let title = TodoTitle::new(title_str)
        .map_err(|e| InfraError::invalid_item(format!("title が不正です: {e}")))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| InfraError::invalid_item(format!("created_at のパースに失敗: {e}")))?;

    Ok(Todo::from_db(id, title, completed, created_at))
}

/// DynamoDB アイテムから文字列属性を取得する
fn get_s(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, InfraError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| InfraError::invalid_item(format!("属性 '{key}' が見つかりません")))
}

/// DynamoDB アイテムから真偽値属性を取得する
fn get_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Result<bool, InfraError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| InfraError::invalid_item(format!("真偽値属性 '{key}' が見つかりません")))
}
