//! TodoRepository の統合テスト
//!
//! DynamoDB Local に対して実際の CRUD 操作を検証する。
//!
//! 実行方法:
//! ```bash
//! cargo test -p todo-infra --test todo_repository_test
//! ```

mod common;

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use common::{drop_table, setup_repository};
use pretty_assertions::assert_eq;
use todo_domain::todo::{TodoId, TodoTitle};
use todo_infra::{InfraErrorKind, repository::TodoRepository};

fn title(value: &str) -> TodoTitle {
    TodoTitle::new(value).unwrap()
}

#[tokio::test]
async fn test_作成したtodoが一覧に含まれる() {
    // Given
    let (repo, client, table) = setup_repository().await;

    // When
    let created = repo.create(title("buy milk"), false).await.unwrap();
    let todos = repo.list().await.unwrap();

    // Then
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0], created);
    assert_eq!(todos[0].title().as_str(), "buy milk");
    assert!(!todos[0].completed());

    drop_table(&client, &table).await;
}

#[tokio::test]
async fn test_作成ごとに異なるidが採番される() {
    let (repo, client, table) = setup_repository().await;

    let a = repo.create(title("a"), false).await.unwrap();
    let b = repo.create(title("b"), true).await.unwrap();

    assert_ne!(a.id(), b.id());
    assert_eq!(repo.list().await.unwrap().len(), 2);

    drop_table(&client, &table).await;
}

#[tokio::test]
async fn test_updateはタイトルと完了フラグのみ変更しcreated_atを保持する() {
    // Given
    let (repo, client, table) = setup_repository().await;
    let created = repo.create(title("test"), false).await.unwrap();

    // When
    let updated = repo
        .update(created.id(), &title("test2"), true)
        .await
        .unwrap();

    // Then
    assert_eq!(updated, 1);
    let todos = repo.list().await.unwrap();
    assert_eq!(todos[0].id(), created.id());
    assert_eq!(todos[0].title().as_str(), "test2");
    assert!(todos[0].completed());
    assert_eq!(todos[0].created_at(), created.created_at());

    drop_table(&client, &table).await;
}

#[tokio::test]
async fn test_同じ値でのupdateは0件を返す() {
    let (repo, client, table) = setup_repository().await;
    let created = repo.create(title("test"), false).await.unwrap();

    let updated = repo
        .update(created.id(), &title("test"), false)
        .await
        .unwrap();

    assert_eq!(updated, 0);

    drop_table(&client, &table).await;
}

#[tokio::test]
async fn test_存在しないidのupdateは0件を返しアイテムを作らない() {
    let (repo, client, table) = setup_repository().await;

    let updated = repo
        .update(&TodoId::new(), &title("ghost"), true)
        .await
        .unwrap();

    assert_eq!(updated, 0);
    assert!(repo.list().await.unwrap().is_empty());

    drop_table(&client, &table).await;
}

#[tokio::test]
async fn test_deleteは1件を返し再削除は0件を返す() {
    // Given
    let (repo, client, table) = setup_repository().await;
    let created = repo.create(title("test"), false).await.unwrap();

    // When
    let first = repo.delete(created.id()).await.unwrap();
    let second = repo.delete(created.id()).await.unwrap();

    // Then
    assert_eq!(first, 1);
    assert_eq!(second, 0);
    assert!(repo.list().await.unwrap().is_empty());

    drop_table(&client, &table).await;
}

#[tokio::test]
async fn test_変換できないアイテムがあると一覧取得全体が失敗する() {
    // Given: title 属性が欠けたアイテムを直接書き込む
    let (repo, client, table) = setup_repository().await;
    repo.create(title("valid"), false).await.unwrap();
    client
        .put_item()
        .table_name(&table)
        .set_item(Some(HashMap::from([
            (
                "id".to_string(),
                AttributeValue::S(TodoId::new().to_string()),
            ),
            ("completed".to_string(), AttributeValue::Bool(false)),
        ])))
        .send()
        .await
        .unwrap();

    // When
    let result = repo.list().await;

    // Then
    let err = result.unwrap_err();
    assert!(matches!(err.kind(), InfraErrorKind::InvalidItem(_)), "{err:?}");

    drop_table(&client, &table).await;
}

#[tokio::test]
async fn test_check_connectionは既存テーブルで成功する() {
    let (repo, client, table) = setup_repository().await;

    assert!(repo.check_connection().await.is_ok());

    drop_table(&client, &table).await;
}
