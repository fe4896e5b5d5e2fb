//! 統合テスト共通ヘルパー

#![allow(dead_code)]

use std::sync::Arc;

use aws_sdk_dynamodb::Client;
use todo_domain::clock::SystemClock;
use todo_infra::{dynamodb, repository::DynamoDbTodoRepository};

/// テストで使用するリージョン
pub const REGION: &str = "ap-northeast-1";

/// テスト用の DynamoDB エンドポイント
///
/// 優先順位:
/// 1. `DYNAMODB_ENDPOINT`（CI で明示的に設定）
/// 2. `DYNAMODB_PORT` から構築
/// 3. フォールバック: `http://localhost:18000`
pub fn dynamodb_endpoint() -> String {
    std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| {
        let port = std::env::var("DYNAMODB_PORT").unwrap_or_else(|_| "18000".to_string());
        format!("http://localhost:{port}")
    })
}

/// テストごとに専用テーブルを作成し、リポジトリを返す
///
/// テーブル名はランダムなので並列実行しても干渉しない。
/// 後始末は [`drop_table`] で行う。
pub async fn setup_repository() -> (DynamoDbTodoRepository, Client, String) {
    let client = dynamodb::create_client(&dynamodb_endpoint(), REGION).await;
    let table_name = format!("test_todo_{}", uuid::Uuid::now_v7());
    dynamodb::ensure_todo_table(&client, &table_name)
        .await
        .expect("テーブル作成に失敗");

    let repo =
        DynamoDbTodoRepository::new(client.clone(), table_name.clone(), Arc::new(SystemClock));
    (repo, client, table_name)
}

/// テスト用テーブルを削除する
pub async fn drop_table(client: &Client, table_name: &str) {
    let _ = client.delete_table().table_name(table_name).send().await;
}
