//! DynamoDB 接続・テーブル自動作成の統合テスト
//!
//! DynamoDB Local を使用したテスト。
//!
//! 実行方法:
//! ```bash
//! docker run --rm -p 18000:8000 amazon/dynamodb-local -jar DynamoDBLocal.jar -sharedDb -inMemory
//! cargo test -p todo-infra --test dynamodb_test
//! ```

mod common;

use aws_sdk_dynamodb::types::{KeyType, ScalarAttributeType};
use common::{REGION, dynamodb_endpoint};
use todo_infra::dynamodb;

#[tokio::test]
async fn test_create_clientがエンドポイントに接続できる() {
    let client = dynamodb::create_client(&dynamodb_endpoint(), REGION).await;

    // ListTables が呼べれば接続成功
    let result = client.list_tables().send().await;
    assert!(
        result.is_ok(),
        "DynamoDB への接続に失敗: {:?}",
        result.err()
    );
}

#[tokio::test]
async fn test_ensure_todo_tableが初回呼び出しでテーブルを作成する() {
    let client = dynamodb::create_client(&dynamodb_endpoint(), REGION).await;

    // ランダムなテーブル名で分離（他テストとの競合を防止）
    let table_name = format!("test_todo_{}", uuid::Uuid::now_v7());

    let result = dynamodb::ensure_todo_table(&client, &table_name).await;
    assert!(result.is_ok(), "テーブル作成に失敗: {:?}", result.err());

    let describe = client.describe_table().table_name(&table_name).send().await;
    assert!(describe.is_ok(), "テーブルが存在しません");

    let table = describe.unwrap().table.unwrap();

    // PK: id (HASH, S)
    assert!(
        table
            .key_schema()
            .iter()
            .any(|ks| ks.attribute_name() == "id" && ks.key_type == KeyType::Hash),
        "id HASH キーが見つかりません"
    );
    assert!(
        table
            .attribute_definitions()
            .iter()
            .any(|ad| ad.attribute_name() == "id"
                && ad.attribute_type == ScalarAttributeType::S),
        "id の属性定義が String ではありません"
    );

    // クリーンアップ
    let _ = client.delete_table().table_name(&table_name).send().await;
}

#[tokio::test]
async fn test_ensure_todo_tableが既存テーブルに対して冪等に動作する() {
    let client = dynamodb::create_client(&dynamodb_endpoint(), REGION).await;
    let table_name = format!("test_todo_{}", uuid::Uuid::now_v7());

    dynamodb::ensure_todo_table(&client, &table_name)
        .await
        .expect("1回目の作成に失敗");

    let result = dynamodb::ensure_todo_table(&client, &table_name).await;
    assert!(result.is_ok(), "2回目の呼び出しが失敗: {:?}", result.err());

    let _ = client.delete_table().table_name(&table_name).send().await;
}

#[tokio::test]
async fn test_到達できないエンドポイントではensure_todo_tableがエラーを返す() {
    // ポート 1 は通常リッスンされていない
    let client = dynamodb::create_client("http://127.0.0.1:1", REGION).await;

    let result = dynamodb::ensure_todo_table(&client, "todo").await;

    assert!(result.is_err());
}
