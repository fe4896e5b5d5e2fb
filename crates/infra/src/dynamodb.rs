//! # DynamoDB 接続管理
//!
//! Todo を格納するドキュメントストア（Amazon DynamoDB）への接続管理を行う。
//!
//! ## 設計方針
//!
//! - **ローカル開発**: DynamoDB Local を使用（`-sharedDb -inMemory`）
//! - **リトライなし**: SDK の自動リトライは無効化し、失敗はそのまま呼び出し元へ返す
//! - **テーブル自動作成**: 起動時にテーブルが存在しなければ作成（冪等）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todo_infra::dynamodb;
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = dynamodb::create_client("http://localhost:18000", "ap-northeast-1").await;
//!     dynamodb::ensure_todo_table(&client, "todo").await?;
//!     Ok(())
//! }
//! ```

use aws_config::retry::RetryConfig;
use aws_sdk_dynamodb::{
    Client,
    types::{AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType},
};

use crate::InfraError;

/// Todo テーブルのパーティションキー属性名
pub const TODO_TABLE_HASH_KEY: &str = "id";

/// DynamoDB クライアントを作成する
///
/// 認証情報はダミー値を使用する（DynamoDB Local は認証情報を検証しない）。
/// クライアントの生成自体は接続を行わないため、到達不能なエンドポイントでも失敗しない。
///
/// # 引数
///
/// * `endpoint` - DynamoDB エンドポイント URL（例: `http://localhost:18000`）
/// * `region` - リージョン名（例: `ap-northeast-1`）
pub async fn create_client(endpoint: &str, region: &str) -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .endpoint_url(endpoint)
        .region(aws_config::Region::new(region.to_string()))
        .retry_config(RetryConfig::disabled())
        // DynamoDB Local はクレデンシャルを検証しないが、SDK はプロバイダが必要
        .credentials_provider(aws_sdk_dynamodb::config::Credentials::new(
            "local", "local", None, None, "local",
        ))
        .load()
        .await;

    Client::new(&config)
}

/// Todo テーブルが存在しなければ作成する（冪等）
///
/// テーブルスキーマ:
/// - PK: `id` (String), Todo ID（UUID 文字列）
/// - 課金モード: オンデマンド
///
/// # 引数
///
/// * `client` - DynamoDB クライアント
/// * `table_name` - テーブル名
pub async fn ensure_todo_table(client: &Client, table_name: &str) -> Result<(), InfraError> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(_) => {
            tracing::debug!("テーブル '{}' は既に存在します", table_name);
            return Ok(());
        }
        Err(err) => {
            // ResourceNotFoundException の場合のみテーブル作成に進む
            let not_found = err
                .as_service_error()
                .map(|e| e.is_resource_not_found_exception())
                .unwrap_or(false);
            if !not_found {
                return Err(InfraError::dynamo_db(format!(
                    "テーブル '{table_name}' の確認に失敗: {err}"
                )));
            }
        }
    }

    tracing::info!("テーブル '{}' を作成します", table_name);

    let create_result = client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(TODO_TABLE_HASH_KEY)
                .key_type(KeyType::Hash)
                .build()
                .map_err(|e| InfraError::dynamo_db(format!("KeySchema 構築エラー: {e}")))?,
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(TODO_TABLE_HASH_KEY)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(|e| {
                    InfraError::dynamo_db(format!("AttributeDefinition 構築エラー: {e}"))
                })?,
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    if let Err(err) = create_result {
        // 並行起動時はテーブルが作成中の場合がある
        let in_use = err
            .as_service_error()
            .map(|e| e.is_resource_in_use_exception())
            .unwrap_or(false);
        if !in_use {
            return Err(InfraError::dynamo_db(format!(
                "テーブル '{table_name}' の作成に失敗: {err}"
            )));
        }
        tracing::debug!(
            "テーブル '{}' は既に作成中または存在します（ResourceInUseException）",
            table_name
        );
        return Ok(());
    }

    tracing::info!("テーブル '{}' を作成しました", table_name);

    Ok(())
}
