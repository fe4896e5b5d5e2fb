//! # Todo Service サーバー
//!
//! Todo の作成・一覧・更新・削除を JSON over HTTP で提供する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `TODO_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `TODO_PORT` | No | ポート番号（デフォルト: `9000`） |
//! | `DYNAMODB_ENDPOINT` | No | DynamoDB エンドポイント（デフォルト: `http://localhost:18000`） |
//! | `DYNAMODB_REGION` | No | リージョン（デフォルト: `ap-northeast-1`） |
//! | `TODO_TABLE_NAME` | No | テーブル名（デフォルト: `todo`） |
//! | `SHUTDOWN_GRACE_SECS` | No | シャットダウン猶予秒数（デフォルト: `5`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # DynamoDB Local
//! docker run --rm -p 18000:8000 amazon/dynamodb-local -jar DynamoDBLocal.jar -sharedDb -inMemory
//!
//! cargo run -p todo-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use todo_domain::clock::SystemClock;
use todo_infra::{
    dynamodb,
    repository::{DynamoDbTodoRepository, TodoRepository},
};
use todo_service::{
    app_builder::build_app,
    config::TodoConfig,
    server::{ServerLifecycle, spawn_signal_listener},
    template_renderer::TemplateRenderer,
};
use todo_shared::observability::TracingConfig;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Todo Service サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. DynamoDB クライアントの作成とテーブルの確認
/// 5. ルーターの構築
/// 6. HTTP サーバーの起動（終了シグナルまで）
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("todo-service");
    todo_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "todo-service").entered();

    // 設定読み込み
    let config = TodoConfig::from_env().context("設定の読み込みに失敗しました")?;
    let lifecycle = ServerLifecycle::new(config.shutdown_grace);

    tracing::info!(
        "Todo Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // DynamoDB クライアントの初期化
    let dynamodb_client =
        dynamodb::create_client(&config.dynamodb_endpoint, &config.dynamodb_region).await;
    dynamodb::ensure_todo_table(&dynamodb_client, &config.table_name)
        .await
        .context("DynamoDB Todo テーブルのセットアップに失敗しました")?;
    tracing::info!("DynamoDB に接続しました: {}", config.dynamodb_endpoint);

    let repository: Arc<dyn TodoRepository> = Arc::new(DynamoDbTodoRepository::new(
        dynamodb_client,
        config.table_name.clone(),
        Arc::new(SystemClock),
    ));
    let renderer = TemplateRenderer::new().context("テンプレートの読み込みに失敗しました")?;

    // ルーター構築
    let app = build_app(repository, renderer);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスが不正です")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} へのバインドに失敗しました"))?;

    let shutdown = CancellationToken::new();
    spawn_signal_listener(shutdown.clone());

    lifecycle.run(listener, app, shutdown).await?;

    tracing::info!("Todo Service サーバーを停止しました");
    Ok(())
}
