//! # アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use todo_infra::repository::TodoRepository;
use todo_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        HomeState,
        ReadinessState,
        TodoState,
        create_todo,
        delete_todo,
        health_check,
        home,
        list_todos,
        readiness_check,
        update_todo,
    },
    template_renderer::TemplateRenderer,
};

/// ルーターを構築する
///
/// 初期化済みのリポジトリとレンダラーを受け取り、State → Router の順に組み立てる。
/// `/todo` と `/todo/` はどちらも同じハンドラに割り当てる。
pub fn build_app(repository: Arc<dyn TodoRepository>, renderer: TemplateRenderer) -> Router {
    let todo_state = Arc::new(TodoState {
        repository: repository.clone(),
    });
    let readiness_state = Arc::new(ReadinessState { repository });
    let home_state = Arc::new(HomeState { renderer });

    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(Router::new().route("/", get(home)).with_state(home_state))
        .merge(
            Router::new()
                .route("/todo", get(list_todos).post(create_todo))
                .route("/todo/", get(list_todos).post(create_todo))
                .route("/todo/{id}", put(update_todo).delete(delete_todo))
                .with_state(todo_state),
        )
        // レイヤーは下から順に適用される
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
