//! # ランディングページハンドラ
//!
//! `GET /` で埋め込みテンプレートから生成した HTML を返す。

use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{error::TodoError, template_renderer::TemplateRenderer};

/// ランディングページの共有状態
pub struct HomeState {
    pub renderer: TemplateRenderer,
}

/// GET /
#[tracing::instrument(skip_all)]
pub async fn home(State(state): State<Arc<HomeState>>) -> Result<Html<String>, TodoError> {
    let html = state
        .renderer
        .render_home()
        .map_err(|e| TodoError::Internal(format!("テンプレートのレンダリングに失敗: {e}")))?;

    Ok(Html(html))
}
