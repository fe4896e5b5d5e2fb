//! # Canonical Log Line ミドルウェア
//!
//! HTTP リクエスト完了時に、そのリクエストの要点（メソッド、パス、ステータス、
//! レイテンシ）を 1 行に集約したサマリログを出力する tower Layer。
//!
//! ## TraceLayer との責務分離
//!
//! - TraceLayer: リクエストスパンの作成（method, uri, request_id）
//! - CanonicalLogLineLayer: リクエスト完了サマリ（1 行で全体像を提供）
//!
//! TraceLayer の内側に配置すると、スパンフィールドが JSON ログに自動的に含まれる。

use std::{
    convert::Infallible,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response};
use tower::{Layer, Service};

/// ヘルスチェックパスかどうかを判定する
///
/// `/health`（liveness）と `/health/ready`（readiness）は
/// プローブで高頻度に呼ばれるため出力対象外とする。
fn is_health_check_path(path: &str) -> bool {
    path.starts_with("/health")
}

/// Canonical Log Line を出力する Layer
///
/// `log.type = "canonical"` マーカー付きのサマリログを出力する。
/// 5xx は WARN、それ以外は INFO レベル。
/// axum のルートと同じく失敗しない（`Error = Infallible`）Service にのみ適用できる。
///
/// ```text
/// TraceLayer → CanonicalLogLineLayer → handler
/// ```
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService { inner }
    }
}

/// [`CanonicalLogLineLayer`] が生成する Service 実装
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>, Error = Infallible>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // clone-swap: poll_ready 済みの inner を呼び出しに使う
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let path = req.uri().path().to_owned();
        let method = req.method().clone();
        let start = Instant::now();

        Box::pin(async move {
            let Ok(response) = inner.call(req).await;
            if is_health_check_path(&path) {
                return Ok(response);
            }

            let status = response.status().as_u16();
            let latency_ms = start.elapsed().as_millis() as u64;

            if response.status().is_server_error() {
                tracing::warn!(
                    log.r#type = "canonical",
                    http.method = %method,
                    http.path = %path,
                    http.status_code = status,
                    http.latency_ms = latency_ms,
                    "リクエスト完了（サーバーエラー）"
                );
            } else {
                tracing::info!(
                    log.r#type = "canonical",
                    http.method = %method,
                    http.path = %path,
                    http.status_code = status,
                    http.latency_ms = latency_ms,
                    "リクエスト完了"
                );
            }

            Ok(response)
        })
    }
}
