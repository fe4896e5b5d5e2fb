//! # サーバーライフサイクル
//!
//! HTTP サーバーの起動からシャットダウンまでを管理する。
//!
//! ## 状態遷移
//!
//! ```text
//! Starting → Listening → ShuttingDown → Stopped
//! ```
//!
//! - `Listening → ShuttingDown` はシャットダウントークンのキャンセルでのみ発生する
//! - `ShuttingDown` では処理中のリクエストを猶予時間だけ待ち、超過したら接続タスクをすべて中断して接続を閉じる
//! - `Stopped` は終端状態

use std::time::Duration;

use anyhow::Context as _;
use axum::Router;
use hyper_util::{rt::{TokioIo, TokioTimer}, service::TowerToHyperService};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::watch,
    task::{JoinError, JoinHandle, JoinSet},
};
use tokio_util::sync::CancellationToken;

/// サーバーのライフサイクル状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum LifecycleState {
    /// 起動処理中（設定読み込み、ストア確認、バインド）
    Starting,
    /// リクエスト受付中
    Listening,
    /// 猶予時間内で処理中リクエストの完了を待機中
    ShuttingDown,
    /// 停止済み
    Stopped,
}

/// サーバーライフサイクル
///
/// 状態は `watch` チャネルで公開し、[`ServerLifecycle::subscribe`] で監視できる。
pub struct ServerLifecycle {
    state:        watch::Sender<LifecycleState>,
    grace_period: Duration,
}

impl ServerLifecycle {
    pub fn new(grace_period: Duration) -> Self {
        let (state, _) = watch::channel(LifecycleState::Starting);
        Self {
            state,
            grace_period,
        }
    }

    /// 現在の状態
    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    /// 状態の変化を監視するレシーバーを取得する
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    fn transition(&self, next: LifecycleState) {
        let previous = self.state.send_replace(next);
        tracing::info!(from = %previous, to = %next, "ライフサイクル状態が遷移しました");
    }

    /// サーバーを起動し、シャットダウンが完了するまで待機する
    ///
    /// 接続ごとのタスクは `JoinSet` で保持する。`shutdown` がキャンセルされると
    /// 新規接続の受付を止め、処理中のリクエストを最大 `grace_period` だけ待つ。
    /// 猶予時間を超えた場合は残りの接続タスクをすべて中断し、接続を閉じる。
    pub async fn run(
        &self,
        listener: TcpListener,
        app: Router,
        shutdown: CancellationToken,
    ) -> anyhow::Result<()> {
        let addr = listener
            .local_addr()
            .context("リッスンアドレスの取得に失敗しました")?;

        let mut connections = JoinSet::new();

        self.transition(LifecycleState::Listening);
        tracing::info!("リクエストの受付を開始しました: {}", addr);

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, remote)) => {
                        tracing::trace!(%remote, "接続を受け付けました");
                        connections.spawn(serve_connection(stream, app.clone(), shutdown.clone()));
                    }
                    Err(e) => {
                        tracing::warn!("接続の受け付けに失敗しました: {}", e);
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    }
                },
                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    log_connection_exit(joined);
                }
            }
        }
        drop(listener);

        self.transition(LifecycleState::ShuttingDown);
        tracing::info!(
            grace_period_secs = self.grace_period.as_secs_f64(),
            connections = connections.len(),
            "処理中のリクエストの完了を待機します"
        );

        let drained = tokio::time::timeout(self.grace_period, async {
            while let Some(joined) = connections.join_next().await {
                log_connection_exit(joined);
            }
        })
        .await;

        if drained.is_err() {
            tracing::warn!(
                connections = connections.len(),
                "猶予時間内に完了しなかったため接続を強制終了します"
            );
            connections.shutdown().await;
        }

        self.transition(LifecycleState::Stopped);
        Ok(())
    }
}

/// accept 失敗後に再試行するまでの待機時間
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// 1 接続分の HTTP/1.1 を処理する
///
/// ハンドラはこのタスク上で実行されるため、タスクの中断で処理中のリクエストも破棄される。
/// `shutdown` のキャンセル後は処理中のリクエストを終えた時点で接続を閉じる。
async fn serve_connection(stream: TcpStream, app: Router, shutdown: CancellationToken) {
    let service = TowerToHyperService::new(app);
    let connection = hyper::server::conn::http1::Builder::new()
        .timer(TokioTimer::new())
        .serve_connection(TokioIo::new(stream), service);
    tokio::pin!(connection);

    let result = tokio::select! {
        result = connection.as_mut() => result,
        () = shutdown.cancelled() => {
            connection.as_mut().graceful_shutdown();
            connection.as_mut().await
        }
    };

    if let Err(e) = result {
        tracing::debug!("接続がエラーで終了しました: {}", e);
    }
}

fn log_connection_exit(joined: Result<(), JoinError>) {
    if let Some(e) = joined.err().filter(JoinError::is_panic) {
        tracing::error!("接続タスクがパニックしました: {}", e);
    }
}

/// 終了シグナルを監視し、受信したらトークンをキャンセルするタスクを起動する
///
/// Ctrl-C（SIGINT）と、Unix では SIGTERM を監視する。
pub fn spawn_signal_listener(shutdown: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            () = wait_for_signal() => {
                tracing::info!("終了シグナルを受信しました");
                shutdown.cancel();
            }
            () = shutdown.cancelled() => {}
        }
    })
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl-C ハンドラの登録に失敗しました: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラの登録に失敗しました: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
