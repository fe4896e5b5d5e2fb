//! # Todo Service ライブラリ
//!
//! Todo の CRUD を JSON over HTTP で提供するサービスのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: State の初期化とルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラー定義と HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `server`: サーバーライフサイクル（起動・グレースフルシャットダウン）
//! - `template_renderer`: ランディングページのテンプレート

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod server;
pub mod template_renderer;
