//! # Todo Service 設定
//!
//! 環境変数から Todo Service サーバーの設定を読み込む。
//!
//! | 変数名 | 必須 | デフォルト |
//! |--------|------|------------|
//! | `TODO_HOST` | No | `0.0.0.0` |
//! | `TODO_PORT` | No | `9000` |
//! | `DYNAMODB_ENDPOINT` | No | `http://localhost:18000` |
//! | `DYNAMODB_REGION` | No | `ap-northeast-1` |
//! | `TODO_TABLE_NAME` | No | `todo` |
//! | `SHUTDOWN_GRACE_SECS` | No | `5` |

use std::{env, time::Duration};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 9000;
const DEFAULT_DYNAMODB_ENDPOINT: &str = "http://localhost:18000";
const DEFAULT_DYNAMODB_REGION: &str = "ap-northeast-1";
const DEFAULT_TABLE_NAME: &str = "todo";
const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 数値として解釈できない値
    #[error("{name} は有効な数値である必要があります: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Todo Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// DynamoDB エンドポイント URL
    pub dynamodb_endpoint: String,
    /// DynamoDB リージョン
    pub dynamodb_region: String,
    /// Todo テーブル名
    pub table_name: String,
    /// シャットダウン時に処理中リクエストを待つ最大時間
    pub shutdown_grace: Duration,
}

impl TodoConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// キーから値を引く関数を使って設定を組み立てる
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("TODO_PORT") {
            Some(value) => parse_number("TODO_PORT", &value)?,
            None => DEFAULT_PORT,
        };
        let grace_secs = match lookup("SHUTDOWN_GRACE_SECS") {
            Some(value) => parse_number("SHUTDOWN_GRACE_SECS", &value)?,
            None => DEFAULT_SHUTDOWN_GRACE_SECS,
        };

        Ok(Self {
            host: lookup("TODO_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            dynamodb_endpoint: lookup("DYNAMODB_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_DYNAMODB_ENDPOINT.to_string()),
            dynamodb_region: lookup("DYNAMODB_REGION")
                .unwrap_or_else(|| DEFAULT_DYNAMODB_REGION.to_string()),
            table_name: lookup("TODO_TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            shutdown_grace: Duration::from_secs(grace_secs),
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}
