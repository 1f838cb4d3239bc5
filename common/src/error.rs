//! エラー型定義
//!
//! CLIとWeb(WASM)の両方で使う共通エラー。
//! 通信失敗・バックエンドのエラーペイロード・座標入力不正・データ欠落を区別する。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    /// バックエンドが `{"error": "..."}` を返した、または非2xxステータス
    #[error("Backend error (status {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Bridge error: {0}")]
    Bridge(String),
}

impl Error {
    /// パネルに表示するメッセージ
    ///
    /// バックエンドのエラーペイロードがあればその本文を、なければ `fallback` を返す。
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Backend { message, .. } if !message.trim().is_empty() => message.clone(),
            Error::InvalidCoordinates(_) => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
