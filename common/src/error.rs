//! エラー型定義

use thiserror::Error;

/// 文字マップ構築時のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("duplicate half-width key '{0}'")]
    DuplicateHalf(String),

    #[error("full-width '{full}' is mapped from both '{first}' and '{second}'")]
    AmbiguousFull {
        full: String,
        first: String,
        second: String,
    },

    #[error("entry {index} has an empty side")]
    EmptyEntry { index: usize },
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Character map error: {0}")]
    Map(#[from] MapError),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },

    #[error("Sheet '{sheet}' row {row}: {message}")]
    Row {
        sheet: String,
        row: usize,
        message: String,
    },
}

impl Error {
    /// シート名を付けたエラーを作成
    pub fn sheet(sheet: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Error::Sheet {
            sheet: sheet.into(),
            message: message.to_string(),
        }
    }

    /// シート名と行番号（1始まり）を付けたエラーを作成
    pub fn row(sheet: impl Into<String>, row: usize, message: impl std::fmt::Display) -> Self {
        Error::Row {
            sheet: sheet.into(),
            row,
            message: message.to_string(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
