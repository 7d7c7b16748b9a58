use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していないファイル形式です: {0}")]
    UnsupportedFormat(String),

    #[error("ワークブックを開けません: {path}: {message}")]
    WorkbookOpen { path: String, message: String },

    #[error("出力先が既に存在します: {0}")]
    OutputExists(String),

    #[error("出力先が他の入力と重複しています: {0}")]
    DuplicateOutput(String),

    #[error("処理対象のワークブックがありません: {0}")]
    NoWorkbooksFound(String),

    #[error("{failed}件のワークブックで処理に失敗しました")]
    BatchFailed { failed: usize },

    #[error(transparent)]
    Common(#[from] punct_validator_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<punct_validator_common::MapError> for ValidatorError {
    fn from(err: punct_validator_common::MapError) -> Self {
        ValidatorError::Common(err.into())
    }
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
