use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ブックを読み込めません ({path}): {reason}")]
    WorkbookRead { path: String, reason: String },

    #[error("読み込めるブックがありません: {0}")]
    NoWorkbooksLoaded(String),

    #[error("--pick の指定が不正: {0}")]
    InvalidPick(String),

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("タイムゾーンが不正: {0}")]
    InvalidTimezone(String),

    #[error("対話入力エラー: {0}")]
    Interaction(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] pasiulymas_common::Error),
}

impl From<dialoguer::Error> for AppError {
    fn from(e: dialoguer::Error) -> Self {
        AppError::Interaction(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
