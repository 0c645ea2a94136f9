use thiserror::Error;

#[derive(Error, Debug)]
pub enum VariantGridError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("スクリプトエラー: {0}")]
    Script(String),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Grid(#[from] variant_grid_common::Error),
}

pub type Result<T> = std::result::Result<T, VariantGridError>;
