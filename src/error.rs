use thiserror::Error;

#[derive(Error, Debug)]
pub enum PropertyMapError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("地図APIキーが設定されていません。`property-map config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Common(#[from] property_map_common::Error),
}

pub type Result<T> = std::result::Result<T, PropertyMapError>;
