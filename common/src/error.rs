//! エラー型定義

use thiserror::Error;

use crate::form::ValidationError;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
