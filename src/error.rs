use thiserror::Error;

#[derive(Error, Debug)]
pub enum PassportWallError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Please fill in the required fields to generate a preview. ({0})")]
    Validation(#[from] passport_common::ValidationError),

    #[error("No passport with id {0} on the wall")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<passport_common::Error> for PassportWallError {
    fn from(e: passport_common::Error) -> Self {
        match e {
            passport_common::Error::Json(e) => PassportWallError::JsonParse(e),
            passport_common::Error::Validation(e) => PassportWallError::Validation(e),
            passport_common::Error::Storage(msg) => PassportWallError::Storage(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, PassportWallError>;
