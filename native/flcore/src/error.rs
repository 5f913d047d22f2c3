use thiserror::Error;

use crate::language::LanguageId;

#[derive(Debug, Error)]
pub enum FlError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown state: {0}")]
    UnknownState(String),

    #[error("duplicate state: {0}")]
    DuplicateState(String),

    #[error("invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("string {input:?} is not in the language {language}")]
    NotInLanguage { input: String, language: LanguageId },

    #[error("grammar error: {0}")]
    Grammar(String),

    #[error("serde error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FlError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, FlError>;
