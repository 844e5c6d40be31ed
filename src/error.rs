//! Error types for Insane Talk

use crate::command::CommandError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TalkError {
    #[error("Invalid phrase asset: {0}")]
    InvalidAsset(String),

    #[error("Phrase asset contains no entries")]
    EmptyPhraseBook,

    #[error("Module not found: {0}")]
    UnknownModule(u32),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TalkError>;
