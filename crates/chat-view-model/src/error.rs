use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown quick action: {0}")]
    UnknownQuickAction(String),

    #[error("Unknown disclosure event: {0}")]
    UnknownDisclosureEvent(String),

    #[error("Unknown overflow policy: {0}")]
    UnknownOverflowPolicy(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
