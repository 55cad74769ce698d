use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebnoteError {
    /// A user-facing rejection: the operation was aborted and nothing changed.
    #[error("{0}")]
    Validation(String),

    #[error("To-do not found: {0}")]
    TodoNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Summarization failed: {0}")]
    Service(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WebnoteError>;
