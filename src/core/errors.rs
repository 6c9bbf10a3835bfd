use thiserror::Error;
use tokio::sync::mpsc::error::SendError;
use tokio_tungstenite::tungstenite;

#[derive(Error, Debug)]
pub enum VocabotError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("WebSocket error: {0}")]
    WebSocket(Box<tungstenite::Error>),

    #[error("Channel send error: {0}")]
    ChannelSend(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("VocabotError: {0}")]
    Custom(String),
}

impl<T> From<SendError<T>> for VocabotError {
    fn from(error: SendError<T>) -> Self {
        VocabotError::ChannelSend(error.to_string())
    }
}

impl From<std::io::Error> for VocabotError {
    fn from(error: std::io::Error) -> Self {
        VocabotError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for VocabotError {
    fn from(error: reqwest::Error) -> Self {
        VocabotError::Reqwest(Box::new(error))
    }
}

impl From<tungstenite::Error> for VocabotError {
    fn from(error: tungstenite::Error) -> Self {
        VocabotError::WebSocket(Box::new(error))
    }
}
