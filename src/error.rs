use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("No text to read")]
    NoText,

    #[error("Nothing to play")]
    NothingToPlay,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Tray error: {0}")]
    Tray(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SpeechError>;
