use thiserror::Error;

/// Errors raised outside the game cores: storage, prompts and the terminal.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed store file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Logger already set: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Unknown {kind}: {name}")]
    Unknown { kind: &'static str, name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
