use thiserror::Error;

/// Errors produced by the query detail view and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("malformed query record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("invalid settings: {0}")]
    Settings(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Export(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
