use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("browser session failed: {0}")]
    Session(String),

    #[error("no visualizer link found: {0}")]
    NotFound(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MirrorError>;
