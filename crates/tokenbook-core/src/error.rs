use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenbookError {
    #[error("config error: {0}")]
    Config(String),

    #[error("token data error: {0}")]
    Data(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
