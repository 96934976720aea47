use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),
    #[error("Feed unavailable: {0}")]
    FeedUnavailable(String),
}
