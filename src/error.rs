use thiserror::Error;

#[derive(Error, Debug)]
pub enum RejigError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image Error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid image dimensions: {0}")]
    InvalidImageDimensions(String),

    #[error("Piece size detection failed: {0}")]
    SizeDetectionFailed(String),

    #[error("Insufficient pieces: {0}")]
    InsufficientPieces(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type RjResult<T> = Result<T, RejigError>;
