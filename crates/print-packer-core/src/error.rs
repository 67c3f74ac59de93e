use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid page dimensions: {width}x{height} mm")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid image size: {width}x{height} mm")]
    InvalidImageSize { width: f64, height: f64 },
    #[error("unknown image id: {0}")]
    UnknownImage(u64),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
