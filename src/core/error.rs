/// Error type shared by the surface, host, and animator layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackdropError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("render failed: {0}")]
    Render(#[from] cairo::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot failed: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, BackdropError>;
