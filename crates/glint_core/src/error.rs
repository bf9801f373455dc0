//! Errors raised at construction boundaries.
//!
//! Tracing never fails; only building dimensions or canvases from outside
//! input can.

use thiserror::Error;

/// Errors that can occur while building render inputs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
