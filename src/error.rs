// One error type for the whole crate.
// Every variant states *where* things went wrong; degenerate geometry is not
// an error (the rasterizers simply draw nothing).
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Opening or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to a caller-supplied stream failed.
    #[error("I/O error on output stream: {0}")]
    Stream(#[from] std::io::Error),

    /// Pixel access outside the buffer extents.
    #[error("pixel ({x}, {y}) is outside a {width}x{height} buffer")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    /// Two buffers that must agree on size do not.
    #[error("dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Dimensions do not fit a fixed-width field: 16-bit seed coordinates or
    /// the 32-bit bitmap header.
    #[error("{width}x{height} is too large")]
    TooLarge { width: usize, height: usize },

    /// A triangle refers to a vertex that does not exist.
    #[error("triangle {triangle} uses vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidIndex {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Malformed bitmap input.
    #[error("bitmap decode error: {0}")]
    Decode(String),

    /// Creating or updating the preview window failed.
    #[error("window error: {0}")]
    Window(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
