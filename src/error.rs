use std::path::PathBuf;

use thiserror::Error;

/// Failure of a palette transaction after the drop itself was accepted.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("unable to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("source image has zero width or height")]
    EmptySource,

    /// PNG encoding, or decoding of in-memory bytes that carry no path.
    #[error("PNG codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("palette image must be {expected_width}x{expected_height}, got {width}x{height}")]
    Dimensions {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("another palette transaction is in progress")]
    Busy,
}

/// Why a drop was turned away before any processing happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropRejection {
    #[error("exactly one file must be dropped, got {0}")]
    FileCount(usize),

    #[error("unsupported image extension `{0}`")]
    UnsupportedExtension(String),

    #[error("file name {} has no extension", .0.display())]
    MissingExtension(PathBuf),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
