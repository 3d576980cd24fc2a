use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("invalid geometry {width}x{height}: {reason}")]
    InvalidGeometry {
        width: i64,
        height: i64,
        reason: &'static str,
    },

    #[error("Cannot access '{}': {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "File size mismatch: expected {expected} bytes for {width}x{height}x16b, but got {actual} bytes."
    )]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
        width: usize,
        height: usize,
    },

    #[error(
        "Read {read} pixels, expected {expected}. The file may be truncated or parameters are incorrect."
    )]
    TruncatedRead {
        path: PathBuf,
        read: usize,
        expected: usize,
    },

    #[error("Failed to read RAW data from '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode FITS image: {0}")]
    Encode(String),

    #[error("Failed to write FITS file '{}': {source}", path.display())]
    Fits {
        path: PathBuf,
        #[source]
        source: fitsio::errors::Error,
    },

    #[error("Failed to write FITS file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConversionError>;

/// A conversion error tied to the input file that produced it.
#[derive(Error, Debug)]
#[error("{}: {source}", path.display())]
pub struct FileError {
    pub path: PathBuf,
    #[source]
    pub source: ConversionError,
}

impl FileError {
    pub fn new(path: impl Into<PathBuf>, source: ConversionError) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}
