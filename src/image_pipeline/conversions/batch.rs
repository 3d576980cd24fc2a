//! Batch outcome types

use std::path::{Path, PathBuf};

use crate::image_pipeline::common::error::FileError;

/// Extension (without the dot) that marks RAW candidates, matched case-insensitively.
pub const RAW_EXTENSION: &str = "raw";
/// Extension given to derived output paths.
pub const FITS_EXTENSION: &str = "fits";

/// Outputs and failures of a directory run, in discovery order.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub written: Vec<PathBuf>,
    pub failed: Vec<FileError>,
}

impl BatchResult {
    /// True only when no file failed, even if some were written.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Failures rendered as `<input>: <error>`.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failed.iter().map(|e| e.to_string()).collect()
    }
}

/// What a path-level conversion produced.
#[derive(Debug)]
pub enum ConversionReport {
    File(PathBuf),
    Directory {
        result: BatchResult,
        /// Output override supplied by the caller and ignored in directory mode
        ignored_output: Option<PathBuf>,
    },
}

impl ConversionReport {
    pub fn is_success(&self) -> bool {
        match self {
            ConversionReport::File(_) => true,
            ConversionReport::Directory { result, .. } => result.is_success(),
        }
    }
}

/// `frame.raw` -> `frame.fits`; paths without an extension gain one.
pub fn derive_output_path(input: &Path) -> PathBuf {
    input.with_extension(FITS_EXTENSION)
}

pub fn is_raw_candidate(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            name.to_string_lossy()
                .to_ascii_lowercase()
                .ends_with(&format!(".{RAW_EXTENSION}"))
        })
        .unwrap_or(false)
}
