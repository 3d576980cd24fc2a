//! Pipeline conversions module
//!
//! This module contains orchestration logic for single-file and directory
//! RAW to FITS conversion.

mod raw_to_fits;
mod batch;
mod progress;

pub use raw_to_fits::RawToFitsPipeline;
pub use batch::{
    derive_output_path, is_raw_candidate, BatchResult, ConversionReport, FITS_EXTENSION,
    RAW_EXTENSION,
};
pub use progress::{ConsoleProgress, LogProgress, ProgressReporter};
