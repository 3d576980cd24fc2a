//! FITS writing module
//!
//! This module serializes decoded frames into single-HDU FITS files.

mod writer;
mod standard_fits_writer;
pub mod types;

pub use writer::FitsWriter;
pub use standard_fits_writer::StandardFitsWriter;
pub use types::{ConversionConfig, ConversionConfigBuilder, FitsMetadata, DEFAULT_CREATOR};
