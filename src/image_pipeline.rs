//! Image processing pipeline module
//!
//! This module provides a structured approach to RAW to FITS conversion,
//! with separate modules for RAW reading, FITS writing, and conversion orchestration.

pub mod raw;
pub mod fits;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    FileError,
    Result,
};

pub use raw::{
    ByteOrder,
    FixedGeometryReader,
    Geometry,
    PixelGrid,
    RawImageReader,
};

pub use fits::{
    ConversionConfig,
    ConversionConfigBuilder,
    FitsMetadata,
    FitsWriter,
    StandardFitsWriter,
};

pub use conversions::{
    BatchResult,
    ConsoleProgress,
    ConversionReport,
    ProgressReporter,
    RawToFitsPipeline,
};
