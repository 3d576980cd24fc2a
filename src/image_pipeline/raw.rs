//! RAW image reading module
//!
//! This module reads header-less 16-bit sample dumps whose geometry is supplied
//! by the caller.

mod reader;
mod fixed_geometry_reader;
pub mod types;

pub use reader::RawImageReader;
pub use fixed_geometry_reader::{FixedGeometryReader, decode_samples, read_frame};
pub use types::{ByteOrder, Geometry, PixelGrid, BYTES_PER_SAMPLE};
