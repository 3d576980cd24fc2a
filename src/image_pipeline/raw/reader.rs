use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::{ByteOrder, Geometry, PixelGrid};

pub trait RawImageReader {
    fn read_raw(&self, path: &Path, geometry: Geometry, byte_order: ByteOrder) -> Result<PixelGrid>;
}
