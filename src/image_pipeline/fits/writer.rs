use std::path::Path;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::types::FitsMetadata;
use crate::image_pipeline::raw::types::PixelGrid;

pub trait FitsWriter {
    /// Writes `image` to `output_path`, replacing any existing file.
    fn write_fits(&self, image: &PixelGrid, metadata: &FitsMetadata, output_path: &Path) -> Result<()>;
}
