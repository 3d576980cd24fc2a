//! FITS conversion configuration types

use std::path::Path;

use crate::image_pipeline::raw::types::{ByteOrder, Geometry};

/// Value of the `CREATOR` card when none is configured.
pub const DEFAULT_CREATOR: &str = "raw2fits";

/// Descriptive header content written next to the pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitsMetadata {
    /// File name (no directory) of the RAW input
    pub source_name: String,
    pub geometry: Geometry,
    pub byte_order: ByteOrder,
    pub creator: String,
}

impl FitsMetadata {
    pub fn for_source(source: &Path, config: &ConversionConfig) -> Self {
        let source_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());

        Self {
            source_name,
            geometry: config.geometry,
            byte_order: config.byte_order,
            creator: config.creator.clone(),
        }
    }

    pub fn comment(&self) -> &'static str {
        "Converted from 16-bit RAW (2 bytes/pixel)."
    }

    /// HISTORY text. Header cards only hold printable ASCII, so anything
    /// else in the file name becomes `?`.
    pub fn history(&self) -> String {
        let source: String = self
            .source_name
            .chars()
            .map(|c| if (' '..='~').contains(&c) { c } else { '?' })
            .collect();
        format!(
            "Source: {}; {}; byteorder={}",
            source, self.geometry, self.byte_order
        )
    }
}

/// Configuration for RAW to FITS conversion, fixed for a whole run
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Frame size shared by every input
    pub geometry: Geometry,
    /// Byte order of the RAW samples
    pub byte_order: ByteOrder,
    /// Value of the `CREATOR` header card
    pub creator: String,
}

impl ConversionConfig {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            byte_order: ByteOrder::default(),
            creator: DEFAULT_CREATOR.to_string(),
        }
    }

    pub fn builder(geometry: Geometry) -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            geometry,
            byte_order: None,
            creator: None,
        }
    }
}

/// Builder for ConversionConfig
pub struct ConversionConfigBuilder {
    geometry: Geometry,
    byte_order: Option<ByteOrder>,
    creator: Option<String>,
}

impl ConversionConfigBuilder {
    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = Some(byte_order);
        self
    }

    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::new(self.geometry);
        ConversionConfig {
            geometry: self.geometry,
            byte_order: self.byte_order.unwrap_or(default.byte_order),
            creator: self.creator.unwrap_or(default.creator),
        }
    }
}
