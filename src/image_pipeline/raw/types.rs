//! RAW image data types

use std::fmt;

use ndarray::Array2;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Bytes per sample in every supported RAW dump.
pub const BYTES_PER_SAMPLE: usize = 2;

const NON_POSITIVE: &str = "width and height must be positive integers";
const TOO_LARGE: &str = "frame byte size exceeds the addressable range";

/// Fixed frame size shared by every file in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    width: usize,
    height: usize,
}

impl Geometry {
    /// Validates the dimensions without touching the filesystem.
    ///
    /// Both sides must be strictly positive and the frame's byte length must
    /// fit in `usize`.
    pub fn new(width: i64, height: i64) -> Result<Self> {
        let invalid = |reason: &'static str| ConversionError::InvalidGeometry { width, height, reason };

        if width <= 0 || height <= 0 {
            return Err(invalid(NON_POSITIVE));
        }

        let w = usize::try_from(width).map_err(|_| invalid(TOO_LARGE))?;
        let h = usize::try_from(height).map_err(|_| invalid(TOO_LARGE))?;

        w.checked_mul(h)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_SAMPLE))
            .ok_or_else(|| invalid(TOO_LARGE))?;

        Ok(Self { width: w, height: h })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Exact size a RAW file must have for this geometry.
    pub fn expected_bytes(&self) -> u64 {
        (self.pixel_count() * BYTES_PER_SAMPLE) as u64
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Order in which the two bytes of a sample are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Low-order byte first
    #[default]
    LittleEndian,
    /// High-order byte first
    BigEndian,
}

impl ByteOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "little",
            ByteOrder::BigEndian => "big",
        }
    }

    #[inline]
    pub fn read_u16(&self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    #[inline]
    pub fn write_u16(&self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded 16-bit frame, `height` rows of `width` samples in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    data: Array2<u16>,
}

impl PixelGrid {
    pub(crate) fn from_array(data: Array2<u16>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u16> {
        self.data.get((row, col)).copied()
    }

    /// Samples in row-major order.
    pub fn samples(&self) -> impl Iterator<Item = u16> + '_ {
        self.data.iter().copied()
    }

    pub fn to_rows(&self) -> Vec<Vec<u16>> {
        self.data.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Flattens the grid back into a RAW byte stream.
    pub fn to_bytes(&self, byte_order: ByteOrder) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * BYTES_PER_SAMPLE);
        for sample in self.samples() {
            out.extend_from_slice(&byte_order.write_u16(sample));
        }
        out
    }
}
