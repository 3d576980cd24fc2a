//! Reader for header-less 16-bit RAW dumps.
//!
//! The file carries no metadata, so the caller supplies the frame geometry and
//! the byte order. The file size is validated against the geometry before any
//! sample data is read.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use ndarray::Array2;
use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::reader::RawImageReader;
use crate::image_pipeline::raw::types::{ByteOrder, Geometry, PixelGrid, BYTES_PER_SAMPLE};

/// Reads RAW files whose size must equal `width * height * 2` bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeometryReader;

impl FixedGeometryReader {
    /// Returns the on-disk size of `path`, rejecting anything that is not a
    /// regular file.
    fn file_len(path: &Path) -> Result<u64> {
        let metadata = std::fs::metadata(path).map_err(|source| ConversionError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_file() {
            return Err(ConversionError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        Ok(metadata.len())
    }

    fn validate_size(path: &Path, geometry: Geometry) -> Result<()> {
        let expected = geometry.expected_bytes();
        let actual = Self::file_len(path)?;

        if actual != expected {
            return Err(ConversionError::SizeMismatch {
                path: path.to_path_buf(),
                expected,
                actual,
                width: geometry.width(),
                height: geometry.height(),
            });
        }

        Ok(())
    }

    fn open(path: &Path) -> Result<File> {
        File::open(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ConversionError::FileNotFound {
                path: path.to_path_buf(),
                source,
            },
            _ => ConversionError::Io {
                path: path.to_path_buf(),
                source,
            },
        })
    }
}

impl RawImageReader for FixedGeometryReader {
    /// Decodes a RAW file into a [`PixelGrid`].
    ///
    /// # Errors
    ///
    /// * `FileNotFound` - the path cannot be accessed
    /// * `SizeMismatch` - the file length does not match `geometry`
    /// * `TruncatedRead` - fewer samples could be read than the size check promised
    /// * `Io` - any other read failure
    #[instrument(skip_all, fields(path = %path.display(), geometry = %geometry, byte_order = %byte_order))]
    fn read_raw(&self, path: &Path, geometry: Geometry, byte_order: ByteOrder) -> Result<PixelGrid> {
        Self::validate_size(path, geometry)?;

        // The handle is dropped when read_frame returns, on every path.
        let file = Self::open(path)?;
        read_frame(file, path, geometry, byte_order)
    }
}

/// Reads one frame from `source`, consuming at most `geometry.expected_bytes()`.
///
/// A source that ends early yields `TruncatedRead` with the number of whole
/// samples obtained. `path` is only used for error context.
pub fn read_frame<R: Read>(
    source: R,
    path: &Path,
    geometry: Geometry,
    byte_order: ByteOrder,
) -> Result<PixelGrid> {
    let expected = geometry.expected_bytes();
    let mut bytes = Vec::with_capacity(expected as usize);
    source
        .take(expected)
        .read_to_end(&mut bytes)
        .map_err(|source| ConversionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let read = bytes.len() / BYTES_PER_SAMPLE;
    debug!("Read {} bytes ({} samples)", bytes.len(), read);

    if read < geometry.pixel_count() || bytes.len() as u64 != expected {
        return Err(ConversionError::TruncatedRead {
            path: path.to_path_buf(),
            read,
            expected: geometry.pixel_count(),
        });
    }

    decode_samples(path, &bytes, geometry, byte_order)
}

/// Interprets an in-memory RAW frame. `path` is only used for error context.
///
/// The buffer must hold exactly one frame, otherwise `SizeMismatch` is
/// returned and no sample is decoded.
pub fn decode_samples(
    path: &Path,
    bytes: &[u8],
    geometry: Geometry,
    byte_order: ByteOrder,
) -> Result<PixelGrid> {
    let expected = geometry.expected_bytes();
    if bytes.len() as u64 != expected {
        return Err(ConversionError::SizeMismatch {
            path: path.to_path_buf(),
            expected,
            actual: bytes.len() as u64,
            width: geometry.width(),
            height: geometry.height(),
        });
    }

    let samples: Vec<u16> = bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|pair| byte_order.read_u16([pair[0], pair[1]]))
        .collect();

    // Sample count equals width * height after the length check above.
    let data = Array2::from_shape_vec((geometry.height(), geometry.width()), samples)
        .expect("sample count matches geometry");

    Ok(PixelGrid::from_array(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_raw(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn test_byte_order_sensitivity() {
        let geometry = Geometry::new(1, 1).unwrap();
        let bytes = [0x01, 0x02];

        let little = decode_samples(Path::new("mem"), &bytes, geometry, ByteOrder::LittleEndian).unwrap();
        let big = decode_samples(Path::new("mem"), &bytes, geometry, ByteOrder::BigEndian).unwrap();

        assert_eq!(little.get(0, 0), Some(0x0201));
        assert_eq!(big.get(0, 0), Some(0x0102));
    }

    #[test]
    fn test_grid_layout_is_row_major() {
        let geometry = Geometry::new(2, 2).unwrap();
        let bytes: Vec<u8> = [10u16, 20, 30, 40].iter().flat_map(|v| v.to_le_bytes()).collect();

        let grid = decode_samples(Path::new("mem"), &bytes, geometry, ByteOrder::LittleEndian).unwrap();

        assert_eq!(grid.to_rows(), vec![vec![10, 20], vec![30, 40]]);
    }

    #[test]
    fn test_non_square_layout() {
        let geometry = Geometry::new(3, 2).unwrap();
        let bytes: Vec<u8> = (0u16..6).flat_map(|v| v.to_be_bytes()).collect();

        let grid = decode_samples(Path::new("mem"), &bytes, geometry, ByteOrder::BigEndian).unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(1, 0), Some(3));
        assert_eq!(grid.get(0, 2), Some(2));
    }

    #[test]
    fn test_round_trip_restores_bytes() {
        let cases = [(1, 1), (4, 3), (7, 5)];
        for (w, h) in cases {
            let geometry = Geometry::new(w, h).unwrap();
            let bytes: Vec<u8> = (0..geometry.expected_bytes())
                .map(|i| (i.wrapping_mul(37) % 251) as u8)
                .collect();

            for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
                let grid = decode_samples(Path::new("mem"), &bytes, geometry, order).unwrap();
                assert_eq!(grid.to_bytes(order), bytes, "{w}x{h} {order}");
            }
        }
    }

    #[test]
    fn test_decode_samples_rejects_wrong_length() {
        let geometry = Geometry::new(2, 2).unwrap();
        let result = decode_samples(Path::new("mem"), &[0u8; 7], geometry, ByteOrder::LittleEndian);

        assert!(matches!(
            result,
            Err(ConversionError::SizeMismatch { expected: 8, actual: 7, .. })
        ));
    }

    #[test]
    fn test_read_raw_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_raw(&dir, "frame.raw", &[0x00, 0x01, 0xff, 0xff, 0x34, 0x12, 0x00, 0x00]);

        let grid = FixedGeometryReader
            .read_raw(&path, Geometry::new(2, 2).unwrap(), ByteOrder::LittleEndian)
            .unwrap();

        assert_eq!(grid.to_rows(), vec![vec![0x0100, 0xffff], vec![0x1234, 0]]);
    }

    #[test]
    fn test_read_raw_size_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = write_raw(&dir, "short.raw", &[0u8; 10]);

        let err = FixedGeometryReader
            .read_raw(&path, Geometry::new(4, 4).unwrap(), ByteOrder::LittleEndian)
            .unwrap_err();

        match err {
            ConversionError::SizeMismatch { path: p, expected, actual, width, height } => {
                assert_eq!(p, path);
                assert_eq!(expected, 32);
                assert_eq!(actual, 10);
                assert_eq!((width, height), (4, 4));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_raw_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.raw");

        let err = FixedGeometryReader
            .read_raw(&path, Geometry::new(2, 2).unwrap(), ByteOrder::LittleEndian)
            .unwrap_err();

        assert!(matches!(err, ConversionError::FileNotFound { .. }));
        assert!(err.to_string().contains("missing.raw"));
    }

    #[test]
    fn test_read_raw_rejects_directory() {
        let dir = TempDir::new().unwrap();

        let err = FixedGeometryReader
            .read_raw(dir.path(), Geometry::new(2, 2).unwrap(), ByteOrder::LittleEndian)
            .unwrap_err();

        assert!(matches!(err, ConversionError::Io { .. }));
    }

    #[test]
    fn test_read_frame_short_source_is_truncated() {
        let geometry = Geometry::new(2, 2).unwrap();
        let source = std::io::Cursor::new(vec![1u8, 0, 2, 0, 3]);

        let err = read_frame(source, Path::new("frame.raw"), geometry, ByteOrder::LittleEndian).unwrap_err();

        match err {
            ConversionError::TruncatedRead { path, read, expected } => {
                assert_eq!(path, PathBuf::from("frame.raw"));
                assert_eq!(read, 2);
                assert_eq!(expected, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_frame_stops_at_one_frame() {
        let geometry = Geometry::new(1, 2).unwrap();
        let source = std::io::Cursor::new(vec![0x01, 0x00, 0x02, 0x00, 0xff, 0xff]);

        let grid = read_frame(source, Path::new("frame.raw"), geometry, ByteOrder::LittleEndian).unwrap();

        assert_eq!(grid.to_rows(), vec![vec![1], vec![2]]);
    }

    struct FailingSource;

    impl Read for FailingSource {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::Other, "device went away"))
        }
    }

    #[test]
    fn test_read_frame_source_error_is_io() {
        let geometry = Geometry::new(2, 2).unwrap();

        let err = read_frame(FailingSource, Path::new("frame.raw"), geometry, ByteOrder::BigEndian).unwrap_err();

        assert!(matches!(err, ConversionError::Io { .. }));
        assert!(err.to_string().contains("device went away"));
    }
}
