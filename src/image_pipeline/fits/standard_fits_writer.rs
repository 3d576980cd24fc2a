use std::ffi::CString;
use std::path::Path;

use fitsio::FitsFile;
use fitsio::errors::check_status;
use fitsio::images::{ImageDescription, ImageType};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::fits::types::FitsMetadata;
use crate::image_pipeline::fits::writer::FitsWriter;
use crate::image_pipeline::raw::types::PixelGrid;

/// Writes a single primary HDU of unsigned 16-bit samples through cfitsio.
///
/// `ImageType::UnsignedShort` is stored as `BITPIX = 16` with `BZERO = 32768`.
pub struct StandardFitsWriter;

#[derive(Clone, Copy)]
enum Commentary {
    Comment,
    History,
}

impl StandardFitsWriter {
    /// Appends a COMMENT or HISTORY record. cfitsio continues long text on
    /// further cards.
    fn write_commentary(fits: &mut FitsFile, kind: Commentary, text: &str) -> fitsio::errors::Result<()> {
        let text = CString::new(text)?;
        let mut status = 0;
        unsafe {
            let fptr = fits.as_raw();
            match kind {
                Commentary::Comment => fitsio::sys::ffpcom(fptr, text.as_ptr(), &mut status),
                Commentary::History => fitsio::sys::ffphis(fptr, text.as_ptr(), &mut status),
            };
        }
        check_status(status)
    }

    fn write_hdu(image: &PixelGrid, metadata: &FitsMetadata, output_path: &Path) -> fitsio::errors::Result<()> {
        // Slowest axis first: NAXIS1 = width, NAXIS2 = height.
        let dimensions = [image.height(), image.width()];
        let description = ImageDescription {
            data_type: ImageType::UnsignedShort,
            dimensions: &dimensions,
        };

        let mut fits = FitsFile::create(output_path)
            .with_custom_primary(&description)
            .overwrite()
            .open()?;
        let hdu = fits.primary_hdu()?;

        let samples: Vec<u16> = image.samples().collect();
        hdu.write_image(&mut fits, &samples)?;
        hdu.write_key(&mut fits, "CREATOR", metadata.creator.clone())?;

        Self::write_commentary(&mut fits, Commentary::Comment, metadata.comment())?;
        Self::write_commentary(&mut fits, Commentary::History, &metadata.history())
    }
}

impl FitsWriter for StandardFitsWriter {
    fn write_fits(&self, image: &PixelGrid, metadata: &FitsMetadata, output_path: &Path) -> Result<()> {
        debug!("Encoding FITS image: {}x{}", image.width(), image.height());

        if image.width() != metadata.geometry.width() || image.height() != metadata.geometry.height() {
            return Err(ConversionError::Encode(format!(
                "image is {}x{} but metadata declares {}",
                image.width(),
                image.height(),
                metadata.geometry
            )));
        }

        let path = output_path.to_path_buf();
        Self::write_hdu(image, metadata, output_path).map_err(|source| match source {
            fitsio::errors::Error::Io(source) => ConversionError::Write { path, source },
            source => ConversionError::Fits { path, source },
        })?;

        debug!("FITS encoding complete: {}", output_path.display());
        Ok(())
    }
}
