use tracing::{info, instrument, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::image_pipeline::{
    common::error::{FileError, Result},
    conversions::batch::{derive_output_path, is_raw_candidate, BatchResult, ConversionReport},
    conversions::progress::{LogProgress, ProgressReporter},
    fits::{ConversionConfig, FitsMetadata, FitsWriter, StandardFitsWriter},
    raw::{FixedGeometryReader, RawImageReader},
};

pub struct RawToFitsPipeline<R: RawImageReader, W: FitsWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
    progress: Box<dyn ProgressReporter>,
}

impl RawToFitsPipeline<FixedGeometryReader, StandardFitsWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_custom(FixedGeometryReader, StandardFitsWriter, config)
    }
}

impl<R: RawImageReader, W: FitsWriter> RawToFitsPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
            progress: Box::new(LogProgress),
        }
    }

    /// Replaces the reporter notified before each directory candidate.
    pub fn with_progress(mut self, progress: impl ProgressReporter + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Converts one file, replacing whatever exists at `output_path`.
    ///
    /// The input is fully decoded before the output is touched, so a bad
    /// input never clobbers an existing FITS file.
    #[instrument(skip_all, fields(input = %input_path.as_ref().display()))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(output = %output_path.display(), "Converting file");

        let image = {
            let _span = tracing::info_span!("decode_raw").entered();
            self.reader
                .read_raw(input_path, self.config.geometry, self.config.byte_order)?
        };

        {
            let _span = tracing::info_span!("write_fits").entered();
            let metadata = FitsMetadata::for_source(input_path, &self.config);
            self.writer.write_fits(&image, &metadata, output_path)?;
        }

        info!(
            width = image.width(),
            height = image.height(),
            "Conversion complete"
        );
        Ok(())
    }

    /// Single-file mode. Without an explicit `output_path` the input's
    /// extension is replaced with `.fits`.
    pub fn convert_one(
        &self,
        input_path: &Path,
        output_path: Option<&Path>,
    ) -> std::result::Result<PathBuf, FileError> {
        let output_path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| derive_output_path(input_path));

        self.convert_file(input_path, &output_path)
            .map_err(|e| FileError::new(input_path, e))?;

        Ok(output_path)
    }

    /// Converts every `.raw` file below `root`, one at a time.
    ///
    /// Entries are visited depth-first, sorted by file name at each level.
    /// A failing file is recorded and the walk continues.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn convert_directory(&self, root: &Path) -> BatchResult {
        let mut result = BatchResult::default();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            // Dangling links are attempted so they surface as failures.
            let path = entry.path();
            if !is_raw_candidate(path) || path.is_dir() {
                continue;
            }

            self.progress.processing(path);
            match self.convert_one(path, None) {
                Ok(output) => result.written.push(output),
                Err(e) => {
                    warn!("{}", e);
                    result.failed.push(e);
                }
            }
        }

        info!(
            written = result.written.len(),
            failed = result.failed.len(),
            "Directory conversion finished"
        );
        result
    }

    /// Dispatches on the kind of `input`. An explicit `output_path` only
    /// applies to single files; for directories it is reported back as ignored.
    pub fn convert_path(
        &self,
        input: &Path,
        output_path: Option<&Path>,
    ) -> std::result::Result<ConversionReport, FileError> {
        if input.is_dir() {
            if let Some(output) = output_path {
                warn!(output = %output.display(), "Output path ignored for directory input");
            }
            return Ok(ConversionReport::Directory {
                result: self.convert_directory(input),
                ignored_output: output_path.map(Path::to_path_buf),
            });
        }

        self.convert_one(input, output_path).map(ConversionReport::File)
    }
}
