use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use raw2fits::image_pipeline::{
    ByteOrder, ConsoleProgress, ConversionConfig, ConversionError, ConversionReport, Geometry,
    RawToFitsPipeline,
};
use raw2fits::logger;

use tracing::{error, info};

/// Convert 16-bit RAW (2 bytes/pixel) to FITS (16-bit).
#[derive(Parser, Debug)]
#[command(name = "raw2fits", version, about)]
struct Cli {
    /// Path to input RAW file or directory (directories are converted recursively)
    input: PathBuf,

    /// Image width in pixels
    #[arg(long, allow_negative_numbers = true)]
    width: i64,

    /// Image height in pixels
    #[arg(long, allow_negative_numbers = true)]
    height: i64,

    /// Path to output FITS file (defaults to INPUT with .fits extension)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Byte order of RAW data (LSB-first == little)
    #[arg(long, value_enum, default_value_t = ByteOrderArg::Little)]
    byteorder: ByteOrderArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ByteOrderArg {
    Little,
    Big,
}

impl From<ByteOrderArg> for ByteOrder {
    fn from(value: ByteOrderArg) -> Self {
        match value {
            ByteOrderArg::Little => ByteOrder::LittleEndian,
            ByteOrderArg::Big => ByteOrder::BigEndian,
        }
    }
}

const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID_GEOMETRY: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init();

    let geometry = match Geometry::new(cli.width, cli.height) {
        Ok(geometry) => geometry,
        Err(e) => {
            error!("{}", e);
            match e {
                ConversionError::InvalidGeometry { reason, .. } => eprintln!("Error: {}.", reason),
                other => eprintln!("Error: {}", other),
            }
            return ExitCode::from(EXIT_INVALID_GEOMETRY);
        }
    };

    let config = ConversionConfig::builder(geometry)
        .byte_order(cli.byteorder.into())
        .build();
    info!(
        "Converting {} ({}, byteorder={})",
        cli.input.display(),
        config.geometry,
        config.byte_order
    );

    let pipeline = RawToFitsPipeline::new(config).with_progress(ConsoleProgress);

    match pipeline.convert_path(&cli.input, cli.output.as_deref()) {
        Ok(report) => {
            match &report {
                ConversionReport::File(output) => {
                    println!("Wrote FITS: {}", output.display());
                }
                ConversionReport::Directory { result, ignored_output } => {
                    if ignored_output.is_some() {
                        eprintln!("Warning: --output is ignored when input is a directory.");
                    }
                    println!(
                        "Converted {} files. Failures: {}.",
                        result.written.len(),
                        result.failed.len()
                    );
                    for msg in result.failure_messages() {
                        eprintln!("Failed: {}", msg);
                    }
                }
            }
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
