use std::path::Path;

use tracing::info;

/// Receives a notification for each candidate before it is converted.
pub trait ProgressReporter {
    fn processing(&self, input: &Path);
}

/// Reports progress through the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn processing(&self, input: &Path) {
        info!(input = %input.display(), "Processing");
    }
}

/// Prints `Processing: <path>` on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl ProgressReporter for ConsoleProgress {
    fn processing(&self, input: &Path) {
        println!("Processing: {}", input.display());
    }
}
