//! Export side of the codec.

use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};
use tracing::{debug, info, instrument};

use estransfer_core::Result;

use crate::format::TransferFormat;
use crate::{RECORD_FILE_NAME, tar_xz, zip_container};

/// Destination of an export.
///
/// The transfer file is built in a temporary file next to the target and
/// renamed over it by [`ExportSink::finish`], so an existing target is only
/// replaced by a complete file. For plain JSON the record stream is written
/// straight into that temporary file. For containers it is staged in a
/// temporary directory first and compressed on finish. Dropping the sink
/// without finishing discards everything and leaves the target untouched.
#[derive(Debug)]
pub struct ExportSink {
    format: TransferFormat,
    target: PathBuf,
    records: PathBuf,
    output: NamedTempFile,
    staging: Option<TempDir>,
}

impl ExportSink {
    /// Prepare an export to `target`.
    ///
    /// # Errors
    ///
    /// Fails for unsupported extensions, or if the temporary output or
    /// staging directory cannot be created.
    #[instrument(skip_all, fields(target = %target.as_ref().display()))]
    pub fn create(target: impl AsRef<Path>) -> Result<Self> {
        let target = target.as_ref().to_path_buf();
        let format = TransferFormat::from_path(&target)?;

        let output = tempfile::Builder::new()
            .prefix(".estransfer-")
            .suffix(".partial")
            .tempfile_in(target_dir(&target))?;

        let (records, staging) = if format.is_compressed() {
            let dir = tempfile::Builder::new()
                .prefix("estransfer-export-")
                .tempdir()?;
            debug!(staging = %dir.path().display(), "Staging records");
            (dir.path().join(RECORD_FILE_NAME), Some(dir))
        } else {
            (output.path().to_path_buf(), None)
        };

        Ok(Self {
            format,
            target,
            records,
            output,
            staging,
        })
    }

    pub fn format(&self) -> TransferFormat {
        self.format
    }

    /// Where the record stream must be written.
    pub fn record_path(&self) -> &Path {
        &self.records
    }

    /// Compress staged records if needed, then move the result onto the
    /// target and clean up.
    ///
    /// Returns the path of the finished transfer file.
    #[instrument(skip_all, fields(target = %self.target.display(), format = %self.format))]
    pub fn finish(self) -> Result<PathBuf> {
        let mut output = self.output;
        match self.format {
            TransferFormat::Json => {}
            TransferFormat::Zip => {
                info!("Compressing records, this may take a while for large streams");
                zip_container::compress(&self.records, output.as_file_mut(), RECORD_FILE_NAME)?;
            }
            TransferFormat::TarXz => {
                info!("Compressing records, this may take a while for large streams");
                tar_xz::compress(&self.records, output.as_file_mut(), RECORD_FILE_NAME)?;
            }
        }

        output.as_file().sync_all()?;
        output.persist(&self.target).map_err(|err| err.error)?;

        if let Some(staging) = self.staging {
            staging.close()?;
        }

        Ok(self.target)
    }
}

/// Directory the temporary output must live in to be renamed onto `target`.
fn target_dir(target: &Path) -> &Path {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
