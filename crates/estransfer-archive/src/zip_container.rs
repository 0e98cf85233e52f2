//! Single-member deflate zip containers.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};
use tracing::debug;

use estransfer_core::Result;
use estransfer_core::error::FormatError;

/// Deflate `source` into `out` as a zip holding `member`.
pub(crate) fn compress(source: &Path, out: &mut File, member: &str) -> Result<()> {
    debug!(source = %source.display(), "Writing zip");

    let mut writer = ZipWriter::new(BufWriter::new(out));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    writer
        .start_file(member, options)
        .map_err(FormatError::archive)?;

    let mut input = File::open(source)?;
    io::copy(&mut input, &mut writer)?;

    let mut out = writer.finish().map_err(FormatError::archive)?;
    out.flush()?;
    Ok(())
}

/// Extract every member of the zip at `source` into `dir`.
pub(crate) fn extract(source: &Path, dir: &Path) -> Result<()> {
    debug!(source = %source.display(), dir = %dir.display(), "Extracting zip");

    let mut archive = ZipArchive::new(File::open(source)?).map_err(FormatError::archive)?;
    archive.extract(dir).map_err(FormatError::archive)?;
    Ok(())
}
