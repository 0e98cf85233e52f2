//! Single-member xz-compressed tar containers.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tar::{Archive, Builder};
use tracing::debug;
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

use estransfer_core::Result;
use estransfer_core::error::FormatError;

/// Compression preset, matching the `xz` command-line default.
const XZ_PRESET: u32 = 6;

/// Tar `source` under `member` and xz-compress it into `out`.
pub(crate) fn compress(source: &Path, out: &mut File, member: &str) -> Result<()> {
    debug!(source = %source.display(), "Writing tar.xz");

    let encoder = XzEncoder::new(BufWriter::new(out), XZ_PRESET);
    let mut builder = Builder::new(encoder);
    builder
        .append_path_with_name(source, member)
        .map_err(|e| FormatError::archive(format!("append '{}': {}", member, e)))?;

    let encoder = builder
        .into_inner()
        .map_err(|e| FormatError::archive(format!("tar finish: {}", e)))?;
    let mut out = encoder
        .finish()
        .map_err(|e| FormatError::archive(format!("xz finish: {}", e)))?;
    out.flush()?;
    Ok(())
}

/// Unpack the tar.xz at `source` into `dir`.
pub(crate) fn extract(source: &Path, dir: &Path) -> Result<()> {
    debug!(source = %source.display(), dir = %dir.display(), "Extracting tar.xz");

    let decoder = XzDecoder::new(BufReader::new(File::open(source)?));
    Archive::new(decoder)
        .unpack(dir)
        .map_err(FormatError::archive)?;
    Ok(())
}
