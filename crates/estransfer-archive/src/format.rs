//! Transfer format detection.

use std::fmt;
use std::path::Path;

use estransfer_core::Result;
use estransfer_core::error::FormatError;

/// Container format of a transfer file, chosen by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    /// Bare newline-delimited JSON (`.json` or no extension).
    Json,
    /// Single-member deflate zip.
    Zip,
    /// Single-member tar, xz-compressed.
    TarXz,
}

impl TransferFormat {
    /// Detect the format from a file name.
    ///
    /// Matching is case-insensitive. A name without an extension is treated
    /// as plain JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnsupportedType`] for any other extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        if name.ends_with(".tar.xz") {
            return Ok(TransferFormat::TarXz);
        }

        match Path::new(&name).extension().and_then(|e| e.to_str()) {
            None => Ok(TransferFormat::Json),
            Some("json") => Ok(TransferFormat::Json),
            Some("zip") => Ok(TransferFormat::Zip),
            Some(other) => Err(FormatError::UnsupportedType {
                extension: format!(".{}", other),
            }
            .into()),
        }
    }

    /// Whether records are staged in a temporary directory first.
    pub fn is_compressed(self) -> bool {
        !matches!(self, TransferFormat::Json)
    }

    pub fn extension(self) -> &'static str {
        match self {
            TransferFormat::Json => ".json",
            TransferFormat::Zip => ".zip",
            TransferFormat::TarXz => ".tar.xz",
        }
    }
}

impl fmt::Display for TransferFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
