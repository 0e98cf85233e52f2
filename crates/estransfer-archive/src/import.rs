//! Import side of the codec.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info, instrument};

use estransfer_core::Result;
use estransfer_core::error::FormatError;

use crate::format::TransferFormat;
use crate::{tar_xz, zip_container};

/// Source of an import.
///
/// Containers are extracted into a temporary directory that lives as long as
/// this value; the directory must hold exactly one `.json` file.
#[derive(Debug)]
pub struct ImportSource {
    format: TransferFormat,
    records: PathBuf,
    _staging: Option<TempDir>,
}

impl ImportSource {
    /// Open the transfer file at `path`.
    ///
    /// # Errors
    ///
    /// Fails for unsupported extensions, unreadable containers, and
    /// containers that do not hold exactly one `.json` file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = TransferFormat::from_path(path)?;

        let extract: fn(&Path, &Path) -> Result<()> = match format {
            TransferFormat::Json => {
                return Ok(Self {
                    format,
                    records: path.to_path_buf(),
                    _staging: None,
                });
            }
            TransferFormat::Zip => zip_container::extract,
            TransferFormat::TarXz => tar_xz::extract,
        };

        let staging = tempfile::Builder::new()
            .prefix("estransfer-import-")
            .tempdir()?;

        info!(%format, "Extracting transfer file, this may take a while for large files");
        extract(path, staging.path())?;

        let records = single_json_file(staging.path())?;
        debug!(records = %records.display(), "Found record stream");

        Ok(Self {
            format,
            records,
            _staging: Some(staging),
        })
    }

    pub fn format(&self) -> TransferFormat {
        self.format
    }

    /// Path of the newline-delimited record stream.
    pub fn record_path(&self) -> &Path {
        &self.records
    }
}

/// Find the one `.json` file anywhere under `dir`.
fn single_json_file(dir: &Path) -> Result<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            {
                found.push(path);
            }
        }
    }

    match found.pop() {
        Some(path) if found.is_empty() => Ok(path),
        Some(_) => Err(FormatError::MemberCount {
            found: found.len() + 1,
        }
        .into()),
        None => Err(FormatError::MemberCount { found: 0 }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    use estransfer_core::Error;
    use tar::{Builder, Header};
    use xz2::write::XzEncoder;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, members: &[(&str, &str)]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for (name, body) in members {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    fn write_tar_xz(path: &Path, members: &[(&str, &str)]) {
        let encoder = XzEncoder::new(File::create(path).unwrap(), 6);
        let mut builder = Builder::new(encoder);
        for (name, body) in members {
            let mut header = Header::new_gnu();
            header.set_size(body.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, body.as_bytes()).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    fn assert_member_count(result: Result<ImportSource>, expected: usize) {
        match result {
            Err(Error::Format(FormatError::MemberCount { found })) => assert_eq!(found, expected),
            other => panic!("expected member count error, got {:?}", other),
        }
    }

    #[test]
    fn plain_json_is_read_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        fs::write(&path, "{}\n").unwrap();

        let source = ImportSource::open(&path).unwrap();
        assert_eq!(source.format(), TransferFormat::Json);
        assert_eq!(source.record_path(), path.as_path());
    }

    #[test]
    fn member_name_is_irrelevant() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.zip");
        write_zip(&path, &[("backup-2024.json", "{\"x\":1}\n")]);

        let source = ImportSource::open(&path).unwrap();
        assert_eq!(fs::read_to_string(source.record_path()).unwrap(), "{\"x\":1}\n");
    }

    #[test]
    fn nested_member_is_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.tar.xz");
        write_tar_xz(&path, &[("export/events.json", "{}\n"), ("export/README", "hi")]);

        let source = ImportSource::open(&path).unwrap();
        assert!(source.record_path().ends_with("export/events.json"));
    }

    #[test]
    fn zip_without_json_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.zip");
        write_zip(&path, &[("notes.txt", "nothing here")]);
        assert_member_count(ImportSource::open(&path), 0);
    }

    #[test]
    fn zip_with_two_json_files_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.zip");
        write_zip(&path, &[("a.json", "{}\n"), ("b.json", "{}\n")]);
        assert_member_count(ImportSource::open(&path), 2);
    }

    #[test]
    fn tar_xz_with_two_json_files_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.tar.xz");
        write_tar_xz(&path, &[("a.json", "{}\n"), ("b.json", "{}\n")]);
        assert_member_count(ImportSource::open(&path), 2);
    }

    #[test]
    fn empty_tar_xz_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.tar.xz");
        write_tar_xz(&path, &[]);
        assert_member_count(ImportSource::open(&path), 0);
    }

    #[test]
    fn corrupt_container_is_an_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.zip");
        fs::write(&path, b"definitely not a zip").unwrap();

        match ImportSource::open(&path) {
            Err(Error::Format(FormatError::Archive { .. })) => {}
            other => panic!("expected archive error, got {:?}", other),
        }
    }

    #[test]
    fn staging_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.zip");
        write_zip(&path, &[("events.json", "{}\n")]);

        let source = ImportSource::open(&path).unwrap();
        let staged = source.record_path().to_path_buf();
        assert!(staged.exists());

        drop(source);
        assert!(!staged.exists());
    }
}
