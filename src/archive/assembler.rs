//! Merges the base runtime bundle with a packaged model library.
//!
//! The output contains every entry of the base archive verbatim (same
//! compression method, same bytes, same order) followed by exactly one
//! additional entry: the library file under [`LIB_ENTRY_DIR`], stored without
//! compression so the consuming runtime can load it in place. The entry
//! carries the library's exact byte length and CRC-32.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::ArchiveError;

/// Archive-internal directory the library entry is placed under.
pub const LIB_ENTRY_DIR: &str = "lib/";

/// Builds `output` from `base_archive` plus `library`.
///
/// The bundle is written to a temporary sibling and renamed into place only
/// on full success, so a failed assembly never leaves a partial file at the
/// output path.
pub fn assemble(base_archive: &Path, library: &Path, output: &Path) -> Result<(), ArchiveError> {
    if !base_archive.exists() {
        return Err(ArchiveError::BaseNotFound {
            path: base_archive.to_path_buf(),
        });
    }

    let file_name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bundle".to_string());
    let staging = output.with_file_name(format!("{file_name}.tmp"));

    let result = write_bundle(base_archive, library, &staging);
    if let Err(err) = result {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }

    fs::rename(&staging, output).map_err(|source| ArchiveError::io(output, source))?;
    info!("Assembled bundle {}", output.display());
    Ok(())
}

fn write_bundle(base_archive: &Path, library: &Path, staging: &Path) -> Result<(), ArchiveError> {
    let base_file =
        File::open(base_archive).map_err(|source| ArchiveError::io(base_archive, source))?;
    let mut base =
        ZipArchive::new(base_file).map_err(|source| ArchiveError::zip(base_archive, source))?;

    let staging_file =
        File::create(staging).map_err(|source| ArchiveError::io(staging, source))?;
    let mut writer = ZipWriter::new(staging_file);

    // Raw copy keeps each base entry's method, bytes and checksum untouched.
    for index in 0..base.len() {
        let entry = base
            .by_index_raw(index)
            .map_err(|source| ArchiveError::zip(base_archive, source))?;
        writer
            .raw_copy_file(entry)
            .map_err(|source| ArchiveError::zip(staging, source))?;
    }

    let library_bytes = fs::read(library).map_err(|source| ArchiveError::io(library, source))?;
    let library_name = library
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "library".to_string());
    let entry_name = format!("{LIB_ENTRY_DIR}{library_name}");

    debug!(
        "Storing {} uncompressed ({} bytes, crc32 {:08x})",
        entry_name,
        library_bytes.len(),
        crc32fast::hash(&library_bytes)
    );

    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    writer
        .start_file(entry_name, stored)
        .map_err(|source| ArchiveError::zip(staging, source))?;
    writer
        .write_all(&library_bytes)
        .map_err(|source| ArchiveError::io(staging, source))?;

    writer
        .finish()
        .map_err(|source| ArchiveError::zip(staging, source))?;
    Ok(())
}
