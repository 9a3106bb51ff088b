//! Packages compiled class artifacts into the model library archive.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::info;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::archive::ArchiveError;

use super::compile::CompiledClasses;
use super::BuildError;

/// File name of the packaged model library.
pub const LIBRARY_FILE_NAME: &str = "model.jar";

/// Extension of a compiled unit; anything else is skipped.
pub const COMPILED_UNIT_EXTENSION: &str = "class";

/// Output of the package step.
#[derive(Debug, Clone)]
pub struct PackagedLibrary {
    pub path: std::path::PathBuf,
}

/// Walks the compiled-classes tree and adds every compiled unit to a fresh
/// library archive, flattened to its file name. Non-matching entries are
/// silently skipped; the first I/O error aborts the walk.
pub fn package_classes(
    classes: &CompiledClasses,
    target_dir: &Path,
) -> Result<PackagedLibrary, BuildError> {
    let path = target_dir.join(LIBRARY_FILE_NAME);
    info!(
        "Creating model library for classes directory: {}",
        classes.dir.display()
    );

    create_library_archive(&classes.dir, &path).map_err(|source| BuildError::Packaging {
        dir: classes.dir.clone(),
        source,
    })?;

    Ok(PackagedLibrary { path })
}

fn create_library_archive(classes_dir: &Path, archive_path: &Path) -> Result<(), ArchiveError> {
    let file = File::create(archive_path).map_err(|source| ArchiveError::io(archive_path, source))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for entry in WalkDir::new(classes_dir) {
        let entry = entry
            .map_err(|source| ArchiveError::io(classes_dir, std::io::Error::from(source)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(COMPILED_UNIT_EXTENSION) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let bytes = fs::read(path).map_err(|source| ArchiveError::io(path, source))?;
        writer
            .start_file(name, options)
            .map_err(|source| ArchiveError::zip(archive_path, source))?;
        writer
            .write_all(&bytes)
            .map_err(|source| ArchiveError::io(archive_path, source))?;
    }

    writer
        .finish()
        .map_err(|source| ArchiveError::zip(archive_path, source))?;
    Ok(())
}
