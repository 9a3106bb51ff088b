//! Produces the final deployable bundle.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::archive;

use super::package::PackagedLibrary;
use super::BuildError;

/// Deterministic file name of the final bundle inside the working area.
pub const BUNDLE_FILE_NAME: &str = "scoring-engine.jar";

/// Merges the base runtime bundle with the packaged model library.
pub fn assemble_bundle(
    library: &PackagedLibrary,
    base_bundle: &Path,
    target_dir: &Path,
) -> Result<PathBuf, BuildError> {
    let bundle_path = target_dir.join(BUNDLE_FILE_NAME);
    info!(
        "Creating scoring engine bundle for model library: {}",
        library.path.display()
    );

    archive::assemble(base_bundle, &library.path, &bundle_path)
        .map_err(|source| BuildError::Bundling { source })?;

    info!("Generated bundle: {}", bundle_path.display());
    Ok(bundle_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveError;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    #[test]
    fn bundle_lands_under_the_deterministic_name() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("base.jar");
        let mut writer = ZipWriter::new(File::create(&base).unwrap());
        writer
            .start_file("META-INF/MANIFEST.MF", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"Manifest-Version: 1.0\n").unwrap();
        writer.finish().unwrap();

        let library_path = temp.path().join("model.jar");
        fs::write(&library_path, b"lib").unwrap();
        let library = PackagedLibrary { path: library_path };

        let bundle = assemble_bundle(&library, &base, temp.path()).unwrap();
        assert_eq!(bundle, temp.path().join("scoring-engine.jar"));
        assert!(bundle.exists());
    }

    #[test]
    fn missing_base_bundle_is_a_bundling_failure() {
        let temp = TempDir::new().unwrap();
        let library_path = temp.path().join("model.jar");
        fs::write(&library_path, b"lib").unwrap();
        let library = PackagedLibrary { path: library_path };

        let err =
            assemble_bundle(&library, &temp.path().join("absent.jar"), temp.path()).unwrap_err();
        match err {
            BuildError::Bundling {
                source: ArchiveError::BaseNotFound { path },
            } => assert_eq!(path, temp.path().join("absent.jar")),
            other => panic!("expected Bundling/BaseNotFound, got {other}"),
        }
    }
}
