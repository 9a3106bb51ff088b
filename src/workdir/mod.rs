//! Per-build working directories.
//!
//! Every build gets an isolated directory tree keyed by model name. Preparing
//! the tree is idempotent: whatever a previous build of the same name left
//! behind is deleted before the empty tree is recreated. Two concurrent
//! builds of the *same* name are not serialized here; callers that need that
//! guarantee must gate the whole orchestrated call.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

const RESOURCES_SUBDIR: &str = "resources";
const CLASSES_SUBDIR: &str = "classes";
const LIB_SUBDIR: &str = "lib";
const BUNDLE_SUBDIR: &str = "bundle";

/// The four path handles a build threads through its steps, all rooted under
/// one per-model directory.
#[derive(Debug, Clone)]
pub struct WorkingArea {
    root: PathBuf,
    resources: PathBuf,
    classes: PathBuf,
    lib: PathBuf,
    bundle: PathBuf,
}

impl WorkingArea {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Raw downloads from the model host land here.
    pub fn resources_dir(&self) -> &Path {
        &self.resources
    }

    /// Compiled output of the model source.
    pub fn classes_dir(&self) -> &Path {
        &self.classes
    }

    /// The packaged model library archive.
    pub fn lib_dir(&self) -> &Path {
        &self.lib
    }

    /// The final deployable bundle.
    pub fn bundle_dir(&self) -> &Path {
        &self.bundle
    }
}

/// Creates and resets per-model working areas under a fixed root.
#[derive(Debug, Clone)]
pub struct WorkingAreaManager {
    root: PathBuf,
}

impl WorkingAreaManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a given model's area lives in, whether or not it exists yet.
    pub fn area_root(&self, model_name: &str) -> PathBuf {
        self.root.join(model_name)
    }

    /// Returns a working area whose subdirectories exist and are empty,
    /// regardless of prior state. Pre-existing contents are deleted first,
    /// each deletion logged.
    pub fn prepare(&self, model_name: &str) -> io::Result<WorkingArea> {
        let root = self.area_root(model_name);

        if root.exists() {
            info!("Working directory {} exists. Deleting all files...", root.display());
            clear_directory(&root)?;
        }
        fs::create_dir_all(&root)?;

        let area = WorkingArea {
            resources: root.join(RESOURCES_SUBDIR),
            classes: root.join(CLASSES_SUBDIR),
            lib: root.join(LIB_SUBDIR),
            bundle: root.join(BUNDLE_SUBDIR),
            root,
        };
        fs::create_dir(&area.resources)?;
        fs::create_dir(&area.classes)?;
        fs::create_dir(&area.lib)?;
        fs::create_dir(&area.bundle)?;

        Ok(area)
    }
}

/// Deletes everything under `dir`, children before parents, keeping `dir`
/// itself.
fn clear_directory(dir: &Path) -> io::Result<()> {
    for entry in WalkDir::new(dir).min_depth(1).contents_first(true) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() {
            info!("Deleting directory: {}", entry.path().display());
            fs::remove_dir(entry.path())?;
        } else {
            debug!("Deleting file: {}", entry.path().display());
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn subdirectories(root: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn prepare_creates_the_four_empty_subdirectories() {
        let temp = TempDir::new().unwrap();
        let manager = WorkingAreaManager::new(temp.path());

        let area = manager.prepare("iris-model").unwrap();

        for dir in [
            area.resources_dir(),
            area.classes_dir(),
            area.lib_dir(),
            area.bundle_dir(),
        ] {
            assert!(dir.is_dir(), "{} should exist", dir.display());
            assert_eq!(fs::read_dir(dir).unwrap().count(), 0);
        }
        assert_eq!(area.root(), temp.path().join("iris-model"));
    }

    #[test]
    fn prepare_is_idempotent_and_removes_stale_files() {
        let temp = TempDir::new().unwrap();
        let manager = WorkingAreaManager::new(temp.path());

        let first = manager.prepare("iris-model").unwrap();
        fs::write(first.resources_dir().join("stale.java"), b"old").unwrap();
        fs::create_dir(first.classes_dir().join("nested")).unwrap();
        fs::write(first.classes_dir().join("nested/Stale.class"), b"old").unwrap();
        let structure_before = subdirectories(first.root());

        let second = manager.prepare("iris-model").unwrap();

        assert_eq!(subdirectories(second.root()), structure_before);
        assert_eq!(fs::read_dir(second.resources_dir()).unwrap().count(), 0);
        assert_eq!(fs::read_dir(second.classes_dir()).unwrap().count(), 0);
    }

    #[test]
    fn areas_are_partitioned_by_model_name() {
        let temp = TempDir::new().unwrap();
        let manager = WorkingAreaManager::new(temp.path());

        let first = manager.prepare("model-a").unwrap();
        fs::write(first.resources_dir().join("a.java"), b"a").unwrap();

        let _second = manager.prepare("model-b").unwrap();

        // Preparing a different name leaves the first area untouched.
        assert!(first.resources_dir().join("a.java").exists());
    }
}
