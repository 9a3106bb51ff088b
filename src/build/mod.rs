//! The artifact build pipeline.
//!
//! A linear, non-branching chain: fetch the model's generated source and
//! runtime library, compile, package the classes into a library archive, and
//! merge that with the base runtime into the deployable bundle. Each step
//! consumes the previous step's typed output; the first failure aborts the
//! chain and no step is retried.

pub mod bundle;
pub mod compile;
pub mod fetch;
pub mod package;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::compiler::SourceCompiler;
use crate::http::{DownloadError, HttpGateway, ServerCredentials};
use crate::workdir::WorkingArea;

pub use bundle::BUNDLE_FILE_NAME;
pub use compile::CompiledClasses;
pub use fetch::FetchedResources;
pub use package::PackagedLibrary;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("model name {name:?} is not a valid workload name")]
    InvalidModelName { name: String },

    #[error("unable to prepare working directory {path}: {source}")]
    Workspace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("model compilation failed: {diagnostics}")]
    Compilation { diagnostics: String },

    #[error("error while packaging model classes from {dir}: {source}")]
    Packaging {
        dir: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("error while assembling deployable bundle: {source}")]
    Bundling {
        #[source]
        source: ArchiveError,
    },
}

/// Runs the four build steps in order against one working area.
pub struct BuildPipeline<'a> {
    pub gateway: &'a dyn HttpGateway,
    pub compiler: &'a dyn SourceCompiler,
    pub base_bundle: &'a Path,
}

impl BuildPipeline<'_> {
    pub fn run(
        &self,
        credentials: &ServerCredentials,
        model_name: &str,
        area: &WorkingArea,
    ) -> Result<PathBuf, BuildError> {
        let fetched =
            fetch::fetch_model_resources(self.gateway, credentials, model_name, area.resources_dir())?;
        let classes = compile::compile_model(self.compiler, &fetched, area.classes_dir())?;
        let library = package::package_classes(&classes, area.lib_dir())?;
        bundle::assemble_bundle(&library, self.base_bundle, area.bundle_dir())
    }
}
