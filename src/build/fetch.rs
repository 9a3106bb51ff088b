//! Downloads the model's build inputs from the model host.

use std::path::{Path, PathBuf};

use crate::http::{HttpGateway, ResourceFetcher, ServerCredentials};

use super::BuildError;

/// Path prefix the model host serves generated sources under.
pub const MODEL_SOURCE_PATH_PREFIX: &str = "/3/Models.java/";

/// Fixed path of the runtime library every model compiles against.
pub const RUNTIME_LIB_PATH: &str = "/3/h2o-genmodel.jar";

/// Local file name for the downloaded runtime library.
pub const RUNTIME_LIB_FILE_NAME: &str = "genmodel.jar";

/// Output of the fetch step: the two files every later step builds on.
#[derive(Debug, Clone)]
pub struct FetchedResources {
    pub source: PathBuf,
    pub runtime_lib: PathBuf,
}

/// Downloads the generated source and the runtime library into `target_dir`.
pub fn fetch_model_resources(
    gateway: &dyn HttpGateway,
    credentials: &ServerCredentials,
    model_name: &str,
    target_dir: &Path,
) -> Result<FetchedResources, BuildError> {
    let fetcher = ResourceFetcher::new(gateway, credentials);

    let source_destination = target_dir.join(model_source_file_name(model_name));
    let lib_destination = target_dir.join(RUNTIME_LIB_FILE_NAME);

    let source = fetcher.download(
        &format!("{MODEL_SOURCE_PATH_PREFIX}{model_name}"),
        &source_destination,
    )?;
    let runtime_lib = fetcher.download(RUNTIME_LIB_PATH, &lib_destination)?;

    Ok(FetchedResources {
        source,
        runtime_lib,
    })
}

/// The source file name must match the type it declares, and the model host
/// generates type names with dashes replaced by underscores.
fn model_source_file_name(model_name: &str) -> String {
    format!("{}.java", model_name.replace('-', "_"))
}
