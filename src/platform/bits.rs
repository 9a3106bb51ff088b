//! Bundle bits upload.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::http::{HttpRequest, MultipartPayload};

use super::endpoints;
use super::{PlatformClient, PublicationError};

const ACTION: &str = "uploading the workload bits";

/// The platform accepts a manifest of resources it already has cached; we
/// always send everything, so the manifest is empty.
pub const CACHED_RESOURCES_MANIFEST: &str = "[]";

/// Uploads the bundle's raw bytes to the workload's bits endpoint as a
/// multipart payload.
pub fn upload_bundle(
    client: &PlatformClient,
    app_guid: &str,
    bundle: &Path,
) -> Result<(), PublicationError> {
    info!(
        "Uploading bits for workload {} from {}",
        app_guid,
        bundle.display()
    );

    let bytes = fs::read(bundle).map_err(|source| PublicationError::BundleRead {
        path: bundle.to_path_buf(),
        source,
    })?;
    let file_name = bundle
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bundle.jar".to_string());

    let payload = MultipartPayload {
        resources: CACHED_RESOURCES_MANIFEST.to_string(),
        file_name,
        bytes,
    };

    let url = endpoints::app_bits(client.api_url(), app_guid);
    client.request(ACTION, HttpRequest::put(url).multipart(payload))?;
    Ok(())
}
