//! Workload record creation.

use serde_json::json;
use tracing::info;

use crate::http::json as json_path;
use crate::http::HttpRequest;

use super::endpoints::{self, METADATA_GUID_POINTER};
use super::{PlatformClient, PublicationError};

const ACTION: &str = "creating the workload record";

/// Creates the platform record for the workload and returns its assigned
/// identifier.
pub fn create_workload_record(
    client: &PlatformClient,
    space_guid: &str,
    name: &str,
) -> Result<String, PublicationError> {
    info!("Creating workload record for {} in space {}", name, space_guid);

    let body = json!({
        "name": name,
        "space_guid": space_guid,
    })
    .to_string();

    let response = client.request_json(
        ACTION,
        HttpRequest::post(endpoints::apps(client.api_url())).json_body(body),
    )?;

    json_path::string_at(&response, METADATA_GUID_POINTER).map_err(|source| {
        PublicationError::MalformedResponse {
            action: ACTION,
            source,
        }
    })
}
