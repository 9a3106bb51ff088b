//! Name-collision precondition check.

use tracing::debug;

use crate::http::json;
use crate::http::HttpRequest;

use super::endpoints::{self, TOTAL_RESULTS_POINTER};
use super::{PlatformClient, PublicationError};

const ACTION: &str = "checking whether the workload already exists";

/// Counts workloads with the given name in the target space. Any non-zero
/// count means the name is taken; duplicate-name workloads are never allowed,
/// so the caller aborts before any build work starts.
pub fn workload_exists(
    client: &PlatformClient,
    space_guid: &str,
    name: &str,
) -> Result<bool, PublicationError> {
    let url = endpoints::apps_in_space(client.api_url(), space_guid, name);
    let body = client.request_json(ACTION, HttpRequest::get(url))?;

    let total = json::u64_at(&body, TOTAL_RESULTS_POINTER)
        .map_err(|source| PublicationError::MalformedResponse {
            action: ACTION,
            source,
        })?;
    debug!("Number of found workloads: {}", total);
    Ok(total != 0)
}
