//! Marketplace broker catalog registration.

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::http::{HttpGateway, HttpRequest, ServerCredentials};

use super::endpoints::BROKER_CATALOG_PATH;
use super::PublicationError;

const ACTION: &str = "registering the marketplace offering";

/// Registers the workload as a new catalog entry on the broker.
///
/// Plan and service identifiers are freshly generated for every registration;
/// registering the same name twice creates a logically distinct offering each
/// time.
pub fn register_offering(
    gateway: &dyn HttpGateway,
    broker: &ServerCredentials,
    app_guid: &str,
    name: &str,
    description: &str,
) -> Result<(), PublicationError> {
    info!("Registering service {} in the marketplace broker", name);

    let body = catalog_request_body(app_guid, name, description).to_string();
    let url = broker.resource_url(BROKER_CATALOG_PATH);
    let request = HttpRequest::post(url)
        .json_body(body)
        .with_basic_auth(&broker.username, &broker.password);

    let response = gateway
        .execute(request)
        .map_err(|source| PublicationError::Transport {
            action: ACTION,
            source,
        })?;
    if !response.is_success() {
        return Err(PublicationError::UnexpectedStatus {
            action: ACTION,
            status: response.status,
        });
    }
    Ok(())
}

fn catalog_request_body(app_guid: &str, name: &str, description: &str) -> serde_json::Value {
    let plan_id = Uuid::new_v4().to_string();
    let service_id = Uuid::new_v4().to_string();

    json!({
        "app": {
            "metadata": {
                "guid": app_guid,
            },
        },
        "id": service_id,
        "plans": [{"id": plan_id}],
        "description": description,
        "name": name,
    })
}
