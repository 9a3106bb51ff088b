//! Service plan visibility grants.

use serde_json::json;
use tracing::info;

use crate::http::json as json_path;
use crate::http::HttpRequest;

use super::endpoints::{self, FIRST_RESOURCE_GUID_POINTER};
use super::{PlatformClient, PublicationError};

const ACTION: &str = "granting plan visibility";

/// Grants the organization visibility into the freshly registered service's
/// first plan.
///
/// The service and plan identifiers are resolved by name on the platform. No
/// existence check precedes the grant; publishing the same name again creates
/// a separate grant.
pub fn grant_plan_visibility(
    client: &PlatformClient,
    org_guid: &str,
    service_name: &str,
) -> Result<(), PublicationError> {
    let service_guid = service_guid_by_name(client, service_name)?;
    let plan_guid = first_plan_guid(client, &service_guid)?;

    info!(
        "Granting organization {} visibility into plan {}",
        org_guid, plan_guid
    );

    let body = json!({
        "service_plan_guid": plan_guid,
        "organization_guid": org_guid,
    })
    .to_string();

    client.request(
        ACTION,
        HttpRequest::post(endpoints::service_plan_visibilities(client.api_url())).json_body(body),
    )?;
    Ok(())
}

fn service_guid_by_name(
    client: &PlatformClient,
    service_name: &str,
) -> Result<String, PublicationError> {
    let url = endpoints::services_by_label(client.api_url(), service_name);
    let body = client.request_json(ACTION, HttpRequest::get(url))?;
    scrape_first_guid(&body)
}

fn first_plan_guid(
    client: &PlatformClient,
    service_guid: &str,
) -> Result<String, PublicationError> {
    let url = endpoints::service_plans_by_service(client.api_url(), service_guid);
    let body = client.request_json(ACTION, HttpRequest::get(url))?;
    scrape_first_guid(&body)
}

fn scrape_first_guid(body: &serde_json::Value) -> Result<String, PublicationError> {
    json_path::string_at(body, FIRST_RESOURCE_GUID_POINTER).map_err(|source| {
        PublicationError::MalformedResponse {
            action: ACTION,
            source,
        }
    })
}
