//! Route lookup, creation and binding.

use serde_json::json;
use tracing::info;

use crate::http::json as json_path;
use crate::http::HttpRequest;

use super::endpoints::{
    self, FIRST_RESOURCE_GUID_POINTER, METADATA_GUID_POINTER, TOTAL_RESULTS_POINTER,
};
use super::{PlatformClient, PublicationError};

const ACTION: &str = "binding a route to the workload";

/// Resolves a route for `subdomain` on the first available shared domain and
/// binds it to the workload, returning the route identifier.
///
/// Existing routes are reused: at most one route is ever created per
/// (subdomain, domain) pair, and when several already match, the first one
/// the platform returns wins.
pub fn bind_route(
    client: &PlatformClient,
    space_guid: &str,
    subdomain: &str,
    app_guid: &str,
) -> Result<String, PublicationError> {
    info!("Assigning route to workload...");

    let domain_guid = first_shared_domain(client)?;

    let routes_url =
        endpoints::routes_by_host_and_domain(client.api_url(), subdomain, &domain_guid);
    let routes = client.request_json(ACTION, HttpRequest::get(routes_url))?;
    let existing = scrape_u64(&routes, TOTAL_RESULTS_POINTER)?;

    let route_guid = if existing > 0 {
        info!("Reusing existing route for {} subdomain", subdomain);
        scrape_string(&routes, FIRST_RESOURCE_GUID_POINTER)?
    } else {
        info!("No route exists. Creating new one.");
        create_route(client, subdomain, &domain_guid, space_guid)?
    };

    info!("Binding route {} to workload {}", route_guid, app_guid);
    let binding_url = endpoints::app_route_binding(client.api_url(), app_guid, &route_guid);
    client.request(ACTION, HttpRequest::put(binding_url))?;

    Ok(route_guid)
}

fn first_shared_domain(client: &PlatformClient) -> Result<String, PublicationError> {
    let url = endpoints::shared_domains(client.api_url());
    let body = client.request_json(ACTION, HttpRequest::get(url))?;
    scrape_string(&body, FIRST_RESOURCE_GUID_POINTER)
}

fn create_route(
    client: &PlatformClient,
    subdomain: &str,
    domain_guid: &str,
    space_guid: &str,
) -> Result<String, PublicationError> {
    let body = json!({
        "host": subdomain,
        "domain_guid": domain_guid,
        "space_guid": space_guid,
    })
    .to_string();

    let response = client.request_json(
        ACTION,
        HttpRequest::post(endpoints::routes(client.api_url())).json_body(body),
    )?;
    scrape_string(&response, METADATA_GUID_POINTER)
}

fn scrape_string(
    body: &serde_json::Value,
    pointer: &'static str,
) -> Result<String, PublicationError> {
    json_path::string_at(body, pointer).map_err(|source| PublicationError::MalformedResponse {
        action: ACTION,
        source,
    })
}

fn scrape_u64(body: &serde_json::Value, pointer: &'static str) -> Result<u64, PublicationError> {
    json_path::u64_at(body, pointer).map_err(|source| PublicationError::MalformedResponse {
        action: ACTION,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::gateway::testing::StubGateway;
    use crate::http::HttpMethod;

    #[test]
    fn creates_a_route_when_none_exists() {
        let gateway = StubGateway::new()
            .respond(200, br#"{"resources": [{"metadata": {"guid": "domain-1"}}]}"#)
            .respond(200, br#"{"total_results": 0, "resources": []}"#)
            .respond(201, br#"{"metadata": {"guid": "route-new"}}"#)
            .respond(201, b"{}");
        let client = PlatformClient::new(&gateway, "http://api.test", "token");

        let route = bind_route(&client, "space-1", "iris-model", "app-1").unwrap();
        assert_eq!(route, "route-new");

        let recorded = gateway.recorded();
        assert_eq!(recorded.len(), 4);

        // Exactly one creation call, then the binding.
        let creations: Vec<_> = recorded
            .iter()
            .filter(|r| r.method == HttpMethod::Post && r.url == "http://api.test/v2/routes")
            .collect();
        assert_eq!(creations.len(), 1);
        assert_eq!(recorded[3].method, HttpMethod::Put);
        assert_eq!(
            recorded[3].url,
            "http://api.test/v2/apps/app-1/routes/route-new"
        );
    }

    #[test]
    fn reuses_the_first_existing_route_without_creating() {
        let gateway = StubGateway::new()
            .respond(200, br#"{"resources": [{"metadata": {"guid": "domain-1"}}]}"#)
            .respond(
                200,
                br#"{"total_results": 2, "resources": [{"metadata": {"guid": "route-a"}}, {"metadata": {"guid": "route-b"}}]}"#,
            )
            .respond(201, b"{}");
        let client = PlatformClient::new(&gateway, "http://api.test", "token");

        let route = bind_route(&client, "space-1", "iris-model", "app-1").unwrap();
        assert_eq!(route, "route-a");

        let recorded = gateway.recorded();
        assert_eq!(recorded.len(), 3);
        assert!(recorded
            .iter()
            .all(|r| !(r.method == HttpMethod::Post && r.url == "http://api.test/v2/routes")));
        assert_eq!(
            recorded[2].url,
            "http://api.test/v2/apps/app-1/routes/route-a"
        );
    }

    #[test]
    fn route_query_filters_on_subdomain_and_domain() {
        let gateway = StubGateway::new()
            .respond(200, br#"{"resources": [{"metadata": {"guid": "domain-1"}}]}"#)
            .respond(200, br#"{"total_results": 1, "resources": [{"metadata": {"guid": "r"}}]}"#)
            .respond(201, b"{}");
        let client = PlatformClient::new(&gateway, "http://api.test", "token");

        bind_route(&client, "space-1", "iris-model", "app-1").unwrap();

        let recorded = gateway.recorded();
        assert_eq!(
            recorded[1].url,
            "http://api.test/v2/routes?q=host:iris-model;domain_guid:domain-1"
        );
    }

    #[test]
    fn a_domainless_platform_is_a_hard_failure() {
        let gateway = StubGateway::new().respond(200, br#"{"resources": []}"#);
        let client = PlatformClient::new(&gateway, "http://api.test", "token");

        let err = bind_route(&client, "space-1", "iris-model", "app-1").unwrap_err();
        assert!(matches!(err, PublicationError::MalformedResponse { .. }));
    }
}
