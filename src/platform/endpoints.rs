//! Platform endpoint URLs and the JSON-pointer paths their responses are
//! scraped at.

/// Pointer to a query's total result count.
pub const TOTAL_RESULTS_POINTER: &str = "/total_results";

/// Pointer to the identifier of the first resource in a query result.
pub const FIRST_RESOURCE_GUID_POINTER: &str = "/resources/0/metadata/guid";

/// Pointer to the identifier of a single created resource.
pub const METADATA_GUID_POINTER: &str = "/metadata/guid";

/// Catalog registration path on the marketplace broker.
pub const BROKER_CATALOG_PATH: &str = "/v2/catalog";

pub fn apps_in_space(api_url: &str, space_guid: &str, app_name: &str) -> String {
    format!("{api_url}/v2/spaces/{space_guid}/apps?q=name:{app_name}")
}

pub fn apps(api_url: &str) -> String {
    format!("{api_url}/v2/apps")
}

pub fn shared_domains(api_url: &str) -> String {
    format!("{api_url}/v2/shared_domains")
}

pub fn routes(api_url: &str) -> String {
    format!("{api_url}/v2/routes")
}

pub fn routes_by_host_and_domain(api_url: &str, host: &str, domain_guid: &str) -> String {
    format!("{api_url}/v2/routes?q=host:{host};domain_guid:{domain_guid}")
}

pub fn app_route_binding(api_url: &str, app_guid: &str, route_guid: &str) -> String {
    format!("{api_url}/v2/apps/{app_guid}/routes/{route_guid}")
}

pub fn app_bits(api_url: &str, app_guid: &str) -> String {
    format!("{api_url}/v2/apps/{app_guid}/bits")
}

pub fn services_by_label(api_url: &str, label: &str) -> String {
    format!("{api_url}/v2/services?q=label:{label}")
}

pub fn service_plans_by_service(api_url: &str, service_guid: &str) -> String {
    format!("{api_url}/v2/service_plans?q=service_guid:{service_guid}")
}

pub fn service_plan_visibilities(api_url: &str) -> String {
    format!("{api_url}/v2/service_plan_visibilities")
}
