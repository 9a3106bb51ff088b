//! The publication pipeline: registering a built bundle as a running
//! workload on the cloud platform and advertising it in the marketplace.
//!
//! Steps run in a strict sequence and nothing is retried or compensated: a
//! failure part-way leaves earlier platform records in place (an accepted
//! operational cost) and the error names the action that failed.

pub mod bits;
pub mod broker;
pub mod endpoints;
pub mod existence;
pub mod record;
pub mod route;
pub mod visibility;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::http::json::{self, JsonPathError};
use crate::http::{GatewayError, HttpGateway, HttpRequest, HttpResponse};

pub use bits::upload_bundle;
pub use broker::register_offering;
pub use existence::workload_exists;
pub use record::create_workload_record;
pub use route::bind_route;
pub use visibility::grant_plan_visibility;

#[derive(Debug, Error)]
pub enum PublicationError {
    #[error("cannot publish workload {name}: a workload with that name already exists")]
    WorkloadExists { name: String },

    #[error("platform request failed while {action}: {source}")]
    Transport {
        action: &'static str,
        #[source]
        source: GatewayError,
    },

    #[error("platform rejected request while {action}: status {status}")]
    UnexpectedStatus { action: &'static str, status: u16 },

    #[error("unexpected platform response while {action}: {source}")]
    MalformedResponse {
        action: &'static str,
        #[source]
        source: JsonPathError,
    },

    #[error("unable to read bundle {path}: {source}")]
    BundleRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Thin handle over the platform API: base URL, bearer token and the gateway
/// every step sends its requests through.
pub struct PlatformClient<'a> {
    gateway: &'a dyn HttpGateway,
    api_url: &'a str,
    token: &'a str,
}

impl<'a> PlatformClient<'a> {
    pub fn new(gateway: &'a dyn HttpGateway, api_url: &'a str, token: &'a str) -> Self {
        Self {
            gateway,
            api_url,
            token,
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url
    }

    /// Executes one platform request with auth attached; a non-2xx status is
    /// a hard failure tagged with the in-flight action.
    pub(crate) fn request(
        &self,
        action: &'static str,
        request: HttpRequest,
    ) -> Result<HttpResponse, PublicationError> {
        let request = request.accept_json().with_bearer(self.token);
        let response = self
            .gateway
            .execute(request)
            .map_err(|source| PublicationError::Transport { action, source })?;
        if !response.is_success() {
            return Err(PublicationError::UnexpectedStatus {
                action,
                status: response.status,
            });
        }
        Ok(response)
    }

    /// As [`request`](Self::request), parsing the body as JSON.
    pub(crate) fn request_json(
        &self,
        action: &'static str,
        request: HttpRequest,
    ) -> Result<serde_json::Value, PublicationError> {
        let response = self.request(action, request)?;
        json::parse(&response.body)
            .map_err(|source| PublicationError::MalformedResponse { action, source })
    }
}
