//! HTTP plumbing shared by the build and publication pipelines.
//!
//! All outbound traffic (model host, cloud platform, marketplace broker) goes
//! through the [`gateway::HttpGateway`] seam so that pipeline logic can be
//! exercised against recorded responses instead of live servers.

pub mod credentials;
pub mod gateway;
pub mod json;
pub mod transfer;

pub use credentials::ServerCredentials;
pub use gateway::{
    GatewayError, HttpGateway, HttpMethod, HttpRequest, HttpResponse, MultipartPayload,
    ReqwestGateway, RequestBody,
};
pub use transfer::{DownloadError, ResourceFetcher};
