//! Authenticated raw-byte downloads from the model host.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::credentials::ServerCredentials;
use super::gateway::{GatewayError, HttpGateway, HttpRequest};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("unable to download {url}: login to {host} as {username} failed")]
    Unauthorized {
        url: String,
        host: String,
        username: String,
    },

    #[error("unable to download {url}: resource not found on the model host")]
    NotFound { url: String },

    #[error("unable to download {url}: server responded with status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("unable to download {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: GatewayError,
    },

    #[error("unable to write downloaded resource to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Downloads resources from a basic-auth protected server, one blocking GET
/// per resource.
pub struct ResourceFetcher<'a> {
    gateway: &'a dyn HttpGateway,
    credentials: &'a ServerCredentials,
}

impl<'a> ResourceFetcher<'a> {
    pub fn new(gateway: &'a dyn HttpGateway, credentials: &'a ServerCredentials) -> Self {
        Self {
            gateway,
            credentials,
        }
    }

    /// Fetches `resource_path` and writes the raw bytes to `destination`,
    /// returning the destination path on success.
    pub fn download(
        &self,
        resource_path: &str,
        destination: &Path,
    ) -> Result<PathBuf, DownloadError> {
        let url = self.credentials.resource_url(resource_path);
        info!("Downloading {}", url);

        let request = HttpRequest::get(&url)
            .with_basic_auth(&self.credentials.username, &self.credentials.password);
        let response = self
            .gateway
            .execute(request)
            .map_err(|source| DownloadError::Transport {
                url: url.clone(),
                source,
            })?;

        match response.status {
            status if (200..300).contains(&status) => {
                fs::write(destination, &response.body).map_err(|source| DownloadError::Write {
                    path: destination.to_path_buf(),
                    source,
                })?;
                Ok(destination.to_path_buf())
            }
            401 => Err(DownloadError::Unauthorized {
                url,
                host: self.credentials.host.clone(),
                username: self.credentials.username.clone(),
            }),
            404 => Err(DownloadError::NotFound { url }),
            status => Err(DownloadError::UnexpectedStatus { url, status }),
        }
    }
}
