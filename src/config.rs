//! Configuration, loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `MODELPRESS_PLATFORM_API`: cloud platform API base URL - **required**
//! - `MODELPRESS_PLATFORM_TOKEN`: bearer token for platform calls - **required**
//! - `MODELPRESS_SPACE_GUID`: technical space workloads are created in - **required**
//! - `MODELPRESS_BROKER_URL`: marketplace broker base URL - **required**
//! - `MODELPRESS_BROKER_USERNAME` / `MODELPRESS_BROKER_PASSWORD`: broker basic auth - **required**
//! - `MODELPRESS_BASE_BUNDLE`: path to the base runtime bundle archive - **required**
//! - `MODELPRESS_WORK_DIR`: working-directory root - default: system temp dir + "modelpress"
//! - `MODELPRESS_REQUEST_TIMEOUT`: HTTP timeout in seconds - default: "30"
//! - `MODELPRESS_LOG_LEVEL`: logging level - default: "info"

use std::env;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_WORK_DIR_NAME: &str = "modelpress";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not set. Export it before running modelpress")]
    MissingVariable { name: &'static str },

    #[error("failed to parse {name}: {message}")]
    ParseError {
        name: &'static str,
        message: String,
    },

    #[error("base bundle {path} does not exist")]
    BaseBundleMissing { path: PathBuf },
}

/// Everything the publisher needs that is not part of an individual request.
#[derive(Debug, Clone)]
pub struct ModelpressConfig {
    pub platform_api_url: String,
    pub platform_token: String,
    pub space_guid: String,
    pub broker_url: String,
    pub broker_username: String,
    pub broker_password: String,
    pub base_bundle: PathBuf,
    pub working_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl ModelpressConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVariable { name })
        };

        let request_timeout_secs = match lookup("MODELPRESS_REQUEST_TIMEOUT") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::ParseError {
                name: "MODELPRESS_REQUEST_TIMEOUT",
                message: e.to_string(),
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let working_dir = lookup("MODELPRESS_WORK_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join(DEFAULT_WORK_DIR_NAME));

        Ok(Self {
            platform_api_url: required("MODELPRESS_PLATFORM_API")?,
            platform_token: required("MODELPRESS_PLATFORM_TOKEN")?,
            space_guid: required("MODELPRESS_SPACE_GUID")?,
            broker_url: required("MODELPRESS_BROKER_URL")?,
            broker_username: required("MODELPRESS_BROKER_USERNAME")?,
            broker_password: required("MODELPRESS_BROKER_PASSWORD")?,
            base_bundle: PathBuf::from(required("MODELPRESS_BASE_BUNDLE")?),
            working_dir,
            request_timeout_secs,
            log_level: lookup("MODELPRESS_LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    /// Checks the parts of the configuration that can be verified up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_bundle.exists() {
            return Err(ConfigError::BaseBundleMissing {
                path: self.base_bundle.clone(),
            });
        }
        Ok(())
    }
}
