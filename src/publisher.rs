//! The orchestrator: existence check, build pipeline, publication pipeline.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::build::{BuildError, BuildPipeline};
use crate::compiler::{JavacCompiler, SourceCompiler};
use crate::config::ModelpressConfig;
use crate::http::{HttpGateway, ReqwestGateway, ServerCredentials};
use crate::platform::{self, PlatformClient, PublicationError};
use crate::workdir::WorkingAreaManager;

/// Marketplace description attached to every published offering.
pub const OFFERING_DESCRIPTION: &str = "Scoring engine based on a trained analytical model";

/// One inbound publish request: which model, where its sources live, and
/// which organization gets to see the resulting plan.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PublishRequest {
    pub model_name: String,
    pub source_host: ServerCredentials,
    pub org_guid: String,
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Publication(#[from] PublicationError),
}

/// Sequences the whole flow. One instance serves many requests; requests for
/// different model names may run concurrently on separate threads, since the
/// filesystem namespace is partitioned by model name.
pub struct Publisher {
    gateway: Box<dyn HttpGateway>,
    compiler: Box<dyn SourceCompiler>,
    platform_api_url: String,
    platform_token: String,
    space_guid: String,
    broker: ServerCredentials,
    base_bundle: PathBuf,
    working_areas: WorkingAreaManager,
}

impl Publisher {
    /// Production wiring: blocking HTTP gateway and the JVM toolchain
    /// compiler.
    pub fn new(config: &ModelpressConfig) -> Self {
        Self::with_collaborators(
            config,
            Box::new(ReqwestGateway::new(Duration::from_secs(
                config.request_timeout_secs,
            ))),
            Box::new(JavacCompiler::default()),
        )
    }

    pub fn with_collaborators(
        config: &ModelpressConfig,
        gateway: Box<dyn HttpGateway>,
        compiler: Box<dyn SourceCompiler>,
    ) -> Self {
        Self {
            gateway,
            compiler,
            platform_api_url: config.platform_api_url.clone(),
            platform_token: config.platform_token.clone(),
            space_guid: config.space_guid.clone(),
            broker: ServerCredentials::new(
                &config.broker_url,
                &config.broker_username,
                &config.broker_password,
            ),
            base_bundle: config.base_bundle.clone(),
            working_areas: WorkingAreaManager::new(&config.working_dir),
        }
    }

    /// Publishes a model as a marketplace offering: name-collision check,
    /// then the build pipeline, then the publication pipeline. Returns the
    /// path of the built bundle.
    ///
    /// Failures are not compensated: platform records created before a later
    /// step failed remain on the platform.
    pub fn publish(&self, request: &PublishRequest) -> Result<PathBuf, PublishError> {
        validate_model_name(&request.model_name)?;

        let client = PlatformClient::new(
            self.gateway.as_ref(),
            &self.platform_api_url,
            &self.platform_token,
        );

        if platform::workload_exists(&client, &self.space_guid, &request.model_name)? {
            return Err(PublicationError::WorkloadExists {
                name: request.model_name.clone(),
            }
            .into());
        }

        let bundle = self.build_bundle(&request.source_host, &request.model_name)?;

        self.publish_to_marketplace(&client, &bundle, &request.model_name, &request.org_guid)?;

        info!("Published {} as a marketplace offering", request.model_name);
        Ok(bundle)
    }

    /// Runs only the build pipeline, returning the bundle path. This is the
    /// engine-download operation: callers hand the bundle out instead of
    /// publishing it.
    pub fn build_bundle(
        &self,
        credentials: &ServerCredentials,
        model_name: &str,
    ) -> Result<PathBuf, BuildError> {
        validate_model_name(model_name)?;

        let area = self
            .working_areas
            .prepare(model_name)
            .map_err(|source| BuildError::Workspace {
                path: self.working_areas.area_root(model_name),
                source,
            })?;

        let pipeline = BuildPipeline {
            gateway: self.gateway.as_ref(),
            compiler: self.compiler.as_ref(),
            base_bundle: &self.base_bundle,
        };
        pipeline.run(credentials, model_name, &area)
    }

    fn publish_to_marketplace(
        &self,
        client: &PlatformClient,
        bundle: &Path,
        name: &str,
        org_guid: &str,
    ) -> Result<(), PublicationError> {
        let app_guid = platform::create_workload_record(client, &self.space_guid, name)?;
        platform::bind_route(client, &self.space_guid, name, &app_guid)?;
        platform::upload_bundle(client, &app_guid, bundle)?;
        platform::register_offering(
            self.gateway.as_ref(),
            &self.broker,
            &app_guid,
            name,
            OFFERING_DESCRIPTION,
        )?;
        platform::grant_plan_visibility(client, org_guid, name)?;
        Ok(())
    }
}

/// Model names become directory names, URL path segments and route
/// subdomains, so only a conservative character set is accepted.
pub fn validate_model_name(name: &str) -> Result<(), BuildError> {
    let safe = !name.is_empty()
        && !name.chars().all(|c| c == '.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if safe {
        Ok(())
    } else {
        Err(BuildError::InvalidModelName {
            name: name.to_string(),
        })
    }
}
