//! modelpress - turns trained analytical models into deployable scoring
//! services and publishes them through a platform marketplace.
//!
//! Two chained pipelines share one artifact-assembly primitive:
//!
//! - **Build pipeline**: fetch the model's generated source and runtime
//!   library from the model host, compile, package the classes into a model
//!   library, and merge it with the base runtime into a deployable bundle.
//! - **Publication pipeline**: create a workload record on the cloud
//!   platform, bind a route (reusing an existing one when present), upload
//!   the bundle bits, register a marketplace catalog entry and grant the
//!   requesting organization visibility into its plan.
//!
//! The [`publisher::Publisher`] orchestrator sequences existence check →
//! build → publication and surfaces the first failure; no step retries, and
//! partial publication failures are not compensated.
//!
//! # Example Usage
//!
//! ```ignore
//! use modelpress::{ModelpressConfig, Publisher, PublishRequest, ServerCredentials};
//!
//! fn publish_iris() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ModelpressConfig::from_env()?;
//!     config.validate()?;
//!
//!     let publisher = Publisher::new(&config);
//!     let bundle = publisher.publish(&PublishRequest {
//!         model_name: "iris-model".to_string(),
//!         source_host: ServerCredentials::new("https://models.example", "user", "pass"),
//!         org_guid: "org-guid".to_string(),
//!     })?;
//!
//!     println!("published bundle {}", bundle.display());
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`http`]: gateway seam, credentials, JSON scraping, resource downloads
//! - [`workdir`]: idempotently reset per-model working directories
//! - [`archive`]: bundle assembly
//! - [`compiler`]: the external source-compiler collaborator
//! - [`build`]: the four build-pipeline steps
//! - [`platform`]: the publication-pipeline steps
//! - [`publisher`]: the orchestrator

pub mod archive;
pub mod build;
pub mod compiler;
pub mod config;
pub mod http;
pub mod platform;
pub mod publisher;
pub mod workdir;

// Re-export key types for convenient access
pub use build::BuildError;
pub use compiler::{JavacCompiler, SourceCompiler};
pub use config::{ConfigError, ModelpressConfig};
pub use http::{HttpGateway, ReqwestGateway, ServerCredentials};
pub use platform::PublicationError;
pub use publisher::{PublishError, PublishRequest, Publisher};
pub use workdir::{WorkingArea, WorkingAreaManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
