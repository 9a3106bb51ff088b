use std::env;
use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use modelpress::{ModelpressConfig, PublishRequest, Publisher, ServerCredentials, VERSION};

#[derive(Parser, Debug)]
#[command(name = "modelpress", version, about = "Builds and publishes model scoring engines")]
struct CliArgs {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Log errors only
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a model's scoring engine and publish it as a marketplace offering
    Publish(PublishArgs),
    /// Build a model's scoring engine bundle and print its path
    Build(BuildArgs),
}

#[derive(Args, Debug)]
struct PublishArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Organization granted visibility into the published plan
    #[arg(long)]
    org_guid: String,
}

#[derive(Args, Debug)]
struct BuildArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Name of the model on the model host
    #[arg(long)]
    model_name: String,

    /// Base URL of the model host
    #[arg(long)]
    source_host: String,

    /// Model host user
    #[arg(long)]
    source_username: String,

    /// Model host password
    #[arg(long)]
    source_password: String,
}

impl SourceArgs {
    fn credentials(&self) -> ServerCredentials {
        ServerCredentials::new(&self.source_host, &self.source_username, &self.source_password)
    }
}

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("modelpress v{} starting", VERSION);

    let exit_code = match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {e:#}");
            1
        }
    };

    process::exit(exit_code);
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    let config = ModelpressConfig::from_env().context("loading configuration")?;
    config.validate().context("validating configuration")?;
    let publisher = Publisher::new(&config);

    match &args.command {
        Commands::Publish(publish_args) => {
            let request = PublishRequest {
                model_name: publish_args.source.model_name.clone(),
                source_host: publish_args.source.credentials(),
                org_guid: publish_args.org_guid.clone(),
            };
            let bundle = publisher.publish(&request)?;
            println!("{}", bundle.display());
        }
        Commands::Build(build_args) => {
            let bundle = publisher
                .build_bundle(&build_args.source.credentials(), &build_args.source.model_name)?;
            println!("{}", bundle.display());
        }
    }
    Ok(())
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("MODELPRESS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    let mut filter = EnvFilter::from_default_env();

    if env::var("RUST_LOG").is_err() {
        filter = filter
            .add_directive(format!("modelpress={}", level).parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}
