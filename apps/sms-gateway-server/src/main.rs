use anyhow::Result;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use sms_dispatch::config::SmsDispatchConfig;
use sms_dispatch::SmsDispatch;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

mod http;
mod request_id;
mod shutdown;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MODULE_NAME: &str = "sms_dispatch";

/// SMS Gateway Server - validated, blocklist-aware message dispatch with audit events
#[derive(Parser)]
#[command(name = "sms-gateway-server")]
#[command(about = "SMS Gateway Server - message dispatch with blocklist and audit log")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use in-memory blocklist and event log
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // home_dir is normalized while loading
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("SMS Gateway Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config),
    }
}

fn module_config(config: &AppConfig, args: &CliArgs) -> Result<SmsDispatchConfig> {
    let cfg: SmsDispatchConfig = config.module_config(MODULE_NAME)?;
    Ok(if args.mock {
        cfg.with_mock_backends()
    } else {
        cfg
    })
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");

    let module = SmsDispatch::from_config(module_config(&config, &args)?).await?;
    module.warm_up().await;

    let router = http::build_router(&config.server, &module)?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = shutdown::wait_for_shutdown().await {
                tracing::warn!("signal handler failed: {e}, shutting down");
            }
            cancel.cancel();
        });
    }

    let served = http::serve(&config.server, router, cancel).await;

    // drain send tails and publish observers even when the listener failed
    module.shutdown().await;
    tracing::info!("SMS Gateway Server stopped");
    served
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let module = module_config(&config, &CliArgs::default())?;
    tracing::debug!(?module, "sms_dispatch configuration");

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}
