use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pm_assistant::config::{AppConfig, DEFAULT_CONFIG_FILE};
use pm_assistant::llm_handler::LLMProviderImpl;
use pm_assistant::server::{run_server, AppState};

/// Project-management assistant backend
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Address to bind, overrides the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides the configuration file
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory for daily rolling log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

// Console logging always; file logging when a log directory is configured
fn init_tracing(log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_target(false);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "pm-assistant.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(filter).with(console).init();
            None
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
        }
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.log_dir.is_some() {
        config.log_dir = cli.log_dir;
    }

    let _guard = init_tracing(config.log_dir.as_ref());
    info!("Configuration loaded from {}", cli.config.display());

    let gateway = match LLMProviderImpl::from_config(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("Failed to build completion client: {}", e);
            return Err(std::io::Error::other(e));
        }
    };
    info!(
        "Using {} completion provider",
        gateway.provider_type().display_name()
    );

    run_server(AppState::new(config, Arc::new(gateway))).await
}
