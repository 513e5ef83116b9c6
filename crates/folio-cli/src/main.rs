//! Folio CLI
//!
//! Command-line interface for the folio portfolio backend.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::Level;

mod commands;
mod config;

use commands::{run_server, ServeOptions};
use config::AppConfig;
use folio_observability::{init_logging_with_config, LoggingConfig};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Portfolio backend: contact relay and safe content rendering", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Disable Swagger UI
        #[arg(long)]
        no_swagger: bool,
    },

    /// Validate configuration and print it with secrets redacted
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => {
            let default_path = PathBuf::from("folio.yaml");
            if default_path.exists() {
                AppConfig::load(&default_path)?
            } else {
                AppConfig::default()
            }
        }
    };
    config.apply_env_overrides();

    init_logging_with_config(logging_config(&config, cli.verbose));

    match cli.command {
        Commands::Serve {
            port,
            host,
            no_swagger,
        } => {
            let opts = ServeOptions {
                host: host.unwrap_or_else(|| config.server.host.clone()),
                port: port.unwrap_or(config.server.port),
                enable_swagger: !no_swagger,
            };
            run_server(&config, opts).await
        }
        Commands::CheckConfig => {
            let redacted = config.redact_secrets();
            println!("{}", "Configuration OK".green().bold());
            println!("{}", serde_yaml::to_string(&redacted)?);
            if config.smtp2go.api_key.is_empty() {
                println!(
                    "{}",
                    "warning: no delivery API key set (SMTP2GO_API_KEY)".yellow()
                );
            }
            if config.content.space_id.is_empty() || config.content.access_token.is_empty() {
                println!(
                    "{}",
                    "warning: content store not configured (SPACE_ID / ACCESS_TOKEN)".yellow()
                );
            }
            Ok(())
        }
    }
}

fn logging_config(config: &AppConfig, verbose: bool) -> LoggingConfig {
    let mut logging = if config.logging.json_format {
        LoggingConfig::production()
    } else {
        LoggingConfig::default()
    };

    logging.level = if verbose {
        Level::DEBUG
    } else {
        match config.logging.level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    };

    logging
}
