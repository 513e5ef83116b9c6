//! The `serve` command: wires collaborators and runs the API server.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;
use folio_api::{ApiServer, ApiServerConfig, AppState};
use folio_connectors::{ContentClient, Mailer, Smtp2goMailer};

/// Options resolved from `serve` command-line flags.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub enable_swagger: bool,
}

/// Builds the application state and runs the server to completion.
pub async fn run_server(config: &AppConfig, opts: ServeOptions) -> Result<()> {
    let mailer: Option<Arc<dyn Mailer>> = if config.smtp2go.api_key.is_empty() {
        // The server still starts: submissions validate but fail with a
        // configuration error, and /health reports degraded.
        warn!("no delivery API key configured; contact submissions will be rejected");
        None
    } else {
        let mailer =
            Smtp2goMailer::new(&config.smtp2go.api_key).context("failed to create mailer")?;
        Some(Arc::new(mailer))
    };

    let content: Option<Arc<ContentClient>> =
        if config.content.space_id.is_empty() || config.content.access_token.is_empty() {
            warn!("content store not configured; project endpoints will be unavailable");
            None
        } else {
            let client = ContentClient::new(&config.content.space_id, &config.content.access_token)
                .context("failed to create content client")?;
            Some(Arc::new(client))
        };

    let state = AppState::new(mailer, content);

    let bind_address: SocketAddr = format!("{}:{}", opts.host, opts.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", opts.host, opts.port))?;

    let server_config = ApiServerConfig {
        bind_address,
        enable_swagger: opts.enable_swagger,
        ..Default::default()
    };

    info!(%bind_address, swagger = opts.enable_swagger, "starting folio server");

    ApiServer::new(state, server_config)
        .run()
        .await
        .context("server error")
}
