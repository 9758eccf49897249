// src/main.rs
// jira-mcp - Multi-tenant MCP server for Jira Cloud

use anyhow::Result;
use clap::{Parser, Subcommand};
use jira_mcp::{config::Settings, http::create_shared_client, mcp::JiraMcpServer, web};
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "jira-mcp")]
#[command(about = "Multi-tenant MCP server exposing the Jira REST and Agile APIs as tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default): streamable-HTTP MCP at /mcp, per-request tenant headers
    Http {
        /// Port to listen on
        #[arg(short, long, env = "JIRA_MCP_PORT")]
        port: Option<u16>,

        /// Host interface to bind
        #[arg(long, env = "JIRA_MCP_HOST")]
        host: Option<String>,
    },

    /// Run as a stdio MCP server (single tenant, credentials from JIRA_* env vars)
    Serve,
}

async fn run_http_server(port: Option<u16>, host: Option<String>) -> Result<()> {
    let mut settings = Settings::from_env();
    if let Some(port) = port {
        settings.port = port;
    }
    if let Some(host) = host {
        settings.host = host;
    }

    let addr = format!("{}:{}", settings.host, settings.port);
    let state = web::state::AppState::new(Arc::new(settings), create_shared_client());
    let app = web::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("jira-mcp listening on http://{} (MCP endpoint at /mcp)", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_stdio_server() -> Result<()> {
    let settings = Settings::from_env();
    let server = JiraMcpServer::new(Arc::new(settings), create_shared_client());

    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Quiet on stdio: the transport owns stdout, and stderr noise confuses clients
    let log_level = match &cli.command {
        Some(Commands::Serve) => Level::WARN,
        Some(Commands::Http { .. }) | None => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None => run_http_server(None, None).await?,
        Some(Commands::Http { port, host }) => run_http_server(port, host).await?,
        Some(Commands::Serve) => run_stdio_server().await?,
    }

    Ok(())
}
