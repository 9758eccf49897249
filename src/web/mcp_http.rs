// src/web/mcp_http.rs
// MCP over HTTP (Streamable HTTP transport)

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::mcp::JiraMcpServer;
use crate::web::state::AppState;

/// Create the MCP HTTP service
pub fn create_mcp_service(
    state: AppState,
) -> StreamableHttpService<JiraMcpServer, LocalSessionManager> {
    // Capture state for the factory closure
    let settings = state.settings.clone();
    let http = state.http.clone();

    // Service factory. Stateless mode means a fresh server per request, so
    // the tenant slot resolved in call_tool never outlives one request.
    let service_factory = move || Ok(JiraMcpServer::new(settings.clone(), http.clone()));

    let session_manager = Arc::new(LocalSessionManager::default());

    let config = StreamableHttpServerConfig {
        sse_keep_alive: Some(std::time::Duration::from_secs(15)),
        sse_retry: None,
        stateful_mode: false,
        cancellation_token: CancellationToken::new(),
    };

    StreamableHttpService::new(service_factory, session_manager, config)
}
