// src/web/mod.rs
// Web server layer

pub mod mcp_http;
pub mod state;

use axum::{
    Json, Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{TENANT_HEADERS, TenantCredentials};
use crate::web::state::AppState;

/// Create the web server router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // MCP over HTTP (Streamable HTTP transport), guarded by the tenant check
    let mcp_service = mcp_http::create_mcp_service(state.clone());
    let mcp_router = Router::new()
        .fallback_service(mcp_service)
        .layer(middleware::from_fn(tenant_guard));

    Router::new()
        .route("/health", get(health))
        // Legacy SSE transport endpoint, kept so old clients get a clear answer
        .route("/sse", get(sse_gone).post(sse_gone))
        .nest("/mcp", mcp_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "name": "jira-mcp",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn sse_gone() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "The SSE transport is not supported. Connect with the streamable HTTP transport at /mcp."
        })),
    )
}

/// Reject MCP requests that carry no tenant headers when no environment
/// fallback is configured either. Partial header sets pass through here;
/// the per-tool credential resolution reports which header is missing.
async fn tenant_guard(req: Request, next: Next) -> Response {
    let has_tenant_header = TENANT_HEADERS
        .iter()
        .any(|name| req.headers().contains_key(*name));

    if !has_tenant_header && TenantCredentials::from_env().is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": format!(
                    "Missing Jira credentials: set the {} and {} headers (plus {} or {})",
                    TENANT_HEADERS[0], TENANT_HEADERS[1], TENANT_HEADERS[2], TENANT_HEADERS[3]
                )
            })),
        )
            .into_response();
    }

    next.run(req).await
}
