// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::application::entry_service::EntryService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::sheet_gateway::SheetGateway;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    current_dashboard, entry_status, get_dashboard, health_check, submit_entry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let app_config = load_app_config()?;

    // Create gateway (infrastructure layer)
    let gateway = Arc::new(SheetGateway::new(app_config.sheet.base_url));

    // Create services (application layer)
    let dashboard_service = DashboardService::new(gateway.clone());
    let entry_service = EntryService::new(
        gateway,
        dashboard_service.clone(),
        app_config.sheet.token,
    );

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        entry_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/dashboard/current", get(current_dashboard))
        .route("/api/entries", post(submit_entry))
        .route("/api/entries/status", get(entry_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], app_config.server.port));
    println!("Starting nutrition-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
