// HTTP request handlers
use crate::application::entry_service::SubmitStatus;
use crate::domain::dashboard::ViewState;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Fetch the latest snapshot and serve the fully rendered dashboard, or the
/// error panel when the sheet backend cannot be read
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<ViewState> {
    Json(state.dashboard_service.refresh().await)
}

/// Serve whatever the dashboard currently shows without hitting the sheet
/// backend again; a successful submission already refreshed it
pub async fn current_dashboard(State(state): State<Arc<AppState>>) -> Json<ViewState> {
    Json(state.dashboard_service.current_view().await)
}

/// Accept one raw JSON record and forward it to the sheet backend
pub async fn submit_entry(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
    body: String,
) -> Json<SubmitStatus> {
    Json(state.entry_service.submit(&body, query.token.as_deref()).await)
}

/// Current submission status line
pub async fn entry_status(State(state): State<Arc<AppState>>) -> Json<SubmitStatus> {
    Json(state.entry_service.status().await)
}
