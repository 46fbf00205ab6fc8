//! API route handlers.
//!
//! Handlers are stateless: every request carries a complete expense form and
//! gets back a complete split. Shared state is read-only configuration.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{AppConfig, DisplayConfig};
use crate::form::{ExpenseForm, FormError};
use crate::report::SummaryView;
use crate::settlement::Splitter;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Read-only state shared by all handlers.
pub struct ServerState {
    pub splitter: Splitter,
    pub display: DisplayConfig,
}

impl ServerState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            splitter: Splitter::new(config.settlement.calculator()),
            display: config.display(),
        }
    }
}

pub type AppState = Arc<ServerState>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A rejected form, returned as 422 with the user-facing message.
#[derive(Debug)]
pub struct ApiError(pub FormError);

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// POST /api/split
pub async fn post_split(
    State(state): State<AppState>,
    Json(form): Json<ExpenseForm>,
) -> Result<Json<SummaryView>, ApiError> {
    let validated = form.validate().map_err(|e| {
        warn!(error = %e, "Rejected expense form");
        ApiError(e)
    })?;

    let summary = state.splitter.split(&validated);
    info!(
        people = summary.num_people,
        transfers = summary.transactions.len(),
        "Split served"
    );

    Ok(Json(SummaryView::new(&summary, &state.display)))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
