// Carbon Calculator - HTTP API
// JSON endpoints + static page, served by bin/server.rs

use crate::calculator::compute;
use crate::factors::{EmissionFactorTable, EmissionFactors};
use crate::inputs::RawInputs;
use crate::report::{ChartRow, Report, Tip};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{debug, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<EmissionFactorTable>,
    pub default_country: String,
}

impl AppState {
    pub fn new(table: EmissionFactorTable, default_country: impl Into<String>) -> Self {
        AppState {
            table: Arc::new(table),
            default_country: default_country.into(),
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Country listing entry
#[derive(Serialize)]
pub struct CountryResponse {
    pub country: String,
    pub factors: EmissionFactors,
    pub factors_url: String,
}

/// POST /api/calculate body: country plus the four raw inputs
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(flatten)]
    pub inputs: RawInputs,
}

/// Calculation response: result plus what the page needs to draw it
#[derive(Serialize)]
pub struct CalculateResponse {
    #[serde(flatten)]
    pub report: Report,
    pub category_lines: Vec<String>,
    pub total_line: String,
    pub chart: Vec<ChartRow>,
    pub tips: Vec<Tip>,
}

impl From<Report> for CalculateResponse {
    fn from(report: Report) -> Self {
        Self {
            category_lines: report.category_lines(),
            total_line: report.total_line(),
            chart: report.chart_rows(),
            tips: report.tips(),
            report,
        }
    }
}

fn not_found(country: &str) -> Response {
    warn!(country, "request for unknown country");
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::err(format!("Unknown country: {}", country))),
    )
        .into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/countries - Countries with their factors
async fn list_countries(State(state): State<AppState>) -> impl IntoResponse {
    let response: Vec<CountryResponse> = state
        .table
        .iter()
        .map(|(country, factors)| CountryResponse {
            country: country.to_string(),
            factors: *factors,
            factors_url: format!("/api/factors/{}", urlencoding::encode(country)),
        })
        .collect();

    Json(ApiResponse::ok(response))
}

/// GET /api/factors/:country - Factors for one country
async fn get_factors(State(state): State<AppState>, Path(country): Path<String>) -> Response {
    match state.table.lookup(&country) {
        Ok(factors) => (StatusCode::OK, Json(ApiResponse::ok(*factors))).into_response(),
        Err(_) => not_found(&country),
    }
}

/// POST /api/calculate - Compute emissions
///
/// Inputs are clamped into their declared ranges before computing. HTTP
/// callers are not limited to a selection widget, so an unknown country
/// is a 404 here rather than a fatal error.
async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<CalculateRequest>,
) -> Response {
    let country = request
        .country
        .unwrap_or_else(|| state.default_country.clone());

    let factors = match state.table.lookup(&country) {
        Ok(factors) => factors,
        Err(_) => return not_found(&country),
    };

    let inputs = request.inputs.clamped();
    let result = compute(&inputs, factors);
    debug!(country = %country, total = result.total, "calculation served");

    let response = CalculateResponse::from(Report::new(country, inputs, result));
    (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/countries", get(list_countries))
        .route("/factors/:country", get(get_factors))
        .route("/calculate", post(calculate))
        .with_state(state);

    // Build main router
    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
