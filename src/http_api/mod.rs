use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    Holiday, LeaveRecommendation, PlannerConfig, PlannerError, RecommendationType,
    analyze_with_config, filter_by_type, generate_ics, recommendations_to_csv_string,
};

#[derive(Clone)]
pub struct AppState {
    config: Arc<PlannerConfig>,
}

impl AppState {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    fn config(&self) -> Arc<PlannerConfig> {
        self.config.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<PlannerError> for ApiError {
    fn from(value: PlannerError) -> Self {
        match value {
            PlannerError::InvalidConfig(_) | PlannerError::InvalidData(_) => {
                ApiError::Invalid(value.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub config: Option<PlannerConfig>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/recommendations", post(recommendations))
        .route("/recommendations/ics", post(recommendations_ics))
        .route("/recommendations/csv", post(recommendations_csv))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, config: PlannerConfig) -> std::io::Result<()> {
    let app = router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "http api listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

fn run(state: &AppState, request: &AnalyzeRequest) -> Result<Vec<LeaveRecommendation>, ApiError> {
    let config = match &request.config {
        Some(config) => {
            config.validate()?;
            config.clone()
        }
        None => (*state.config()).clone(),
    };
    let kind = request
        .kind
        .as_deref()
        .map(RecommendationType::from_str)
        .transpose()
        .map_err(|err| ApiError::invalid(err.to_string()))?;

    let all = analyze_with_config(&request.holidays, &config);
    Ok(filter_by_type(&all, kind))
}

async fn recommendations(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Vec<LeaveRecommendation>>, ApiError> {
    Ok(Json(run(&state, &request)?))
}

async fn recommendations_ics(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Response, ApiError> {
    let recs = run(&state, &request)?;
    let body = generate_ics(&request.holidays, &recs);
    Ok((
        [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
        body,
    )
        .into_response())
}

async fn recommendations_csv(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Response, ApiError> {
    let recs = run(&state, &request)?;
    let body = recommendations_to_csv_string(&recs)?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response())
}
