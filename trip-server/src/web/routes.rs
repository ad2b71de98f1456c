//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::agent::{AgentError, BookingRequest, ChatRequest};
use crate::domain::{DomainError, Preferences};
use crate::scoring::{SortKey, apply_hard_filters, sort_by};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/plan", post(plan_trip))
        .route("/api/rank", post(rank_candidates))
        .route("/api/book", post(book_trip))
        .route("/api/itinerary/:id", get(itinerary))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the request form.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate::new(Preferences::default())
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Resolve optional preferences, rejecting invalid weights.
fn resolve_preferences(prefs: Option<Preferences>) -> Result<Preferences, AppError> {
    let prefs = prefs.unwrap_or_default();
    prefs.validate()?;
    Ok(prefs)
}

/// Plan a trip: ask the agent, filter, rank.
async fn plan_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: PlanRequest = parse_body(&body)?;

    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest {
            message: "Trip request text is empty".to_string(),
        });
    }

    let prefs = resolve_preferences(req.preferences)?;
    let sort = req.sort.unwrap_or_default();

    let chat = state
        .agent
        .chat(&ChatRequest {
            text: text.to_string(),
            prefs: prefs.clone(),
        })
        .await?;

    let filtered = apply_hard_filters(&chat.candidates, &prefs);
    let ranked = sort_by(&filtered, sort, &prefs, &state.scoring);
    let recommendation = locate_pick(&chat.candidates, chat.recommendation, &ranked);

    info!(
        from = %chat.query.from,
        to = %chat.query.to,
        candidates = chat.candidates.len(),
        ranked = ranked.len(),
        sort = sort.as_str(),
        "planned trip"
    );

    if accepts_html(&headers) {
        let html = ResultsTemplate::new(&chat.query, sort, &ranked, recommendation).render()?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(PlanResponse {
            query: chat.query,
            candidates: ranked,
            recommendation,
        })
        .into_response())
    }
}

/// Re-rank candidates the client already holds.
async fn rank_candidates(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RankResponse>, AppError> {
    let req: RankRequest = parse_body(&body)?;
    let prefs = resolve_preferences(req.preferences)?;
    let sort = req.sort.unwrap_or(SortKey::Score);

    let filtered = apply_hard_filters(&req.candidates, &prefs);
    let candidates = sort_by(&filtered, sort, &prefs, &state.scoring);

    Ok(Json(RankResponse { candidates }))
}

/// Book a candidate.
async fn book_trip(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: BookingRequest = parse_body(&body)?;

    if req.user.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "Booking user is empty".to_string(),
        });
    }

    let booking = state.agent.book(&req).await?;
    info!(booking_id = %booking.booking_id, status = %booking.status, "booked trip");

    Ok(Json(booking).into_response())
}

/// Show a booking.
async fn itinerary(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let html = accepts_html(&headers);

    let itinerary = match state.agent.itinerary(&id).await {
        Ok(itinerary) => itinerary,
        Err(e) if html => {
            let page = ErrorTemplate {
                title: "Booking unavailable".to_string(),
                message: format!("Could not load booking {id}."),
                details: Some(e.to_string()),
            }
            .render()?;
            let status = AppError::from(e).status();
            return Ok((status, Html(page)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    if html {
        let page = ItineraryTemplate::from_itinerary(&itinerary).render()?;
        Ok(Html(page).into_response())
    } else {
        Ok(Json(itinerary).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Upstream { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl From<AgentError> for AppError {
    fn from(e: AgentError) -> Self {
        match e {
            AgentError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal {
            message: format!("Template error: {}", e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = self.message().to_string();

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
