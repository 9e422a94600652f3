//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::routing::RouteProvider;
use crate::trips::TripError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Number of trips shown on the index page.
const RECENT_TRIPS: usize = 20;

/// Create the application router.
pub fn create_router<P: RouteProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/", get(index_page::<P>))
        .route("/health", get(health))
        .route("/api/trips", post(create_trip::<P>))
        .route("/api/trips/list", get(list_trips::<P>))
        .route("/api/trips/:id", get(get_trip::<P>))
        .route("/api/geocode/autocomplete", get(autocomplete::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "HOS ELD API is running",
    })
}

/// Index page with the trip form and recent trips.
async fn index_page<P: RouteProvider>(
    State(state): State<AppState<P>>,
) -> Result<Html<String>, AppError> {
    let trips = state
        .trips
        .list()
        .await
        .iter()
        .take(RECENT_TRIPS)
        .map(|t| TripListItem::from_trip(t))
        .collect();

    render(IndexTemplate { trips })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan and store a new trip.
async fn create_trip<P: RouteProvider>(
    State(state): State<AppState<P>>,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so malformed bodies get the usual error shape
    let req: CreateTripRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body_len = body.len(), "invalid trip request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let trip = state.trips.create(req.into_request()).await?;

    Ok((StatusCode::CREATED, Json(TripResult::from_trip(&trip))).into_response())
}

/// All trips, newest first.
async fn list_trips<P: RouteProvider>(State(state): State<AppState<P>>) -> Json<Vec<TripResult>> {
    let trips = state.trips.list().await;
    Json(trips.iter().map(|t| TripResult::from_trip(t)).collect())
}

/// One trip, as JSON or as an HTML log sheet.
async fn get_trip<P: RouteProvider>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id: u64 = id.parse().map_err(|_| AppError::NotFound {
        message: "Trip not found".to_string(),
    })?;
    let trip = state.trips.get(id).await?;

    if accepts_html(&headers) {
        let html = render(TripTemplate {
            trip: TripView::from_trip(&trip),
        })?;
        Ok(html.into_response())
    } else {
        Ok(Json(TripResult::from_trip(&trip)).into_response())
    }
}

/// Place suggestions for the trip form.
async fn autocomplete<P: RouteProvider>(
    State(state): State<AppState<P>>,
    Query(query): Query<AutocompleteQuery>,
) -> Result<Json<AutocompleteResponse>, AppError> {
    let places = state.trips.autocomplete(&query.q).await?;

    Ok(Json(AutocompleteResponse {
        suggestions: places.iter().map(LocationResult::from_location).collect(),
    }))
}

fn render(template: impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        match e {
            TripError::NotFound(_) => AppError::NotFound {
                message: "Trip not found".to_string(),
            },
            TripError::Routing(_) => AppError::BadGateway {
                message: e.to_string(),
            },
            TripError::Invalid(_)
            | TripError::InvalidLocation { .. }
            | TripError::UnknownPlace { .. }
            | TripError::InvalidDistance(_) => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
