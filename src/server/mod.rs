//! HTTP front end: a JSON API over per-session dashboard state plus the
//! single page that renders it.
//!
//! ```text
//!  GET    /                            dashboard page
//!  GET    /api/sectors                 dropdown options
//!  POST   /api/sessions                open a session at the default sector
//!  GET    /api/sessions/{id}           views for the current selection
//!  PUT    /api/sessions/{id}/selection change sector, returns views
//!  DELETE /api/sessions/{id}           close a session
//! ```

pub mod session;

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data::filter::sector_counts;
use crate::state::SelectionEvent;
use crate::views::DerivedViews;

pub use session::SessionStore;

const INDEX_HTML: &str = include_str!("index.html");

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Request failures reported to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unknown session {0}")]
    UnknownSession(Uuid),

    #[error("malformed session id '{0}'")]
    BadSessionId(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::UnknownSession(_) => StatusCode::NOT_FOUND,
            ApiError::BadSessionId(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadSessionId(raw.to_string()))
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct SectorsResponse {
    pub sectors: Vec<String>,
    pub default: String,
    pub counts: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: Uuid,
    pub views: DerivedViews,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub sector: String,
}

#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub session: Uuid,
    /// False when the sector is unknown and the selection was kept.
    pub accepted: bool,
    pub event: SelectionEvent,
    pub views: DerivedViews,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

type Store = Arc<SessionStore>;

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn sectors(State(store): State<Store>) -> Json<SectorsResponse> {
    let dataset = store.dataset();
    let counts = sector_counts(dataset)
        .into_iter()
        .map(|(s, n)| (s.to_string(), n))
        .collect();
    Json(SectorsResponse {
        sectors: dataset.sectors().to_vec(),
        default: store.initial_sector().to_string(),
        counts,
    })
}

async fn create_session(State(store): State<Store>) -> (StatusCode, Json<SessionResponse>) {
    let (session, views) = store.create();
    (StatusCode::CREATED, Json(SessionResponse { session, views }))
}

async fn get_session(
    State(store): State<Store>,
    Path(raw_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = parse_id(&raw_id)?;
    let views = store
        .views(session)
        .ok_or(ApiError::UnknownSession(session))?;
    Ok(Json(SessionResponse { session, views }))
}

async fn put_selection(
    State(store): State<Store>,
    Path(raw_id): Path<String>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<SelectResponse>, ApiError> {
    let session = parse_id(&raw_id)?;
    let (event, views) = store
        .select(session, &request.sector)
        .ok_or(ApiError::UnknownSession(session))?;
    Ok(Json(SelectResponse {
        session,
        accepted: !event.is_rejected(),
        event,
        views,
    }))
}

async fn delete_session(
    State(store): State<Store>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session = parse_id(&raw_id)?;
    if store.remove(session) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::UnknownSession(session))
    }
}

// ---------------------------------------------------------------------------
// Router / server
// ---------------------------------------------------------------------------

/// All dashboard routes bound to `store`.
pub fn router(store: Store) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/sectors", get(sectors))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/selection", put(put_selection))
        .with_state(store)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, store: Store) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Serving dashboard on http://{}", listener.local_addr()?);
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Cannot listen for Ctrl-C, serving until killed: {e}");
        std::future::pending::<()>().await;
    }
}
