mod gate;


use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::db::DbPool;
use crate::models::{AlbumSuggestion, Settings};
use crate::suggestion::{SuggestionError, SuggestionService};
use crate::voice::{self, Assistant};

pub use gate::{InFlightGate, InFlightPermit};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub service: SuggestionService,
    pub gate: InFlightGate,
}

#[derive(Deserialize)]
pub struct UsernameParams {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Serialize)]
pub struct IntentResponse {
    speech: String,
}

#[derive(Deserialize)]
pub struct AnnounceRequest {
    assistant: Assistant,
    title: String,
    artist: String,
}

#[derive(Serialize)]
pub struct AnnounceResponse {
    utterance: String,
}

#[derive(Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    username: Option<String>,
    #[serde(default = "default_sonos_enabled")]
    sonos_enabled: bool,
}

fn default_sonos_enabled() -> bool {
    true
}

/// Error body returned as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn internal(error: anyhow::Error) -> Self {
        tracing::error!("Request failed: {:#}", error);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    }
}

impl From<SuggestionError> for ApiError {
    fn from(error: SuggestionError) -> Self {
        let status = match error {
            SuggestionError::InvalidUsername => StatusCode::BAD_REQUEST,
            SuggestionError::NoItems => StatusCode::NOT_FOUND,
            SuggestionError::OutOfRange => StatusCode::CONFLICT,
            SuggestionError::NetworkFailure(_) | SuggestionError::ParsingFailure(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        Self::new(status, error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

pub fn create_router(pool: DbPool, service: SuggestionService) -> Router {
    let state = AppState {
        pool,
        service,
        gate: InFlightGate::new(),
    };

    Router::new()
        .route("/api/suggestion", get(suggestion_handler))
        .route("/api/intent/suggest", get(intent_handler))
        .route("/api/announce", post(announce_handler))
        .route(
            "/api/settings",
            get(get_settings_handler).put(put_settings_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn stored_username(pool: &DbPool) -> Result<Option<String>, ApiError> {
    let settings = crate::db::get_settings(pool).map_err(ApiError::internal)?;
    Ok(settings.username().map(str::to_string))
}

async fn suggestion_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UsernameParams>,
) -> Result<Json<AlbumSuggestion>, ApiError> {
    let stored = stored_username(&state.pool)?;
    let username = voice::resolve_username(params.username.as_deref(), stored.as_deref())
        .ok_or(SuggestionError::InvalidUsername)?;

    // A second tap for the same user while the first is still running is ignored
    let Some(_permit) = state.gate.try_acquire(&username) else {
        tracing::debug!("Suggestion for {} already in flight, ignoring request", username);
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "A suggestion is already being fetched",
        ));
    };

    let suggestion = state.service.suggest_random_album(&username).await?;
    Ok(Json(suggestion))
}

async fn intent_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UsernameParams>,
) -> Result<Json<IntentResponse>, ApiError> {
    let stored = stored_username(&state.pool)?;

    let Some(username) = voice::resolve_username(params.username.as_deref(), stored.as_deref())
    else {
        return Ok(Json(IntentResponse {
            speech: voice::MISSING_USERNAME_PROMPT.to_string(),
        }));
    };

    let suggestion = state.service.suggest_random_album(&username).await?;
    Ok(Json(IntentResponse {
        speech: voice::intent_response(&suggestion),
    }))
}

async fn announce_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnnounceRequest>,
) -> Result<Json<AnnounceResponse>, ApiError> {
    if request.assistant == Assistant::Sonos {
        let settings = crate::db::get_settings(&state.pool).map_err(ApiError::internal)?;
        if !settings.sonos_enabled {
            return Err(ApiError::new(
                StatusCode::FORBIDDEN,
                "Sonos announcements are disabled",
            ));
        }
    }

    Ok(Json(AnnounceResponse {
        utterance: voice::announcement(request.assistant, &request.title, &request.artist),
    }))
}

async fn get_settings_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Settings>, ApiError> {
    crate::db::get_settings(&state.pool)
        .map(Json)
        .map_err(ApiError::internal)
}

async fn put_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<Settings>, ApiError> {
    let mut settings = Settings::default().with_sonos_enabled(update.sonos_enabled);
    if let Some(username) = update.username.filter(|name| !name.is_empty()) {
        settings = settings.with_username(username);
    }

    let saved = crate::db::save_settings(&state.pool, &settings).map_err(ApiError::internal)?;
    tracing::info!("Settings updated");
    Ok(Json(saved))
}
