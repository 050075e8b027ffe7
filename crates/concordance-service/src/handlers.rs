use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use concordance_index::Concordance;

#[derive(Clone)]
pub struct AppState {
    pub concordance: Arc<Concordance>,
    pub max_results: usize,
}

#[derive(Deserialize)]
pub struct LookupParams {
    pub word: String,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct LookupResponse {
    word: String,
    total: usize,
    references: Vec<String>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    total_words: u64,
    distinct_words: u64,
    verses: u64,
    chapters: u64,
    books: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/lookup", get(lookup))
        .route("/v1/stats", get(stats))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Response, ApiError> {
    let word = params.word.trim();
    if word.is_empty() {
        return Err(ApiError::bad_request("word is required"));
    }

    let mut limit = params.limit.unwrap_or(state.max_results);
    if limit == 0 {
        return Err(ApiError::bad_request("limit must be >= 1"));
    }
    if limit > state.max_results {
        limit = state.max_results;
    }

    let references = state.concordance.query(word);
    let total = references.len();
    let references: Vec<String> = references.into_iter().take(limit).collect();

    Ok(Json(LookupResponse {
        word: word.to_string(),
        total,
        references,
    })
    .into_response())
}

async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let s = state.concordance.stats();
    Json(StatsResponse {
        total_words: s.total_words,
        distinct_words: s.distinct_words,
        verses: s.verses,
        chapters: s.chapters,
        books: state.concordance.books().len(),
    })
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}
