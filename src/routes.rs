use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::aggregator::NewsAggregator;

pub struct AppState {
    pub news: Arc<NewsAggregator>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/news", get(list_news))
        .route("/api/news/:id", get(get_article))
        .route("/api/health", get(health))
        .with_state(state)
}

pub async fn list_news(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.news.get_news().await)
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.news.get_news_by_id(&id).await {
        Some(article) => Json(article).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "article not found" })),
        )
            .into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
