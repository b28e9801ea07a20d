use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers;
use crate::{health_with_pool, AppState};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(controllers::root))
        .route("/api/health", get(controllers::health))
        // readiness: 503 se il database non è disponibile
        .route("/health", get(|Extension(state): Extension<Arc<AppState>>| async move {
            health_with_pool(state.pool.as_ref()).await
        }))
        .route("/api/messages", get(controllers::list_messages).post(controllers::create_message))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
