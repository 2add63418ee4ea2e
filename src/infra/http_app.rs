use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::domain::classifier::Classifier;

/// `/healthz`, service info at `/`, and the classifier at `/classify`.
pub fn build_app(classifier: Arc<Classifier>) -> Router {
    Router::new()
        .route("/", get(crate::api::classify::info))
        .route("/healthz", get(|| async { "ok" }))
        .route("/classify", post(crate::api::classify::http))
        .with_state(classifier)
}
