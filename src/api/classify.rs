use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::{json, Value as J};

use crate::domain::classifier::Classifier;
use crate::domain::ParagraphInput;
use crate::infra::http::json as http_json;

pub const TITLE: &str = "Function Calling - Book or Author";
pub const DESCRIPTION: &str =
    "Detects whether a text is about a book or an author and returns the matching card.";

// POST /classify
pub async fn http(
    State(classifier): State<Arc<Classifier>>,
    body: Result<Json<ParagraphInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(b) => b,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejected classify body");
            return http_json::from_rejection(rejection);
        }
    };
    tracing::debug!(chars = input.text.chars().count(), "classify handler invoked");
    match classifier.classify(&input.text).await {
        Ok(outcome) => http_json::ok(outcome),
        Err(e) => {
            tracing::error!(error = %e, upstream = e.is_upstream(), "classification failed");
            http_json::from_classify_error(e)
        }
    }
}

// GET /
pub async fn info() -> Json<J> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "title": TITLE,
        "description": DESCRIPTION,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
