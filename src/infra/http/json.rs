use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::core::error::ClassifyError;
use crate::domain::{Classification, ErrorBody};

/// Body for hard faults. Details go to the log, not to the caller.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Cards and misses are both a 200; the body tells them apart.
pub fn ok(outcome: Classification) -> Response {
    (StatusCode::OK, Json(outcome)).into_response()
}

pub fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

pub fn status_for(err: &ClassifyError) -> StatusCode {
    if err.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub fn from_classify_error(err: ClassifyError) -> Response {
    error(status_for(&err), INTERNAL_MESSAGE)
}

/// Keeps the extractor's status (400/415/422) but answers in JSON.
pub fn from_rejection(rejection: JsonRejection) -> Response {
    error(rejection.status(), &rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_of(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), 1 << 20).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn miss_is_200_with_error_body() {
        let resp = ok(Classification::Miss);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, json!({"error": "could not classify the text"}));
    }

    #[tokio::test]
    async fn decode_fault_is_generic_500() {
        let source = serde_json::from_str::<Value>("{").unwrap_err();
        let resp = from_classify_error(ClassifyError::ArgumentDecode { tool: "make_book_card".into(), source });
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(resp).await, json!({"error": "internal server error"}));
    }

    #[test]
    fn upstream_faults_map_to_bad_gateway() {
        assert_eq!(status_for(&ClassifyError::Upstream("refused".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(&ClassifyError::Validation { tool: "t".into(), field: "f".into(), reason: "r".into() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
