//! HTTP response building module
//!
//! Builders for the response shapes the handlers produce. Builders never
//! panic; a malformed build falls back to a bare response and logs.

use crate::http::body::{self, BoxedBody};
use crate::logger;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build 200 response with an empty body (CORS preflight answer)
pub fn build_options_response() -> Response<BoxedBody> {
    Response::builder()
        .status(200)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(body::empty())
        })
}

/// Build a JSON response from any serializable payload
pub fn build_json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response<BoxedBody> {
    let json = match serde_json::to_string(payload) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(body::full(r#"{"error":"Internal server error"}"#))
                .unwrap_or_else(|_| Response::new(body::empty()));
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(body::full(json))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(body::empty())
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<BoxedBody> {
    plain_text(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<BoxedBody> {
    plain_text(StatusCode::FORBIDDEN, "Forbidden")
}

/// Build 500 response for local I/O failures
pub fn build_500_response() -> Response<BoxedBody> {
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
}

/// Build 200 response carrying raw file bytes
pub fn build_file_response(content: Vec<u8>, content_type: &str) -> Response<BoxedBody> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content.len())
        .body(body::full(content))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(body::empty())
        })
}

/// Build 200 response that streams an upstream body through unchanged
///
/// Binary payloads are always presented as `video/mp4`, matching the
/// buffered data-URI shape.
pub fn build_stream_response(upstream: reqwest::Response) -> Response<BoxedBody> {
    Response::builder()
        .status(200)
        .header("Content-Type", "video/mp4")
        .body(body::upstream_stream(upstream))
        .unwrap_or_else(|e| {
            log_build_error("stream", &e);
            Response::new(body::empty())
        })
}

fn plain_text(status: StatusCode, message: &'static str) -> Response<BoxedBody> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(body::full(message))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(body::full(message))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_is_empty_200() {
        let resp = build_options_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_json_response_sets_content_type() {
        let resp = build_json_response(StatusCode::BAD_REQUEST, &json!({"error": "nope"}));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(build_404_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(build_403_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(
            build_500_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_file_response_headers() {
        let resp = build_file_response(b"body".to_vec(), "text/css");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/css");
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "4");
    }
}
