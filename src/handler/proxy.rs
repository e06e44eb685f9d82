//! Proxy endpoint handler
//!
//! Resolves the `url` query parameter and translates fetch outcomes into
//! HTTP responses.

use crate::config::AppState;
use crate::http::body::BoxedBody;
use crate::http::response;
use crate::logger;
use crate::upstream::{self, FetchOutcome};
use hyper::{Response, StatusCode};
use serde_json::json;
use std::sync::Arc;

pub async fn handle(query: Option<&str>, state: &Arc<AppState>) -> Response<BoxedBody> {
    let Some(target) = extract_target_url(query) else {
        logger::log_warning("Proxy request without url parameter");
        return response::build_json_response(
            StatusCode::BAD_REQUEST,
            &json!({ "error": "Missing url parameter" }),
        );
    };

    let proxy_cfg = &state.config.proxy;
    match upstream::fetch(
        &state.client,
        &target,
        proxy_cfg.timeout(),
        proxy_cfg.transfer,
    )
    .await
    {
        Ok(FetchOutcome::Envelope(envelope)) => {
            response::build_json_response(StatusCode::OK, &envelope)
        }
        Ok(FetchOutcome::BinaryStream(upstream_response)) => {
            response::build_stream_response(upstream_response)
        }
        Err(err) => {
            let message = err.to_string();
            logger::log_proxy_failed(&message);
            response::build_json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({ "error": "Proxy request failed", "message": message }),
            )
        }
    }
}

/// Extract the percent-decoded `url` query parameter
fn extract_target_url(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_percent_decoded() {
        let query = "url=https%3A%2F%2Fapi.example.com%2Fv1%3Fid%3D42%26hd%3D1";
        assert_eq!(
            extract_target_url(Some(query)).as_deref(),
            Some("https://api.example.com/v1?id=42&hd=1")
        );
    }

    #[test]
    fn test_extract_plain_value() {
        assert_eq!(
            extract_target_url(Some("url=https://example.com/clip.mp4")).as_deref(),
            Some("https://example.com/clip.mp4")
        );
    }

    #[test]
    fn test_extract_ignores_other_params() {
        assert_eq!(
            extract_target_url(Some("foo=1&url=https://example.com&bar=2")).as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_extract_missing() {
        assert_eq!(extract_target_url(Some("foo=1&bar=2")), None);
        assert_eq!(extract_target_url(Some("")), None);
        assert_eq!(extract_target_url(None), None);
    }
}
