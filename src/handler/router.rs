//! Request dispatch module
//!
//! Entry point for inbound requests. Every response, whatever the
//! outcome, leaves with permissive CORS headers and caching disabled.

use crate::config::AppState;
use crate::handler::{proxy, static_files};
use crate::http::body::BoxedBody;
use crate::http::response;
use crate::logger;
use hyper::body::Incoming;
use hyper::header::{HeaderMap, HeaderValue};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<BoxedBody>, Infallible> {
    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(req.method(), req.uri(), req.version());
    }
    if state.config.logging.show_headers {
        logger::log_headers_count(req.headers().len());
    }

    let mut response = dispatch(&req, &state).await;
    apply_common_headers(response.headers_mut());

    if access_log {
        logger::log_response(response.status().as_u16());
    }
    Ok(response)
}

/// Produce exactly one response per request
async fn dispatch(req: &Request<Incoming>, state: &Arc<AppState>) -> Response<BoxedBody> {
    // CORS preflight: 200 with an empty body, no further processing
    if req.method() == Method::OPTIONS {
        return response::build_options_response();
    }

    let path = req.uri().path();
    if path.starts_with(&state.config.proxy.prefix) {
        return proxy::handle(req.uri().query(), state).await;
    }

    // Everything else resolves against the static root
    static_files::serve(&state.config.static_files, path).await
}

/// Permissive CORS plus cache-disabling headers, set on every response
fn apply_common_headers(headers: &mut HeaderMap) {
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        "Cache-Control",
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert("Pragma", HeaderValue::from_static("no-cache"));
    headers.insert("Expires", HeaderValue::from_static("0"));
}
