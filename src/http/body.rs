//! Response body plumbing
//!
//! Buffered and pass-through streamed responses share one boxed body type
//! so every handler has the same signature.

use futures_util::StreamExt;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Bytes, Frame};

pub type BoxedBody = UnsyncBoxBody<Bytes, std::io::Error>;

/// Wrap a complete in-memory payload
pub fn full(data: impl Into<Bytes>) -> BoxedBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Empty body
pub fn empty() -> BoxedBody {
    full(Bytes::new())
}

/// Wrap an upstream response body as a chunked pass-through stream
///
/// Chunks are forwarded as they arrive; nothing is buffered beyond the
/// in-flight frame.
pub fn upstream_stream(upstream: reqwest::Response) -> BoxedBody {
    let frames = upstream
        .bytes_stream()
        .map(|chunk| chunk.map(Frame::data).map_err(std::io::Error::other));
    StreamBody::new(frames).boxed_unsync()
}
