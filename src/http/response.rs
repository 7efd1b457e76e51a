//! Response framing module
//!
//! Every handler funnels its payload through one of these builders, so every
//! response carries an explicit `Content-Length` and at most one body.

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Frame raw bytes with a status code and an optional `Content-Type`.
pub fn raw(status: StatusCode, body: Bytes, content_type: Option<&str>) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(status)
        .header("Content-Length", body.len());
    if let Some(ct) = content_type {
        builder = builder.header("Content-Type", ct);
    }
    builder
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}

/// Frame a serializable value as a 200 `application/json` response.
pub fn json<T: Serialize>(body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(encoded) => raw(StatusCode::OK, Bytes::from(encoded), Some("application/json")),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            raw(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"error":"Internal server error"}"#),
                Some("application/json"),
            )
        }
    }
}

/// An empty body with the given status. Used for 404s and for the browse
/// handler's silent no-op branches.
pub fn empty(status: StatusCode) -> Response<Full<Bytes>> {
    raw(status, Bytes::new(), None)
}

pub fn method_not_allowed() -> Response<Full<Bytes>> {
    raw(
        StatusCode::METHOD_NOT_ALLOWED,
        Bytes::from_static(b"Method Not Allowed"),
        Some("text/plain"),
    )
}
