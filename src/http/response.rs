//! HTTP response building module
//!
//! Every response leaves through [`respond`], which attaches the permissive
//! CORS header set to success and error responses alike.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::mime;

/// Headers attached to every response
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "*"),
    ("Access-Control-Allow-Credentials", "true"),
    ("Access-Control-Allow-Methods", "GET,PUT,POST,DELETE"),
];

pub const NOT_FOUND_BODY: &str = "Not found";

/// Wrap a payload into a response with content type, length and CORS headers
pub fn respond(
    status: StatusCode,
    content_type: &str,
    body: impl Into<Bytes>,
) -> Response<Full<Bytes>> {
    let body = body.into();
    let content_length = body.len();

    let builder = CORS_HEADERS.iter().fold(
        Response::builder()
            .status(status)
            .header("Content-Type", content_type)
            .header("Content-Length", content_length),
        |builder, (name, value)| builder.header(*name, *value),
    );

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(status, &e);
        let mut fallback = Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = status;
        fallback
    })
}

/// Uniform 404 for unknown routes, missing assets and unsupported methods
pub fn build_404_response() -> Response<Full<Bytes>> {
    respond(StatusCode::NOT_FOUND, mime::PLAIN_TEXT, NOT_FOUND_BODY)
}

fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
