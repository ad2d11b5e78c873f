//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. A request moves through
//! `Matching -> Found | NotFound`:
//!
//! - no registry entry for (method, path) is `NotFound`
//! - an entry whose asset is missing from the store is `NotFound` too
//! - otherwise `Found`; templated entries are rendered before responding
//!
//! Every outcome leaves through the responder, so 404s carry the same CORS
//! headers as successful responses.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::assets::RouteEntry;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::state::AppState;

/// Result of matching a request against the registry and the asset store
#[derive(Debug)]
pub enum RouteOutcome<'a> {
    Found {
        entry: &'a RouteEntry,
        content: Bytes,
    },
    NotFound,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let response = route(req.method(), req.uri().path(), &state).await;

    if state.settings.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.to_string(),
            req.method().to_string(),
            req.uri().path().to_string(),
        );
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length(&response);
        entry.user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.settings.logging.access_log_format);
    }

    Ok(response)
}

/// Route a request and build its response
pub async fn route(method: &Method, path: &str, state: &AppState) -> Response<Full<Bytes>> {
    match match_route(method, path, state).await {
        RouteOutcome::Found { entry, content } => {
            let body = render_payload(entry, content, state);
            http::respond(StatusCode::OK, entry.content_type, body)
        }
        RouteOutcome::NotFound => http::build_404_response(),
    }
}

/// Look up the registry entry and fetch its asset
pub async fn match_route<'a>(method: &Method, path: &str, state: &'a AppState) -> RouteOutcome<'a> {
    let Some(entry) = state.registry.lookup(method, path) else {
        return RouteOutcome::NotFound;
    };

    match state.assets.fetch(entry.asset).await {
        Some(content) => RouteOutcome::Found { entry, content },
        None => {
            logger::log_warning(&format!(
                "Route {path} is registered but asset {} is missing",
                entry.asset
            ));
            RouteOutcome::NotFound
        }
    }
}

/// Apply template substitution for templated entries, pass others through
fn render_payload(entry: &RouteEntry, content: Bytes, state: &AppState) -> Bytes {
    if !entry.templated {
        return content;
    }

    match std::str::from_utf8(&content) {
        Ok(text) => Bytes::from(state.tokens.render(text, &state.identity)),
        Err(_) => {
            logger::log_warning(&format!(
                "Templated asset {} is not valid UTF-8, serving unmodified",
                entry.asset
            ));
            content
        }
    }
}

fn content_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
}
