//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, SPA path
//! resolution, and dispatch to static file serving.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::handler::static_files::{self, PathResolution};
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Request context for a single request
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let is_head = *method == Method::HEAD;

    let response = if let Some(resp) = check_http_method(method) {
        resp
    } else {
        let ctx = RequestContext {
            path: req.uri().path(),
            is_head,
        };
        route_request(&ctx, &state).await
    };

    if state.cached_access_log.load(Ordering::Relaxed) {
        let entry = access_entry(&req, peer_addr, &response, started.elapsed());
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Only GET and HEAD are implemented; anything else is declined.
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not implemented: {method}"));
            Some(http::build_501_response())
        }
    }
}

/// The SPA routing rule.
///
/// A path naming an existing file is served as-is. A GET for anything else
/// is re-served as the fallback document with a `200` and no redirect, so
/// the browser keeps the requested URL. HEAD is not special-cased: a miss
/// is a plain `404`.
async fn route_request(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match static_files::resolve_file(&state.root, ctx.path) {
        PathResolution::File(path) => static_files::serve_file(ctx, &path).await,
        PathResolution::Missing => {
            if ctx.is_head {
                http::build_404_response()
            } else {
                static_files::serve_file(ctx, &state.fallback_path()).await
            }
        }
        PathResolution::Denied => {
            logger::log_warning(&format!("Path traversal attempt blocked: {}", ctx.path));
            http::build_404_response()
        }
    }
}

/// Assemble the access log entry for a finished request.
fn access_entry(
    req: &Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    elapsed: Duration,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes =
        usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX);
    entry.referer = header_value(req, "referer");
    entry.user_agent = header_value(req, "user-agent");
    entry.request_time_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
    entry
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
