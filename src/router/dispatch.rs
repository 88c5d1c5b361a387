//! Path resolution, access control and handler-result interpretation.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::router::RouteTable;
use crate::router::route::{HandlerOutcome, QueryParams};

/// Resolves a parsed request to a response.
///
/// Strips the query string, canonicalizes the path (rewriting `req.path`
/// before any access-control decision), then dispatches to a registered
/// route handler or falls through to static file resolution.
pub async fn dispatch(table: &RouteTable, req: &mut Request) -> Response {
    let Some((clean_path, params)) = strip_params(&req.path) else {
        debug!(path = %req.path, "malformed query parameters");
        return error_response(table, StatusCode::BAD_REQUEST, &req.version).await;
    };

    let fs_path = table.resolve_request(&clean_path);
    req.path = fs_path.to_string_lossy().into_owned();

    let Some(route) = table.route(&fs_path).cloned() else {
        return serve_static(table, &fs_path, &req.version).await;
    };

    let outcome = (route.handler)(req, &params, &req.body);
    match outcome {
        HandlerOutcome::NotHandled => {
            // Serve the route's own backing file through the same
            // static-resolution priority order
            let backing = table.resolve_request(&route.path);
            serve_static(table, &backing, &req.version).await
        }
        // Any status outside 2xx discards the handler body and substitutes
        // the resolved error page
        HandlerOutcome::StatusOnly(status) if !status.is_success() => {
            error_response(table, status, &req.version).await
        }
        HandlerOutcome::StatusOnly(status) => {
            page_response(status, "text/plain", Vec::new(), &req.version)
        }
        HandlerOutcome::Full { status, .. } if !status.is_success() => {
            error_response(table, status, &req.version).await
        }
        HandlerOutcome::Full {
            status,
            content_type,
            body,
        } => page_response(status, &content_type, body, &req.version),
    }
}

/// Serves a canonicalized filesystem path, applying the access-control
/// policy in fixed priority order: blacklist, accessibility, moved-route
/// redirect, existence, regular file, readability.
async fn serve_static(table: &RouteTable, path: &Path, version: &str) -> Response {
    if table.is_blacklisted(path) {
        return error_response(table, StatusCode::FORBIDDEN, version).await;
    }
    if !table.is_accessible(path) {
        return error_response(table, StatusCode::FORBIDDEN, version).await;
    }
    if let Some(moved) = table.moved_route(path) {
        let status = moved.kind.status();
        let body = table.error_page(status).await;
        return ResponseBuilder::new(status)
            .version(version)
            .header("Content-Type", "text/html")
            .header("Location", moved.target.clone())
            .body(body)
            .build();
    }

    let meta = match tokio::fs::metadata(path).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return error_response(table, StatusCode::NOT_FOUND, version).await;
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return error_response(table, StatusCode::FORBIDDEN, version).await;
        }
        Err(_) => {
            return error_response(table, StatusCode::INTERNAL_SERVER_ERROR, version).await;
        }
    };
    if !meta.is_file() {
        return error_response(table, StatusCode::NOT_IMPLEMENTED, version).await;
    }

    match tokio::fs::read(path).await {
        Ok(data) => page_response(StatusCode::OK, mime::content_type_for(path), data, version),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            error_response(table, StatusCode::FORBIDDEN, version).await
        }
        Err(_) => error_response(table, StatusCode::INTERNAL_SERVER_ERROR, version).await,
    }
}

/// Builds an error response whose body is the resolved error page.
pub async fn error_response(table: &RouteTable, status: StatusCode, version: &str) -> Response {
    let body = table.error_page(status).await;
    page_response(status, "text/html", body, version)
}

fn page_response(status: StatusCode, content_type: &str, body: Vec<u8>, version: &str) -> Response {
    ResponseBuilder::new(status)
        .version(version)
        .header("Content-Type", content_type)
        .body(body)
        .build()
}

/// Splits a query string off the request path. Pairs split on the first `=`;
/// a pair without one is malformed input.
fn strip_params(path: &str) -> Option<(String, QueryParams)> {
    let Some((clean, query)) = path.split_once('?') else {
        return Some((path.to_string(), QueryParams::new()));
    };
    let mut params = QueryParams::new();
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=')?;
        params.insert(key.to_string(), value.to_string());
    }
    Some((clean.to_string(), params))
}
