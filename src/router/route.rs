use std::collections::HashMap;
use std::sync::Arc;

use crate::http::request::{Method, Request};
use crate::http::response::StatusCode;

/// Query parameters stripped from the request path, last occurrence wins.
pub type QueryParams = HashMap<String, String>;

/// A route handler. Invoked with the parsed request, the query parameters and
/// the request body.
pub type HandlerFn = Arc<dyn Fn(&Request, &QueryParams, &[u8]) -> HandlerOutcome + Send + Sync>;

/// What a handler produced, as an explicit tagged result.
pub enum HandlerOutcome {
    /// Fall back to serving the route's backing file
    NotHandled,
    /// Bare status, empty body, generic content type
    StatusOnly(StatusCode),
    /// Fully specified response
    Full {
        status: StatusCode,
        content_type: String,
        body: Vec<u8>,
    },
}

impl HandlerOutcome {
    /// 200 OK with a plain text body.
    pub fn text(body: impl Into<Vec<u8>>) -> Self {
        HandlerOutcome::Full {
            status: StatusCode::OK,
            content_type: "text/plain".to_string(),
            body: body.into(),
        }
    }
}

/// A path (possibly with aliases) bound to a handler.
///
/// Registering a route with N aliases occupies N+1 keys in the route table,
/// all resolving to the same route instance.
pub struct Route {
    pub method: Method,
    /// Canonical path, also the backing file served when the handler returns
    /// `NotHandled`
    pub path: String,
    /// Additional path keys resolving to this route. Each route owns its own
    /// alias list; aliases are never shared between routes.
    pub aliases: Vec<String>,
    pub handler: HandlerFn,
}

impl Route {
    pub fn new(
        method: Method,
        path: impl Into<String>,
        aliases: Vec<String>,
        handler: HandlerFn,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            aliases,
            handler,
        }
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("aliases", &self.aliases)
            .finish()
    }
}
