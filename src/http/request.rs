use std::collections::HashMap;

/// HTTP request methods.
///
/// All nine request tokens are recognized by the parser, but only GET and
/// POST are dispatched; the rest receive 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    HEAD,
    PUT,
    DELETE,
    CONNECT,
    OPTIONS,
    TRACE,
    PATCH,
}

impl Method {
    /// Parses an HTTP method token (case-sensitive, uppercase per the RFC).
    ///
    /// # Example
    ///
    /// ```
    /// # use k9server::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "HEAD" => Some(Method::HEAD),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "CONNECT" => Some(Method::CONNECT),
            "OPTIONS" => Some(Method::OPTIONS),
            "TRACE" => Some(Method::TRACE),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::HEAD => "HEAD",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::CONNECT => "CONNECT",
            Method::OPTIONS => "OPTIONS",
            Method::TRACE => "TRACE",
            Method::PATCH => "PATCH",
        }
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Created once per connection by the parser. The dispatcher rewrites `path`
/// to the canonicalized filesystem path (query string stripped) before any
/// access-control decision; everything else is immutable after parsing.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// The request target as sent by the client, later rewritten by the
    /// dispatcher to the canonicalized path.
    pub path: String,
    /// Protocol version from the request line (e.g. "HTTP/1.1")
    pub version: String,
    /// Request headers, case-sensitive keys, first occurrence wins
    pub headers: HashMap<String, String>,
    /// Request body, exactly `Content-Length` bytes
    pub body: Vec<u8>,
}

impl Request {
    /// Retrieves a header value by its exact key.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }
}
