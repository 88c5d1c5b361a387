//! K9Server - Minimal HTTP/1.x Server Core
//!
//! Core library for request framing, parsing, routing and response
//! serialization. Serves exactly one request per connection.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
