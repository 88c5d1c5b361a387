//! HTTP protocol implementation.
//!
//! This module implements the per-connection HTTP/1.x request lifecycle.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`reader`**: Frames a complete request (headers + declared-length body) from the socket
//! - **`parser`**: Parses framed request bytes into a structured request
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: Content type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Frame a complete request from the socket
//!        └──────┬──────┘
//!               │ Raw bytes
//!               ▼
//!        ┌──────────────────┐
//!        │    Parsing       │ ← Parse request line, headers, body
//!        └──────┬───────────┘
//!               │ Request (GET/POST only)
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Route lookup / static file resolution
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Always
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! A failure in Reading or Parsing short-circuits straight to Responding with
//! the corresponding error status. There is no keep-alive: every connection is
//! closed after exactly one response.

pub mod connection;
pub mod mime;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
