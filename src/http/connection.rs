use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::http::parser::parse_request;
use crate::http::reader::read_request;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::router::{RouteTable, dispatch};

pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    table: Arc<RouteTable>,
    read_timeout: Duration,
    state: ConnectionState,
}

enum ConnectionState {
    Reading,
    Parsing(Vec<u8>),
    Dispatching(Request),
    Responding(Response),
    Closed,
}

impl Connection {
    pub fn new(
        stream: TcpStream,
        peer: SocketAddr,
        table: Arc<RouteTable>,
        read_timeout: Duration,
    ) -> Self {
        Self {
            stream,
            peer,
            table,
            read_timeout,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection through `Reading → Parsing → Dispatching →
    /// Responding → Closed`. A failure while reading or parsing skips
    /// straight to Responding with the matching error status. Exactly one
    /// response is written, then both directions are shut down.
    ///
    /// A panicking route handler is not caught here; it tears down the
    /// connection task without a response.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    match read_request(&mut self.stream, self.read_timeout).await {
                        Ok(raw) => self.state = ConnectionState::Parsing(raw),
                        Err(e) => {
                            debug!(error = ?e, "failed to read request");
                            let resp =
                                dispatch::error_response(&self.table, e.status(), "HTTP/1.1").await;
                            self.state = ConnectionState::Responding(resp);
                        }
                    }
                }

                ConnectionState::Parsing(raw) => match parse_request(&raw) {
                    Ok(req) => self.state = ConnectionState::Dispatching(req),
                    Err(e) => {
                        debug!(error = ?e, "failed to parse request");
                        let resp = dispatch::error_response(
                            &self.table,
                            StatusCode::BAD_REQUEST,
                            "HTTP/1.1",
                        )
                        .await;
                        self.state = ConnectionState::Responding(resp);
                    }
                },

                ConnectionState::Dispatching(mut req) => {
                    info!(
                        peer = %self.peer,
                        method = req.method.as_str(),
                        path = %req.path,
                        version = %req.version,
                        "request"
                    );
                    let resp = match req.method {
                        Method::GET | Method::POST => {
                            dispatch::dispatch(&self.table, &mut req).await
                        }
                        _ => {
                            debug!(method = req.method.as_str(), "method not dispatched");
                            dispatch::error_response(
                                &self.table,
                                StatusCode::METHOD_NOT_ALLOWED,
                                &req.version,
                            )
                            .await
                        }
                    };
                    self.state = ConnectionState::Responding(resp);
                }

                ConnectionState::Responding(resp) => {
                    let mut writer = ResponseWriter::new(&resp);
                    writer.write_to_stream(&mut self.stream).await?;
                    self.stream.shutdown().await.ok();
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }
}
