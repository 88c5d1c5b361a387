use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

use crate::http::response::StatusCode;

/// Ways receiving a request can fail before parsing even starts.
#[derive(Debug)]
pub enum ReadError {
    /// Peer reached end-of-stream before a complete request arrived
    ClientClosed,
    /// No data arrived within the configured read deadline
    TimedOut,
    /// Declared Content-Length is not a non-negative integer
    BadRequest,
    /// Any other transport fault
    Io(std::io::Error),
}

impl ReadError {
    pub fn status(&self) -> StatusCode {
        match self {
            ReadError::ClientClosed => StatusCode::CLIENT_CLOSED_REQUEST,
            ReadError::TimedOut => StatusCode::REQUEST_TIMEOUT,
            ReadError::BadRequest => StatusCode::BAD_REQUEST,
            ReadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Reads one complete HTTP request from the transport.
///
/// Reads incrementally until the header terminator (`\r\n\r\n`) is observed,
/// then inspects the buffered header block exactly once for a
/// `Content-Length` value (case-insensitive): absent means a zero-length
/// body, otherwise exactly that many additional bytes are awaited. A
/// malformed length fails with `BadRequest` without reading further.
pub async fn read_request<S>(stream: &mut S, read_timeout: Duration) -> Result<Vec<u8>, ReadError>
where
    S: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(4096);
    let mut chunk = [0u8; 1024];
    let mut expected_total: Option<usize> = None;

    loop {
        if expected_total.is_none() {
            if let Some(pos) = find_headers_end(&buf) {
                let body_start = pos + 4;
                let body_len = declared_body_length(&buf[..pos])?;
                expected_total = Some(body_start + body_len);
            }
        }

        if let Some(total) = expected_total {
            if buf.len() >= total {
                return Ok(buf[..total].to_vec());
            }
        }

        let n = timeout(read_timeout, stream.read(&mut chunk))
            .await
            .map_err(|_| ReadError::TimedOut)?
            .map_err(ReadError::Io)?;

        if n == 0 {
            return Err(ReadError::ClientClosed);
        }

        buf.extend_from_slice(&chunk[..n]);
    }
}

pub(crate) fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Scans the raw header block for a Content-Length value. Only this lookup is
/// case-insensitive; the parser's header map keeps keys as sent.
fn declared_body_length(head: &[u8]) -> Result<usize, ReadError> {
    for line in head.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let Some(colon) = line.iter().position(|&b| b == b':') else {
            continue;
        };
        if !line[..colon].eq_ignore_ascii_case(b"content-length") {
            continue;
        }
        let value = std::str::from_utf8(&line[colon + 1..]).map_err(|_| ReadError::BadRequest)?;
        return value
            .trim()
            .parse::<usize>()
            .map_err(|_| ReadError::BadRequest);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_length_absent_means_zero() {
        assert_eq!(declared_body_length(b"GET / HTTP/1.1\r\nHost: x").unwrap(), 0);
    }

    #[test]
    fn declared_length_is_case_insensitive() {
        let head = b"POST / HTTP/1.1\r\ncontent-LENGTH: 42";
        assert_eq!(declared_body_length(head).unwrap(), 42);
    }

    #[test]
    fn negative_length_is_rejected() {
        let head = b"POST / HTTP/1.1\r\nContent-Length: -5";
        assert!(matches!(
            declared_body_length(head),
            Err(ReadError::BadRequest)
        ));
    }
}
