use std::collections::HashMap;

use crate::http::reader::find_headers_end;
use crate::http::request::{Method, Request};

#[derive(Debug)]
pub enum ParseError {
    InvalidRequest,
    InvalidMethod,
    InvalidHeader,
}

/// Parses a complete, framed request buffer into a `Request`.
///
/// The buffer must already contain the header terminator and the full body
/// (the reader guarantees this). Two-phase: the terminator splits head from
/// body first, then header lines are parsed independently so body bytes never
/// participate in structural matching.
pub fn parse_request(buf: &[u8]) -> Result<Request, ParseError> {
    let headers_end = find_headers_end(buf).ok_or(ParseError::InvalidRequest)?;
    let head = std::str::from_utf8(&buf[..headers_end]).map_err(|_| ParseError::InvalidRequest)?;
    let body = buf[headers_end + 4..].to_vec();

    let mut lines = head.split("\r\n");

    // Request line: METHOD SP PATH SP HTTP/major.minor
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let parts: Vec<&str> = request_line.split(' ').collect();
    if parts.len() != 3 {
        return Err(ParseError::InvalidRequest);
    }
    let method = Method::from_str(parts[0]).ok_or(ParseError::InvalidMethod)?;
    let path = parts[1];
    let version = parts[2];
    if !is_http_version(version) {
        return Err(ParseError::InvalidRequest);
    }

    // Header lines split on the first ": "; a line without one is malformed,
    // not a crash. First occurrence of a key wins.
    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let (key, value) = line.split_once(": ").ok_or(ParseError::InvalidHeader)?;
        headers
            .entry(key.to_string())
            .or_insert_with(|| value.to_string());
    }

    Ok(Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    })
}

fn is_http_version(v: &str) -> bool {
    let Some(rest) = v.strip_prefix("HTTP/") else {
        return false;
    };
    match rest.split_once('.') {
        Some((major, minor)) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.bytes().all(|b| b.is_ascii_digit())
                && minor.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
