use k9server::http::parser::{ParseError, parse_request};
use k9server::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert!(parsed.body.is_empty());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /api HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.path, "/api");
    assert_eq!(parsed.body, b"hello".to_vec());
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert_eq!(parsed.headers.get("User-Agent").unwrap(), "test-client");
    assert_eq!(parsed.headers.get("Accept").unwrap(), "*/*");
}

#[test]
fn test_parse_keeps_query_string_in_path() {
    let req = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    // Query stripping is the dispatcher's job, not the parser's
    assert_eq!(parsed.path, "/search?q=rust");
}

#[test]
fn test_parse_unrecognized_method_token() {
    let req = b"FOO /x HTTP/1.1\r\n\r\n";
    let result = parse_request(req);

    assert!(matches!(result, Err(ParseError::InvalidMethod)));
}

#[test]
fn test_parse_lowercase_method_rejected() {
    let req = b"get / HTTP/1.1\r\n\r\n";
    assert!(matches!(parse_request(req), Err(ParseError::InvalidMethod)));
}

#[test]
fn test_parse_malformed_request_line() {
    let req = b"GET /\r\n\r\n";
    assert!(matches!(parse_request(req), Err(ParseError::InvalidRequest)));
}

#[test]
fn test_parse_malformed_version() {
    let req = b"GET / HTTP/1x\r\n\r\n";
    assert!(matches!(parse_request(req), Err(ParseError::InvalidRequest)));
}

#[test]
fn test_parse_malformed_header_without_separator() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";
    let result = parse_request(req);

    assert!(matches!(result, Err(ParseError::InvalidHeader)));
}

#[test]
fn test_parse_header_without_space_after_colon() {
    // The grammar requires ": ", so "Key:value" is malformed input
    let req = b"GET / HTTP/1.1\r\nHost:example.com\r\n\r\n";
    assert!(matches!(parse_request(req), Err(ParseError::InvalidHeader)));
}

#[test]
fn test_parse_all_recognized_methods() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("HEAD", Method::HEAD),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("CONNECT", Method::CONNECT),
        ("OPTIONS", Method::OPTIONS),
        ("TRACE", Method::TRACE),
        ("PATCH", Method::PATCH),
    ];

    for (method_str, expected_method) in methods {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method_str);
        let parsed = parse_request(req.as_bytes()).unwrap();
        assert_eq!(parsed.method, expected_method);
    }
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 2, 3]);
}

#[test]
fn test_parse_header_keys_are_case_sensitive() {
    let req = b"GET / HTTP/1.1\r\ncontent-type: application/json\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert!(parsed.headers.contains_key("content-type"));
    assert!(!parsed.headers.contains_key("Content-Type"));
}

#[test]
fn test_parse_duplicate_header_first_occurrence_wins() {
    let req = b"GET / HTTP/1.1\r\nX-Tag: first\r\nX-Tag: second\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.headers.get("X-Tag").unwrap(), "first");
}

#[test]
fn test_parse_header_value_may_contain_colons() {
    let req = b"GET / HTTP/1.1\r\nReferer: http://example.com/a\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.headers.get("Referer").unwrap(), "http://example.com/a");
}
