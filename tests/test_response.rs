use k9server::http::response::{ResponseBuilder, StatusCode};
use k9server::http::writer::{ResponseWriter, serialize_response};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::OK.as_u16(), 200);
    assert_eq!(StatusCode::MOVED_PERMANENTLY.as_u16(), 301);
    assert_eq!(StatusCode::FOUND.as_u16(), 302);
    assert_eq!(StatusCode::BAD_REQUEST.as_u16(), 400);
    assert_eq!(StatusCode::FORBIDDEN.as_u16(), 403);
    assert_eq!(StatusCode::NOT_FOUND.as_u16(), 404);
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED.as_u16(), 405);
    assert_eq!(StatusCode::REQUEST_TIMEOUT.as_u16(), 408);
    assert_eq!(StatusCode::CLIENT_CLOSED_REQUEST.as_u16(), 499);
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), 500);
    assert_eq!(StatusCode::NOT_IMPLEMENTED.as_u16(), 501);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::OK.reason_phrase(), "OK");
    assert_eq!(StatusCode::FORBIDDEN.reason_phrase(), "Forbidden");
    assert_eq!(StatusCode::NOT_FOUND.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::CLIENT_CLOSED_REQUEST.reason_phrase(),
        "Client Closed Request"
    );
    assert_eq!(
        StatusCode::HTTP_VERSION_NOT_SUPPORTED.reason_phrase(),
        "HTTP Version Not Supported"
    );
}

#[test]
fn test_unknown_status_code_renders_unknown_error() {
    assert_eq!(StatusCode::from_u16(201).reason_phrase(), "Unknown Error");
    assert_eq!(StatusCode::from_u16(599).reason_phrase(), "Unknown Error");
}

#[test]
fn test_status_code_classification() {
    assert!(StatusCode::MOVED_PERMANENTLY.is_redirect());
    assert!(StatusCode::FOUND.is_redirect());
    assert!(!StatusCode::OK.is_redirect());
    assert!(StatusCode::BAD_REQUEST.is_error());
    assert!(!StatusCode::from_u16(201).is_error());
    assert!(!StatusCode::FOUND.is_error());
    assert!(StatusCode::OK.is_success());
    assert!(StatusCode::from_u16(201).is_success());
    assert!(!StatusCode::SEE_OTHER.is_success());
    assert!(!StatusCode::NOT_FOUND.is_success());
}

#[test]
fn test_builder_sets_exact_content_length_and_server() {
    let response = ResponseBuilder::new(StatusCode::OK)
        .body(b"This is the body".to_vec())
        .build();

    assert_eq!(response.headers.get("Content-Length").unwrap(), "16");
    assert_eq!(response.headers.get("Server").unwrap(), "K9Server");
    assert_eq!(response.headers.get("Content-Type").unwrap(), "text/plain");
}

#[test]
fn test_builder_keeps_explicit_content_type() {
    let response = ResponseBuilder::new(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(b"{}".to_vec())
        .build();

    assert_eq!(
        response.headers.get("Content-Type").unwrap(),
        "application/json"
    );
}

#[test]
fn test_serialize_status_line_and_terminators() {
    let response = ResponseBuilder::new(StatusCode::NOT_FOUND)
        .header("Content-Type", "text/html")
        .body(b"gone".to_vec())
        .build();

    let wire = serialize_response(&response);
    let text = String::from_utf8(wire).unwrap();

    assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(text.contains("\r\n\r\ngone"));
    assert!(text.contains("Content-Length: 4\r\n"));
}

#[test]
fn test_serialize_echoes_request_protocol() {
    let response = ResponseBuilder::new(StatusCode::OK)
        .version("HTTP/1.0")
        .build();

    let wire = serialize_response(&response);
    assert!(wire.starts_with(b"HTTP/1.0 200 OK\r\n"));
}

#[test]
fn test_serialize_unknown_status() {
    let response = ResponseBuilder::new(StatusCode::from_u16(201))
        .body(b"ok".to_vec())
        .build();

    let wire = serialize_response(&response);
    assert!(wire.starts_with(b"HTTP/1.1 201 Unknown Error\r\n"));
}

#[test]
fn test_serialize_location_header_for_redirect() {
    let response = ResponseBuilder::new(StatusCode::MOVED_PERMANENTLY)
        .header("Location", "/new")
        .build();

    let wire = String::from_utf8(serialize_response(&response)).unwrap();
    assert!(wire.starts_with("HTTP/1.1 301 Moved Permanently\r\n"));
    assert!(wire.contains("Location: /new\r\n"));
}

#[tokio::test]
async fn test_writer_writes_full_serialized_response() {
    let response = ResponseBuilder::new(StatusCode::OK)
        .header("Content-Type", "text/html")
        .body(b"<h1>hi</h1>".to_vec())
        .build();

    let mut sink: Vec<u8> = Vec::new();
    let mut writer = ResponseWriter::new(&response);
    writer.write_to_stream(&mut sink).await.unwrap();

    assert_eq!(sink, serialize_response(&response));
}
