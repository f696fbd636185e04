use porter::http::parser::{ParseError, parse_http_request};
use porter::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::Get);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.request_line, "GET / HTTP/1.1");
    assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /submit HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::Post);
    assert_eq!(parsed.path, "/submit");
    assert_eq!(parsed.body, b"hello".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
    assert_eq!(parsed.headers.get("user-agent").unwrap(), "test-client");
    assert_eq!(parsed.headers.get("accept").unwrap(), "*/*");
}

#[test]
fn test_parse_header_keys_lowercased() {
    let req = b"GET / HTTP/1.1\r\nHOST: example.com\r\nContent-TYPE: text/plain\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
    assert_eq!(parsed.headers.get("content-type").unwrap(), "text/plain");
}

#[test]
fn test_parse_duplicate_header_last_wins() {
    let req = b"GET / HTTP/1.1\r\nHost: first\r\nHost: second\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("host").unwrap(), "second");
}

#[test]
fn test_parse_request_with_path_and_query_string() {
    let req = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/search?q=rust");
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_incomplete_request_partial_body() {
    let req = b"POST /submit HTTP/1.1\r\nHost: x\r\nContent-Length: 10\r\n\r\nhello";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_request_line_too_few_tokens() {
    let req = b"GET /\r\nHost: x\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
}

#[test]
fn test_parse_request_line_too_many_tokens() {
    let req = b"GET / HTTP/1.1 extra\r\nHost: x\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
}

#[test]
fn test_parse_malformed_header() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidHeader)));
}

#[test]
fn test_parse_missing_host_rejected() {
    let req = b"GET / HTTP/1.1\r\nAccept: */*\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::MissingHost)));
}

#[test]
fn test_parse_invalid_content_length() {
    let req = b"POST /submit HTTP/1.1\r\nHost: x\r\nContent-Length: abc\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidContentLength)));
}

#[test]
fn test_parse_unknown_method_is_not_a_parse_error() {
    // DELETE parses fine; the dispatcher answers it with 405
    let req = b"DELETE /x HTTP/1.1\r\nHost: x\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::Other("DELETE".to_string()));
}

#[test]
fn test_parse_request_with_empty_body() {
    let req = b"POST /submit HTTP/1.1\r\nHost: x\r\nContent-Length: 0\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body.len(), 0);
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /upload HTTP/1.1\r\nHost: x\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 2, 3]);
}

#[test]
fn test_parse_leaves_pipelined_bytes_unconsumed() {
    // Bytes past the declared Content-Length belong to the next request
    let req = b"POST /submit HTTP/1.1\r\nHost: x\r\nContent-Length: 2\r\n\r\nhiGET / HT";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"hi".to_vec());
    assert_eq!(consumed, req.len() - b"GET / HT".len());
}

#[test]
fn test_parse_head_len_counts_through_terminator() {
    let req = b"POST /submit HTTP/1.1\r\nHost: x\r\nContent-Length: 5\r\n\r\nhello";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.head_len, req.len() - 5);
}

#[test]
fn test_parse_header_values_trimmed() {
    let req = b"GET / HTTP/1.1\r\nHost:   example.com   \r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
}
