use crate::http::request::{Method, Request};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The request head is not valid UTF-8 or is structurally broken
    InvalidRequest,
    /// The request line does not hold exactly method, target and version
    InvalidRequestLine,
    /// A header line has no `:` separator
    InvalidHeader,
    /// HTTP/1.1 requires a Host header
    MissingHost,
    /// Content-Length is not a non-negative integer
    InvalidContentLength,
    /// More bytes are needed before a request can be assembled
    Incomplete,
}

impl ParseError {
    /// Short annotation recorded in the access log for this failure.
    pub fn describe(&self) -> &'static str {
        match self {
            ParseError::InvalidRequest => "malformed request",
            ParseError::InvalidRequestLine => "malformed request line",
            ParseError::InvalidHeader => "malformed header",
            ParseError::MissingHost => "missing Host header",
            ParseError::InvalidContentLength => "invalid Content-Length",
            ParseError::Incomplete => "incomplete request",
        }
    }
}

/// Parses one HTTP/1.1 request out of `buf`.
///
/// Returns the request plus the number of bytes it consumed, so the caller
/// can drop exactly that prefix and leave any following bytes (the start of
/// a pipelined next request) untouched in the buffer.
///
/// `Err(ParseError::Incomplete)` means the buffer does not yet hold the
/// whole head or the whole declared body; every other error is structural
/// and answered with 400.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    // Look for the header/body separator before interpreting anything
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str = std::str::from_utf8(header_bytes).map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line: exactly three tokens, no more, no fewer
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let tokens: Vec<&str> = request_line.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(ParseError::InvalidRequestLine);
    }
    let (method_str, path, version) = (tokens[0], tokens[1], tokens[2]);

    let method = Method::from_token(method_str);

    // Headers: keys lower-cased, both sides trimmed, last duplicate wins
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;

        headers.insert(
            key.trim().to_ascii_lowercase(),
            value.trim().to_string(),
        );
    }

    if !headers.contains_key("host") {
        return Err(ParseError::MissingHost);
    }

    // Body
    let content_length = headers
        .get("content-length")
        .map(|v| v.parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?
        .unwrap_or(0);

    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let body = body_bytes[..content_length].to_vec();
    let head_len = headers_end + 4;

    let request = Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
        head_len,
        request_line: request_line.to_string(),
    };

    let total_consumed = head_len + content_length;
    Ok((request, total_consumed))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
