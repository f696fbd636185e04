use std::collections::HashMap;
use std::fmt;

/// HTTP request methods.
///
/// The server implements GET, POST and OPTIONS. Every other token still
/// parses (as [`Method::Other`]) so the dispatcher can answer it with
/// 405 Method Not Allowed instead of dropping the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a static file
    Get,
    /// POST - Submit a body to be logged
    Post,
    /// OPTIONS - Describe the supported methods
    Options,
    /// Any other method token, carried verbatim for logging
    Other(String),
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Tokens are matched case-sensitively, as the wire grammar requires
    /// uppercase method names; anything unrecognized becomes
    /// [`Method::Other`].
    ///
    /// # Example
    ///
    /// ```
    /// # use porter::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::Get);
    /// assert_eq!(Method::from_token("DELETE"), Method::Other("DELETE".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "OPTIONS" => Method::Options,
            other => Method::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Options => write!(f, "OPTIONS"),
            Method::Other(token) => write!(f, "{}", token),
        }
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Contains all information extracted from the request line and headers.
/// Construction is all-or-nothing: the parser either produces a complete
/// `Request` or fails with a parse error, never a partial one.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, OPTIONS, or an unsupported token)
    pub method: Method,
    /// The request target as sent (e.g., "/index.html")
    pub path: String,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Request headers. Keys are lower-cased at parse time; when a header
    /// repeats, the last value wins.
    pub headers: HashMap<String, String>,
    /// Request body for POST requests
    pub body: Vec<u8>,
    /// Byte length of the request line + header block + terminator,
    /// checked against the header size cap for POST
    pub head_len: usize,
    /// The original request line, kept verbatim for access logging
    pub request_line: String,
}

impl Request {
    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Retrieves the Content-Length header value and parses it as a usize.
    ///
    /// Returns 0 if the header is missing. The parser has already rejected
    /// non-numeric values, so requests reaching a handler never carry one.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// Only an explicit `Connection: keep-alive` (case-insensitive) keeps the
    /// connection open. A missing header closes it, a deliberate deviation
    /// from RFC 9112 (where HTTP/1.1 defaults to persistent connections):
    /// clients must opt in.
    pub fn keep_alive(&self) -> bool {
        self.header("Connection")
            .map(|v| v.eq_ignore_ascii_case("keep-alive"))
            .unwrap_or(false)
    }
}
