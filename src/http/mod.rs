//! HTTP protocol implementation.
//!
//! This module implements a hand-rolled HTTP/1.1 server layer with support
//! for explicit keep-alive connections.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and header accessors
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: Content-Type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received          Malformed / stalled
//!               ▼                           requests short-circuit
//!        ┌──────────────────┐               to Writing with a 400
//!        │   Processing     │ ← Dispatch to a handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Connection: keep-alive → Reading (same connection)
//!               └─ anything else → Closed
//! ```
//!
//! A connection is reused only on an explicit `Connection: keep-alive`;
//! a missing header closes it (see [`request::Request::keep_alive`]).

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
