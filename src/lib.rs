//! Porter - Minimal HTTP/1.1 Static File and POST Logging Server
//!
//! Core library: wire-level HTTP parsing, the per-connection session loop,
//! static file serving, POST body logging, and persisted access logs.

pub mod config;
pub mod handler;
pub mod http;
pub mod logs;
pub mod server;
