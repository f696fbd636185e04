//! Request handlers.
//!
//! [`dispatch`] routes a parsed request by method: GET serves static files,
//! POST persists the body to the POST log, OPTIONS advertises the supported
//! methods, and everything else gets 405. Routing is a closed match over
//! [`Method`]: the method set is fixed, not extensible.
//!
//! Every handler produces a [`Response`] and writes exactly one access log
//! record for its outcome; nothing here returns an error to the session
//! loop.

pub mod post;
pub mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::logs::{self, Logs};

/// Shared collaborators every handler needs: the static asset root and the
/// two persisted log sinks. One instance is built at startup and shared
/// (behind an `Arc`) by all connection workers.
pub struct HandlerContext {
    pub static_root: PathBuf,
    pub logs: Logs,
}

/// Routes a request to its handler. Always yields a response.
pub async fn dispatch(req: &Request, peer: SocketAddr, ctx: &HandlerContext) -> Response {
    match &req.method {
        Method::Get => static_files::serve(req, peer, ctx).await,
        Method::Post => post::submit(req, peer, ctx).await,
        Method::Options => options(req, peer, ctx).await,
        Method::Other(token) => method_not_allowed(req, peer, ctx, token).await,
    }
}

/// OPTIONS: advertise the supported methods, empty body.
async fn options(req: &Request, peer: SocketAddr, ctx: &HandlerContext) -> Response {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Allowed", "GET, POST, OPTIONS")
        .build();

    ctx.logs
        .record_access(peer, &req.request_line, response.status, logs::NO_ERROR)
        .await;

    response
}

/// Any method token outside the supported set.
async fn method_not_allowed(
    req: &Request,
    peer: SocketAddr,
    ctx: &HandlerContext,
    token: &str,
) -> Response {
    tracing::debug!("Rejecting unsupported method {} from {}", token, peer);

    let response = Response::method_not_allowed();
    let annotation = format!("unsupported method {}", token);

    ctx.logs
        .record_access(peer, &req.request_line, response.status, &annotation)
        .await;

    response
}
