use std::net::SocketAddr;

use crate::handler::HandlerContext;
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::logs;

/// Request head (request line + headers + terminator) size cap in bytes.
const MAX_HEAD_BYTES: usize = 8192;

/// POST body size cap in bytes.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// POST: validate the submission and append it to the POST log.
///
/// The checks run in a fixed order and the first failure wins, so a given
/// malformed shape always maps to the same status:
/// 1. oversized head → 413
/// 2. missing/zero Content-Length or blank body → 411
/// 3. declared Content-Length ≠ actual body length → 400
/// 4. body over the 1 MiB cap → 413
pub async fn submit(req: &Request, peer: SocketAddr, ctx: &HandlerContext) -> Response {
    if req.head_len > MAX_HEAD_BYTES {
        return reject(
            req,
            peer,
            ctx,
            Response::payload_too_large("header too large"),
            "header too large",
        )
        .await;
    }

    let body_text = String::from_utf8_lossy(&req.body);

    if req.content_length() == 0 || body_text.trim().is_empty() {
        return reject(req, peer, ctx, Response::length_required(), "empty body").await;
    }

    if req.content_length() != req.body.len() {
        return reject(
            req,
            peer,
            ctx,
            Response::bad_request(),
            "content length mismatch",
        )
        .await;
    }

    if req.body.len() > MAX_BODY_BYTES {
        return reject(
            req,
            peer,
            ctx,
            Response::payload_too_large("body exceeds max size"),
            "body exceeds max size",
        )
        .await;
    }

    match ctx.logs.record_post(peer, &body_text).await {
        Ok(()) => {
            let response = Response::text(StatusCode::Ok, "Data Logged");
            ctx.logs
                .record_access(peer, &req.request_line, response.status, logs::NO_ERROR)
                .await;
            response
        }
        Err(e) => {
            // Do not confirm a submission that was never persisted
            tracing::error!("Failed to append POST log record: {}", e);

            let response = Response::internal_error();
            ctx.logs
                .record_access(peer, &req.request_line, response.status, "post log write failed")
                .await;
            response
        }
    }
}

async fn reject(
    req: &Request,
    peer: SocketAddr,
    ctx: &HandlerContext,
    response: Response,
    annotation: &str,
) -> Response {
    ctx.logs
        .record_access(peer, &req.request_line, response.status, annotation)
        .await;
    response
}
