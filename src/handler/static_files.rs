use std::net::SocketAddr;

use crate::handler::HandlerContext;
use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::logs;

/// Maps a request target to the relative path served from the asset root.
///
/// `/` and the empty target become `index.html`; a leading `/` is stripped.
/// Targets containing `..` are rejected outright. This runs before any
/// filesystem access, so traversal attempts never touch the disk.
pub fn normalize_target(target: &str) -> Option<String> {
    if target.contains("..") {
        return None;
    }

    let trimmed = target.trim_start_matches('/');
    if trimmed.is_empty() {
        Some("index.html".to_string())
    } else {
        Some(trimmed.to_string())
    }
}

/// GET: serve a file from the static asset root.
pub async fn serve(req: &Request, peer: SocketAddr, ctx: &HandlerContext) -> Response {
    let Some(relative) = normalize_target(&req.path) else {
        let response = Response::bad_request();
        ctx.logs
            .record_access(peer, &req.request_line, response.status, "path traversal rejected")
            .await;
        return response;
    };

    let mut full_path = ctx.static_root.join(&relative);

    // A directory target is answered with its index page
    if let Ok(meta) = tokio::fs::metadata(&full_path).await {
        if meta.is_dir() {
            full_path.push("index.html");
        }
    }

    match tokio::fs::read(&full_path).await {
        Ok(bytes) => {
            tracing::debug!("Serving {} to {}", full_path.display(), peer);

            let response = Response::ok(mime::from_path(&full_path), bytes);
            ctx.logs
                .record_access(peer, &req.request_line, response.status, logs::NO_ERROR)
                .await;
            response
        }
        Err(_) => {
            let response = Response::not_found();
            ctx.logs
                .record_access(peer, &req.request_line, response.status, "file not found")
                .await;
            response
        }
    }
}
