use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{error, info};

use crate::config::Config;
use crate::handler::HandlerContext;
use crate::http::connection::Connection;
use crate::server::{ServerState, tls};

/// Binds the configured address and serves until the future is dropped.
///
/// Bind failure and unusable TLS credentials are fatal; everything after
/// that survives individual accept and connection errors.
pub async fn run(cfg: &Config, ctx: Arc<HandlerContext>, state: Arc<ServerState>) -> anyhow::Result<()> {
    let acceptor = cfg.tls.as_ref().map(tls::build_acceptor).transpose()?;

    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.server.listen_addr))?;
    info!(
        "Listening on {}{}",
        cfg.server.listen_addr,
        if acceptor.is_some() { " (TLS)" } else { "" }
    );

    serve(listener, acceptor, ctx, state, cfg.read_timeout()).await
}

/// Accept loop over an already-bound listener; split out from [`run`] so
/// tests can bind an ephemeral port themselves.
pub async fn serve(
    listener: TcpListener,
    acceptor: Option<TlsAcceptor>,
    ctx: Arc<HandlerContext>,
    state: Arc<ServerState>,
    read_timeout: Duration,
) -> anyhow::Result<()> {
    loop {
        // Accept errors are per-connection; the listener keeps going
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Accept failed: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let ctx = ctx.clone();
        let state = state.clone();
        let acceptor = acceptor.clone();
        state.connection_opened();

        tokio::spawn(async move {
            let result = match acceptor {
                Some(acceptor) => match acceptor.accept(socket).await {
                    Ok(stream) => {
                        Connection::new(stream, peer, ctx, read_timeout).run().await
                    }
                    Err(e) => Err(anyhow::anyhow!("TLS handshake failed: {}", e)),
                },
                None => Connection::new(socket, peer, ctx, read_timeout).run().await,
            };

            if let Err(e) = result {
                error!("Connection error from {}: {}", peer, e);
            }
            state.connection_closed();
        });
    }
}
