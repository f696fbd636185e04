use std::sync::Arc;
use std::time::Duration;

use porter::config::Config;
use porter::handler::HandlerContext;
use porter::logs::Logs;
use porter::server::{ServerState, listener};

/// In-flight connections get this long to finish after a shutdown signal.
const DRAIN_DEADLINE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let Some((host, port)) = parse_args() else {
        let program = std::env::args().next().unwrap_or_else(|| "porter".to_string());
        eprintln!("Usage: {} <host> <port>", program);
        std::process::exit(1);
    };

    let mut cfg = Config::load()?;
    cfg.server.listen_addr = format!("{}:{}", host, port);

    let logs = Logs::open(&cfg.logs).await?;
    let ctx = Arc::new(HandlerContext {
        static_root: cfg.static_files.root.clone(),
        logs,
    });
    let state = Arc::new(ServerState::default());

    tokio::select! {
        res = listener::run(&cfg, ctx, state.clone()) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    // The listener is gone; give in-flight connections a bounded window to
    // finish their current request/response cycle.
    let deadline = tokio::time::Instant::now() + DRAIN_DEADLINE;
    while state.active_connections() > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    Ok(())
}

fn parse_args() -> Option<(String, u16)> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        return None;
    }

    let host = args[1].clone();
    let port = args[2].parse::<u16>().ok()?;
    Some((host, port))
}
