#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use porter::config::LogConfig;
use porter::handler::HandlerContext;
use porter::logs::Logs;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub struct TestEnv {
    pub ctx: Arc<HandlerContext>,
    pub static_root: PathBuf,
    pub access_log: PathBuf,
    pub post_log: PathBuf,
}

/// Builds a fresh handler context over per-test temp directories: an empty
/// static root plus access/POST log paths whose parent directory does not
/// exist yet (the sinks must create it).
pub async fn test_env(tag: &str) -> TestEnv {
    let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
    let base = std::env::temp_dir().join(format!(
        "porter-{}-{}-{}",
        tag,
        std::process::id(),
        id
    ));
    let static_root = base.join("static");
    std::fs::create_dir_all(&static_root).unwrap();

    let access_log = base.join("logs").join("request_log.txt");
    let post_log = base.join("logs").join("post_log.txt");

    let logs = Logs::open(&LogConfig {
        access_log: access_log.clone(),
        post_log: post_log.clone(),
    })
    .await
    .unwrap();

    TestEnv {
        ctx: Arc::new(HandlerContext {
            static_root: static_root.clone(),
            logs,
        }),
        static_root,
        access_log,
        post_log,
    }
}

pub fn peer() -> SocketAddr {
    "127.0.0.1:54321".parse().unwrap()
}
