//! Persisted access and POST logs.
//!
//! These are product artifacts, not diagnostics: every handled request
//! appends one record to the access log, and every accepted POST body is
//! persisted verbatim to the POST log. Both files are append-only and
//! shared across all connection workers, so each file handle sits behind a
//! mutex and records are written whole. Concurrent workers can interleave
//! records, never bytes within one record.

use std::net::SocketAddr;
use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::config::LogConfig;
use crate::http::response::StatusCode;

/// Annotation recorded for requests that completed without an error.
pub const NO_ERROR: &str = "NONE";

/// Width of the dashed line separating POST log blocks.
const POST_SEPARATOR_WIDTH: usize = 60;

/// One append-only log file behind a mutex.
pub struct LogFile {
    file: Mutex<File>,
}

impl LogFile {
    /// Opens `path` for appending, creating it and any missing parent
    /// directories on demand.
    pub async fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("opening log file {}", path.display()))?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one record. The lock is held across the whole write so
    /// records from concurrent workers never interleave.
    pub async fn append(&self, record: &str) -> std::io::Result<()> {
        let mut file = self.file.lock().await;
        file.write_all(record.as_bytes()).await?;
        file.flush().await
    }
}

/// The two shared log sinks, handed to every connection worker.
pub struct Logs {
    access: LogFile,
    post: LogFile,
}

impl Logs {
    pub async fn open(cfg: &LogConfig) -> anyhow::Result<Self> {
        Ok(Self {
            access: LogFile::open(&cfg.access_log).await?,
            post: LogFile::open(&cfg.post_log).await?,
        })
    }

    /// Records one handled request: timestamp, peer, request line, status,
    /// and an error annotation ([`NO_ERROR`] when the request succeeded).
    ///
    /// Best-effort: an append failure is traced and swallowed, the response
    /// to the client stands either way.
    pub async fn record_access(
        &self,
        peer: SocketAddr,
        request_line: &str,
        status: StatusCode,
        error: &str,
    ) {
        let record = format!(
            "[{}] {} \"{}\" {} {}\n",
            httpdate::fmt_http_date(SystemTime::now()),
            peer,
            request_line,
            status.as_u16(),
            error,
        );

        if let Err(e) = self.access.append(&record).await {
            tracing::warn!("Failed to append access log record: {}", e);
        }
    }

    /// Persists one accepted POST body as a timestamped block.
    ///
    /// Unlike access records this append must succeed: the handler only
    /// confirms "Data Logged" to the client if it did.
    pub async fn record_post(&self, peer: SocketAddr, body: &str) -> std::io::Result<()> {
        let record = format!(
            "{} - {}:\n{}\n{}\n",
            httpdate::fmt_http_date(SystemTime::now()),
            peer,
            body,
            "-".repeat(POST_SEPARATOR_WIDTH),
        );

        self.post.append(&record).await
    }
}
