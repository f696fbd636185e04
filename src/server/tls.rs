//! TLS termination.
//!
//! Credentials are plain PEM files named in the config. Loading happens
//! once at startup and any failure there is fatal; the server never starts
//! half-configured.

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use anyhow::Context;
use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls;

use crate::config::TlsConfig;

/// Builds a TLS acceptor from the configured certificate chain and private
/// key.
pub fn build_acceptor(cfg: &TlsConfig) -> anyhow::Result<TlsAcceptor> {
    let certs = rustls_pemfile::certs(&mut BufReader::new(
        File::open(&cfg.cert_path)
            .with_context(|| format!("opening TLS certificate {}", cfg.cert_path.display()))?,
    ))
    .collect::<Result<Vec<_>, _>>()
    .with_context(|| format!("reading TLS certificate {}", cfg.cert_path.display()))?;

    if certs.is_empty() {
        anyhow::bail!("no certificates found in {}", cfg.cert_path.display());
    }

    let key = rustls_pemfile::private_key(&mut BufReader::new(
        File::open(&cfg.key_path)
            .with_context(|| format!("opening TLS key {}", cfg.key_path.display()))?,
    ))
    .with_context(|| format!("reading TLS key {}", cfg.key_path.display()))?
    .with_context(|| format!("no private key found in {}", cfg.key_path.display()))?;

    let config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("building TLS server config")?;

    Ok(TlsAcceptor::from(Arc::new(config)))
}
