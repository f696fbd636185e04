use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming the YAML config file to load.
pub const CONFIG_ENV: &str = "PORTER_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "porter.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    /// TLS termination is enabled when this section is present; both paths
    /// must then point at readable PEM files or startup aborts.
    pub tls: Option<TlsConfig>,
    pub static_files: StaticFilesConfig,
    pub logs: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Idle/read timeout per connection, in seconds.
    pub read_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub access_log: PathBuf,
    pub post_log: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            tls: None,
            static_files: StaticFilesConfig::default(),
            logs: LogConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            read_timeout_secs: 30,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("static"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            access_log: PathBuf::from("logs/request_log.txt"),
            post_log: PathBuf::from("logs/post_log.txt"),
        }
    }
}

impl Config {
    /// Loads the config file named by `PORTER_CONFIG` (default
    /// `porter.yaml`). A missing file yields the built-in defaults; an
    /// unreadable or unparseable one is a startup error.
    pub fn load() -> anyhow::Result<Self> {
        let path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_yaml(&text).with_context(|| format!("parsing {}", path)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("reading {}", path)),
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.server.read_timeout_secs)
    }
}
