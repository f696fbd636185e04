use std::path::PathBuf;
use std::time::Duration;

use porter::config::Config;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.read_timeout(), Duration::from_secs(30));
    assert!(cfg.tls.is_none());
    assert_eq!(cfg.static_files.root, PathBuf::from("static"));
    assert_eq!(cfg.logs.access_log, PathBuf::from("logs/request_log.txt"));
    assert_eq!(cfg.logs.post_log, PathBuf::from("logs/post_log.txt"));
}

#[test]
fn test_config_full_yaml() {
    let yaml = r#"
server:
  listen_addr: 0.0.0.0:8443
  read_timeout_secs: 10
tls:
  cert_path: certs/server.crt
  key_path: certs/server.key
static_files:
  root: www
logs:
  access_log: var/request_log.txt
  post_log: var/post_log.txt
"#;

    let cfg = Config::from_yaml(yaml).unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:8443");
    assert_eq!(cfg.read_timeout(), Duration::from_secs(10));
    let tls = cfg.tls.unwrap();
    assert_eq!(tls.cert_path, PathBuf::from("certs/server.crt"));
    assert_eq!(tls.key_path, PathBuf::from("certs/server.key"));
    assert_eq!(cfg.static_files.root, PathBuf::from("www"));
    assert_eq!(cfg.logs.access_log, PathBuf::from("var/request_log.txt"));
    assert_eq!(cfg.logs.post_log, PathBuf::from("var/post_log.txt"));
}

#[test]
fn test_config_partial_yaml_falls_back_to_defaults() {
    let yaml = r#"
server:
  listen_addr: 0.0.0.0:3000
"#;

    let cfg = Config::from_yaml(yaml).unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    // Everything unspecified keeps its default
    assert_eq!(cfg.server.read_timeout_secs, 30);
    assert!(cfg.tls.is_none());
    assert_eq!(cfg.static_files.root, PathBuf::from("static"));
}

#[test]
fn test_config_rejects_malformed_yaml() {
    assert!(Config::from_yaml("server: [not, a, mapping]").is_err());
}
