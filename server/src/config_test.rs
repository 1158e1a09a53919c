use std::collections::HashMap;

use super::*;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_vars_uses_defaults() {
    let cfg = ServerConfig::from_vars(vars(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
    assert_eq!(cfg.backend_timeout_secs, DEFAULT_BACKEND_TIMEOUT_SECS);
}

#[test]
fn from_vars_parses_overrides_and_trims_backend_slash() {
    let cfg = ServerConfig::from_vars(vars(&[
        ("PORT", "8080"),
        ("BACKEND_URL", "https://api.example.test/"),
        ("BACKEND_TIMEOUT_SECS", "5"),
    ]))
    .unwrap();
    assert_eq!(cfg, ServerConfig { port: 8080, backend_url: "https://api.example.test".into(), backend_timeout_secs: 5 });
}

#[test]
fn from_vars_rejects_bad_port() {
    assert_eq!(ServerConfig::from_vars(vars(&[("PORT", "http")])), Err(ConfigError::InvalidPort("http".into())));
}

#[test]
fn from_vars_rejects_non_http_backend() {
    let err = ServerConfig::from_vars(vars(&[("BACKEND_URL", "ftp://files")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidBackendUrl("ftp://files".into()));
}

#[test]
fn from_vars_ignores_zero_or_garbage_timeout() {
    let zero = ServerConfig::from_vars(vars(&[("BACKEND_TIMEOUT_SECS", "0")])).unwrap();
    assert_eq!(zero.backend_timeout_secs, DEFAULT_BACKEND_TIMEOUT_SECS);
    let junk = ServerConfig::from_vars(vars(&[("BACKEND_TIMEOUT_SECS", "soon")])).unwrap();
    assert_eq!(junk.backend_timeout_secs, DEFAULT_BACKEND_TIMEOUT_SECS);
}
