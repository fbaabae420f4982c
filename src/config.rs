// src/config.rs
use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_PREDICTION_ENDPOINT: &str = "http://127.0.0.1:5000/predict";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Outbound side of the relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayConfig {
    pub endpoint: String,
    /// `None` leaves the outbound call unbounded.
    pub timeout: Option<Duration>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PREDICTION_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub relay: RelayConfig,
}

impl AppConfig {
    /// Reads the process environment, loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match value("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                expected: "a port number",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout = match value("PREDICTION_TIMEOUT_MS") {
            Some(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                    key: "PREDICTION_TIMEOUT_MS",
                    expected: "a number of milliseconds",
                    value: raw,
                })?;
                Some(Duration::from_millis(ms))
            }
            None => None,
        };

        Ok(Self {
            host: value("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            static_dir: value("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            relay: RelayConfig {
                endpoint: value("PREDICTION_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_PREDICTION_ENDPOINT.to_string()),
                timeout,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// URL a human can open for the bound listener.
pub fn display_addr(addr: &SocketAddr) -> String {
    if addr.ip().is_unspecified() {
        format!("http://localhost:{}", addr.port())
    } else {
        format!("http://{addr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.host, DEFAULT_HOST);
        assert_eq!(cfg.static_dir, PathBuf::from("public"));
        assert_eq!(cfg.relay, RelayConfig::default());
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn endpoint_override_wins() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("PREDICTION_ENDPOINT", "http://model.internal/predict"),
            ("PREDICTION_TIMEOUT_MS", "2500"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(cfg.relay.endpoint, "http://model.internal/predict");
        assert_eq!(cfg.relay.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[("PREDICTION_ENDPOINT", "  ")])).unwrap();
        assert_eq!(cfg.relay.endpoint, DEFAULT_PREDICTION_ENDPOINT);
    }

    #[test]
    fn malformed_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn malformed_timeout_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PREDICTION_TIMEOUT_MS", "-1")])).unwrap_err();
        assert!(err.to_string().contains("PREDICTION_TIMEOUT_MS"));
    }

    #[test]
    fn unspecified_address_displays_as_localhost() {
        let addr: SocketAddr = "0.0.0.0:3000".parse().unwrap();
        assert_eq!(display_addr(&addr), "http://localhost:3000");
    }
}
