use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use axum::http::HeaderValue;

/// Origin list value meaning "accept any origin".
pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `8000`    |
    /// | `CORS_ORIGINS`         | `*`       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or(&lookup, "HOST", "an IP address", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or(&lookup, "PORT", "a valid u16", 8000)?;
        let request_timeout_secs =
            parse_or(&lookup, "REQUEST_TIMEOUT_SECS", "a positive integer", 30)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| ANY_ORIGIN.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if let Some(bad) = cors_origins
            .iter()
            .find(|o| o.as_str() != ANY_ORIGIN && HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::Invalid {
                key: "CORS_ORIGINS",
                expected: "a comma-separated list of origins",
                value: bad.clone(),
            });
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether CORS should accept requests from any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value: raw,
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.allows_any_origin());
    }

    #[test]
    fn origin_list_is_split_and_trimmed() {
        let config = ServerConfig::from_lookup(lookup_from(&[(
            "CORS_ORIGINS",
            "http://localhost:5173, https://estimates.example.com ,",
        )]))
        .unwrap();
        assert_eq!(
            config.cors_origins,
            ["http://localhost:5173", "https://estimates.example.com"]
        );
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn invalid_port_is_reported_with_key() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("PORT") && msg.contains("eighty"), "got: {msg}");
    }

    #[test]
    fn invalid_host_is_rejected() {
        assert!(ServerConfig::from_lookup(lookup_from(&[("HOST", "not a host")])).is_err());
    }

    #[test]
    fn origin_with_control_characters_is_rejected() {
        let err =
            ServerConfig::from_lookup(lookup_from(&[("CORS_ORIGINS", "http://ok.example\u{7}")]))
                .unwrap_err();
        assert!(err.to_string().contains("CORS_ORIGINS"));
    }
}
