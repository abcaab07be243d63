//! API server configuration.

use std::fmt;

use payman_core::{Environment, PaymanConfig};

use crate::error::{AppError, AppResult};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Configuration for the API server.
#[derive(Clone)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8000").
    pub bind_addr: String,
    /// Payman OAuth client id.
    pub client_id: String,
    /// Payman OAuth client secret.
    pub client_secret: String,
    /// Payman deployment to relay to.
    pub environment: Environment,
    /// Overrides the environment's base URL when set.
    pub base_url: Option<String>,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable               | Default     |
    /// |------------------------|-------------|
    /// | `PAYMAN_CLIENT_ID`     | required    |
    /// | `PAYMAN_CLIENT_SECRET` | required    |
    /// | `HOST`                 | `0.0.0.0`   |
    /// | `PORT`                 | `8000`      |
    /// | `PAYMAN_ENVIRONMENT`   | `sandbox`   |
    /// | `PAYMAN_BASE_URL`      | unset       |
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            var(key).ok_or_else(|| AppError::Config(format!("{key} is not set")))
        };

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("PORT must be a port number: {e}")))?,
            None => DEFAULT_PORT,
        };
        let environment = match var("PAYMAN_ENVIRONMENT") {
            Some(raw) => raw
                .parse::<Environment>()
                .map_err(|e| AppError::Config(e.to_string()))?,
            None => Environment::default(),
        };

        Ok(Self {
            bind_addr: format!("{host}:{port}"),
            client_id: required("PAYMAN_CLIENT_ID")?,
            client_secret: required("PAYMAN_CLIENT_SECRET")?,
            environment,
            base_url: var("PAYMAN_BASE_URL"),
        })
    }

    /// Upstream base URL: the explicit override, else the environment's.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    /// Client configuration for one request.
    ///
    /// An empty `session_id` counts as absent.
    pub fn payman_config(&self, session_id: Option<&str>) -> PaymanConfig {
        let config = PaymanConfig::new(&self.client_id, &self.client_secret);
        match session_id.filter(|id| !id.is_empty()) {
            Some(id) => config.with_session_id(id),
            None => config,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("PAYMAN_CLIENT_ID", "id"),
            ("PAYMAN_CLIENT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.base_url(), Environment::Sandbox.base_url());
    }

    #[test]
    fn overrides_apply() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("PAYMAN_CLIENT_ID", "id"),
            ("PAYMAN_CLIENT_SECRET", "secret"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9100"),
            ("PAYMAN_ENVIRONMENT", "live"),
            ("PAYMAN_BASE_URL", "http://localhost:4000"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9100");
        assert_eq!(config.environment, Environment::Live);
        assert_eq!(config.base_url(), "http://localhost:4000");
    }

    #[test]
    fn missing_secret_is_config_error() {
        let err = ApiConfig::from_lookup(lookup(&[("PAYMAN_CLIENT_ID", "id")])).unwrap_err();
        match err {
            AppError::Config(msg) => assert!(msg.contains("PAYMAN_CLIENT_SECRET")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn blank_client_id_is_missing() {
        let err = ApiConfig::from_lookup(lookup(&[
            ("PAYMAN_CLIENT_ID", "  "),
            ("PAYMAN_CLIENT_SECRET", "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn bad_port_rejected() {
        let err = ApiConfig::from_lookup(lookup(&[
            ("PAYMAN_CLIENT_ID", "id"),
            ("PAYMAN_CLIENT_SECRET", "secret"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn payman_config_carries_session_only_when_given() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("PAYMAN_CLIENT_ID", "id"),
            ("PAYMAN_CLIENT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.payman_config(None), PaymanConfig::new("id", "secret"));
        assert_eq!(config.payman_config(Some("")).session_id, None);
        assert_eq!(
            config.payman_config(Some("abc123")).session_id.as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn debug_redacts_secret() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("PAYMAN_CLIENT_ID", "id"),
            ("PAYMAN_CLIENT_SECRET", "hunter2"),
        ]))
        .unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
