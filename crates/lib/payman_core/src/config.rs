//! Client configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::PaymanError;

const SANDBOX_BASE_URL: &str = "https://agent.payman.dev";
const LIVE_BASE_URL: &str = "https://agent.payman.ai";

/// Payman deployment a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Test deployment; no real money moves.
    #[default]
    Sandbox,
    Live,
}

impl Environment {
    /// Base URL of the deployment, without a trailing slash.
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Live => LIVE_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = PaymanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "test" => Ok(Environment::Sandbox),
            "live" | "production" => Ok(Environment::Live),
            other => Err(PaymanError::Config(format!(
                "unknown Payman environment: {other}"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => f.write_str("sandbox"),
            Environment::Live => f.write_str("live"),
        }
    }
}

/// Credentials (and optionally a conversation session) for one client.
#[derive(Clone, PartialEq, Eq)]
pub struct PaymanConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Continues an existing conversation when set.
    pub session_id: Option<String>,
}

impl PaymanConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            session_id: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

impl fmt::Debug for PaymanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymanConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("session_id", &self.session_id)
            .finish()
    }
}
