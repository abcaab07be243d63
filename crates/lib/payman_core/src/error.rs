//! Errors raised by the Payman client.

use thiserror::Error;

/// Outcome of a failed call to the Payman service.
#[derive(Debug, Error)]
pub enum PaymanError {
    /// The service answered with a non-success status.
    ///
    /// `body` is the parsed JSON body; a non-JSON body is carried as a JSON
    /// string holding its text.
    #[error("Payman responded with HTTP {status}: {body}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    /// No usable response: the connection failed or the body was malformed.
    #[error("{0}")]
    Transport(String),

    /// The service answered 2xx but carried a JSON-RPC error object.
    #[error("Payman RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for PaymanError {
    fn from(e: reqwest::Error) -> Self {
        PaymanError::Transport(e.to_string())
    }
}
