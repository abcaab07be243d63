//! Connector seam between the HTTP layer and the Payman client.
//!
//! The HTTP layer never builds a [`PaymanClient`] itself: it hands a
//! [`PaymanConfig`] and the query to a [`PaymanConnector`], which builds the
//! client and makes exactly one `ask` call.

use async_trait::async_trait;
use reqwest::Client;

use crate::client::PaymanClient;
use crate::config::{Environment, PaymanConfig};
use crate::error::PaymanError;

/// Something that can answer a query on behalf of one set of credentials.
#[async_trait]
pub trait PaymanConnector: Send + Sync {
    async fn ask(
        &self,
        config: PaymanConfig,
        query: &str,
    ) -> Result<serde_json::Value, PaymanError>;
}

/// Production connector: a fresh [`PaymanClient`] per call over one shared
/// connection pool.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    http: Client,
    base_url: String,
}

impl HttpConnector {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn for_environment(environment: Environment) -> Self {
        Self::new(environment.base_url())
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PaymanConnector for HttpConnector {
    async fn ask(
        &self,
        config: PaymanConfig,
        query: &str,
    ) -> Result<serde_json::Value, PaymanError> {
        let client = PaymanClient::with_credentials(self.http.clone(), &self.base_url, config)?;
        client.ask(query).await
    }
}
