//! Payman HTTP client.
//!
//! A client is built from one [`PaymanConfig`] and makes two calls per
//! [`PaymanClient::ask`]: an OAuth2 client-credentials token request, then a
//! JSON-RPC `tasks/send` carrying the user's text.

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::config::PaymanConfig;
use crate::error::PaymanError;

const TOKEN_PATH: &str = "/api/oauth2/token";
const TASKS_SEND_PATH: &str = "/api/a2a/tasks/send";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: String,
    method: &'static str,
    params: TaskSendParams<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskSendParams<'a> {
    id: String,
    session_id: &'a str,
    message: Message<'a>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// A Payman client bound to one set of credentials.
#[derive(Debug, Clone)]
pub struct PaymanClient {
    http: Client,
    base_url: String,
    config: PaymanConfig,
}

impl PaymanClient {
    /// Build a client for `base_url` using the given credentials.
    ///
    /// `http` is the shared connection pool; building a client is cheap.
    pub fn with_credentials(
        http: Client,
        base_url: &str,
        config: PaymanConfig,
    ) -> Result<Self, PaymanError> {
        if config.client_id.is_empty() || config.client_secret.is_empty() {
            return Err(PaymanError::Config(
                "client_id and client_secret are required".to_string(),
            ));
        }

        let parsed: Url = base_url
            .parse()
            .map_err(|e| PaymanError::Config(format!("invalid base URL {base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PaymanError::Config(format!(
                "base URL must be http or https: {base_url}"
            )));
        }

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    pub fn config(&self) -> &PaymanConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Exchange the client credentials for a bearer token.
    pub async fn access_token(&self) -> Result<String, PaymanError> {
        let resp = self
            .http
            .post(self.endpoint(TOKEN_PATH))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let resp = ensure_success(resp).await?;

        let token: TokenResponse = resp.json().await.map_err(|e| {
            PaymanError::Transport(format!("Payman token response parse error: {e}"))
        })?;
        Ok(token.access_token)
    }

    /// Send `query` to the Payman agent and return the task it produced.
    ///
    /// The returned value is the JSON-RPC `result` member, untouched. It
    /// normally carries a `sessionId` that continues the conversation.
    pub async fn ask(&self, query: &str) -> Result<serde_json::Value, PaymanError> {
        let token = self.access_token().await?;

        let session_id = self
            .config
            .session_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: Uuid::new_v4().to_string(),
            method: "tasks/send",
            params: TaskSendParams {
                id: Uuid::new_v4().to_string(),
                session_id: &session_id,
                message: Message {
                    role: "user",
                    parts: vec![Part {
                        kind: "text",
                        text: query,
                    }],
                },
            },
        };
        debug!(session_id = %session_id, rpc_id = %request.id, "sending tasks/send");

        let resp = self
            .http
            .post(self.endpoint(TASKS_SEND_PATH))
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?;
        let resp = ensure_success(resp).await?;

        let envelope: RpcResponse = resp.json().await.map_err(|e| {
            PaymanError::Transport(format!("Payman response parse error: {e}"))
        })?;
        if let Some(err) = envelope.error {
            return Err(PaymanError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        envelope.result.ok_or_else(|| {
            PaymanError::Transport("Payman response carried neither result nor error".to_string())
        })
    }
}

/// Pass 2xx responses through; turn anything else into [`PaymanError::Upstream`].
async fn ensure_success(resp: Response) -> Result<Response, PaymanError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let bytes = resp.bytes().await?;
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    debug!(status = status.as_u16(), "Payman returned an error status");
    Err(PaymanError::Upstream {
        status: status.as_u16(),
        body,
    })
}
