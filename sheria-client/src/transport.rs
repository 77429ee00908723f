use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{Credentials, Method, SheriaURL};

/// Named arguments for a server method.
pub type Args = Map<String, Value>;

/// The `message` part of a server response.
pub type Payload = Value;

pub const DEFAULT_NAMESPACE: &str = "sheria.api";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("ApplicationError: {}", .0.as_deref().unwrap_or("request was not successful"))]
    ApplicationError(Option<String>),
}

impl CallError {
    /// The message the server supplied, if this was an application-level failure.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            CallError::ApplicationError(message) => message.as_deref(),
            _ => None,
        }
    }

    /// Transport failures never reached the application.
    pub fn is_transport(&self) -> bool {
        matches!(self, CallError::ResponseError(_))
    }
}

/// Generic boundary to the server: one named method, one set of named
/// arguments, one payload back.
#[async_trait]
pub trait RpcClient: Send + Sync {
    async fn call(&self, method: Method, args: Args) -> Result<Payload, CallError>;
}

/// Calls whitelisted methods over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRpcClient {
    http: reqwest::Client,
    base_url: SheriaURL,
    namespace: String,
    credentials: Credentials,
}

/// This is the envelope every method response comes in. A method that returns
/// nothing has no `message`.
#[derive(Debug, Deserialize)]
struct MethodResponse {
    #[serde(default)]
    message: Value,
}

impl HttpRpcClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: SheriaURL::new(base_url),
            namespace: DEFAULT_NAMESPACE.to_string(),
            credentials,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

#[async_trait]
impl RpcClient for HttpRpcClient {
    async fn call(&self, method: Method, args: Args) -> Result<Payload, CallError> {
        let url = self.base_url.method(&self.namespace, method.as_ref());
        tracing::debug!(%method, %url, "calling server method");

        let request = self.credentials.authorize(self.http.post(url.as_ref()));
        let resp = request.json(&args).send().await.map_err(|e| {
            tracing::error!(%method, "request failed: {}", e);
            CallError::ResponseError(e.to_string())
        })?;

        if resp.status() == 401 || resp.status() == 403 {
            return Err(CallError::Unauthorized);
        }

        if !resp.status().is_success() {
            tracing::error!(%method, status = %resp.status(), "server returned an error");
            return Err(CallError::ResponseError(format!(
                "{} returned {}",
                method,
                resp.status()
            )));
        }

        let body = resp.json::<MethodResponse>().await.map_err(|e| {
            CallError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })?;

        Ok(body.message)
    }
}
