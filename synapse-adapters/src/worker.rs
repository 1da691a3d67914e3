//! Adapter for the relay worker fronting the generation endpoint.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use hyper::body::to_bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Request, Uri};
use serde::Serialize;
use tokio::time::timeout;
use tracing::debug;

use synapse_primitives::ChatRole;

use crate::http_client::{HttpsClient, build_client};
use crate::response;
use crate::traits::{GenerateError, GenerateResult, Generator};

/// Configuration for the worker adapter.
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    endpoint: String,
    timeout: Duration,
}

impl WorkerConfig {
    /// Creates a configuration for the supplied endpoint URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the per-request timeout.
    ///
    /// A request that outlives it fails with a transport error like any
    /// other network failure.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Generation backend that POSTs composed prompts to the relay worker and
/// interprets the relayed upstream response.
pub struct WorkerAdapter {
    client: HttpsClient,
    endpoint: Uri,
    timeout: Duration,
}

impl fmt::Debug for WorkerAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerAdapter")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl WorkerAdapter {
    /// Constructs a new adapter with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Configuration`] if the endpoint is not a
    /// valid absolute `http(s)` URL.
    pub fn new(config: WorkerConfig) -> GenerateResult<Self> {
        let endpoint = sanitize_endpoint(&config.endpoint)?;

        Ok(Self {
            client: build_client(),
            endpoint,
            timeout: config.timeout,
        })
    }

    /// Returns the endpoint the adapter posts to.
    #[must_use]
    pub const fn endpoint(&self) -> &Uri {
        &self.endpoint
    }
}

#[async_trait]
impl Generator for WorkerAdapter {
    async fn generate(&self, prompt: &str) -> GenerateResult<String> {
        let payload = ChatRequest::from_prompt(prompt);
        let body = serde_json::to_vec(&payload).map_err(|err| {
            GenerateError::invalid_request(format!("failed to encode request body: {err}"))
        })?;

        let request = Request::post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .map_err(|err| GenerateError::transport(format!("failed to build request: {err}")))?;

        debug!(endpoint = %self.endpoint, "sending generation request");

        let response = timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| GenerateError::transport("generation request timed out"))?
            .map_err(|err| GenerateError::transport(format!("generation request failed: {err}")))?;

        let status = response.status();
        let bytes = to_bytes(response.into_body())
            .await
            .map_err(|err| GenerateError::transport(format!("failed to read response: {err}")))?;

        response::interpret(status, &bytes)
    }
}

/// Wire shape expected by the worker: a message list with the composed
/// prompt as the sole user entry.
#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

impl ChatRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            messages: vec![WireMessage {
                role: ChatRole::Human.wire_name().to_owned(),
                content: prompt.to_owned(),
            }],
        }
    }
}

fn sanitize_endpoint(input: &str) -> GenerateResult<Uri> {
    let endpoint = input.trim();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(GenerateError::configuration(
            "worker endpoint must start with http:// or https://",
        ));
    }
    endpoint
        .parse::<Uri>()
        .map_err(|err| GenerateError::configuration(format!("invalid worker endpoint: {err}")))
}
