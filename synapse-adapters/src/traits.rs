//! Generator trait and the per-request error taxonomy.

use async_trait::async_trait;
use thiserror::Error;

/// Result alias used by generation adapters.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors a generation request can fail with.
///
/// Every variant renders to a message fit for display in the conversation
/// log; none of them is fatal to the session. Callers catch the error at
/// the turn boundary, surface it as a system message, and re-enable input.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Adapter is misconfigured (bad endpoint URL, missing settings).
    #[error("adapter not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// The outbound request could not be built or encoded.
    #[error("invalid generation request: {reason}")]
    InvalidRequest {
        /// Reason describing why the request could not be produced.
        reason: String,
    },

    /// Transport-level failures: connection errors, timeouts, read errors.
    #[error("transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The response body could not be parsed as JSON at all.
    #[error("malformed response: {reason}")]
    MalformedResponse {
        /// Additional context about the parse failure.
        reason: String,
    },

    /// The endpoint answered with a non-success HTTP status.
    #[error("request failed: {reason}")]
    RequestFailed {
        /// Most specific diagnosis available from the body or status line.
        reason: String,
    },

    /// The body carried a top-level error object, regardless of status.
    #[error("upstream API error: {message}")]
    UpstreamApi {
        /// Message reported by the upstream service.
        message: String,
    },

    /// The body held no candidate answers.
    #[error("no content: {reason}")]
    NoContent {
        /// Most specific diagnosis for the missing content.
        reason: String,
    },

    /// Generation was blocked or stopped before a normal completion.
    #[error("generation stopped: {reason}")]
    BlockedOrStopped {
        /// Diagnosis including the completion status and, for safety
        /// blocks, every category/probability rating pair.
        reason: String,
    },

    /// A candidate arrived but carried no usable text.
    #[error("empty content: {reason}")]
    EmptyContent {
        /// Diagnosis distinguishing the token-limit case.
        reason: String,
    },
}

impl GenerateError {
    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for invalid requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for unparseable response bodies.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }
}

/// Trait implemented by generation backends.
///
/// The interactive session talks to this seam only, so tests can substitute
/// a canned backend for the remote worker.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Sends one composed prompt and returns the generated text.
    async fn generate(&self, prompt: &str) -> GenerateResult<String>;
}
