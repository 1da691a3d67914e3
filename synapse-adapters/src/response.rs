//! Interpretation of the generation endpoint's multi-shape JSON answers.
//!
//! The worker relays the raw upstream response, which can encode failure in
//! several places at once: the HTTP status line, a top-level `error`
//! object, a missing candidate list, a non-normal completion status, or a
//! candidate with no text. [`interpret`] walks those encodings in a fixed
//! priority order and returns either the generated text or the most
//! specific diagnosis available.

use hyper::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::traits::{GenerateError, GenerateResult};

/// Completion status for a normal stop.
const FINISH_STOP: &str = "STOP";
/// Completion status when the output token limit was hit.
const FINISH_MAX_TOKENS: &str = "MAX_TOKENS";
/// Completion status for a safety block.
const FINISH_SAFETY: &str = "SAFETY";
/// Completion status for a recitation block.
const FINISH_RECITATION: &str = "RECITATION";

/// Parsed response envelope. All fields are optional so that partial or
/// failure-shaped bodies still decode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseEnvelope {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

/// Error object the upstream service may embed at the top level.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

impl ApiError {
    fn message(&self) -> String {
        match (&self.message, self.code) {
            (Some(message), _) => message.clone(),
            (None, Some(code)) => format!("upstream error code {code}"),
            (None, None) => "unspecified upstream error".to_owned(),
        }
    }
}

/// One proposed answer. Only the first candidate is ever used.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

/// Policy rating attached to a candidate by the safety system.
#[derive(Debug, Deserialize)]
struct SafetyRating {
    #[serde(default)]
    category: String,
    #[serde(default)]
    probability: String,
}

/// Feedback on the whole prompt, present when the request itself was
/// rejected before any candidate was produced.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Interprets one raw endpoint response into generated text or a diagnosis.
///
/// Pure function of its inputs; interpreting the same status and body twice
/// yields the same outcome. The checks run in priority order and the first
/// match wins:
///
/// 1. body is not JSON → [`GenerateError::MalformedResponse`]
/// 2. non-success status → [`GenerateError::RequestFailed`]
/// 3. top-level error object → [`GenerateError::UpstreamApi`]
/// 4. no candidates → [`GenerateError::NoContent`]
/// 5. abnormal completion status → [`GenerateError::BlockedOrStopped`]
/// 6. candidate without text → [`GenerateError::EmptyContent`]
/// 7. otherwise the first part's text of the first candidate
///
/// # Errors
///
/// One of the variants above; every message is fit for direct display.
pub fn interpret(status: StatusCode, body: &[u8]) -> GenerateResult<String> {
    let raw: Value = serde_json::from_slice(body)
        .map_err(|err| GenerateError::malformed(format!("response body is not JSON: {err}")))?;

    if !status.is_success() {
        return Err(GenerateError::RequestFailed {
            reason: http_failure_reason(status, &raw),
        });
    }

    let mut envelope: ResponseEnvelope = serde_json::from_value(raw)
        .map_err(|err| GenerateError::malformed(format!("unrecognised response shape: {err}")))?;

    if let Some(error) = envelope.error.take() {
        return Err(GenerateError::UpstreamApi {
            message: error.message(),
        });
    }

    let Some(candidate) = envelope.candidates.first() else {
        return Err(GenerateError::NoContent {
            reason: missing_content_reason(&envelope),
        });
    };

    if let Some(finish) = candidate.finish_reason.as_deref() {
        if finish != FINISH_STOP && finish != FINISH_MAX_TOKENS {
            return Err(GenerateError::BlockedOrStopped {
                reason: stop_reason(candidate, finish),
            });
        }
    }

    let text = candidate
        .content
        .as_ref()
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.as_deref())
        .filter(|text| !text.is_empty());

    match text {
        Some(text) => Ok(text.to_owned()),
        None if candidate.finish_reason.as_deref() == Some(FINISH_MAX_TOKENS) => {
            Err(GenerateError::EmptyContent {
                reason: "no text in response; the output token limit was likely reached"
                    .to_owned(),
            })
        }
        None => Err(GenerateError::EmptyContent {
            reason: "no text in response".to_owned(),
        }),
    }
}

/// Picks the most specific failure message for a non-success status:
/// an embedded `error.message` string, then the `error` field serialized
/// whatever its shape, then the status line itself.
fn http_failure_reason(status: StatusCode, body: &Value) -> String {
    let embedded = body.get("error");

    if let Some(message) = embedded
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
    {
        return message.to_owned();
    }

    if let Some(error) = embedded {
        return match error.as_str() {
            Some(text) => text.to_owned(),
            None => error.to_string(),
        };
    }

    format!(
        "request failed with status {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("unknown")
    )
}

/// Diagnoses an absent or empty candidate list, most specific first:
/// prompt-level block reason, then the first candidate's completion
/// status, then a generic message.
fn missing_content_reason(envelope: &ResponseEnvelope) -> String {
    if let Some(block_reason) = envelope
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        return format!("prompt blocked by the endpoint: {block_reason}");
    }

    match envelope
        .candidates
        .first()
        .and_then(|candidate| candidate.finish_reason.as_deref())
    {
        Some(FINISH_SAFETY) => "generation blocked by safety settings".to_owned(),
        Some(FINISH_RECITATION) => "generation blocked by the recitation policy".to_owned(),
        Some(finish) if !finish.is_empty() => {
            format!("generation stopped unexpectedly: {finish}")
        }
        _ => "no response content received".to_owned(),
    }
}

/// Explains an abnormal completion status. Safety blocks enumerate every
/// category/probability rating pair so the user can see which policy fired.
fn stop_reason(candidate: &Candidate, finish: &str) -> String {
    if finish == FINISH_SAFETY {
        let ratings = candidate
            .safety_ratings
            .iter()
            .map(|rating| format!("{}={}", rating.category, rating.probability))
            .collect::<Vec<_>>()
            .join("; ");
        return format!(
            "blocked by safety settings (ratings: {ratings}); try rephrasing the request"
        );
    }

    format!("generation stopped: {finish}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: &Value) -> Vec<u8> {
        serde_json::to_vec(value).unwrap()
    }

    fn normal_completion(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    #[test]
    fn returns_text_of_first_part_on_normal_stop() {
        let result = interpret(StatusCode::OK, &body(&normal_completion("X")));
        assert_eq!(result.unwrap(), "X");
    }

    #[test]
    fn accepts_candidate_without_finish_reason() {
        let envelope = json!({
            "candidates": [{ "content": { "parts": [{ "text": "fine" }] } }]
        });
        assert_eq!(interpret(StatusCode::OK, &body(&envelope)).unwrap(), "fine");
    }

    #[test]
    fn uses_only_the_first_candidate_and_part() {
        let envelope = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ]
        });
        assert_eq!(interpret(StatusCode::OK, &body(&envelope)).unwrap(), "first");
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = interpret(StatusCode::OK, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, GenerateError::MalformedResponse { .. }));
    }

    #[test]
    fn http_failure_prefers_embedded_error_message() {
        let envelope = json!({ "error": { "message": "worker exploded", "code": 500 } });
        let err = interpret(StatusCode::INTERNAL_SERVER_ERROR, &body(&envelope)).unwrap_err();
        assert!(matches!(err, GenerateError::RequestFailed { .. }));
        assert!(err.to_string().contains("worker exploded"));
    }

    #[test]
    fn http_failure_falls_back_to_error_of_any_shape() {
        let envelope = json!({ "error": "plain string failure" });
        let err = interpret(StatusCode::BAD_GATEWAY, &body(&envelope)).unwrap_err();
        assert!(err.to_string().contains("plain string failure"));

        let envelope = json!({ "error": { "details": [1, 2] } });
        let err = interpret(StatusCode::BAD_GATEWAY, &body(&envelope)).unwrap_err();
        assert!(err.to_string().contains("details"));
    }

    #[test]
    fn http_failure_falls_back_to_status_line() {
        let err = interpret(StatusCode::NOT_FOUND, &body(&json!({}))).unwrap_err();
        assert!(err.to_string().contains("404 Not Found"));
    }

    #[test]
    fn http_status_outranks_body_success_shape() {
        // The body looks like a normal completion, but the status says no.
        let err =
            interpret(StatusCode::SERVICE_UNAVAILABLE, &body(&normal_completion("X"))).unwrap_err();
        assert!(matches!(err, GenerateError::RequestFailed { .. }));
    }

    #[test]
    fn top_level_error_fails_even_on_success_status() {
        let envelope = json!({ "error": { "message": "quota exceeded" } });
        let err = interpret(StatusCode::OK, &body(&envelope)).unwrap_err();
        assert!(matches!(err, GenerateError::UpstreamApi { .. }));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn missing_candidates_reports_prompt_block_reason() {
        let envelope = json!({
            "candidates": [],
            "promptFeedback": { "blockReason": "OTHER" }
        });
        let err = interpret(StatusCode::OK, &body(&envelope)).unwrap_err();
        assert!(matches!(err, GenerateError::NoContent { .. }));
        assert!(err.to_string().contains("OTHER"));
    }

    #[test]
    fn missing_candidates_without_feedback_is_generic() {
        let err = interpret(StatusCode::OK, &body(&json!({}))).unwrap_err();
        assert!(matches!(err, GenerateError::NoContent { .. }));
        assert!(err.to_string().contains("no response content"));
    }

    #[test]
    fn safety_stop_enumerates_every_rating_pair() {
        let envelope = json!({
            "candidates": [{
                "finishReason": "SAFETY",
                "safetyRatings": [
                    { "category": "HARM", "probability": "HIGH" },
                    { "category": "SEXUAL", "probability": "LOW" }
                ]
            }]
        });
        let err = interpret(StatusCode::OK, &body(&envelope)).unwrap_err();
        assert!(matches!(err, GenerateError::BlockedOrStopped { .. }));
        let message = err.to_string();
        assert!(message.contains("HARM=HIGH"));
        assert!(message.contains("SEXUAL=LOW"));
    }

    #[test]
    fn unexpected_finish_reason_embeds_the_status() {
        let envelope = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "partial" }] },
                "finishReason": "RECITATION"
            }]
        });
        let err = interpret(StatusCode::OK, &body(&envelope)).unwrap_err();
        assert!(matches!(err, GenerateError::BlockedOrStopped { .. }));
        assert!(err.to_string().contains("RECITATION"));
    }

    #[test]
    fn max_tokens_with_text_still_succeeds() {
        let envelope = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "truncated but present" }] },
                "finishReason": "MAX_TOKENS"
            }]
        });
        let result = interpret(StatusCode::OK, &body(&envelope));
        assert_eq!(result.unwrap(), "truncated but present");
    }

    #[test]
    fn textless_candidate_is_empty_content() {
        let envelope = json!({ "candidates": [{ "finishReason": "STOP" }] });
        let err = interpret(StatusCode::OK, &body(&envelope)).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyContent { .. }));

        let envelope = json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "STOP" }]
        });
        let err = interpret(StatusCode::OK, &body(&envelope)).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyContent { .. }));

        let envelope = json!({
            "candidates": [{ "content": { "parts": [{ "text": "" }] }, "finishReason": "STOP" }]
        });
        let err = interpret(StatusCode::OK, &body(&envelope)).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyContent { .. }));
    }

    #[test]
    fn textless_max_tokens_candidate_hints_at_the_limit() {
        let envelope = json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "MAX_TOKENS" }]
        });
        let err = interpret(StatusCode::OK, &body(&envelope)).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyContent { .. }));
        assert!(err.to_string().contains("token limit"));
    }

    #[test]
    fn interpretation_is_idempotent() {
        let bytes = body(&normal_completion("same answer"));
        let first = interpret(StatusCode::OK, &bytes).unwrap();
        let second = interpret(StatusCode::OK, &bytes).unwrap();
        assert_eq!(first, second);

        let failing = body(&json!({ "error": { "message": "quota exceeded" } }));
        let first = interpret(StatusCode::OK, &failing).unwrap_err();
        let second = interpret(StatusCode::OK, &failing).unwrap_err();
        assert_eq!(first.to_string(), second.to_string());
    }
}
