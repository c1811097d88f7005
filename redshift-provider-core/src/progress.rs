//! Progress events returned by lifecycle handlers

use serde::{Deserialize, Serialize};

use crate::error::{HandlerError, HandlerErrorCode};

/// Outcome of a single handler invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    Success,
    InProgress,
    Failed,
}

/// State carried by the orchestration host between invocations of a
/// long-running operation. Nothing else survives an invocation; the host
/// replays this verbatim on the next call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallbackContext {
    /// Whether the mutating service call has already been submitted
    pub call_submitted: bool,
    /// Number of stabilization polls performed so far
    pub stabilization_attempts: u32,
}

impl CallbackContext {
    /// Context for the first poll after submitting the mutating call
    pub fn submitted() -> Self {
        Self {
            call_submitted: true,
            stabilization_attempts: 0,
        }
    }

    /// Context for the next poll tick
    pub fn next_attempt(mut self) -> Self {
        self.stabilization_attempts += 1;
        self
    }
}

/// Result of one handler invocation, reported to the orchestration host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent<M> {
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<M>,
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub resource_models: Vec<M>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<CallbackContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_delay_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<HandlerErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<M> ProgressEvent<M> {
    fn empty(status: OperationStatus) -> Self {
        Self {
            status,
            resource_model: None,
            resource_models: Vec::new(),
            next_token: None,
            callback_context: None,
            callback_delay_seconds: None,
            error_code: None,
            message: None,
        }
    }

    /// Terminal success carrying the resulting model
    pub fn success(model: M) -> Self {
        let mut event = Self::empty(OperationStatus::Success);
        event.resource_model = Some(model);
        event
    }

    /// Terminal success with no model (delete)
    pub fn completed() -> Self {
        Self::empty(OperationStatus::Success)
    }

    /// Terminal success for a list invocation
    pub fn list(models: Vec<M>, next_token: Option<String>) -> Self {
        let mut event = Self::empty(OperationStatus::Success);
        event.resource_models = models;
        event.next_token = next_token;
        event
    }

    /// Not yet stable; the host should re-invoke after `delay_seconds`
    /// with the given context
    pub fn in_progress(model: M, context: CallbackContext, delay_seconds: u64) -> Self {
        let mut event = Self::empty(OperationStatus::InProgress);
        event.resource_model = Some(model);
        event.callback_context = Some(context);
        event.callback_delay_seconds = Some(delay_seconds);
        event
    }

    pub fn is_terminal(&self) -> bool {
        self.status != OperationStatus::InProgress
    }
}

impl<M> From<HandlerError> for ProgressEvent<M> {
    fn from(err: HandlerError) -> Self {
        let mut event = Self::empty(OperationStatus::Failed);
        event.error_code = Some(err.code());
        event.message = Some(err.to_string());
        event
    }
}

impl<M: Serialize> ProgressEvent<M> {
    /// Serialize for the host boundary
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_event_carries_code_and_message() {
        let err = HandlerError::not_found("endpoint", "my-endpoint");
        let event: ProgressEvent<()> = ProgressEvent::from(err);
        assert_eq!(event.status, OperationStatus::Failed);
        assert_eq!(event.error_code, Some(HandlerErrorCode::NotFound));
        assert!(event.message.unwrap().contains("my-endpoint"));
    }

    #[test]
    fn in_progress_is_not_terminal() {
        let event = ProgressEvent::in_progress("model", CallbackContext::submitted(), 30);
        assert!(!event.is_terminal());
        assert_eq!(event.callback_delay_seconds, Some(30));
        assert_eq!(
            event.callback_context,
            Some(CallbackContext {
                call_submitted: true,
                stabilization_attempts: 0
            })
        );
    }

    #[test]
    fn next_attempt_increments() {
        let ctx = CallbackContext::submitted().next_attempt().next_attempt();
        assert_eq!(ctx.stabilization_attempts, 2);
        assert!(ctx.call_submitted);
    }

    #[test]
    fn callback_context_round_trips() {
        let ctx = CallbackContext::submitted().next_attempt();
        let json = serde_json::to_string(&ctx).unwrap();
        let back: CallbackContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }

    #[test]
    fn list_event_passes_token_through() {
        let event = ProgressEvent::list(vec!["a", "b"], Some("page-2".to_string()));
        assert_eq!(event.status, OperationStatus::Success);
        assert_eq!(event.resource_models.len(), 2);
        assert_eq!(event.next_token.as_deref(), Some("page-2"));
    }
}
