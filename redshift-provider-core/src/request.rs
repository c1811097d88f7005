//! Request envelope handed to lifecycle handlers by the orchestration host

use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

/// Lifecycle stage being invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

/// One invocation's worth of input: desired and previous state plus the
/// request identity the host supplies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceHandlerRequest<M> {
    #[serde(default)]
    pub desired_state: Option<M>,
    #[serde(default)]
    pub previous_state: Option<M>,
    /// Logical identifier the caller declared for the resource, used to
    /// seed generated names
    #[serde(default)]
    pub logical_resource_id: Option<String>,
    /// Stable token for this request; retries carry the same token
    #[serde(default)]
    pub client_request_token: String,
    /// Continuation marker for list invocations, passed through unchanged
    #[serde(default)]
    pub next_token: Option<String>,
    #[serde(default)]
    pub aws_account_id: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl<M> Default for ResourceHandlerRequest<M> {
    fn default() -> Self {
        Self {
            desired_state: None,
            previous_state: None,
            logical_resource_id: None,
            client_request_token: String::new(),
            next_token: None,
            aws_account_id: None,
            region: None,
        }
    }
}

impl<M> ResourceHandlerRequest<M> {
    pub fn new(desired_state: M) -> Self {
        Self {
            desired_state: Some(desired_state),
            ..Self::default()
        }
    }

    pub fn with_previous_state(mut self, previous: M) -> Self {
        self.previous_state = Some(previous);
        self
    }

    pub fn with_logical_resource_id(mut self, id: impl Into<String>) -> Self {
        self.logical_resource_id = Some(id.into());
        self
    }

    pub fn with_client_request_token(mut self, token: impl Into<String>) -> Self {
        self.client_request_token = token.into();
        self
    }

    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    pub fn with_account(mut self, account_id: impl Into<String>, region: impl Into<String>) -> Self {
        self.aws_account_id = Some(account_id.into());
        self.region = Some(region.into());
        self
    }

    /// Desired state, or a client error when the host supplied none
    pub fn desired(&self) -> Result<&M, HandlerError> {
        self.desired_state
            .as_ref()
            .ok_or_else(|| HandlerError::invalid_input("desired resource state is required"))
    }

    /// Previous state, or a client error when the host supplied none
    pub fn previous(&self) -> Result<&M, HandlerError> {
        self.previous_state
            .as_ref()
            .ok_or_else(|| HandlerError::invalid_input("previous resource state is required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desired_fails_fast_when_absent() {
        let request: ResourceHandlerRequest<String> = ResourceHandlerRequest::default();
        let err = request.desired().unwrap_err();
        assert!(err.to_string().contains("desired resource state"));
    }

    #[test]
    fn builders_set_request_identity() {
        let request = ResourceHandlerRequest::new("model".to_string())
            .with_logical_resource_id("MySubnetGroup")
            .with_client_request_token("token-123")
            .with_account("123456789012", "us-east-1");

        assert_eq!(request.desired().unwrap(), "model");
        assert_eq!(request.logical_resource_id.as_deref(), Some("MySubnetGroup"));
        assert_eq!(request.client_request_token, "token-123");
        assert_eq!(request.region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn request_deserializes_with_missing_fields() {
        let request: ResourceHandlerRequest<String> =
            serde_json::from_str(r#"{"desiredState": "model"}"#).unwrap();
        assert_eq!(request.desired().unwrap(), "model");
        assert!(request.previous_state.is_none());
        assert!(request.client_request_token.is_empty());
    }
}
