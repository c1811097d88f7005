//! Error taxonomy for lifecycle handlers

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a lifecycle handler can report
///
/// Every service failure a handler catches maps to exactly one of these.
/// Programming errors are not represented here: they panic and abort the
/// invocation instead of being classified.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Bad input detected before any service call was made
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The resource already exists (terminal on create)
    #[error("{resource} '{identifier}' already exists")]
    AlreadyExists {
        resource: &'static str,
        identifier: String,
    },

    /// The resource does not exist
    #[error("{resource} '{identifier}' not found")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },

    /// The caller is not authorized for the operation
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// An account or per-resource quota was exceeded
    #[error("service limit exceeded: {0}")]
    LimitExceeded(String),

    /// The service rejected the request parameters
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A create-only property differs between current and desired state
    #[error("property {0} cannot be changed after creation")]
    NotUpdatable(String),

    /// The resource is in a state that conflicts with the operation.
    /// Clears once the resource settles, so callers may retry.
    #[error("conflicting resource state: {0}")]
    Conflict(String),

    /// Any service failure not covered by the families above.
    /// The original SDK error is kept as the source.
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        code: Option<String>,
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl HandlerError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn already_exists(resource: &'static str, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource,
            identifier: identifier.into(),
        }
    }

    pub fn not_found(resource: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            identifier: identifier.into(),
        }
    }

    /// The wire code reported in a failed progress event
    pub fn code(&self) -> HandlerErrorCode {
        match self {
            Self::InvalidInput(_) => HandlerErrorCode::ClientError,
            Self::AlreadyExists { .. } => HandlerErrorCode::AlreadyExists,
            Self::NotFound { .. } => HandlerErrorCode::NotFound,
            Self::AccessDenied(_) => HandlerErrorCode::AccessDenied,
            Self::LimitExceeded(_) => HandlerErrorCode::ServiceLimitExceeded,
            Self::InvalidRequest(_) => HandlerErrorCode::InvalidRequest,
            Self::NotUpdatable(_) => HandlerErrorCode::NotUpdatable,
            Self::Conflict(_) => HandlerErrorCode::ResourceConflict,
            Self::Service { .. } => HandlerErrorCode::GeneralServiceError,
        }
    }

    /// Whether the same request can succeed later without being changed
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Classification reported to the orchestration host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerErrorCode {
    ClientError,
    AlreadyExists,
    NotFound,
    AccessDenied,
    ServiceLimitExceeded,
    InvalidRequest,
    NotUpdatable,
    ResourceConflict,
    GeneralServiceError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_match_variants() {
        assert_eq!(
            HandlerError::invalid_input("missing name").code(),
            HandlerErrorCode::ClientError
        );
        assert_eq!(
            HandlerError::already_exists("subnet group", "sg-1").code(),
            HandlerErrorCode::AlreadyExists
        );
        assert_eq!(
            HandlerError::not_found("endpoint", "ep-1").code(),
            HandlerErrorCode::NotFound
        );
        assert_eq!(
            HandlerError::NotUpdatable("ClusterIdentifier".to_string()).code(),
            HandlerErrorCode::NotUpdatable
        );
    }

    #[test]
    fn only_conflicts_are_retriable() {
        assert!(HandlerError::Conflict("cluster is resizing".to_string()).is_retriable());
        assert!(!HandlerError::invalid_input("bad").is_retriable());
        assert!(!HandlerError::not_found("endpoint", "ep-1").is_retriable());
    }

    #[test]
    fn display_includes_identifier() {
        let err = HandlerError::already_exists("cluster subnet group", "my-group");
        assert_eq!(
            err.to_string(),
            "cluster subnet group 'my-group' already exists"
        );
    }

    #[test]
    fn service_error_keeps_source() {
        use std::error::Error;

        let source = std::io::Error::other("connection reset");
        let err = HandlerError::Service {
            operation: "DescribeClusterSubnetGroups",
            code: None,
            message: "connection reset".to_string(),
            source: Box::new(source),
        };
        assert!(err.source().is_some());
        assert_eq!(err.code(), HandlerErrorCode::GeneralServiceError);
    }
}
