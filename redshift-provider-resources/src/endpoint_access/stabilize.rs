//! Stabilization predicates for endpoint access
//!
//! Each predicate performs exactly one describe call and reports whether
//! the endpoint reached its terminal state. The orchestration host owns
//! the retry cadence and the overall timeout; a "not yet" answer is never
//! an error here.

use aws_sdk_redshift::Client;
use redshift_provider_core::HandlerError;

use super::describe_one;
use crate::errors;

const ACTIVE_STATUS: &str = "active";

/// True only when the reported status is "active", case-insensitively.
/// Not-found means the endpoint is still being provisioned.
pub(crate) async fn is_active(client: &Client, endpoint_name: &str) -> Result<bool, HandlerError> {
    match describe_one(client, endpoint_name).await {
        Ok(endpoint) => Ok(status_is_active(endpoint.endpoint_status())),
        Err(err) if errors::is_not_found(&err) => Ok(false),
        Err(err) => Err(err),
    }
}

/// True once the service no longer knows the endpoint
pub(crate) async fn is_deleted(client: &Client, endpoint_name: &str) -> Result<bool, HandlerError> {
    match describe_one(client, endpoint_name).await {
        Ok(_) => Ok(false),
        Err(err) if errors::is_not_found(&err) => Ok(true),
        Err(err) => Err(err),
    }
}

pub(crate) fn status_is_active(status: Option<&str>) -> bool {
    status.is_some_and(|s| s.eq_ignore_ascii_case(ACTIVE_STATUS))
}
