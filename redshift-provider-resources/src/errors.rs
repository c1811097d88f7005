//! Classification of Redshift service errors
//!
//! Every SDK call site funnels its error through `classify`, which maps the
//! fault code into the handler taxonomy. Codes matching no known family
//! land in the catch-all `Service` variant with the original error kept as
//! the source, so nothing is silently swallowed.

use aws_sdk_redshift::error::{ProvideErrorMetadata, SdkError};
use redshift_provider_core::HandlerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    AlreadyExists,
    NotFound,
    AccessDenied,
    LimitExceeded,
    Conflict,
    InvalidRequest,
    Other,
}

/// Map a Redshift fault code to an error family.
///
/// Order matters: quota faults contain "Exceeded" but also resource names,
/// and state faults start with "Invalid", so the conflict check runs before
/// the generic invalid-parameter check.
pub(crate) fn kind_for_code(code: &str) -> Kind {
    if code.contains("AlreadyExist") {
        Kind::AlreadyExists
    } else if code.contains("NotFound") {
        Kind::NotFound
    } else if code.contains("AccessDenied")
        || code.contains("Unauthorized")
        || code.contains("NoAuthorization")
    {
        Kind::AccessDenied
    } else if code.contains("QuotaExceeded") || code.contains("LimitExceeded") {
        Kind::LimitExceeded
    } else if is_state_conflict(code) {
        Kind::Conflict
    } else if code.contains("Invalid") || code.contains("Validation") || code.contains("Unsupported")
    {
        Kind::InvalidRequest
    } else {
        Kind::Other
    }
}

/// Faults that clear once the resource settles, e.g.
/// InvalidClusterStateFault while a cluster is resizing
fn is_state_conflict(code: &str) -> bool {
    code.contains("Conflict") || (code.starts_with("Invalid") && code.contains("State"))
}

/// Classify an SDK error from `operation` against `resource`/`identifier`
pub(crate) fn classify<E>(
    operation: &'static str,
    resource: &'static str,
    identifier: &str,
    err: SdkError<E>,
) -> HandlerError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let code = err.code().map(str::to_string);
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string());

    match code.as_deref().map(kind_for_code) {
        Some(Kind::AlreadyExists) => HandlerError::already_exists(resource, identifier),
        Some(Kind::NotFound) => HandlerError::not_found(resource, identifier),
        Some(Kind::AccessDenied) => HandlerError::AccessDenied(message),
        Some(Kind::LimitExceeded) => HandlerError::LimitExceeded(message),
        Some(Kind::Conflict) => HandlerError::Conflict(message),
        Some(Kind::InvalidRequest) => HandlerError::InvalidRequest(message),
        _ => HandlerError::Service {
            operation,
            code,
            message,
            source: Box::new(err),
        },
    }
}

pub(crate) fn is_not_found(err: &HandlerError) -> bool {
    matches!(err, HandlerError::NotFound { .. })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_exists_family() {
        assert_eq!(
            kind_for_code("ClusterSubnetGroupAlreadyExists"),
            Kind::AlreadyExists
        );
        assert_eq!(kind_for_code("EndpointAlreadyExists"), Kind::AlreadyExists);
        // Redshift spells this one without the trailing "s"
        assert_eq!(
            kind_for_code("SubscriptionAlreadyExist"),
            Kind::AlreadyExists
        );
    }

    #[test]
    fn not_found_family() {
        assert_eq!(kind_for_code("ClusterSubnetGroupNotFoundFault"), Kind::NotFound);
        assert_eq!(kind_for_code("EndpointNotFound"), Kind::NotFound);
        assert_eq!(kind_for_code("ScheduledActionNotFound"), Kind::NotFound);
        assert_eq!(kind_for_code("ResourceNotFoundFault"), Kind::NotFound);
    }

    #[test]
    fn quota_family() {
        assert_eq!(
            kind_for_code("ClusterSubnetGroupQuotaExceeded"),
            Kind::LimitExceeded
        );
        assert_eq!(
            kind_for_code("EndpointsPerClusterLimitExceeded"),
            Kind::LimitExceeded
        );
        assert_eq!(
            kind_for_code("EventSubscriptionQuotaExceeded"),
            Kind::LimitExceeded
        );
        assert_eq!(kind_for_code("TagLimitExceededFault"), Kind::LimitExceeded);
    }

    #[test]
    fn access_denied_family() {
        assert_eq!(kind_for_code("AccessDenied"), Kind::AccessDenied);
        assert_eq!(kind_for_code("UnauthorizedOperation"), Kind::AccessDenied);
        assert_eq!(kind_for_code("SNSNoAuthorizationFault"), Kind::AccessDenied);
    }

    #[test]
    fn state_faults_classify_as_conflicts_not_invalid_request() {
        assert_eq!(kind_for_code("InvalidClusterStateFault"), Kind::Conflict);
        assert_eq!(
            kind_for_code("InvalidClusterSecurityGroupStateFault"),
            Kind::Conflict
        );
        assert_eq!(kind_for_code("InvalidEndpointStateFault"), Kind::Conflict);
        assert_eq!(kind_for_code("ConflictPolicyUpdateFault"), Kind::Conflict);
    }

    #[test]
    fn invalid_request_family() {
        assert_eq!(kind_for_code("InvalidParameterValue"), Kind::InvalidRequest);
        assert_eq!(kind_for_code("InvalidSubnet"), Kind::InvalidRequest);
        assert_eq!(kind_for_code("InvalidTagFault"), Kind::InvalidRequest);
        assert_eq!(kind_for_code("InvalidScheduleFault"), Kind::InvalidRequest);
        assert_eq!(
            kind_for_code("UnsupportedOperationFault"),
            Kind::InvalidRequest
        );
    }

    #[test]
    fn unknown_codes_are_not_classified() {
        assert_eq!(kind_for_code("ThrottlingException"), Kind::Other);
        assert_eq!(kind_for_code("InternalError"), Kind::Other);
    }
}
