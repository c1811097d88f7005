//! Redshift ARN construction for the tagging APIs

pub(crate) const SUBNET_GROUP: &str = "subnetgroup";
pub(crate) const SECURITY_GROUP: &str = "securitygroup";
pub(crate) const EVENT_SUBSCRIPTION: &str = "eventsubscription";

/// Render the ARN of a Redshift sub-resource,
/// e.g. `arn:aws:redshift:us-east-1:123456789012:subnetgroup:my-group`
pub(crate) fn redshift_arn(region: &str, account_id: &str, resource_type: &str, name: &str) -> String {
    format!(
        "arn:{}:redshift:{}:{}:{}:{}",
        partition_for_region(region),
        region,
        account_id,
        resource_type,
        name
    )
}

fn partition_for_region(region: &str) -> &'static str {
    if region.starts_with("cn-") {
        "aws-cn"
    } else if region.starts_with("us-gov-") {
        "aws-us-gov"
    } else {
        "aws"
    }
}
