//! Cluster security group resource model

use std::collections::BTreeMap;

use redshift_provider_core::fields::{FieldSpec, Mutability};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) const TYPE_LABEL: &str = "cluster security group";
pub(crate) const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SecurityGroupModel {
    /// Generated from the logical id and request token when absent
    pub cluster_security_group_name: Option<String>,
    pub description: Option<String>,
    pub ingress_rules: Option<Vec<IngressRule>>,
    pub tags: Option<BTreeMap<String, String>>,
}

/// One authorized ingress source: either a CIDR range or an EC2 security
/// group (name plus owner account)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IngressRule {
    #[serde(rename = "CIDRIP")]
    pub cidrip: Option<String>,
    #[serde(rename = "EC2SecurityGroupName")]
    pub ec2_security_group_name: Option<String>,
    #[serde(rename = "EC2SecurityGroupOwnerId")]
    pub ec2_security_group_owner_id: Option<String>,
}

pub(crate) const FIELDS: &[FieldSpec<SecurityGroupModel>] = &[
    FieldSpec::new("ClusterSecurityGroupName", Mutability::CreateOnly, |m| {
        m.cluster_security_group_name.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("Description", Mutability::CreateOnly, |m| {
        m.description.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("IngressRules", Mutability::Mutable, |m| {
        m.ingress_rules
            .as_ref()
            .and_then(|v| serde_json::to_value(v).ok())
    }),
    FieldSpec::new("Tags", Mutability::Mutable, |m| {
        m.tags.as_ref().map(|v| json!(v))
    }),
];

/// Split previous→desired ingress rules into the sets to authorize and to
/// revoke. Rules are compared structurally; order is irrelevant.
pub(crate) fn diff_rules(
    previous: &[IngressRule],
    desired: &[IngressRule],
) -> (Vec<IngressRule>, Vec<IngressRule>) {
    let to_authorize = desired
        .iter()
        .filter(|rule| !previous.contains(rule))
        .cloned()
        .collect();
    let to_revoke = previous
        .iter()
        .filter(|rule| !desired.contains(rule))
        .cloned()
        .collect();
    (to_authorize, to_revoke)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidr(range: &str) -> IngressRule {
        IngressRule {
            cidrip: Some(range.to_string()),
            ..IngressRule::default()
        }
    }

    fn ec2_group(name: &str, owner: &str) -> IngressRule {
        IngressRule {
            ec2_security_group_name: Some(name.to_string()),
            ec2_security_group_owner_id: Some(owner.to_string()),
            ..IngressRule::default()
        }
    }

    #[test]
    fn diff_authorizes_new_and_revokes_removed() {
        let previous = vec![cidr("10.0.0.0/16"), ec2_group("web", "123456789012")];
        let desired = vec![cidr("10.0.0.0/16"), cidr("192.168.0.0/24")];

        let (to_authorize, to_revoke) = diff_rules(&previous, &desired);
        assert_eq!(to_authorize, vec![cidr("192.168.0.0/24")]);
        assert_eq!(to_revoke, vec![ec2_group("web", "123456789012")]);
    }

    #[test]
    fn diff_ignores_order() {
        let previous = vec![cidr("10.0.0.0/16"), cidr("192.168.0.0/24")];
        let desired = vec![cidr("192.168.0.0/24"), cidr("10.0.0.0/16")];

        let (to_authorize, to_revoke) = diff_rules(&previous, &desired);
        assert!(to_authorize.is_empty());
        assert!(to_revoke.is_empty());
    }
}
