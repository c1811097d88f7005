//! Mapping from Redshift SDK shapes to the cluster security group model

use aws_sdk_redshift::types::ClusterSecurityGroup;

use super::model::{IngressRule, SecurityGroupModel};
use crate::tags;

pub(crate) fn from_sdk(group: &ClusterSecurityGroup) -> SecurityGroupModel {
    let mut rules: Vec<IngressRule> = group
        .ip_ranges()
        .iter()
        .filter_map(|range| {
            range.cidrip().map(|cidr| IngressRule {
                cidrip: Some(cidr.to_string()),
                ..IngressRule::default()
            })
        })
        .collect();
    rules.extend(group.ec2_security_groups().iter().map(|g| IngressRule {
        cidrip: None,
        ec2_security_group_name: g.ec2_security_group_name().map(str::to_string),
        ec2_security_group_owner_id: g.ec2_security_group_owner_id().map(str::to_string),
    }));

    SecurityGroupModel {
        cluster_security_group_name: group.cluster_security_group_name().map(str::to_string),
        description: group.description().map(str::to_string),
        ingress_rules: if rules.is_empty() { None } else { Some(rules) },
        tags: tags::from_sdk_tags(group.tags()),
    }
}
