//! Mapping from Redshift SDK shapes to the subnet group model

use aws_sdk_redshift::types::ClusterSubnetGroup;

use super::model::{SubnetDetail, SubnetGroupModel};
use crate::tags;

pub(crate) fn from_sdk(group: &ClusterSubnetGroup) -> SubnetGroupModel {
    let subnet_ids: Vec<String> = group
        .subnets()
        .iter()
        .filter_map(|s| s.subnet_identifier().map(str::to_string))
        .collect();
    let subnets: Vec<SubnetDetail> = group
        .subnets()
        .iter()
        .map(|s| SubnetDetail {
            subnet_identifier: s.subnet_identifier().map(str::to_string),
            availability_zone: s
                .subnet_availability_zone()
                .and_then(|az| az.name())
                .map(str::to_string),
            status: s.subnet_status().map(str::to_string),
        })
        .collect();

    SubnetGroupModel {
        cluster_subnet_group_name: group.cluster_subnet_group_name().map(str::to_string),
        description: group.description().map(str::to_string),
        subnet_ids: if subnet_ids.is_empty() {
            None
        } else {
            Some(subnet_ids)
        },
        tags: tags::from_sdk_tags(group.tags()),
        vpc_id: group.vpc_id().map(str::to_string),
        subnet_group_status: group.subnet_group_status().map(str::to_string),
        subnets: if subnets.is_empty() { None } else { Some(subnets) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_redshift::types::{AvailabilityZone, Subnet, Tag};

    #[test]
    fn maps_service_response_to_model() {
        let group = ClusterSubnetGroup::builder()
            .cluster_subnet_group_name("my-group")
            .description("test group")
            .vpc_id("vpc-123")
            .subnet_group_status("Complete")
            .subnets(
                Subnet::builder()
                    .subnet_identifier("subnet-1")
                    .subnet_availability_zone(AvailabilityZone::builder().name("us-east-1a").build())
                    .subnet_status("Active")
                    .build(),
            )
            .tags(Tag::builder().key("env").value("dev").build())
            .build();

        let model = from_sdk(&group);
        assert_eq!(model.cluster_subnet_group_name.as_deref(), Some("my-group"));
        assert_eq!(model.subnet_ids, Some(vec!["subnet-1".to_string()]));
        assert_eq!(model.vpc_id.as_deref(), Some("vpc-123"));
        assert_eq!(
            model.subnets.as_ref().unwrap()[0].availability_zone.as_deref(),
            Some("us-east-1a")
        );
        assert_eq!(model.tags.unwrap().get("env").map(String::as_str), Some("dev"));
    }

    #[test]
    fn empty_response_maps_to_empty_model() {
        let model = from_sdk(&ClusterSubnetGroup::builder().build());
        assert!(model.cluster_subnet_group_name.is_none());
        assert!(model.subnet_ids.is_none());
        assert!(model.subnets.is_none());
        assert!(model.tags.is_none());
    }
}
