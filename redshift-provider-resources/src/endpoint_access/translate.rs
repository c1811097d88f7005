//! Mapping from Redshift SDK shapes to the endpoint access model

use aws_sdk_redshift::types::EndpointAccess;
use aws_smithy_types::date_time::Format;

use super::model::{EndpointAccessModel, VpcEndpointDetail, VpcSecurityGroupStatus};

pub(crate) fn from_sdk(endpoint: &EndpointAccess) -> EndpointAccessModel {
    let vpc_security_group_ids: Vec<String> = endpoint
        .vpc_security_groups()
        .iter()
        .filter_map(|g| g.vpc_security_group_id().map(str::to_string))
        .collect();
    let vpc_security_groups: Vec<VpcSecurityGroupStatus> = endpoint
        .vpc_security_groups()
        .iter()
        .map(|g| VpcSecurityGroupStatus {
            vpc_security_group_id: g.vpc_security_group_id().map(str::to_string),
            status: g.status().map(str::to_string),
        })
        .collect();

    EndpointAccessModel {
        endpoint_name: endpoint.endpoint_name().map(str::to_string),
        cluster_identifier: endpoint.cluster_identifier().map(str::to_string),
        subnet_group_name: endpoint.subnet_group_name().map(str::to_string),
        resource_owner: endpoint.resource_owner().map(str::to_string),
        vpc_security_group_ids: if vpc_security_group_ids.is_empty() {
            None
        } else {
            Some(vpc_security_group_ids)
        },
        address: endpoint.address().map(str::to_string),
        port: endpoint.port(),
        endpoint_status: endpoint.endpoint_status().map(str::to_string),
        endpoint_create_time: endpoint
            .endpoint_create_time()
            .and_then(|t| t.fmt(Format::DateTime).ok()),
        vpc_security_groups: if vpc_security_groups.is_empty() {
            None
        } else {
            Some(vpc_security_groups)
        },
        vpc_endpoint: endpoint.vpc_endpoint().map(|ve| VpcEndpointDetail {
            vpc_endpoint_id: ve.vpc_endpoint_id().map(str::to_string),
            vpc_id: ve.vpc_id().map(str::to_string),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_redshift::types::{VpcEndpoint, VpcSecurityGroupMembership};
    use aws_smithy_types::DateTime;

    #[test]
    fn maps_service_response_to_model() {
        let endpoint = EndpointAccess::builder()
            .endpoint_name("my-endpoint")
            .cluster_identifier("my-cluster")
            .subnet_group_name("my-subnets")
            .endpoint_status("active")
            .address("my-endpoint.abc.us-east-1.redshift.amazonaws.com")
            .port(5439)
            .endpoint_create_time(DateTime::from_secs(1_700_000_000))
            .vpc_security_groups(
                VpcSecurityGroupMembership::builder()
                    .vpc_security_group_id("sg-123")
                    .status("active")
                    .build(),
            )
            .vpc_endpoint(
                VpcEndpoint::builder()
                    .vpc_endpoint_id("vpce-1")
                    .vpc_id("vpc-1")
                    .build(),
            )
            .build();

        let model = from_sdk(&endpoint);
        assert_eq!(model.endpoint_name.as_deref(), Some("my-endpoint"));
        assert_eq!(model.port, Some(5439));
        assert_eq!(
            model.vpc_security_group_ids,
            Some(vec!["sg-123".to_string()])
        );
        assert_eq!(
            model.vpc_endpoint.as_ref().unwrap().vpc_endpoint_id.as_deref(),
            Some("vpce-1")
        );
        let created = model.endpoint_create_time.unwrap();
        assert!(created.starts_with("2023-11-14T"));
    }

    #[test]
    fn empty_response_maps_to_empty_model() {
        let model = from_sdk(&EndpointAccess::builder().build());
        assert!(model.endpoint_name.is_none());
        assert!(model.port.is_none());
        assert!(model.vpc_security_groups.is_none());
        assert!(model.vpc_endpoint.is_none());
    }
}
