//! Endpoint access resource model

use redshift_provider_core::fields::{FieldSpec, Mutability};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) const TYPE_LABEL: &str = "endpoint access";
pub(crate) const MAX_NAME_LEN: usize = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EndpointAccessModel {
    /// Generated from the logical id and request token when absent
    pub endpoint_name: Option<String>,
    pub cluster_identifier: Option<String>,
    pub subnet_group_name: Option<String>,
    /// Account that owns the cluster, when accessing a shared cluster
    pub resource_owner: Option<String>,
    pub vpc_security_group_ids: Option<Vec<String>>,
    pub address: Option<String>,
    pub port: Option<i32>,
    pub endpoint_status: Option<String>,
    pub endpoint_create_time: Option<String>,
    pub vpc_security_groups: Option<Vec<VpcSecurityGroupStatus>>,
    pub vpc_endpoint: Option<VpcEndpointDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VpcSecurityGroupStatus {
    pub vpc_security_group_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VpcEndpointDetail {
    pub vpc_endpoint_id: Option<String>,
    pub vpc_id: Option<String>,
}

pub(crate) const FIELDS: &[FieldSpec<EndpointAccessModel>] = &[
    FieldSpec::new("EndpointName", Mutability::CreateOnly, |m| {
        m.endpoint_name.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("ClusterIdentifier", Mutability::CreateOnly, |m| {
        m.cluster_identifier.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("SubnetGroupName", Mutability::CreateOnly, |m| {
        m.subnet_group_name.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("ResourceOwner", Mutability::CreateOnly, |m| {
        m.resource_owner.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("VpcSecurityGroupIds", Mutability::Mutable, |m| {
        m.vpc_security_group_ids.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("Address", Mutability::ReadOnly, |m| {
        m.address.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("Port", Mutability::ReadOnly, |m| m.port.map(|v| json!(v))),
    FieldSpec::new("EndpointStatus", Mutability::ReadOnly, |m| {
        m.endpoint_status.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("EndpointCreateTime", Mutability::ReadOnly, |m| {
        m.endpoint_create_time.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("VpcSecurityGroups", Mutability::ReadOnly, |m| {
        m.vpc_security_groups
            .as_ref()
            .and_then(|v| serde_json::to_value(v).ok())
    }),
    FieldSpec::new("VpcEndpoint", Mutability::ReadOnly, |m| {
        m.vpc_endpoint
            .as_ref()
            .and_then(|v| serde_json::to_value(v).ok())
    }),
];
