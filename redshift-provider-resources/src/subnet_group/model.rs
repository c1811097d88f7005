//! Cluster subnet group resource model

use std::collections::BTreeMap;

use redshift_provider_core::fields::{FieldSpec, Mutability};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) const TYPE_LABEL: &str = "cluster subnet group";
pub(crate) const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SubnetGroupModel {
    /// Generated from the logical id and request token when absent
    pub cluster_subnet_group_name: Option<String>,
    pub description: Option<String>,
    pub subnet_ids: Option<Vec<String>>,
    pub tags: Option<BTreeMap<String, String>>,
    pub vpc_id: Option<String>,
    pub subnet_group_status: Option<String>,
    pub subnets: Option<Vec<SubnetDetail>>,
}

/// Per-subnet detail reported by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SubnetDetail {
    pub subnet_identifier: Option<String>,
    pub availability_zone: Option<String>,
    pub status: Option<String>,
}

pub(crate) const FIELDS: &[FieldSpec<SubnetGroupModel>] = &[
    FieldSpec::new("ClusterSubnetGroupName", Mutability::CreateOnly, |m| {
        m.cluster_subnet_group_name.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("Description", Mutability::Mutable, |m| {
        m.description.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("SubnetIds", Mutability::Mutable, |m| {
        m.subnet_ids.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("Tags", Mutability::Mutable, |m| {
        m.tags.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("VpcId", Mutability::ReadOnly, |m| {
        m.vpc_id.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("SubnetGroupStatus", Mutability::ReadOnly, |m| {
        m.subnet_group_status.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("Subnets", Mutability::ReadOnly, |m| {
        m.subnets.as_ref().and_then(|v| serde_json::to_value(v).ok())
    }),
];
