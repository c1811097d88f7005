//! Resource policy model
//!
//! Policies are keyed by the ARN of the resource they attach to; there is
//! no separate policy name.

use redshift_provider_core::fields::{FieldSpec, Mutability};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) const TYPE_LABEL: &str = "resource policy";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourcePolicyModel {
    pub resource_arn: Option<String>,
    /// Policy document as a JSON string
    pub policy: Option<String>,
}

pub(crate) const FIELDS: &[FieldSpec<ResourcePolicyModel>] = &[
    FieldSpec::new("ResourceArn", Mutability::CreateOnly, |m| {
        m.resource_arn.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("Policy", Mutability::Mutable, |m| {
        m.policy.as_ref().map(|v| json!(v))
    }),
];
