//! Event subscription resource model

use std::collections::BTreeMap;

use redshift_provider_core::fields::{FieldSpec, Mutability};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) const TYPE_LABEL: &str = "event subscription";
pub(crate) const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EventSubscriptionModel {
    /// Generated from the logical id and request token when absent
    pub subscription_name: Option<String>,
    pub sns_topic_arn: Option<String>,
    pub source_type: Option<String>,
    pub source_ids: Option<Vec<String>>,
    pub event_categories: Option<Vec<String>>,
    pub severity: Option<String>,
    pub enabled: Option<bool>,
    pub tags: Option<BTreeMap<String, String>>,
    pub status: Option<String>,
    pub subscription_creation_time: Option<String>,
    pub customer_aws_id: Option<String>,
}

pub(crate) const FIELDS: &[FieldSpec<EventSubscriptionModel>] = &[
    FieldSpec::new("SubscriptionName", Mutability::CreateOnly, |m| {
        m.subscription_name.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("SnsTopicArn", Mutability::Mutable, |m| {
        m.sns_topic_arn.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("SourceType", Mutability::Mutable, |m| {
        m.source_type.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("SourceIds", Mutability::Mutable, |m| {
        m.source_ids.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("EventCategories", Mutability::Mutable, |m| {
        m.event_categories.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("Severity", Mutability::Mutable, |m| {
        m.severity.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("Enabled", Mutability::Mutable, |m| m.enabled.map(|v| json!(v))),
    FieldSpec::new("Tags", Mutability::Mutable, |m| {
        m.tags.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("Status", Mutability::ReadOnly, |m| {
        m.status.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("SubscriptionCreationTime", Mutability::ReadOnly, |m| {
        m.subscription_creation_time.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("CustomerAwsId", Mutability::ReadOnly, |m| {
        m.customer_aws_id.as_ref().map(|v| json!(v))
    }),
];
