//! Scheduled action resource model

use redshift_provider_core::fields::{FieldSpec, Mutability};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) const TYPE_LABEL: &str = "scheduled action";
pub(crate) const MAX_NAME_LEN: usize = 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScheduledActionModel {
    /// Generated from the logical id and request token when absent
    pub scheduled_action_name: Option<String>,
    pub target_action: Option<TargetAction>,
    /// `at(...)` or `cron(...)` schedule expression
    pub schedule: Option<String>,
    pub iam_role: Option<String>,
    pub scheduled_action_description: Option<String>,
    /// RFC 3339 timestamps
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub enable: Option<bool>,
    pub state: Option<String>,
    pub next_invocations: Option<Vec<String>>,
}

/// Exactly one of the three cluster operations must be set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TargetAction {
    pub resize_cluster: Option<ResizeClusterAction>,
    pub pause_cluster: Option<PauseClusterAction>,
    pub resume_cluster: Option<ResumeClusterAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResizeClusterAction {
    pub cluster_identifier: Option<String>,
    pub cluster_type: Option<String>,
    pub node_type: Option<String>,
    pub number_of_nodes: Option<i32>,
    pub classic: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PauseClusterAction {
    pub cluster_identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResumeClusterAction {
    pub cluster_identifier: Option<String>,
}

pub(crate) const FIELDS: &[FieldSpec<ScheduledActionModel>] = &[
    FieldSpec::new("ScheduledActionName", Mutability::CreateOnly, |m| {
        m.scheduled_action_name.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("TargetAction", Mutability::Mutable, |m| {
        m.target_action
            .as_ref()
            .and_then(|v| serde_json::to_value(v).ok())
    }),
    FieldSpec::new("Schedule", Mutability::Mutable, |m| {
        m.schedule.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("IamRole", Mutability::Mutable, |m| {
        m.iam_role.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("ScheduledActionDescription", Mutability::Mutable, |m| {
        m.scheduled_action_description.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("StartTime", Mutability::Mutable, |m| {
        m.start_time.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("EndTime", Mutability::Mutable, |m| {
        m.end_time.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("Enable", Mutability::Mutable, |m| m.enable.map(|v| json!(v))),
    FieldSpec::new("State", Mutability::ReadOnly, |m| {
        m.state.as_ref().map(|v| json!(v))
    }),
    FieldSpec::new("NextInvocations", Mutability::ReadOnly, |m| {
        m.next_invocations.as_ref().map(|v| json!(v))
    }),
];
