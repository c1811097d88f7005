//! Mapping between the scheduled action model and Redshift SDK shapes

use aws_sdk_redshift::types::{
    PauseClusterMessage, ResizeClusterMessage, ResumeClusterMessage, ScheduledAction,
    ScheduledActionType,
};
use aws_smithy_types::DateTime;
use aws_smithy_types::date_time::Format;
use redshift_provider_core::HandlerError;

use super::model::{
    PauseClusterAction, ResizeClusterAction, ResumeClusterAction, ScheduledActionModel,
    TargetAction,
};

pub(crate) fn from_sdk(action: &ScheduledAction) -> ScheduledActionModel {
    let next_invocations: Vec<String> = action
        .next_invocations()
        .iter()
        .filter_map(|t| t.fmt(Format::DateTime).ok())
        .collect();

    ScheduledActionModel {
        scheduled_action_name: action.scheduled_action_name().map(str::to_string),
        target_action: action.target_action().map(target_action_from_sdk),
        schedule: action.schedule().map(str::to_string),
        iam_role: action.iam_role().map(str::to_string),
        scheduled_action_description: action
            .scheduled_action_description()
            .map(str::to_string),
        start_time: action.start_time().and_then(|t| t.fmt(Format::DateTime).ok()),
        end_time: action.end_time().and_then(|t| t.fmt(Format::DateTime).ok()),
        // the service reports enablement only through State
        enable: None,
        state: action.state().map(|s| s.as_str().to_string()),
        next_invocations: if next_invocations.is_empty() {
            None
        } else {
            Some(next_invocations)
        },
    }
}

fn target_action_from_sdk(target: &ScheduledActionType) -> TargetAction {
    TargetAction {
        resize_cluster: target.resize_cluster().map(|r| ResizeClusterAction {
            cluster_identifier: Some(r.cluster_identifier().to_string()),
            cluster_type: r.cluster_type().map(str::to_string),
            node_type: r.node_type().map(str::to_string),
            number_of_nodes: r.number_of_nodes(),
            classic: r.classic(),
        }),
        pause_cluster: target.pause_cluster().map(|p| PauseClusterAction {
            cluster_identifier: Some(p.cluster_identifier().to_string()),
        }),
        resume_cluster: target.resume_cluster().map(|r| ResumeClusterAction {
            cluster_identifier: Some(r.cluster_identifier().to_string()),
        }),
    }
}

/// Build the SDK target action, rejecting anything other than exactly one
/// of resize, pause, or resume
pub(crate) fn target_action_to_sdk(
    target: &TargetAction,
) -> Result<ScheduledActionType, HandlerError> {
    let set = [
        target.resize_cluster.is_some(),
        target.pause_cluster.is_some(),
        target.resume_cluster.is_some(),
    ]
    .iter()
    .filter(|s| **s)
    .count();
    if set != 1 {
        return Err(HandlerError::invalid_input(
            "TargetAction must set exactly one of ResizeCluster, PauseCluster, or ResumeCluster",
        ));
    }

    let mut builder = ScheduledActionType::builder();
    if let Some(resize) = &target.resize_cluster {
        let cluster = required_cluster(resize.cluster_identifier.as_deref())?;
        let message = ResizeClusterMessage::builder()
            .cluster_identifier(cluster)
            .set_cluster_type(resize.cluster_type.clone())
            .set_node_type(resize.node_type.clone())
            .set_number_of_nodes(resize.number_of_nodes)
            .set_classic(resize.classic)
            .build()
            .map_err(|e| HandlerError::invalid_input(format!("invalid ResizeCluster: {}", e)))?;
        builder = builder.resize_cluster(message);
    }
    if let Some(pause) = &target.pause_cluster {
        let cluster = required_cluster(pause.cluster_identifier.as_deref())?;
        let message = PauseClusterMessage::builder()
            .cluster_identifier(cluster)
            .build()
            .map_err(|e| HandlerError::invalid_input(format!("invalid PauseCluster: {}", e)))?;
        builder = builder.pause_cluster(message);
    }
    if let Some(resume) = &target.resume_cluster {
        let cluster = required_cluster(resume.cluster_identifier.as_deref())?;
        let message = ResumeClusterMessage::builder()
            .cluster_identifier(cluster)
            .build()
            .map_err(|e| HandlerError::invalid_input(format!("invalid ResumeCluster: {}", e)))?;
        builder = builder.resume_cluster(message);
    }
    Ok(builder.build())
}

fn required_cluster(identifier: Option<&str>) -> Result<String, HandlerError> {
    match identifier {
        Some(id) if !id.trim().is_empty() => Ok(id.to_string()),
        _ => Err(HandlerError::invalid_input(
            "TargetAction requires a ClusterIdentifier",
        )),
    }
}

/// Parse an RFC 3339 timestamp from the model
pub(crate) fn parse_time(field: &str, value: &str) -> Result<DateTime, HandlerError> {
    DateTime::from_str(value, Format::DateTime).map_err(|e| {
        HandlerError::invalid_input(format!("{} is not a valid RFC 3339 timestamp: {}", field, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_action_round_trips() {
        let target = TargetAction {
            pause_cluster: Some(PauseClusterAction {
                cluster_identifier: Some("my-cluster".to_string()),
            }),
            ..TargetAction::default()
        };

        let sdk = target_action_to_sdk(&target).unwrap();
        assert_eq!(target_action_from_sdk(&sdk), target);
    }

    #[test]
    fn resize_action_carries_all_parameters() {
        let target = TargetAction {
            resize_cluster: Some(ResizeClusterAction {
                cluster_identifier: Some("my-cluster".to_string()),
                cluster_type: Some("multi-node".to_string()),
                node_type: Some("ra3.4xlarge".to_string()),
                number_of_nodes: Some(4),
                classic: Some(false),
            }),
            ..TargetAction::default()
        };

        let sdk = target_action_to_sdk(&target).unwrap();
        let resize = sdk.resize_cluster().unwrap();
        assert_eq!(resize.cluster_identifier(), "my-cluster");
        assert_eq!(resize.number_of_nodes(), Some(4));
    }

    #[test]
    fn empty_target_action_is_rejected() {
        let err = target_action_to_sdk(&TargetAction::default()).unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn two_target_actions_are_rejected() {
        let target = TargetAction {
            pause_cluster: Some(PauseClusterAction {
                cluster_identifier: Some("a".to_string()),
            }),
            resume_cluster: Some(ResumeClusterAction {
                cluster_identifier: Some("a".to_string()),
            }),
            ..TargetAction::default()
        };
        assert!(target_action_to_sdk(&target).is_err());
    }

    #[test]
    fn missing_cluster_identifier_is_rejected() {
        let target = TargetAction {
            pause_cluster: Some(PauseClusterAction {
                cluster_identifier: None,
            }),
            ..TargetAction::default()
        };
        assert!(target_action_to_sdk(&target).is_err());
    }

    #[test]
    fn parse_time_accepts_rfc3339_and_rejects_garbage() {
        assert!(parse_time("StartTime", "2026-01-15T00:00:00Z").is_ok());
        assert!(parse_time("StartTime", "next tuesday").is_err());
    }
}
