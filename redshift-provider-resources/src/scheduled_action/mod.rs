//! Scheduled action lifecycle handlers

mod model;
mod translate;

pub use model::{
    PauseClusterAction, ResizeClusterAction, ResumeClusterAction, ScheduledActionModel,
    TargetAction,
};

use aws_sdk_redshift::Client;
use aws_smithy_types::DateTime;
use redshift_provider_core::{
    Action, CallbackContext, HandlerError, ProgressEvent, ResourceHandlerRequest, fields,
    identifier,
};
use tracing::{info, warn};

use crate::errors;
use model::{FIELDS, MAX_NAME_LEN, TYPE_LABEL};

const MAX_LIST_RECORDS: i32 = 50;

/// Entry point for the orchestration host
pub async fn handle(
    client: &Client,
    action: Action,
    request: &ResourceHandlerRequest<ScheduledActionModel>,
    _context: CallbackContext,
) -> ProgressEvent<ScheduledActionModel> {
    let result = match action {
        Action::Create => create(client, request).await,
        Action::Read => read(client, request).await,
        Action::Update => update(client, request).await,
        Action::Delete => delete(client, request).await,
        Action::List => list(client, request).await,
    };
    result.unwrap_or_else(|err| {
        warn!(error = %err, "scheduled action operation failed");
        ProgressEvent::from(err)
    })
}

async fn create(
    client: &Client,
    request: &ResourceHandlerRequest<ScheduledActionModel>,
) -> Result<ProgressEvent<ScheduledActionModel>, HandlerError> {
    let desired = request.desired()?;
    fields::ensure_read_only_absent(FIELDS, desired)?;
    let schedule = fields::require("Schedule", desired.schedule.as_deref())?;
    let iam_role = fields::require("IamRole", desired.iam_role.as_deref())?;
    let target_action = desired
        .target_action
        .as_ref()
        .ok_or_else(|| HandlerError::invalid_input("TargetAction is required"))
        .and_then(translate::target_action_to_sdk)?;
    let name = desired.scheduled_action_name.clone().unwrap_or_else(|| {
        identifier::generate_name(
            request.logical_resource_id.as_deref(),
            &request.client_request_token,
            MAX_NAME_LEN,
        )
    });

    info!(name = %name, "creating scheduled action");
    client
        .create_scheduled_action()
        .scheduled_action_name(&name)
        .target_action(target_action)
        .schedule(schedule)
        .iam_role(iam_role)
        .set_scheduled_action_description(desired.scheduled_action_description.clone())
        .set_start_time(parse_optional_time("StartTime", desired.start_time.as_deref())?)
        .set_end_time(parse_optional_time("EndTime", desired.end_time.as_deref())?)
        .set_enable(desired.enable)
        .send()
        .await
        .map_err(|e| errors::classify("CreateScheduledAction", TYPE_LABEL, &name, e))?;

    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn read(
    client: &Client,
    request: &ResourceHandlerRequest<ScheduledActionModel>,
) -> Result<ProgressEvent<ScheduledActionModel>, HandlerError> {
    let desired = request.desired()?;
    let name = fields::require(
        "ScheduledActionName",
        desired.scheduled_action_name.as_deref(),
    )?;
    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn update(
    client: &Client,
    request: &ResourceHandlerRequest<ScheduledActionModel>,
) -> Result<ProgressEvent<ScheduledActionModel>, HandlerError> {
    let desired = request.desired()?;
    let previous = request.previous()?;
    fields::ensure_create_only_unchanged(FIELDS, previous, desired)?;
    let name = fields::require(
        "ScheduledActionName",
        desired
            .scheduled_action_name
            .as_deref()
            .or(previous.scheduled_action_name.as_deref()),
    )?;
    let target_action = desired
        .target_action
        .as_ref()
        .map(translate::target_action_to_sdk)
        .transpose()?;

    info!(name = %name, "modifying scheduled action");
    client
        .modify_scheduled_action()
        .scheduled_action_name(&name)
        .set_target_action(target_action)
        .set_schedule(desired.schedule.clone())
        .set_iam_role(desired.iam_role.clone())
        .set_scheduled_action_description(desired.scheduled_action_description.clone())
        .set_start_time(parse_optional_time("StartTime", desired.start_time.as_deref())?)
        .set_end_time(parse_optional_time("EndTime", desired.end_time.as_deref())?)
        .set_enable(desired.enable)
        .send()
        .await
        .map_err(|e| errors::classify("ModifyScheduledAction", TYPE_LABEL, &name, e))?;

    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn delete(
    client: &Client,
    request: &ResourceHandlerRequest<ScheduledActionModel>,
) -> Result<ProgressEvent<ScheduledActionModel>, HandlerError> {
    let desired = request.desired()?;
    let name = fields::require(
        "ScheduledActionName",
        desired.scheduled_action_name.as_deref(),
    )?;

    info!(name = %name, "deleting scheduled action");
    client
        .delete_scheduled_action()
        .scheduled_action_name(&name)
        .send()
        .await
        .map_err(|e| errors::classify("DeleteScheduledAction", TYPE_LABEL, &name, e))?;

    Ok(ProgressEvent::completed())
}

async fn list(
    client: &Client,
    request: &ResourceHandlerRequest<ScheduledActionModel>,
) -> Result<ProgressEvent<ScheduledActionModel>, HandlerError> {
    let output = client
        .describe_scheduled_actions()
        .set_marker(request.next_token.clone())
        .max_records(MAX_LIST_RECORDS)
        .send()
        .await
        .map_err(|e| errors::classify("DescribeScheduledActions", TYPE_LABEL, "*", e))?;

    let models = output
        .scheduled_actions()
        .iter()
        .map(translate::from_sdk)
        .collect();
    Ok(ProgressEvent::list(models, output.marker().map(str::to_string)))
}

fn parse_optional_time(
    field: &str,
    value: Option<&str>,
) -> Result<Option<DateTime>, HandlerError> {
    value.map(|v| translate::parse_time(field, v)).transpose()
}

async fn read_by_name(
    client: &Client,
    name: &str,
) -> Result<ScheduledActionModel, HandlerError> {
    let output = client
        .describe_scheduled_actions()
        .scheduled_action_name(name)
        .send()
        .await
        .map_err(|e| errors::classify("DescribeScheduledActions", TYPE_LABEL, name, e))?;

    output
        .scheduled_actions()
        .first()
        .map(translate::from_sdk)
        .ok_or_else(|| HandlerError::not_found(TYPE_LABEL, name))
}
