//! Resource policy lifecycle handlers
//!
//! The service stores at most one policy per resource ARN, so List
//! degenerates to the policy for the requested ARN and there is no
//! pagination.

mod model;

pub use model::ResourcePolicyModel;

use aws_sdk_redshift::Client;
use redshift_provider_core::{
    Action, CallbackContext, HandlerError, ProgressEvent, ResourceHandlerRequest, fields,
};
use tracing::{info, warn};

use crate::errors;
use model::{FIELDS, TYPE_LABEL};

/// Entry point for the orchestration host
pub async fn handle(
    client: &Client,
    action: Action,
    request: &ResourceHandlerRequest<ResourcePolicyModel>,
    _context: CallbackContext,
) -> ProgressEvent<ResourcePolicyModel> {
    let result = match action {
        Action::Create => create(client, request).await,
        Action::Read => read(client, request).await,
        Action::Update => update(client, request).await,
        Action::Delete => delete(client, request).await,
        Action::List => list(client, request).await,
    };
    result.unwrap_or_else(|err| {
        warn!(error = %err, "resource policy operation failed");
        ProgressEvent::from(err)
    })
}

async fn create(
    client: &Client,
    request: &ResourceHandlerRequest<ResourcePolicyModel>,
) -> Result<ProgressEvent<ResourcePolicyModel>, HandlerError> {
    let desired = request.desired()?;
    let resource_arn = fields::require("ResourceArn", desired.resource_arn.as_deref())?;
    let policy = fields::require("Policy", desired.policy.as_deref())?;

    // A policy may already be attached to the ARN; creating over it would
    // silently replace it.
    match read_by_arn(client, &resource_arn).await {
        Ok(_) => return Err(HandlerError::already_exists(TYPE_LABEL, &resource_arn)),
        Err(err) if errors::is_not_found(&err) => {}
        Err(err) => return Err(err),
    }

    info!(arn = %resource_arn, "attaching resource policy");
    client
        .put_resource_policy()
        .resource_arn(&resource_arn)
        .policy(policy)
        .send()
        .await
        .map_err(|e| errors::classify("PutResourcePolicy", TYPE_LABEL, &resource_arn, e))?;

    read_by_arn(client, &resource_arn).await.map(ProgressEvent::success)
}

async fn read(
    client: &Client,
    request: &ResourceHandlerRequest<ResourcePolicyModel>,
) -> Result<ProgressEvent<ResourcePolicyModel>, HandlerError> {
    let desired = request.desired()?;
    let resource_arn = fields::require("ResourceArn", desired.resource_arn.as_deref())?;
    read_by_arn(client, &resource_arn).await.map(ProgressEvent::success)
}

async fn update(
    client: &Client,
    request: &ResourceHandlerRequest<ResourcePolicyModel>,
) -> Result<ProgressEvent<ResourcePolicyModel>, HandlerError> {
    let desired = request.desired()?;
    let previous = request.previous()?;
    fields::ensure_create_only_unchanged(FIELDS, previous, desired)?;
    let resource_arn = fields::require(
        "ResourceArn",
        desired
            .resource_arn
            .as_deref()
            .or(previous.resource_arn.as_deref()),
    )?;
    let policy = fields::require("Policy", desired.policy.as_deref())?;

    info!(arn = %resource_arn, "replacing resource policy");
    client
        .put_resource_policy()
        .resource_arn(&resource_arn)
        .policy(policy)
        .send()
        .await
        .map_err(|e| errors::classify("PutResourcePolicy", TYPE_LABEL, &resource_arn, e))?;

    read_by_arn(client, &resource_arn).await.map(ProgressEvent::success)
}

async fn delete(
    client: &Client,
    request: &ResourceHandlerRequest<ResourcePolicyModel>,
) -> Result<ProgressEvent<ResourcePolicyModel>, HandlerError> {
    let desired = request.desired()?;
    let resource_arn = fields::require("ResourceArn", desired.resource_arn.as_deref())?;

    // The service treats deleting an absent policy as a no-op, so probe
    // first to report NotFound the way every other resource does.
    read_by_arn(client, &resource_arn).await?;

    info!(arn = %resource_arn, "deleting resource policy");
    client
        .delete_resource_policy()
        .resource_arn(&resource_arn)
        .send()
        .await
        .map_err(|e| errors::classify("DeleteResourcePolicy", TYPE_LABEL, &resource_arn, e))?;

    Ok(ProgressEvent::completed())
}

async fn list(
    client: &Client,
    request: &ResourceHandlerRequest<ResourcePolicyModel>,
) -> Result<ProgressEvent<ResourcePolicyModel>, HandlerError> {
    let desired = request.desired()?;
    let resource_arn = fields::require("ResourceArn", desired.resource_arn.as_deref())?;

    match read_by_arn(client, &resource_arn).await {
        Ok(model) => Ok(ProgressEvent::list(vec![model], None)),
        Err(err) if errors::is_not_found(&err) => Ok(ProgressEvent::list(Vec::new(), None)),
        Err(err) => Err(err),
    }
}

async fn read_by_arn(
    client: &Client,
    resource_arn: &str,
) -> Result<ResourcePolicyModel, HandlerError> {
    let output = client
        .get_resource_policy()
        .resource_arn(resource_arn)
        .send()
        .await
        .map_err(|e| errors::classify("GetResourcePolicy", TYPE_LABEL, resource_arn, e))?;

    let policy = output
        .resource_policy()
        .and_then(|p| p.policy())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| HandlerError::not_found(TYPE_LABEL, resource_arn))?;

    Ok(ResourcePolicyModel {
        resource_arn: output
            .resource_policy()
            .and_then(|p| p.resource_arn())
            .map(str::to_string)
            .or_else(|| Some(resource_arn.to_string())),
        policy: Some(policy.to_string()),
    })
}
