//! Cluster security group lifecycle handlers
//!
//! These manage the legacy EC2-Classic security groups. Ingress sources
//! are reconciled on update: rules present in the desired state but not
//! the previous one are authorized, rules that disappeared are revoked.

mod model;
mod translate;

pub use model::{IngressRule, SecurityGroupModel};

use aws_sdk_redshift::Client;
use redshift_provider_core::{
    Action, CallbackContext, HandlerError, ProgressEvent, ResourceHandlerRequest, fields,
    identifier,
};
use tracing::{info, warn};

use crate::{arn, errors, tags};
use model::{FIELDS, MAX_NAME_LEN, TYPE_LABEL, diff_rules};

const MAX_LIST_RECORDS: i32 = 50;

/// Entry point for the orchestration host
pub async fn handle(
    client: &Client,
    action: Action,
    request: &ResourceHandlerRequest<SecurityGroupModel>,
    _context: CallbackContext,
) -> ProgressEvent<SecurityGroupModel> {
    let result = match action {
        Action::Create => create(client, request).await,
        Action::Read => read(client, request).await,
        Action::Update => update(client, request).await,
        Action::Delete => delete(client, request).await,
        Action::List => list(client, request).await,
    };
    result.unwrap_or_else(|err| {
        warn!(error = %err, "cluster security group operation failed");
        ProgressEvent::from(err)
    })
}

async fn create(
    client: &Client,
    request: &ResourceHandlerRequest<SecurityGroupModel>,
) -> Result<ProgressEvent<SecurityGroupModel>, HandlerError> {
    let desired = request.desired()?;
    fields::ensure_read_only_absent(FIELDS, desired)?;
    let description = fields::require("Description", desired.description.as_deref())?;
    let name = desired
        .cluster_security_group_name
        .clone()
        .unwrap_or_else(|| {
            identifier::generate_name(
                request.logical_resource_id.as_deref(),
                &request.client_request_token,
                MAX_NAME_LEN,
            )
        });

    info!(name = %name, "creating cluster security group");
    client
        .create_cluster_security_group()
        .cluster_security_group_name(&name)
        .description(description)
        .set_tags(desired.tags.as_ref().map(tags::to_sdk_tags))
        .send()
        .await
        .map_err(|e| errors::classify("CreateClusterSecurityGroup", TYPE_LABEL, &name, e))?;

    if let Some(rules) = &desired.ingress_rules {
        authorize_rules(client, &name, rules).await?;
    }

    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn read(
    client: &Client,
    request: &ResourceHandlerRequest<SecurityGroupModel>,
) -> Result<ProgressEvent<SecurityGroupModel>, HandlerError> {
    let desired = request.desired()?;
    let name = fields::require(
        "ClusterSecurityGroupName",
        desired.cluster_security_group_name.as_deref(),
    )?;
    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn update(
    client: &Client,
    request: &ResourceHandlerRequest<SecurityGroupModel>,
) -> Result<ProgressEvent<SecurityGroupModel>, HandlerError> {
    let desired = request.desired()?;
    let previous = request.previous()?;
    fields::ensure_create_only_unchanged(FIELDS, previous, desired)?;
    let name = fields::require(
        "ClusterSecurityGroupName",
        desired
            .cluster_security_group_name
            .as_deref()
            .or(previous.cluster_security_group_name.as_deref()),
    )?;

    let no_rules = Vec::new();
    let (to_authorize, to_revoke) = diff_rules(
        previous.ingress_rules.as_ref().unwrap_or(&no_rules),
        desired.ingress_rules.as_ref().unwrap_or(&no_rules),
    );
    info!(
        name = %name,
        authorizing = to_authorize.len(),
        revoking = to_revoke.len(),
        "reconciling cluster security group ingress"
    );
    authorize_rules(client, &name, &to_authorize).await?;
    for rule in &to_revoke {
        client
            .revoke_cluster_security_group_ingress()
            .cluster_security_group_name(&name)
            .set_cidrip(rule.cidrip.clone())
            .set_ec2_security_group_name(rule.ec2_security_group_name.clone())
            .set_ec2_security_group_owner_id(rule.ec2_security_group_owner_id.clone())
            .send()
            .await
            .map_err(|e| {
                errors::classify("RevokeClusterSecurityGroupIngress", TYPE_LABEL, &name, e)
            })?;
    }

    tags::sync(
        client,
        request.aws_account_id.as_deref(),
        request.region.as_deref(),
        arn::SECURITY_GROUP,
        &name,
        previous.tags.as_ref(),
        desired.tags.as_ref(),
    )
    .await?;

    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn delete(
    client: &Client,
    request: &ResourceHandlerRequest<SecurityGroupModel>,
) -> Result<ProgressEvent<SecurityGroupModel>, HandlerError> {
    let desired = request.desired()?;
    let name = fields::require(
        "ClusterSecurityGroupName",
        desired.cluster_security_group_name.as_deref(),
    )?;

    info!(name = %name, "deleting cluster security group");
    client
        .delete_cluster_security_group()
        .cluster_security_group_name(&name)
        .send()
        .await
        .map_err(|e| errors::classify("DeleteClusterSecurityGroup", TYPE_LABEL, &name, e))?;

    Ok(ProgressEvent::completed())
}

async fn list(
    client: &Client,
    request: &ResourceHandlerRequest<SecurityGroupModel>,
) -> Result<ProgressEvent<SecurityGroupModel>, HandlerError> {
    let output = client
        .describe_cluster_security_groups()
        .set_marker(request.next_token.clone())
        .max_records(MAX_LIST_RECORDS)
        .send()
        .await
        .map_err(|e| errors::classify("DescribeClusterSecurityGroups", TYPE_LABEL, "*", e))?;

    let models = output
        .cluster_security_groups()
        .iter()
        .map(translate::from_sdk)
        .collect();
    Ok(ProgressEvent::list(models, output.marker().map(str::to_string)))
}

async fn authorize_rules(
    client: &Client,
    name: &str,
    rules: &[model::IngressRule],
) -> Result<(), HandlerError> {
    for rule in rules {
        client
            .authorize_cluster_security_group_ingress()
            .cluster_security_group_name(name)
            .set_cidrip(rule.cidrip.clone())
            .set_ec2_security_group_name(rule.ec2_security_group_name.clone())
            .set_ec2_security_group_owner_id(rule.ec2_security_group_owner_id.clone())
            .send()
            .await
            .map_err(|e| {
                errors::classify("AuthorizeClusterSecurityGroupIngress", TYPE_LABEL, name, e)
            })?;
    }
    Ok(())
}

async fn read_by_name(client: &Client, name: &str) -> Result<SecurityGroupModel, HandlerError> {
    let output = client
        .describe_cluster_security_groups()
        .cluster_security_group_name(name)
        .send()
        .await
        .map_err(|e| errors::classify("DescribeClusterSecurityGroups", TYPE_LABEL, name, e))?;

    output
        .cluster_security_groups()
        .first()
        .map(translate::from_sdk)
        .ok_or_else(|| HandlerError::not_found(TYPE_LABEL, name))
}
