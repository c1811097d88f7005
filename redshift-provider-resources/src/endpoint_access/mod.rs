//! Endpoint access lifecycle handlers
//!
//! Endpoint provisioning is asynchronous: create, update, and delete
//! submit their service call once (guarded by the callback context), then
//! report in-progress and check the endpoint status one tick per
//! invocation until it settles.

mod model;
mod stabilize;
mod translate;

pub use model::{EndpointAccessModel, VpcEndpointDetail, VpcSecurityGroupStatus};

use aws_sdk_redshift::Client;
use aws_sdk_redshift::types::EndpointAccess;
use redshift_provider_core::{
    Action, CallbackContext, HandlerError, ProgressEvent, ResourceHandlerRequest, fields,
    identifier,
};
use tracing::{debug, info, warn};

use crate::errors;
use model::{FIELDS, MAX_NAME_LEN, TYPE_LABEL};

const MAX_LIST_RECORDS: i32 = 50;
const STABILIZE_DELAY_SECONDS: u64 = 30;

/// Entry point for the orchestration host
pub async fn handle(
    client: &Client,
    action: Action,
    request: &ResourceHandlerRequest<EndpointAccessModel>,
    context: CallbackContext,
) -> ProgressEvent<EndpointAccessModel> {
    let result = match action {
        Action::Create => create(client, request, context).await,
        Action::Read => read(client, request).await,
        Action::Update => update(client, request, context).await,
        Action::Delete => delete(client, request, context).await,
        Action::List => list(client, request).await,
    };
    result.unwrap_or_else(|err| {
        warn!(error = %err, "endpoint access operation failed");
        ProgressEvent::from(err)
    })
}

async fn create(
    client: &Client,
    request: &ResourceHandlerRequest<EndpointAccessModel>,
    context: CallbackContext,
) -> Result<ProgressEvent<EndpointAccessModel>, HandlerError> {
    let desired = request.desired()?;
    let mut model = desired.clone();

    if !context.call_submitted {
        fields::ensure_read_only_absent(FIELDS, desired)?;
        let cluster = fields::require("ClusterIdentifier", desired.cluster_identifier.as_deref())?;
        let subnet_group =
            fields::require("SubnetGroupName", desired.subnet_group_name.as_deref())?;
        let name = desired.endpoint_name.clone().unwrap_or_else(|| {
            identifier::generate_name(
                request.logical_resource_id.as_deref(),
                &request.client_request_token,
                MAX_NAME_LEN,
            )
        });
        model.endpoint_name = Some(name.clone());

        info!(name = %name, cluster = %cluster, "creating endpoint access");
        client
            .create_endpoint_access()
            .endpoint_name(&name)
            .cluster_identifier(cluster)
            .subnet_group_name(subnet_group)
            .set_resource_owner(desired.resource_owner.clone())
            .set_vpc_security_group_ids(desired.vpc_security_group_ids.clone())
            .send()
            .await
            .map_err(|e| errors::classify("CreateEndpointAccess", TYPE_LABEL, &name, e))?;

        return Ok(ProgressEvent::in_progress(
            model,
            CallbackContext::submitted(),
            STABILIZE_DELAY_SECONDS,
        ));
    }

    let name = fields::require("EndpointName", model.endpoint_name.as_deref())?;
    if stabilize::is_active(client, &name).await? {
        debug!(name = %name, "endpoint access is active");
        read_by_name(client, &name).await.map(ProgressEvent::success)
    } else {
        debug!(
            name = %name,
            attempts = context.stabilization_attempts,
            "endpoint access not yet active"
        );
        Ok(ProgressEvent::in_progress(
            model,
            context.next_attempt(),
            STABILIZE_DELAY_SECONDS,
        ))
    }
}

async fn read(
    client: &Client,
    request: &ResourceHandlerRequest<EndpointAccessModel>,
) -> Result<ProgressEvent<EndpointAccessModel>, HandlerError> {
    let desired = request.desired()?;
    let name = fields::require("EndpointName", desired.endpoint_name.as_deref())?;
    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn update(
    client: &Client,
    request: &ResourceHandlerRequest<EndpointAccessModel>,
    context: CallbackContext,
) -> Result<ProgressEvent<EndpointAccessModel>, HandlerError> {
    let desired = request.desired()?;
    let name = fields::require("EndpointName", desired.endpoint_name.as_deref())?;

    if !context.call_submitted {
        // Create-only fields are checked against what the service reports,
        // not against the previous state the host replays.
        let current = translate::from_sdk(&describe_one(client, &name).await?);
        fields::ensure_create_only_unchanged(FIELDS, &current, desired)?;
        let security_groups = match &desired.vpc_security_group_ids {
            Some(ids) if !ids.is_empty() => ids.clone(),
            _ => {
                return Err(HandlerError::invalid_input(
                    "VpcSecurityGroupIds is required",
                ));
            }
        };

        info!(name = %name, "modifying endpoint access");
        client
            .modify_endpoint_access()
            .endpoint_name(&name)
            .set_vpc_security_group_ids(Some(security_groups))
            .send()
            .await
            .map_err(|e| errors::classify("ModifyEndpointAccess", TYPE_LABEL, &name, e))?;

        return Ok(ProgressEvent::in_progress(
            desired.clone(),
            CallbackContext::submitted(),
            STABILIZE_DELAY_SECONDS,
        ));
    }

    if stabilize::is_active(client, &name).await? {
        read_by_name(client, &name).await.map(ProgressEvent::success)
    } else {
        Ok(ProgressEvent::in_progress(
            desired.clone(),
            context.next_attempt(),
            STABILIZE_DELAY_SECONDS,
        ))
    }
}

async fn delete(
    client: &Client,
    request: &ResourceHandlerRequest<EndpointAccessModel>,
    context: CallbackContext,
) -> Result<ProgressEvent<EndpointAccessModel>, HandlerError> {
    let desired = request.desired()?;
    let name = fields::require("EndpointName", desired.endpoint_name.as_deref())?;

    if !context.call_submitted {
        info!(name = %name, "deleting endpoint access");
        client
            .delete_endpoint_access()
            .endpoint_name(&name)
            .send()
            .await
            .map_err(|e| errors::classify("DeleteEndpointAccess", TYPE_LABEL, &name, e))?;

        return Ok(ProgressEvent::in_progress(
            desired.clone(),
            CallbackContext::submitted(),
            STABILIZE_DELAY_SECONDS,
        ));
    }

    if stabilize::is_deleted(client, &name).await? {
        debug!(name = %name, "endpoint access deletion complete");
        Ok(ProgressEvent::completed())
    } else {
        Ok(ProgressEvent::in_progress(
            desired.clone(),
            context.next_attempt(),
            STABILIZE_DELAY_SECONDS,
        ))
    }
}

async fn list(
    client: &Client,
    request: &ResourceHandlerRequest<EndpointAccessModel>,
) -> Result<ProgressEvent<EndpointAccessModel>, HandlerError> {
    let output = client
        .describe_endpoint_access()
        .set_cluster_identifier(
            request
                .desired_state
                .as_ref()
                .and_then(|m| m.cluster_identifier.clone()),
        )
        .set_marker(request.next_token.clone())
        .max_records(MAX_LIST_RECORDS)
        .send()
        .await
        .map_err(|e| errors::classify("DescribeEndpointAccess", TYPE_LABEL, "*", e))?;

    let models = output
        .endpoint_access_list()
        .iter()
        .map(translate::from_sdk)
        .collect();
    Ok(ProgressEvent::list(models, output.marker().map(str::to_string)))
}

async fn read_by_name(
    client: &Client,
    name: &str,
) -> Result<EndpointAccessModel, HandlerError> {
    describe_one(client, name).await.map(|e| translate::from_sdk(&e))
}

/// Describe exactly one endpoint, classifying both the service's
/// not-found fault and an empty result as NotFound
async fn describe_one(client: &Client, name: &str) -> Result<EndpointAccess, HandlerError> {
    let output = client
        .describe_endpoint_access()
        .endpoint_name(name)
        .send()
        .await
        .map_err(|e| errors::classify("DescribeEndpointAccess", TYPE_LABEL, name, e))?;

    output
        .endpoint_access_list()
        .first()
        .cloned()
        .ok_or_else(|| HandlerError::not_found(TYPE_LABEL, name))
}
