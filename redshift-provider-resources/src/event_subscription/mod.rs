//! Event subscription lifecycle handlers

mod model;
mod translate;

pub use model::EventSubscriptionModel;

use aws_sdk_redshift::Client;
use redshift_provider_core::{
    Action, CallbackContext, HandlerError, ProgressEvent, ResourceHandlerRequest, fields,
    identifier,
};
use tracing::{info, warn};

use crate::{arn, errors, tags};
use model::{FIELDS, MAX_NAME_LEN, TYPE_LABEL};

const MAX_LIST_RECORDS: i32 = 50;

/// Entry point for the orchestration host
pub async fn handle(
    client: &Client,
    action: Action,
    request: &ResourceHandlerRequest<EventSubscriptionModel>,
    _context: CallbackContext,
) -> ProgressEvent<EventSubscriptionModel> {
    let result = match action {
        Action::Create => create(client, request).await,
        Action::Read => read(client, request).await,
        Action::Update => update(client, request).await,
        Action::Delete => delete(client, request).await,
        Action::List => list(client, request).await,
    };
    result.unwrap_or_else(|err| {
        warn!(error = %err, "event subscription operation failed");
        ProgressEvent::from(err)
    })
}

async fn create(
    client: &Client,
    request: &ResourceHandlerRequest<EventSubscriptionModel>,
) -> Result<ProgressEvent<EventSubscriptionModel>, HandlerError> {
    let desired = request.desired()?;
    fields::ensure_read_only_absent(FIELDS, desired)?;
    let sns_topic_arn = fields::require("SnsTopicArn", desired.sns_topic_arn.as_deref())?;
    let name = desired.subscription_name.clone().unwrap_or_else(|| {
        identifier::generate_name(
            request.logical_resource_id.as_deref(),
            &request.client_request_token,
            MAX_NAME_LEN,
        )
    });

    info!(name = %name, "creating event subscription");
    client
        .create_event_subscription()
        .subscription_name(&name)
        .sns_topic_arn(sns_topic_arn)
        .set_source_type(desired.source_type.clone())
        .set_source_ids(desired.source_ids.clone())
        .set_event_categories(desired.event_categories.clone())
        .set_severity(desired.severity.clone())
        .set_enabled(desired.enabled)
        .set_tags(desired.tags.as_ref().map(tags::to_sdk_tags))
        .send()
        .await
        .map_err(|e| errors::classify("CreateEventSubscription", TYPE_LABEL, &name, e))?;

    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn read(
    client: &Client,
    request: &ResourceHandlerRequest<EventSubscriptionModel>,
) -> Result<ProgressEvent<EventSubscriptionModel>, HandlerError> {
    let desired = request.desired()?;
    let name = fields::require("SubscriptionName", desired.subscription_name.as_deref())?;
    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn update(
    client: &Client,
    request: &ResourceHandlerRequest<EventSubscriptionModel>,
) -> Result<ProgressEvent<EventSubscriptionModel>, HandlerError> {
    let desired = request.desired()?;
    let previous = request.previous()?;
    fields::ensure_create_only_unchanged(FIELDS, previous, desired)?;
    let name = fields::require(
        "SubscriptionName",
        desired
            .subscription_name
            .as_deref()
            .or(previous.subscription_name.as_deref()),
    )?;

    info!(name = %name, "modifying event subscription");
    client
        .modify_event_subscription()
        .subscription_name(&name)
        .set_sns_topic_arn(desired.sns_topic_arn.clone())
        .set_source_type(desired.source_type.clone())
        .set_source_ids(desired.source_ids.clone())
        .set_event_categories(desired.event_categories.clone())
        .set_severity(desired.severity.clone())
        .set_enabled(desired.enabled)
        .send()
        .await
        .map_err(|e| errors::classify("ModifyEventSubscription", TYPE_LABEL, &name, e))?;

    tags::sync(
        client,
        request.aws_account_id.as_deref(),
        request.region.as_deref(),
        arn::EVENT_SUBSCRIPTION,
        &name,
        previous.tags.as_ref(),
        desired.tags.as_ref(),
    )
    .await?;

    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn delete(
    client: &Client,
    request: &ResourceHandlerRequest<EventSubscriptionModel>,
) -> Result<ProgressEvent<EventSubscriptionModel>, HandlerError> {
    let desired = request.desired()?;
    let name = fields::require("SubscriptionName", desired.subscription_name.as_deref())?;

    info!(name = %name, "deleting event subscription");
    client
        .delete_event_subscription()
        .subscription_name(&name)
        .send()
        .await
        .map_err(|e| errors::classify("DeleteEventSubscription", TYPE_LABEL, &name, e))?;

    Ok(ProgressEvent::completed())
}

async fn list(
    client: &Client,
    request: &ResourceHandlerRequest<EventSubscriptionModel>,
) -> Result<ProgressEvent<EventSubscriptionModel>, HandlerError> {
    let output = client
        .describe_event_subscriptions()
        .set_marker(request.next_token.clone())
        .max_records(MAX_LIST_RECORDS)
        .send()
        .await
        .map_err(|e| errors::classify("DescribeEventSubscriptions", TYPE_LABEL, "*", e))?;

    let models = output
        .event_subscriptions_list()
        .iter()
        .map(translate::from_sdk)
        .collect();
    Ok(ProgressEvent::list(models, output.marker().map(str::to_string)))
}

async fn read_by_name(
    client: &Client,
    name: &str,
) -> Result<EventSubscriptionModel, HandlerError> {
    let output = client
        .describe_event_subscriptions()
        .subscription_name(name)
        .send()
        .await
        .map_err(|e| errors::classify("DescribeEventSubscriptions", TYPE_LABEL, name, e))?;

    output
        .event_subscriptions_list()
        .first()
        .map(translate::from_sdk)
        .ok_or_else(|| HandlerError::not_found(TYPE_LABEL, name))
}
