//! Cluster subnet group lifecycle handlers

mod model;
mod translate;

pub use model::{SubnetDetail, SubnetGroupModel};

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
    request: &ResourceHandlerRequest<SubnetGroupModel>,
    _context: CallbackContext,
) -> ProgressEvent<SubnetGroupModel> {
    let result = match action {
        Action::Create => create(client, request).await,
        Action::Read => read(client, request).await,
        Action::Update => update(client, request).await,
        Action::Delete => delete(client, request).await,
        Action::List => list(client, request).await,
    };
    result.unwrap_or_else(|err| {
        warn!(error = %err, "cluster subnet group operation failed");
        ProgressEvent::from(err)
    })
}

async fn create(
    client: &Client,
    request: &ResourceHandlerRequest<SubnetGroupModel>,
) -> Result<ProgressEvent<SubnetGroupModel>, HandlerError> {
    let desired = request.desired()?;
    fields::ensure_read_only_absent(FIELDS, desired)?;
    let description = fields::require("Description", desired.description.as_deref())?;
    let subnet_ids = match &desired.subnet_ids {
        Some(ids) if !ids.is_empty() => ids.clone(),
        _ => return Err(HandlerError::invalid_input("SubnetIds is required")),
    };
    let name = desired.cluster_subnet_group_name.clone().unwrap_or_else(|| {
        identifier::generate_name(
            request.logical_resource_id.as_deref(),
            &request.client_request_token,
            MAX_NAME_LEN,
        )
    });

    info!(name = %name, "creating cluster subnet group");
    client
        .create_cluster_subnet_group()
        .cluster_subnet_group_name(&name)
        .description(description)
        .set_subnet_ids(Some(subnet_ids))
        .set_tags(desired.tags.as_ref().map(tags::to_sdk_tags))
        .send()
        .await
        .map_err(|e| errors::classify("CreateClusterSubnetGroup", TYPE_LABEL, &name, e))?;

    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn read(
    client: &Client,
    request: &ResourceHandlerRequest<SubnetGroupModel>,
) -> Result<ProgressEvent<SubnetGroupModel>, HandlerError> {
    let desired = request.desired()?;
    let name = fields::require(
        "ClusterSubnetGroupName",
        desired.cluster_subnet_group_name.as_deref(),
    )?;
    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn update(
    client: &Client,
    request: &ResourceHandlerRequest<SubnetGroupModel>,
) -> Result<ProgressEvent<SubnetGroupModel>, HandlerError> {
    let desired = request.desired()?;
    let previous = request.previous()?;
    fields::ensure_create_only_unchanged(FIELDS, previous, desired)?;
    let name = fields::require(
        "ClusterSubnetGroupName",
        desired
            .cluster_subnet_group_name
            .as_deref()
            .or(previous.cluster_subnet_group_name.as_deref()),
    )?;
    let subnet_ids = match &desired.subnet_ids {
        Some(ids) if !ids.is_empty() => ids.clone(),
        _ => return Err(HandlerError::invalid_input("SubnetIds is required")),
    };

    info!(name = %name, "modifying cluster subnet group");
    client
        .modify_cluster_subnet_group()
        .cluster_subnet_group_name(&name)
        .set_description(desired.description.clone())
        .set_subnet_ids(Some(subnet_ids))
        .send()
        .await
        .map_err(|e| errors::classify("ModifyClusterSubnetGroup", TYPE_LABEL, &name, e))?;

    tags::sync(
        client,
        request.aws_account_id.as_deref(),
        request.region.as_deref(),
        arn::SUBNET_GROUP,
        &name,
        previous.tags.as_ref(),
        desired.tags.as_ref(),
    )
    .await?;

    read_by_name(client, &name).await.map(ProgressEvent::success)
}

async fn delete(
    client: &Client,
    request: &ResourceHandlerRequest<SubnetGroupModel>,
) -> Result<ProgressEvent<SubnetGroupModel>, HandlerError> {
    let desired = request.desired()?;
    let name = fields::require(
        "ClusterSubnetGroupName",
        desired.cluster_subnet_group_name.as_deref(),
    )?;

    info!(name = %name, "deleting cluster subnet group");
    client
        .delete_cluster_subnet_group()
        .cluster_subnet_group_name(&name)
        .send()
        .await
        .map_err(|e| errors::classify("DeleteClusterSubnetGroup", TYPE_LABEL, &name, e))?;

    Ok(ProgressEvent::completed())
}

async fn list(
    client: &Client,
    request: &ResourceHandlerRequest<SubnetGroupModel>,
) -> Result<ProgressEvent<SubnetGroupModel>, HandlerError> {
    let output = client
        .describe_cluster_subnet_groups()
        .set_marker(request.next_token.clone())
        .max_records(MAX_LIST_RECORDS)
        .send()
        .await
        .map_err(|e| errors::classify("DescribeClusterSubnetGroups", TYPE_LABEL, "*", e))?;

    let models = output
        .cluster_subnet_groups()
        .iter()
        .map(translate::from_sdk)
        .collect();
    Ok(ProgressEvent::list(models, output.marker().map(str::to_string)))
}

async fn read_by_name(client: &Client, name: &str) -> Result<SubnetGroupModel, HandlerError> {
    let output = client
        .describe_cluster_subnet_groups()
        .cluster_subnet_group_name(name)
        .send()
        .await
        .map_err(|e| errors::classify("DescribeClusterSubnetGroups", TYPE_LABEL, name, e))?;

    output
        .cluster_subnet_groups()
        .first()
        .map(translate::from_sdk)
        .ok_or_else(|| HandlerError::not_found(TYPE_LABEL, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use redshift_provider_core::{HandlerErrorCode, OperationStatus};

    fn create_response(description: &str) -> String {
        format!(
            r#"<CreateClusterSubnetGroupResponse xmlns="http://redshift.amazonaws.com/doc/2012-12-01/">
  <CreateClusterSubnetGroupResult>
    <ClusterSubnetGroup>
      <ClusterSubnetGroupName>mygroup-tok1</ClusterSubnetGroupName>
      <Description>{}</Description>
    </ClusterSubnetGroup>
  </CreateClusterSubnetGroupResult>
  <ResponseMetadata><RequestId>req-1</RequestId></ResponseMetadata>
</CreateClusterSubnetGroupResponse>"#,
            description
        )
    }

    fn describe_response(description: &str) -> String {
        format!(
            r#"<DescribeClusterSubnetGroupsResponse xmlns="http://redshift.amazonaws.com/doc/2012-12-01/">
  <DescribeClusterSubnetGroupsResult>
    <ClusterSubnetGroups>
      <ClusterSubnetGroup>
        <ClusterSubnetGroupName>mygroup-tok1</ClusterSubnetGroupName>
        <Description>{}</Description>
        <VpcId>vpc-123</VpcId>
        <SubnetGroupStatus>Complete</SubnetGroupStatus>
        <Subnets>
          <Subnet>
            <SubnetIdentifier>subnet-1</SubnetIdentifier>
            <SubnetAvailabilityZone><Name>us-east-1a</Name></SubnetAvailabilityZone>
            <SubnetStatus>Active</SubnetStatus>
          </Subnet>
        </Subnets>
      </ClusterSubnetGroup>
    </ClusterSubnetGroups>
  </DescribeClusterSubnetGroupsResult>
  <ResponseMetadata><RequestId>req-2</RequestId></ResponseMetadata>
</DescribeClusterSubnetGroupsResponse>"#,
            description
        )
    }

    fn desired() -> SubnetGroupModel {
        SubnetGroupModel {
            description: Some("primary subnets".to_string()),
            subnet_ids: Some(vec!["subnet-1".to_string()]),
            ..SubnetGroupModel::default()
        }
    }

    #[tokio::test]
    async fn create_returns_the_read_model() {
        let client = testing::replay_client(vec![
            testing::response(200, &create_response("from create call")),
            testing::response(200, &describe_response("from read call")),
        ]);
        let request = ResourceHandlerRequest::new(desired())
            .with_logical_resource_id("MyGroup")
            .with_client_request_token("tok1");

        let event = handle(&client, Action::Create, &request, CallbackContext::default()).await;

        assert_eq!(event.status, OperationStatus::Success);
        let model = event.resource_model.unwrap();
        // The success model comes from the follow-up read, not the raw
        // create response.
        assert_eq!(model.description.as_deref(), Some("from read call"));
        assert_eq!(model.vpc_id.as_deref(), Some("vpc-123"));
    }

    #[tokio::test]
    async fn create_with_existing_name_fails_as_already_exists() {
        let client = testing::replay_client(vec![testing::error_response(
            "ClusterSubnetGroupAlreadyExists",
            "The subnet group already exists.",
        )]);
        let request = ResourceHandlerRequest::new(SubnetGroupModel {
            cluster_subnet_group_name: Some("taken".to_string()),
            ..desired()
        });

        let event = handle(&client, Action::Create, &request, CallbackContext::default()).await;

        assert_eq!(event.status, OperationStatus::Failed);
        assert_eq!(event.error_code, Some(HandlerErrorCode::AlreadyExists));
    }

    #[tokio::test]
    async fn create_without_subnet_ids_fails_before_any_call() {
        let client = testing::replay_client(Vec::new());
        let request = ResourceHandlerRequest::new(SubnetGroupModel {
            description: Some("primary subnets".to_string()),
            ..SubnetGroupModel::default()
        });

        let event = handle(&client, Action::Create, &request, CallbackContext::default()).await;

        assert_eq!(event.status, OperationStatus::Failed);
        assert_eq!(event.error_code, Some(HandlerErrorCode::ClientError));
    }

    #[tokio::test]
    async fn create_rejects_caller_supplied_read_only_fields() {
        let client = testing::replay_client(Vec::new());
        let request = ResourceHandlerRequest::new(SubnetGroupModel {
            vpc_id: Some("vpc-123".to_string()),
            ..desired()
        });

        let event = handle(&client, Action::Create, &request, CallbackContext::default()).await;

        assert_eq!(event.status, OperationStatus::Failed);
        assert_eq!(event.error_code, Some(HandlerErrorCode::ClientError));
        assert!(event.message.unwrap().contains("VpcId"));
    }

    #[tokio::test]
    async fn update_rejects_renaming_the_group() {
        let client = testing::replay_client(Vec::new());
        let previous = SubnetGroupModel {
            cluster_subnet_group_name: Some("old-name".to_string()),
            ..desired()
        };
        let request = ResourceHandlerRequest::new(SubnetGroupModel {
            cluster_subnet_group_name: Some("new-name".to_string()),
            ..desired()
        })
        .with_previous_state(previous);

        let event = handle(&client, Action::Update, &request, CallbackContext::default()).await;

        assert_eq!(event.status, OperationStatus::Failed);
        assert_eq!(event.error_code, Some(HandlerErrorCode::NotUpdatable));
    }

    #[tokio::test]
    async fn read_of_missing_group_fails_as_not_found() {
        let client = testing::replay_client(vec![testing::error_response(
            "ClusterSubnetGroupNotFoundFault",
            "The subnet group does not exist.",
        )]);
        let request = ResourceHandlerRequest::new(SubnetGroupModel {
            cluster_subnet_group_name: Some("gone".to_string()),
            ..SubnetGroupModel::default()
        });

        let event = handle(&client, Action::Read, &request, CallbackContext::default()).await;

        assert_eq!(event.status, OperationStatus::Failed);
        assert_eq!(event.error_code, Some(HandlerErrorCode::NotFound));
    }

    #[tokio::test]
    async fn list_passes_the_marker_through() {
        let body = r#"<DescribeClusterSubnetGroupsResponse xmlns="http://redshift.amazonaws.com/doc/2012-12-01/">
  <DescribeClusterSubnetGroupsResult>
    <ClusterSubnetGroups>
      <ClusterSubnetGroup>
        <ClusterSubnetGroupName>group-a</ClusterSubnetGroupName>
      </ClusterSubnetGroup>
      <ClusterSubnetGroup>
        <ClusterSubnetGroupName>group-b</ClusterSubnetGroupName>
      </ClusterSubnetGroup>
    </ClusterSubnetGroups>
    <Marker>next-page</Marker>
  </DescribeClusterSubnetGroupsResult>
  <ResponseMetadata><RequestId>req-3</RequestId></ResponseMetadata>
</DescribeClusterSubnetGroupsResponse>"#;
        let client = testing::replay_client(vec![testing::response(200, body)]);
        let request: ResourceHandlerRequest<SubnetGroupModel> = ResourceHandlerRequest::default();

        let event = handle(&client, Action::List, &request, CallbackContext::default()).await;

        assert_eq!(event.status, OperationStatus::Success);
        assert_eq!(event.resource_models.len(), 2);
        assert_eq!(event.next_token.as_deref(), Some("next-page"));
    }
}
