//! Tag construction and diffing shared by the handlers
//!
//! Models carry tags as a key-unique map. Create paths send the whole set;
//! update paths diff previous against desired and apply the difference with
//! the tagging APIs against the resource ARN.

use std::collections::BTreeMap;

use aws_sdk_redshift::Client;
use aws_sdk_redshift::types::Tag;
use redshift_provider_core::HandlerError;
use tracing::debug;

use crate::{arn, errors};

pub(crate) fn to_sdk_tags(tags: &BTreeMap<String, String>) -> Vec<Tag> {
    tags.iter()
        .map(|(key, value)| Tag::builder().key(key).value(value).build())
        .collect()
}

pub(crate) fn from_sdk_tags(tags: &[Tag]) -> Option<BTreeMap<String, String>> {
    let map: BTreeMap<String, String> = tags
        .iter()
        .filter_map(|tag| match (tag.key(), tag.value()) {
            (Some(key), Some(value)) => Some((key.to_string(), value.to_string())),
            _ => None,
        })
        .collect();
    if map.is_empty() { None } else { Some(map) }
}

/// Split previous→desired into tags to create (new keys and changed
/// values; CreateTags overwrites) and tag keys to delete
pub(crate) fn diff(
    previous: Option<&BTreeMap<String, String>>,
    desired: Option<&BTreeMap<String, String>>,
) -> (Vec<Tag>, Vec<String>) {
    let empty = BTreeMap::new();
    let previous = previous.unwrap_or(&empty);
    let desired = desired.unwrap_or(&empty);

    let to_create: Vec<Tag> = desired
        .iter()
        .filter(|(key, value)| previous.get(*key) != Some(*value))
        .map(|(key, value)| Tag::builder().key(key).value(value).build())
        .collect();
    let to_delete: Vec<String> = previous
        .keys()
        .filter(|key| !desired.contains_key(*key))
        .cloned()
        .collect();
    (to_create, to_delete)
}

/// Apply the tag difference for one resource. A no-op when nothing
/// changed; requires the caller's account id and region otherwise.
pub(crate) async fn sync(
    client: &Client,
    account_id: Option<&str>,
    region: Option<&str>,
    resource_type: &'static str,
    name: &str,
    previous: Option<&BTreeMap<String, String>>,
    desired: Option<&BTreeMap<String, String>>,
) -> Result<(), HandlerError> {
    let (to_create, to_delete) = diff(previous, desired);
    if to_create.is_empty() && to_delete.is_empty() {
        return Ok(());
    }

    let (account_id, region) = match (account_id, region) {
        (Some(account_id), Some(region)) => (account_id, region),
        _ => {
            return Err(HandlerError::invalid_input(
                "account id and region are required to update tags",
            ));
        }
    };
    let resource_arn = arn::redshift_arn(region, account_id, resource_type, name);
    debug!(
        arn = %resource_arn,
        creating = to_create.len(),
        deleting = to_delete.len(),
        "syncing tags"
    );

    if !to_delete.is_empty() {
        client
            .delete_tags()
            .resource_name(&resource_arn)
            .set_tag_keys(Some(to_delete))
            .send()
            .await
            .map_err(|e| errors::classify("DeleteTags", "tags for", &resource_arn, e))?;
    }
    if !to_create.is_empty() {
        client
            .create_tags()
            .resource_name(&resource_arn)
            .set_tags(Some(to_create))
            .send()
            .await
            .map_err(|e| errors::classify("CreateTags", "tags for", &resource_arn, e))?;
    }
    Ok(())
}
