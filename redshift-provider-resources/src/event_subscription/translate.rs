//! Mapping from Redshift SDK shapes to the event subscription model

use aws_sdk_redshift::types::EventSubscription;
use aws_smithy_types::date_time::Format;

use super::model::EventSubscriptionModel;
use crate::tags;

pub(crate) fn from_sdk(subscription: &EventSubscription) -> EventSubscriptionModel {
    let source_ids = subscription.source_ids_list().to_vec();
    let event_categories = subscription.event_categories_list().to_vec();

    EventSubscriptionModel {
        subscription_name: subscription.cust_subscription_id().map(str::to_string),
        sns_topic_arn: subscription.sns_topic_arn().map(str::to_string),
        source_type: subscription.source_type().map(str::to_string),
        source_ids: if source_ids.is_empty() {
            None
        } else {
            Some(source_ids)
        },
        event_categories: if event_categories.is_empty() {
            None
        } else {
            Some(event_categories)
        },
        severity: subscription.severity().map(str::to_string),
        enabled: subscription.enabled(),
        tags: tags::from_sdk_tags(subscription.tags()),
        status: subscription.status().map(str::to_string),
        subscription_creation_time: subscription
            .subscription_creation_time()
            .and_then(|t| t.fmt(Format::DateTime).ok()),
        customer_aws_id: subscription.customer_aws_id().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_smithy_types::DateTime;

    #[test]
    fn maps_service_response_to_model() {
        let subscription = EventSubscription::builder()
            .cust_subscription_id("my-subscription")
            .customer_aws_id("123456789012")
            .sns_topic_arn("arn:aws:sns:us-east-1:123456789012:alerts")
            .source_type("cluster")
            .source_ids_list("my-cluster")
            .event_categories_list("monitoring")
            .severity("ERROR")
            .enabled(true)
            .status("active")
            .subscription_creation_time(DateTime::from_secs(1_700_000_000))
            .build();

        let model = from_sdk(&subscription);
        assert_eq!(model.subscription_name.as_deref(), Some("my-subscription"));
        assert_eq!(model.source_ids, Some(vec!["my-cluster".to_string()]));
        assert_eq!(model.enabled, Some(true));
        assert_eq!(model.status.as_deref(), Some("active"));
        assert!(model.subscription_creation_time.is_some());
    }

    #[test]
    fn empty_lists_map_to_none() {
        let model = from_sdk(&EventSubscription::builder().build());
        assert!(model.source_ids.is_none());
        assert!(model.event_categories.is_none());
        assert!(model.tags.is_none());
    }
}
