//! Test helpers: a Redshift client backed by canned HTTP responses

use aws_sdk_redshift::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_redshift::{Client, Config};
use aws_smithy_runtime::client::http::test_util::{ReplayEvent, StaticReplayClient};
use aws_smithy_types::body::SdkBody;

pub(crate) fn replay_client(events: Vec<ReplayEvent>) -> Client {
    let config = Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKIDTEST", "SECRET", None, None, "test"))
        .http_client(StaticReplayClient::new(events))
        .build();
    Client::from_conf(config)
}

pub(crate) fn response(status: u16, body: &str) -> ReplayEvent {
    ReplayEvent::new(
        http::Request::builder()
            .method("POST")
            .uri("https://redshift.us-east-1.amazonaws.com/")
            .body(SdkBody::empty())
            .unwrap(),
        http::Response::builder()
            .status(status)
            .body(SdkBody::from(body))
            .unwrap(),
    )
}

/// A service fault in the query-protocol error envelope
pub(crate) fn error_response(code: &str, message: &str) -> ReplayEvent {
    let body = format!(
        r#"<ErrorResponse xmlns="http://redshift.amazonaws.com/doc/2012-12-01/">
  <Error>
    <Type>Sender</Type>
    <Code>{}</Code>
    <Message>{}</Message>
  </Error>
  <RequestId>req-error</RequestId>
</ErrorResponse>"#,
        code, message
    );
    response(400, &body)
}
