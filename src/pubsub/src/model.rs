// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Value types exchanged with [Service][crate::Service], and their mapping to
//! the wire messages in [pubsub_rest::model].

use crate::{Error, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use pubsub_rest::model as wire;
use std::collections::HashMap;
use std::time::Duration;

/// Configures a subscription for push delivery.
///
/// The service delivers messages as HTTP POST requests to `endpoint`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PushConfig {
    /// The URL of the endpoint receiving the messages.
    pub endpoint: String,

    /// Endpoint configuration attributes, e.g. `x-goog-version`.
    pub attributes: HashMap<String, String>,
}

/// The configuration of an existing subscription.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubscriptionConfig {
    /// The name of the topic the subscription is bound to.
    pub topic: String,

    /// How long the service waits for an acknowledgment before redelivering
    /// a message.
    pub ack_deadline: Duration,

    /// The push delivery settings. `None` for pull subscriptions.
    pub push_config: Option<PushConfig>,
}

/// A message published to a topic, or received from a subscription.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    /// The server-assigned ID. Empty for messages not yet published.
    pub id: String,

    /// The message payload.
    pub data: Bytes,

    /// Optional attributes.
    pub attributes: HashMap<String, String>,

    /// When the service accepted the message.
    pub publish_time: Option<DateTime<Utc>>,

    /// Identifies this delivery of the message in acknowledgments and
    /// deadline modifications. Empty for messages not yet published.
    pub ack_id: String,
}

impl Message {
    /// Creates a message to publish.
    ///
    /// ```
    /// # use pubsub_service::model::Message;
    /// let message = Message::new("hello").set_attributes([("origin", "docs")]);
    /// assert_eq!(message.data, "hello");
    /// ```
    pub fn new<T: Into<Bytes>>(data: T) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    /// Sets the message attributes.
    pub fn set_attributes<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }
}

/// Converts a deadline to the whole seconds sent on the wire.
///
/// The sub-second part is dropped.
pub(crate) fn to_seconds(d: Duration) -> i64 {
    i64::try_from(d.as_secs()).unwrap_or(i64::MAX)
}

/// Converts whole seconds received from the service into a [Duration].
pub(crate) fn from_seconds(seconds: i64) -> Result<Duration> {
    u64::try_from(seconds)
        .map(Duration::from_secs)
        .map_err(|_| Error::deser(format!("negative acknowledgment deadline: {seconds}s")))
}

impl From<PushConfig> for wire::PushConfig {
    fn from(value: PushConfig) -> Self {
        wire::PushConfig::new()
            .set_push_endpoint(value.endpoint)
            .set_attributes(value.attributes)
    }
}

pub(crate) fn push_config_from_wire(value: Option<wire::PushConfig>) -> Option<PushConfig> {
    // Pull subscriptions may report an empty push config.
    value
        .filter(|p| !p.push_endpoint.is_empty() || !p.attributes.is_empty())
        .map(|p| PushConfig {
            endpoint: p.push_endpoint,
            attributes: p.attributes,
        })
}

impl TryFrom<wire::Subscription> for SubscriptionConfig {
    type Error = Error;

    fn try_from(value: wire::Subscription) -> Result<Self> {
        Ok(Self {
            ack_deadline: from_seconds(value.ack_deadline_seconds)?,
            push_config: push_config_from_wire(value.push_config),
            topic: value.topic,
        })
    }
}

impl TryFrom<wire::ReceivedMessage> for Message {
    type Error = Error;

    fn try_from(value: wire::ReceivedMessage) -> Result<Self> {
        let message = value.message.unwrap_or_default();
        let publish_time = match message.publish_time.as_str() {
            "" => None,
            t => Some(
                DateTime::parse_from_rfc3339(t)
                    .map_err(Error::deser)?
                    .with_timezone(&Utc),
            ),
        };
        Ok(Self {
            id: message.message_id,
            data: message.data,
            attributes: message.attributes,
            publish_time,
            ack_id: value.ack_id,
        })
    }
}

impl From<Message> for wire::PubsubMessage {
    fn from(value: Message) -> Self {
        wire::PubsubMessage::new()
            .set_data(value.data)
            .set_attributes(value.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(0)]
    #[test_case(10)]
    #[test_case(600)]
    fn seconds_roundtrip(seconds: u64) -> anyhow::Result<()> {
        let d = Duration::from_secs(seconds);
        assert_eq!(from_seconds(to_seconds(d))?, d);
        Ok(())
    }

    #[test]
    fn seconds_truncate() {
        assert_eq!(to_seconds(Duration::from_millis(10_999)), 10);
        assert_eq!(to_seconds(Duration::MAX), i64::MAX);
    }

    #[test]
    fn negative_seconds() {
        let got = from_seconds(-1);
        assert!(matches!(&got, Err(e) if e.is_deserialization()), "{got:?}");
    }

    #[test]
    fn subscription_from_wire() -> anyhow::Result<()> {
        let wire = serde_json::from_value::<wire::Subscription>(json!({
            "name": "projects/p/subscriptions/s",
            "topic": "projects/p/topics/t",
            "ackDeadlineSeconds": 20,
            "pushConfig": {
                "pushEndpoint": "https://example.com/push",
                "attributes": {"x-goog-version": "v1"},
            },
        }))?;
        let got = SubscriptionConfig::try_from(wire)?;
        let want = SubscriptionConfig {
            topic: "projects/p/topics/t".into(),
            ack_deadline: Duration::from_secs(20),
            push_config: Some(PushConfig {
                endpoint: "https://example.com/push".into(),
                attributes: HashMap::from([("x-goog-version".into(), "v1".into())]),
            }),
        };
        assert_eq!(got, want);
        Ok(())
    }

    #[test_case(json!({}); "absent")]
    #[test_case(json!({"pushConfig": {}}); "empty")]
    #[test_case(json!({"pushConfig": {"pushEndpoint": "", "attributes": {}}}); "empty fields")]
    fn subscription_pull_delivery(value: serde_json::Value) -> anyhow::Result<()> {
        let wire = serde_json::from_value::<wire::Subscription>(value)?;
        let got = SubscriptionConfig::try_from(wire)?;
        assert_eq!(got.push_config, None);
        assert_eq!(got.ack_deadline, Duration::ZERO);
        Ok(())
    }

    #[test]
    fn subscription_attributes_without_endpoint() -> anyhow::Result<()> {
        let wire = serde_json::from_value::<wire::Subscription>(json!({
            "pushConfig": {"attributes": {"x-goog-version": "v1"}},
        }))?;
        let got = SubscriptionConfig::try_from(wire)?;
        let want = PushConfig {
            endpoint: String::new(),
            attributes: HashMap::from([("x-goog-version".into(), "v1".into())]),
        };
        assert_eq!(got.push_config, Some(want.clone()));

        let round_trip = push_config_from_wire(Some(wire::PushConfig::from(want.clone())));
        assert_eq!(round_trip, Some(want));
        Ok(())
    }

    #[test]
    fn push_config_to_wire() {
        let push = PushConfig {
            endpoint: "https://example.com/push".into(),
            attributes: HashMap::from([("k".into(), "v".into())]),
        };
        let got = wire::PushConfig::from(push.clone());
        assert_eq!(got.push_endpoint, push.endpoint);
        assert_eq!(got.attributes, push.attributes);
        assert_eq!(push_config_from_wire(Some(got)), Some(push));
    }

    #[test]
    fn message_from_wire() -> anyhow::Result<()> {
        let wire = serde_json::from_value::<wire::ReceivedMessage>(json!({
            "ackId": "ack-1",
            "message": {
                "data": "aGVsbG8=",
                "attributes": {"k": "v"},
                "messageId": "m1",
                "publishTime": "2025-01-02T03:04:05.5Z",
            },
        }))?;
        let got = Message::try_from(wire)?;
        let want = Message {
            id: "m1".into(),
            data: Bytes::from_static(b"hello"),
            attributes: HashMap::from([("k".into(), "v".into())]),
            publish_time: Some(
                Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
                    + chrono::Duration::milliseconds(500),
            ),
            ack_id: "ack-1".into(),
        };
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn message_bad_publish_time() -> anyhow::Result<()> {
        let wire = serde_json::from_value::<wire::ReceivedMessage>(json!({
            "ackId": "ack-1",
            "message": {"publishTime": "yesterday"},
        }))?;
        let got = Message::try_from(wire);
        assert!(matches!(&got, Err(e) if e.is_deserialization()), "{got:?}");
        Ok(())
    }

    #[test]
    fn message_to_wire() {
        let message = Message {
            id: "ignored".into(),
            ack_id: "ignored".into(),
            ..Message::new("hello").set_attributes([("k", "v")])
        };
        let got = wire::PubsubMessage::from(message);
        assert_eq!(got.data, Bytes::from_static(b"hello"));
        assert_eq!(got.attributes.get("k").map(String::as_str), Some("v"));
        assert!(got.message_id.is_empty(), "{got:?}");
    }
}
