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

//! The JSON messages of the Pub/Sub v1 REST API.
//!
//! Field names follow the proto3 JSON mapping: `camelCase` on the wire,
//! missing fields take their default value, and default values are omitted
//! when serializing. 64-bit integers are accepted both as JSON numbers and as
//! strings.

use crate::paginator::PageableResponse;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::collections::HashMap;

/// A named resource to which messages are sent by publishers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Topic {
    /// The name of the topic, `projects/{project}/topics/{topic}`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Topic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [name][Topic::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }
}

/// Configuration for a push delivery endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PushConfig {
    /// The URL of the endpoint to which messages are pushed.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub push_endpoint: String,

    /// Endpoint configuration attributes, e.g. `x-goog-version`.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

impl PushConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [push_endpoint][PushConfig::push_endpoint].
    pub fn set_push_endpoint<T: Into<String>>(mut self, v: T) -> Self {
        self.push_endpoint = v.into();
        self
    }

    /// Sets the value of [attributes][PushConfig::attributes].
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

/// A subscription resource.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Subscription {
    /// The name of the subscription, `projects/{project}/subscriptions/{sub}`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The name of the topic from which this subscription receives messages.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub topic: String,

    /// If set, the subscription uses push delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_config: Option<PushConfig>,

    /// The acknowledgment deadline, in seconds. Zero selects the service
    /// default.
    #[serde(skip_serializing_if = "is_zero")]
    #[serde_as(as = "serde_with::PickFirst<(_, serde_with::DisplayFromStr)>")]
    pub ack_deadline_seconds: i64,
}

impl Subscription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [name][Subscription::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the value of [topic][Subscription::topic].
    pub fn set_topic<T: Into<String>>(mut self, v: T) -> Self {
        self.topic = v.into();
        self
    }

    /// Sets the value of [push_config][Subscription::push_config].
    pub fn set_push_config<T: Into<PushConfig>>(mut self, v: T) -> Self {
        self.push_config = Some(v.into());
        self
    }

    /// Sets or clears the value of [push_config][Subscription::push_config].
    pub fn set_or_clear_push_config<T: Into<PushConfig>>(mut self, v: Option<T>) -> Self {
        self.push_config = v.map(Into::into);
        self
    }

    /// Sets the value of [ack_deadline_seconds][Subscription::ack_deadline_seconds].
    pub fn set_ack_deadline_seconds<T: Into<i64>>(mut self, v: T) -> Self {
        self.ack_deadline_seconds = v.into();
        self
    }
}

/// A message with data and attributes.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PubsubMessage {
    /// The message payload, base64 encoded on the wire.
    #[serde(skip_serializing_if = "bytes::Bytes::is_empty")]
    #[serde_as(as = "serde_with::base64::Base64")]
    pub data: bytes::Bytes,

    /// Attributes for this message.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,

    /// The ID of this message, assigned by the service.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message_id: String,

    /// The time at which the message was published, in RFC 3339 format.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub publish_time: String,
}

impl PubsubMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [data][PubsubMessage::data].
    pub fn set_data<T: Into<bytes::Bytes>>(mut self, v: T) -> Self {
        self.data = v.into();
        self
    }

    /// Sets the value of [attributes][PubsubMessage::attributes].
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

/// A message and its corresponding acknowledgment ID.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReceivedMessage {
    pub ack_id: String,
    pub message: Option<PubsubMessage>,
}

/// Response for the `ListTopics` method.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ListTopicsResponse {
    pub topics: Vec<Topic>,
    pub next_page_token: String,
}

impl PageableResponse for ListTopicsResponse {
    fn next_page_token(&self) -> String {
        self.next_page_token.clone()
    }
}

/// Response for the `ListSubscriptions` method.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ListSubscriptionsResponse {
    pub subscriptions: Vec<Subscription>,
    pub next_page_token: String,
}

impl PageableResponse for ListSubscriptionsResponse {
    fn next_page_token(&self) -> String {
        self.next_page_token.clone()
    }
}

/// Response for the `ListTopicSubscriptions` method.
///
/// Unlike [ListSubscriptionsResponse], this contains only the subscription
/// names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ListTopicSubscriptionsResponse {
    pub subscriptions: Vec<String>,
    pub next_page_token: String,
}

impl PageableResponse for ListTopicSubscriptionsResponse {
    fn next_page_token(&self) -> String {
        self.next_page_token.clone()
    }
}

/// Request for the `ModifyAckDeadline` method.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ModifyAckDeadlineRequest {
    pub ack_ids: Vec<String>,
    /// The new deadline, zero makes the messages available for redelivery.
    pub ack_deadline_seconds: i64,
}

/// Request for the `ModifyPushConfig` method.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ModifyPushConfigRequest {
    /// An empty push config stops push delivery.
    pub push_config: PushConfig,
}

/// Request for the `Acknowledge` method.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct AcknowledgeRequest {
    pub ack_ids: Vec<String>,
}

/// Request for the `Pull` method.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PullRequest {
    pub return_immediately: bool,
    pub max_messages: i32,
}

/// Response for the `Pull` method.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PullResponse {
    pub received_messages: Vec<ReceivedMessage>,
}

/// Request for the `Publish` method.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PublishRequest {
    pub messages: Vec<PubsubMessage>,
}

/// Response for the `Publish` method.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PublishResponse {
    /// The server-assigned IDs, in the same order as the published messages.
    pub message_ids: Vec<String>,
}

/// The response for methods that return nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Empty {}

fn is_zero(v: &i64) -> bool {
    *v == 0
}
