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

use crate::builder::{self, RequestBuilder};
use crate::http::ReqwestClient;
use crate::options::ClientConfig;

/// Errors returned by [ClientBuilder::build].
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum BuilderError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint `{endpoint}`: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A client for the Pub/Sub v1 REST API.
///
/// # Example
/// ```no_run
/// # async fn sample() -> anyhow::Result<()> {
/// use pubsub_rest::client::PubSub;
/// let client = PubSub::builder().build()?;
/// let topic = client
///     .get_topic("projects/my-project/topics/my-topic")
///     .send()
///     .await?;
/// println!("{topic:?}");
/// # Ok(()) }
/// ```
///
/// Each method returns a request builder. The request is only sent when the
/// application calls `send()` on the builder.
///
/// `PubSub` holds a connection pool internally. Create a single instance and
/// clone it as needed.
#[derive(Clone, Debug)]
pub struct PubSub {
    inner: ReqwestClient,
}

impl PubSub {
    /// Returns a builder for [PubSub].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The endpoint receiving the requests.
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }

    /// Creates a topic with the given name.
    pub fn create_topic<T: Into<String>>(&self, name: T) -> builder::CreateTopic {
        builder::CreateTopic(self.request(name))
    }

    /// Gets the configuration of a topic.
    pub fn get_topic<T: Into<String>>(&self, topic: T) -> builder::GetTopic {
        builder::GetTopic(self.request(topic))
    }

    /// Deletes the topic with the given name.
    ///
    /// Existing subscriptions to the topic are not deleted.
    pub fn delete_topic<T: Into<String>>(&self, topic: T) -> builder::DeleteTopic {
        builder::DeleteTopic(self.request(topic))
    }

    /// Lists the topics in a project, e.g. `projects/my-project`.
    pub fn list_topics<T: Into<String>>(&self, project: T) -> builder::ListTopics {
        builder::ListTopics(self.request(project))
    }

    /// Lists the names of the subscriptions attached to a topic.
    pub fn list_topic_subscriptions<T: Into<String>>(
        &self,
        topic: T,
    ) -> builder::ListTopicSubscriptions {
        builder::ListTopicSubscriptions(self.request(topic))
    }

    /// Publishes messages to a topic.
    pub fn publish<T: Into<String>>(&self, topic: T) -> builder::Publish {
        builder::Publish(self.request(topic))
    }

    /// Creates a subscription with the given name.
    pub fn create_subscription<T: Into<String>>(&self, name: T) -> builder::CreateSubscription {
        builder::CreateSubscription(self.request(name))
    }

    /// Gets the configuration of a subscription.
    pub fn get_subscription<T: Into<String>>(&self, subscription: T) -> builder::GetSubscription {
        builder::GetSubscription(self.request(subscription))
    }

    /// Deletes a subscription.
    pub fn delete_subscription<T: Into<String>>(
        &self,
        subscription: T,
    ) -> builder::DeleteSubscription {
        builder::DeleteSubscription(self.request(subscription))
    }

    /// Lists the subscriptions in a project, e.g. `projects/my-project`.
    pub fn list_subscriptions<T: Into<String>>(&self, project: T) -> builder::ListSubscriptions {
        builder::ListSubscriptions(self.request(project))
    }

    /// Modifies the acknowledgment deadline of previously received messages.
    pub fn modify_ack_deadline<T: Into<String>>(
        &self,
        subscription: T,
    ) -> builder::ModifyAckDeadline {
        builder::ModifyAckDeadline(self.request(subscription))
    }

    /// Changes the push configuration of a subscription.
    pub fn modify_push_config<T: Into<String>>(
        &self,
        subscription: T,
    ) -> builder::ModifyPushConfig {
        builder::ModifyPushConfig(self.request(subscription))
    }

    /// Acknowledges previously received messages.
    pub fn acknowledge<T: Into<String>>(&self, subscription: T) -> builder::Acknowledge {
        builder::Acknowledge(self.request(subscription))
    }

    /// Pulls messages from a subscription.
    pub fn pull<T: Into<String>>(&self, subscription: T) -> builder::Pull {
        builder::Pull(self.request(subscription))
    }

    fn request<R: Default, T: Into<String>>(&self, resource: T) -> RequestBuilder<R> {
        RequestBuilder::new(self.inner.clone(), resource.into())
    }
}

/// A builder for [PubSub].
///
/// ```
/// # use pubsub_rest::client::PubSub;
/// # fn sample() -> anyhow::Result<()> {
/// let client = PubSub::builder()
///     .with_endpoint("http://localhost:8085")
///     .build()?;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint, e.g. `http://localhost:8085` for a local emulator.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.config.endpoint = Some(v.into());
        self
    }

    /// Sets the HTTP client used to send requests.
    ///
    /// Use this to attach authentication headers or proxy settings. By
    /// default the client sends unauthenticated requests.
    pub fn with_http_client(mut self, v: reqwest::Client) -> Self {
        self.config.http_client = Some(v);
        self
    }

    /// Sets a prefix for the `user-agent` header.
    pub fn with_user_agent<V: Into<String>>(mut self, v: V) -> Self {
        self.config.user_agent = Some(v.into());
        self
    }

    /// Enables a tracing span for each request.
    ///
    /// Tracing is also enabled when `GOOGLE_CLOUD_RUST_LOGGING` is `true`.
    pub fn with_tracing(mut self) -> Self {
        self.config.tracing = true;
        self
    }

    /// Creates the client.
    pub fn build(self) -> Result<PubSub, BuilderError> {
        if let Some(endpoint) = &self.config.endpoint {
            if let Err(source) = reqwest::Url::parse(endpoint) {
                return Err(BuilderError::InvalidEndpoint {
                    endpoint: endpoint.clone(),
                    source: source.into(),
                });
            }
        }
        Ok(PubSub {
            inner: ReqwestClient::new(self.config, crate::DEFAULT_HOST),
        })
    }
}
