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

use crate::Result;
use crate::builder::ClientBuilder;
use crate::model::{self, Message, PushConfig, SubscriptionConfig};
use pubsub_rest::client::PubSub;
use pubsub_rest::model as wire;
use pubsub_rest::options::RequestOptions;
use std::time::Duration;

/// Topic and subscription operations against the Pub/Sub service.
///
/// Each operation issues exactly one request, except the `list_*` operations,
/// which fetch every page before returning. Errors are returned unchanged.
/// The existence checks are the only exception: they return `Ok(false)` when
/// the service reports that the resource is not found.
///
/// Use [RequestOptions] to set a per-request timeout. Dropping the returned
/// future cancels the request.
///
/// Applications use [ApiService]. The trait exists so code depending on it
/// can be tested without a service.
#[async_trait::async_trait]
pub trait Service: std::fmt::Debug + Send + Sync {
    /// Creates `subscription`, bound to `topic`.
    ///
    /// A zero `ack_deadline` selects the service default. A `None` push
    /// config creates a pull subscription.
    async fn create_subscription(
        &self,
        topic: &str,
        subscription: &str,
        ack_deadline: Duration,
        push_config: Option<PushConfig>,
        options: RequestOptions,
    ) -> Result<()>;

    /// Fetches the configuration of `subscription`.
    async fn get_subscription_config(
        &self,
        subscription: &str,
        options: RequestOptions,
    ) -> Result<SubscriptionConfig>;

    /// Lists the names of all the subscriptions in `project`.
    async fn list_project_subscriptions(
        &self,
        project: &str,
        options: RequestOptions,
    ) -> Result<Vec<String>>;

    async fn delete_subscription(&self, subscription: &str, options: RequestOptions)
    -> Result<()>;

    /// Returns `Ok(false)` if the service reports `subscription` as not found.
    async fn subscription_exists(
        &self,
        subscription: &str,
        options: RequestOptions,
    ) -> Result<bool>;

    async fn create_topic(&self, topic: &str, options: RequestOptions) -> Result<()>;

    async fn delete_topic(&self, topic: &str, options: RequestOptions) -> Result<()>;

    /// Returns `Ok(false)` if the service reports `topic` as not found.
    async fn topic_exists(&self, topic: &str, options: RequestOptions) -> Result<bool>;

    /// Lists the names of all the topics in `project`.
    async fn list_project_topics(&self, project: &str, options: RequestOptions)
    -> Result<Vec<String>>;

    /// Lists the names of the subscriptions bound to `topic`.
    async fn list_topic_subscriptions(
        &self,
        topic: &str,
        options: RequestOptions,
    ) -> Result<Vec<String>>;

    /// Sets the acknowledgment deadline of the messages identified by
    /// `ack_ids`, counting from now.
    ///
    /// A zero deadline makes the messages available for redelivery.
    async fn modify_ack_deadline(
        &self,
        subscription: &str,
        deadline: Duration,
        ack_ids: &[String],
        options: RequestOptions,
    ) -> Result<()>;

    /// Changes the delivery mode of `subscription`.
    ///
    /// `None` switches the subscription to pull delivery.
    async fn modify_push_config(
        &self,
        subscription: &str,
        push_config: Option<PushConfig>,
        options: RequestOptions,
    ) -> Result<()>;

    async fn acknowledge(
        &self,
        subscription: &str,
        ack_ids: &[String],
        options: RequestOptions,
    ) -> Result<()>;

    /// Pulls up to `max_messages` messages, returning immediately when none
    /// are available.
    async fn fetch_messages(
        &self,
        subscription: &str,
        max_messages: i32,
        options: RequestOptions,
    ) -> Result<Vec<Message>>;

    /// Publishes `messages` and returns their IDs, in the same order.
    ///
    /// Only the data and attributes of each message are sent.
    async fn publish_messages(
        &self,
        topic: &str,
        messages: Vec<Message>,
        options: RequestOptions,
    ) -> Result<Vec<String>>;
}

/// Implements [Service] using the Pub/Sub v1 REST API.
///
/// # Example
/// ```no_run
/// # async fn sample() -> anyhow::Result<()> {
/// use pubsub_service::{ApiService, RequestOptions, Service};
/// let service = ApiService::builder().build()?;
/// let exists = service
///     .topic_exists("projects/my-project/topics/my-topic", RequestOptions::default())
///     .await?;
/// println!("exists = {exists}");
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct ApiService {
    client: PubSub,
}

impl ApiService {
    /// Returns a builder for [ApiService].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a service using an existing client.
    pub fn new(client: PubSub) -> Self {
        Self { client }
    }

    /// The endpoint receiving the requests.
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

// Maps a not found error to `Ok(false)`, any other error is returned as-is.
fn exists<T>(result: Result<T>, name: &str) -> Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if e.is_not_found() => {
            tracing::debug!(resource = name, "resource not found: {e}");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[async_trait::async_trait]
impl Service for ApiService {
    async fn create_subscription(
        &self,
        topic: &str,
        subscription: &str,
        ack_deadline: Duration,
        push_config: Option<PushConfig>,
        options: RequestOptions,
    ) -> Result<()> {
        self.client
            .create_subscription(subscription)
            .set_topic(topic)
            .set_ack_deadline_seconds(model::to_seconds(ack_deadline))
            .set_or_clear_push_config(push_config)
            .with_options(options)
            .send()
            .await?;
        Ok(())
    }

    async fn get_subscription_config(
        &self,
        subscription: &str,
        options: RequestOptions,
    ) -> Result<SubscriptionConfig> {
        let sub = self
            .client
            .get_subscription(subscription)
            .with_options(options)
            .send()
            .await?;
        SubscriptionConfig::try_from(sub)
    }

    async fn list_project_subscriptions(
        &self,
        project: &str,
        options: RequestOptions,
    ) -> Result<Vec<String>> {
        let mut pages = self
            .client
            .list_subscriptions(project)
            .with_options(options)
            .by_page();
        let mut names = Vec::new();
        while let Some(page) = pages.next().await {
            names.extend(page?.subscriptions.into_iter().map(|s| s.name));
        }
        Ok(names)
    }

    async fn delete_subscription(
        &self,
        subscription: &str,
        options: RequestOptions,
    ) -> Result<()> {
        self.client
            .delete_subscription(subscription)
            .with_options(options)
            .send()
            .await?;
        Ok(())
    }

    async fn subscription_exists(
        &self,
        subscription: &str,
        options: RequestOptions,
    ) -> Result<bool> {
        let result = self
            .client
            .get_subscription(subscription)
            .with_options(options)
            .send()
            .await;
        exists(result, subscription)
    }

    async fn create_topic(&self, topic: &str, options: RequestOptions) -> Result<()> {
        self.client
            .create_topic(topic)
            .with_options(options)
            .send()
            .await?;
        Ok(())
    }

    async fn delete_topic(&self, topic: &str, options: RequestOptions) -> Result<()> {
        self.client
            .delete_topic(topic)
            .with_options(options)
            .send()
            .await?;
        Ok(())
    }

    async fn topic_exists(&self, topic: &str, options: RequestOptions) -> Result<bool> {
        let result = self
            .client
            .get_topic(topic)
            .with_options(options)
            .send()
            .await;
        exists(result, topic)
    }

    async fn list_project_topics(
        &self,
        project: &str,
        options: RequestOptions,
    ) -> Result<Vec<String>> {
        let mut pages = self
            .client
            .list_topics(project)
            .with_options(options)
            .by_page();
        let mut names = Vec::new();
        while let Some(page) = pages.next().await {
            names.extend(page?.topics.into_iter().map(|t| t.name));
        }
        Ok(names)
    }

    async fn list_topic_subscriptions(
        &self,
        topic: &str,
        options: RequestOptions,
    ) -> Result<Vec<String>> {
        let mut pages = self
            .client
            .list_topic_subscriptions(topic)
            .with_options(options)
            .by_page();
        let mut names = Vec::new();
        while let Some(page) = pages.next().await {
            names.extend(page?.subscriptions);
        }
        Ok(names)
    }

    async fn modify_ack_deadline(
        &self,
        subscription: &str,
        deadline: Duration,
        ack_ids: &[String],
        options: RequestOptions,
    ) -> Result<()> {
        self.client
            .modify_ack_deadline(subscription)
            .set_ack_ids(ack_ids)
            .set_ack_deadline_seconds(model::to_seconds(deadline))
            .with_options(options)
            .send()
            .await?;
        Ok(())
    }

    async fn modify_push_config(
        &self,
        subscription: &str,
        push_config: Option<PushConfig>,
        options: RequestOptions,
    ) -> Result<()> {
        let mut builder = self.client.modify_push_config(subscription);
        if let Some(push_config) = push_config {
            builder = builder.set_push_config(push_config);
        }
        builder.with_options(options).send().await?;
        Ok(())
    }

    async fn acknowledge(
        &self,
        subscription: &str,
        ack_ids: &[String],
        options: RequestOptions,
    ) -> Result<()> {
        self.client
            .acknowledge(subscription)
            .set_ack_ids(ack_ids)
            .with_options(options)
            .send()
            .await?;
        Ok(())
    }

    async fn fetch_messages(
        &self,
        subscription: &str,
        max_messages: i32,
        options: RequestOptions,
    ) -> Result<Vec<Message>> {
        let response = self
            .client
            .pull(subscription)
            .set_return_immediately(true)
            .set_max_messages(max_messages)
            .with_options(options)
            .send()
            .await?;
        response
            .received_messages
            .into_iter()
            .map(Message::try_from)
            .collect()
    }

    async fn publish_messages(
        &self,
        topic: &str,
        messages: Vec<Message>,
        options: RequestOptions,
    ) -> Result<Vec<String>> {
        let response = self
            .client
            .publish(topic)
            .set_messages(messages.into_iter().map(wire::PubsubMessage::from))
            .with_options(options)
            .send()
            .await?;
        Ok(response.message_ids)
    }
}
