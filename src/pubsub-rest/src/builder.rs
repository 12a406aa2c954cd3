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

//! Request builders for each RPC in the Pub/Sub v1 REST API.
//!
//! Applications obtain these from the methods in [PubSub][crate::client::PubSub],
//! set any optional fields, and then call `send()`. Each `send()` issues
//! exactly one HTTP request.

use crate::Result;
use crate::error::Error;
use crate::http::{NoBody, ReqwestClient};
use crate::model::*;
use crate::options::{RequestOptions, RequestOptionsBuilder};
use crate::paginator::Paginator;
use crate::path;
use reqwest::Method;
use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) struct RequestBuilder<R> {
    client: ReqwestClient,
    // The resource name bound to the request path.
    resource: String,
    request: R,
    options: RequestOptions,
}

impl<R: Default> RequestBuilder<R> {
    pub(crate) fn new(client: ReqwestClient, resource: String) -> Self {
        Self {
            client,
            resource,
            request: R::default(),
            options: RequestOptions::default(),
        }
    }
}

/// Query parameters for list RPCs.
#[derive(Clone, Debug, Default)]
pub(crate) struct PageParams {
    page_size: i32,
    page_token: String,
}

impl PageParams {
    fn apply(&self, mut builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.page_size > 0 {
            builder = builder.query(&[("pageSize", self.page_size)]);
        }
        if !self.page_token.is_empty() {
            builder = builder.query(&[("pageToken", &self.page_token)]);
        }
        builder
    }
}

macro_rules! impl_request_options {
    ($($name:ident),* $(,)?) => {
        $(
            impl $name {
                /// Replaces all the request options.
                pub fn with_options(mut self, v: RequestOptions) -> Self {
                    self.0.options = v;
                    self
                }
            }

            impl RequestOptionsBuilder for $name {
                fn with_user_agent<V: Into<String>>(mut self, v: V) -> Self {
                    self.0.options.set_user_agent(v);
                    self
                }

                fn with_attempt_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
                    self.0.options.set_attempt_timeout(v);
                    self
                }
            }
        )*
    };
}

impl_request_options!(
    CreateTopic,
    GetTopic,
    DeleteTopic,
    ListTopics,
    ListTopicSubscriptions,
    Publish,
    CreateSubscription,
    GetSubscription,
    DeleteSubscription,
    ListSubscriptions,
    ModifyAckDeadline,
    ModifyPushConfig,
    Acknowledge,
    Pull,
);

async fn get<O>(client: &ReqwestClient, path: String, options: RequestOptions) -> Result<O>
where
    O: serde::de::DeserializeOwned + Default,
{
    let builder = client.builder(Method::GET, format!("/v1/{path}"));
    client.execute(builder, None::<NoBody>, options).await
}

async fn delete(client: &ReqwestClient, path: String, options: RequestOptions) -> Result<Empty> {
    let builder = client.builder(Method::DELETE, format!("/v1/{path}"));
    client.execute(builder, None::<NoBody>, options).await
}

async fn post<I, O>(
    client: &ReqwestClient,
    path: String,
    verb: &str,
    body: I,
    options: RequestOptions,
) -> Result<O>
where
    I: serde::Serialize,
    O: serde::de::DeserializeOwned + Default,
{
    let builder = client.builder(Method::POST, format!("/v1/{path}:{verb}"));
    client.execute(builder, Some(body), options).await
}

/// The request builder for [PubSub::create_topic][crate::client::PubSub::create_topic].
#[derive(Clone, Debug)]
pub struct CreateTopic(pub(crate) RequestBuilder<Topic>);

impl CreateTopic {
    /// Sends the request.
    pub async fn send(self) -> Result<Topic> {
        let path = path::topic(&self.0.resource)?;
        let builder = self.0.client.builder(Method::PUT, format!("/v1/{path}"));
        self.0
            .client
            .execute(builder, Some(self.0.request), self.0.options)
            .await
    }
}

/// The request builder for [PubSub::get_topic][crate::client::PubSub::get_topic].
#[derive(Clone, Debug)]
pub struct GetTopic(pub(crate) RequestBuilder<()>);

impl GetTopic {
    /// Sends the request.
    pub async fn send(self) -> Result<Topic> {
        let path = path::topic(&self.0.resource)?;
        get(&self.0.client, path, self.0.options).await
    }
}

/// The request builder for [PubSub::delete_topic][crate::client::PubSub::delete_topic].
#[derive(Clone, Debug)]
pub struct DeleteTopic(pub(crate) RequestBuilder<()>);

impl DeleteTopic {
    /// Sends the request.
    pub async fn send(self) -> Result<Empty> {
        let path = path::topic(&self.0.resource)?;
        delete(&self.0.client, path, self.0.options).await
    }
}

/// The request builder for [PubSub::list_topics][crate::client::PubSub::list_topics].
#[derive(Clone, Debug)]
pub struct ListTopics(pub(crate) RequestBuilder<PageParams>);

impl ListTopics {
    /// Sets the maximum number of topics per page.
    pub fn set_page_size<T: Into<i32>>(mut self, v: T) -> Self {
        self.0.request.page_size = v.into();
        self
    }

    /// Sets the token of the page to fetch.
    pub fn set_page_token<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.page_token = v.into();
        self
    }

    /// Sends the request, fetching a single page.
    pub async fn send(self) -> Result<ListTopicsResponse> {
        let path = path::project(&self.0.resource)?;
        let builder = self
            .0
            .client
            .builder(Method::GET, format!("/v1/{path}/topics"));
        let builder = self.0.request.apply(builder);
        self.0
            .client
            .execute(builder, None::<NoBody>, self.0.options)
            .await
    }

    /// Streams the pages, starting at the configured page token.
    pub fn by_page(self) -> Paginator<ListTopicsResponse, Error> {
        let token = self.0.request.page_token.clone();
        let execute = move |token| self.clone().set_page_token(token).send();
        Paginator::new(token, execute)
    }
}

/// The request builder for
/// [PubSub::list_topic_subscriptions][crate::client::PubSub::list_topic_subscriptions].
#[derive(Clone, Debug)]
pub struct ListTopicSubscriptions(pub(crate) RequestBuilder<PageParams>);

impl ListTopicSubscriptions {
    /// Sets the maximum number of subscription names per page.
    pub fn set_page_size<T: Into<i32>>(mut self, v: T) -> Self {
        self.0.request.page_size = v.into();
        self
    }

    /// Sets the token of the page to fetch.
    pub fn set_page_token<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.page_token = v.into();
        self
    }

    /// Sends the request, fetching a single page.
    pub async fn send(self) -> Result<ListTopicSubscriptionsResponse> {
        let path = path::topic(&self.0.resource)?;
        let builder = self
            .0
            .client
            .builder(Method::GET, format!("/v1/{path}/subscriptions"));
        let builder = self.0.request.apply(builder);
        self.0
            .client
            .execute(builder, None::<NoBody>, self.0.options)
            .await
    }

    /// Streams the pages, starting at the configured page token.
    pub fn by_page(self) -> Paginator<ListTopicSubscriptionsResponse, Error> {
        let token = self.0.request.page_token.clone();
        let execute = move |token| self.clone().set_page_token(token).send();
        Paginator::new(token, execute)
    }
}

/// The request builder for [PubSub::publish][crate::client::PubSub::publish].
#[derive(Clone, Debug)]
pub struct Publish(pub(crate) RequestBuilder<PublishRequest>);

impl Publish {
    /// Sets the messages to publish.
    pub fn set_messages<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = PubsubMessage>,
    {
        self.0.request.messages = v.into_iter().collect();
        self
    }

    /// Sends the request.
    pub async fn send(self) -> Result<PublishResponse> {
        let path = path::topic(&self.0.resource)?;
        post(
            &self.0.client,
            path,
            "publish",
            self.0.request,
            self.0.options,
        )
        .await
    }
}

/// The request builder for
/// [PubSub::create_subscription][crate::client::PubSub::create_subscription].
#[derive(Clone, Debug)]
pub struct CreateSubscription(pub(crate) RequestBuilder<Subscription>);

impl CreateSubscription {
    /// Sets the topic the subscription is bound to.
    pub fn set_topic<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.topic = v.into();
        self
    }

    /// Sets the push configuration.
    pub fn set_push_config<T: Into<PushConfig>>(mut self, v: T) -> Self {
        self.0.request.push_config = Some(v.into());
        self
    }

    /// Sets or clears the push configuration.
    pub fn set_or_clear_push_config<T: Into<PushConfig>>(mut self, v: Option<T>) -> Self {
        self.0.request.push_config = v.map(Into::into);
        self
    }

    /// Sets the acknowledgment deadline, in seconds.
    pub fn set_ack_deadline_seconds<T: Into<i64>>(mut self, v: T) -> Self {
        self.0.request.ack_deadline_seconds = v.into();
        self
    }

    /// Sends the request.
    pub async fn send(self) -> Result<Subscription> {
        let path = path::subscription(&self.0.resource)?;
        let builder = self.0.client.builder(Method::PUT, format!("/v1/{path}"));
        self.0
            .client
            .execute(builder, Some(self.0.request), self.0.options)
            .await
    }
}

/// The request builder for
/// [PubSub::get_subscription][crate::client::PubSub::get_subscription].
#[derive(Clone, Debug)]
pub struct GetSubscription(pub(crate) RequestBuilder<()>);

impl GetSubscription {
    /// Sends the request.
    pub async fn send(self) -> Result<Subscription> {
        let path = path::subscription(&self.0.resource)?;
        get(&self.0.client, path, self.0.options).await
    }
}

/// The request builder for
/// [PubSub::delete_subscription][crate::client::PubSub::delete_subscription].
#[derive(Clone, Debug)]
pub struct DeleteSubscription(pub(crate) RequestBuilder<()>);

impl DeleteSubscription {
    /// Sends the request.
    pub async fn send(self) -> Result<Empty> {
        let path = path::subscription(&self.0.resource)?;
        delete(&self.0.client, path, self.0.options).await
    }
}

/// The request builder for
/// [PubSub::list_subscriptions][crate::client::PubSub::list_subscriptions].
#[derive(Clone, Debug)]
pub struct ListSubscriptions(pub(crate) RequestBuilder<PageParams>);

impl ListSubscriptions {
    /// Sets the maximum number of subscriptions per page.
    pub fn set_page_size<T: Into<i32>>(mut self, v: T) -> Self {
        self.0.request.page_size = v.into();
        self
    }

    /// Sets the token of the page to fetch.
    pub fn set_page_token<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.page_token = v.into();
        self
    }

    /// Sends the request, fetching a single page.
    pub async fn send(self) -> Result<ListSubscriptionsResponse> {
        let path = path::project(&self.0.resource)?;
        let builder = self
            .0
            .client
            .builder(Method::GET, format!("/v1/{path}/subscriptions"));
        let builder = self.0.request.apply(builder);
        self.0
            .client
            .execute(builder, None::<NoBody>, self.0.options)
            .await
    }

    /// Streams the pages, starting at the configured page token.
    pub fn by_page(self) -> Paginator<ListSubscriptionsResponse, Error> {
        let token = self.0.request.page_token.clone();
        let execute = move |token| self.clone().set_page_token(token).send();
        Paginator::new(token, execute)
    }
}

/// The request builder for
/// [PubSub::modify_ack_deadline][crate::client::PubSub::modify_ack_deadline].
#[derive(Clone, Debug)]
pub struct ModifyAckDeadline(pub(crate) RequestBuilder<ModifyAckDeadlineRequest>);

impl ModifyAckDeadline {
    /// Sets the acknowledgment IDs.
    pub fn set_ack_ids<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.0.request.ack_ids = v.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the new deadline, in seconds, counted from the time of the call.
    pub fn set_ack_deadline_seconds<T: Into<i64>>(mut self, v: T) -> Self {
        self.0.request.ack_deadline_seconds = v.into();
        self
    }

    /// Sends the request.
    pub async fn send(self) -> Result<Empty> {
        let path = path::subscription(&self.0.resource)?;
        post(
            &self.0.client,
            path,
            "modifyAckDeadline",
            self.0.request,
            self.0.options,
        )
        .await
    }
}

/// The request builder for
/// [PubSub::modify_push_config][crate::client::PubSub::modify_push_config].
#[derive(Clone, Debug)]
pub struct ModifyPushConfig(pub(crate) RequestBuilder<ModifyPushConfigRequest>);

impl ModifyPushConfig {
    /// Sets the push configuration. Leaving it unset stops push delivery.
    pub fn set_push_config<T: Into<PushConfig>>(mut self, v: T) -> Self {
        self.0.request.push_config = v.into();
        self
    }

    /// Sends the request.
    pub async fn send(self) -> Result<Empty> {
        let path = path::subscription(&self.0.resource)?;
        post(
            &self.0.client,
            path,
            "modifyPushConfig",
            self.0.request,
            self.0.options,
        )
        .await
    }
}

/// The request builder for [PubSub::acknowledge][crate::client::PubSub::acknowledge].
#[derive(Clone, Debug)]
pub struct Acknowledge(pub(crate) RequestBuilder<AcknowledgeRequest>);

impl Acknowledge {
    /// Sets the acknowledgment IDs.
    pub fn set_ack_ids<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.0.request.ack_ids = v.into_iter().map(Into::into).collect();
        self
    }

    /// Sends the request.
    pub async fn send(self) -> Result<Empty> {
        let path = path::subscription(&self.0.resource)?;
        post(
            &self.0.client,
            path,
            "acknowledge",
            self.0.request,
            self.0.options,
        )
        .await
    }
}

/// The request builder for [PubSub::pull][crate::client::PubSub::pull].
#[derive(Clone, Debug)]
pub struct Pull(pub(crate) RequestBuilder<PullRequest>);

impl Pull {
    /// Sets the maximum number of messages to return.
    pub fn set_max_messages<T: Into<i32>>(mut self, v: T) -> Self {
        self.0.request.max_messages = v.into();
        self
    }

    /// If true, the service responds immediately even when no messages are
    /// available.
    pub fn set_return_immediately(mut self, v: bool) -> Self {
        self.0.request.return_immediately = v;
        self
    }

    /// Sends the request.
    pub async fn send(self) -> Result<PullResponse> {
        let path = path::subscription(&self.0.resource)?;
        post(&self.0.client, path, "pull", self.0.request, self.0.options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ClientConfig;

    fn test_client() -> ReqwestClient {
        ReqwestClient::new(ClientConfig::default(), "http://127.0.0.1:1")
    }

    #[tokio::test]
    async fn binding_errors_skip_the_request() {
        // The endpoint does not exist, reaching it would produce an I/O error.
        let builder = GetTopic(RequestBuilder::new(test_client(), "my-topic".into()));
        let got = builder.send().await;
        assert!(matches!(&got, Err(e) if e.is_binding()), "{got:?}");

        let builder = ListSubscriptions(RequestBuilder::new(test_client(), "my-project".into()));
        let got = builder.send().await;
        assert!(matches!(&got, Err(e) if e.is_binding()), "{got:?}");
    }

    #[test]
    fn request_options() {
        let builder = Pull(RequestBuilder::new(
            test_client(),
            "projects/p/subscriptions/s".into(),
        ))
        .with_user_agent("test-only/1.0")
        .with_attempt_timeout(Duration::from_secs(5))
        .set_max_messages(10)
        .set_return_immediately(true);
        assert_eq!(
            builder.0.options.user_agent().as_deref(),
            Some("test-only/1.0")
        );
        assert_eq!(
            builder.0.options.attempt_timeout(),
            &Some(Duration::from_secs(5))
        );
        assert_eq!(builder.0.request.max_messages, 10);
        assert!(builder.0.request.return_immediately);

        let mut options = RequestOptions::default();
        options.set_user_agent("replaced/2.0");
        let builder = builder.with_options(options.clone());
        assert_eq!(builder.0.options, options);
    }

    #[test]
    fn page_params() -> anyhow::Result<()> {
        let client = reqwest::Client::new();
        let params = PageParams {
            page_size: 10,
            page_token: "abc".into(),
        };
        let request = params
            .apply(client.get("http://127.0.0.1:1/v1/projects/p/topics"))
            .build()?;
        assert_eq!(request.url().query(), Some("pageSize=10&pageToken=abc"));

        let request = PageParams::default()
            .apply(client.get("http://127.0.0.1:1/v1/projects/p/topics"))
            .build()?;
        assert_eq!(request.url().query(), None);
        Ok(())
    }
}
