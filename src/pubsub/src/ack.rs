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

//! Helpers to acknowledge, or extend the deadline of, any number of messages.
//!
//! The service limits the size of each request. These helpers split the
//! acknowledgment IDs into batches that fit, and send one request per batch.

use crate::Result;
use crate::service::Service;
use pubsub_rest::options::RequestOptions;
use std::time::Duration;

const MAX_PAYLOAD: usize = 512 * 1024;
const REQUEST_OVERHEAD: usize = 100;
const OVERHEAD_PER_ID: usize = 3;

/// Splits `ack_ids` into a prefix that fits in a single request, and the
/// remaining IDs.
///
/// The prefix contains at least one ID when `ack_ids` is not empty.
///
/// ```
/// # use pubsub_service::ack::split_ack_ids;
/// let ids = vec!["a".to_string(), "b".to_string()];
/// let (head, tail) = split_ack_ids(&ids);
/// assert_eq!(head, ids.as_slice());
/// assert!(tail.is_empty());
/// ```
pub fn split_ack_ids(ack_ids: &[String]) -> (&[String], &[String]) {
    let mut total = REQUEST_OVERHEAD;
    for (i, id) in ack_ids.iter().enumerate() {
        total += id.len() + OVERHEAD_PER_ID;
        if total > MAX_PAYLOAD {
            return ack_ids.split_at(i.max(1));
        }
    }
    (ack_ids, &[])
}

/// Acknowledges all of `ack_ids`, using as many requests as needed.
///
/// Stops at the first error. The batches sent before the error remain
/// acknowledged.
pub async fn acknowledge_all<S>(
    service: &S,
    subscription: &str,
    ack_ids: &[String],
    options: RequestOptions,
) -> Result<()>
where
    S: Service + ?Sized,
{
    let mut pending = ack_ids;
    while !pending.is_empty() {
        let (head, tail) = split_ack_ids(pending);
        service
            .acknowledge(subscription, head, options.clone())
            .await?;
        pending = tail;
    }
    Ok(())
}

/// Sets the deadline of all of `ack_ids`, using as many requests as needed.
pub async fn modify_ack_deadline_all<S>(
    service: &S,
    subscription: &str,
    deadline: Duration,
    ack_ids: &[String],
    options: RequestOptions,
) -> Result<()>
where
    S: Service + ?Sized,
{
    let mut pending = ack_ids;
    while !pending.is_empty() {
        let (head, tail) = split_ack_ids(pending);
        service
            .modify_ack_deadline(subscription, deadline, head, options.clone())
            .await?;
        pending = tail;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::model::{Message, PushConfig, SubscriptionConfig};
    use std::sync::{Arc, Mutex};
    use test_case::test_case;

    mockall::mock! {
        #[derive(Debug)]
        Service {}
        #[async_trait::async_trait]
        impl Service for Service {
            async fn create_subscription(&self, topic: &str, subscription: &str, ack_deadline: Duration, push_config: Option<PushConfig>, options: RequestOptions) -> Result<()>;
            async fn get_subscription_config(&self, subscription: &str, options: RequestOptions) -> Result<SubscriptionConfig>;
            async fn list_project_subscriptions(&self, project: &str, options: RequestOptions) -> Result<Vec<String>>;
            async fn delete_subscription(&self, subscription: &str, options: RequestOptions) -> Result<()>;
            async fn subscription_exists(&self, subscription: &str, options: RequestOptions) -> Result<bool>;
            async fn create_topic(&self, topic: &str, options: RequestOptions) -> Result<()>;
            async fn delete_topic(&self, topic: &str, options: RequestOptions) -> Result<()>;
            async fn topic_exists(&self, topic: &str, options: RequestOptions) -> Result<bool>;
            async fn list_project_topics(&self, project: &str, options: RequestOptions) -> Result<Vec<String>>;
            async fn list_topic_subscriptions(&self, topic: &str, options: RequestOptions) -> Result<Vec<String>>;
            async fn modify_ack_deadline(&self, subscription: &str, deadline: Duration, ack_ids: &[String], options: RequestOptions) -> Result<()>;
            async fn modify_push_config(&self, subscription: &str, push_config: Option<PushConfig>, options: RequestOptions) -> Result<()>;
            async fn acknowledge(&self, subscription: &str, ack_ids: &[String], options: RequestOptions) -> Result<()>;
            async fn fetch_messages(&self, subscription: &str, max_messages: i32, options: RequestOptions) -> Result<Vec<Message>>;
            async fn publish_messages(&self, topic: &str, messages: Vec<Message>, options: RequestOptions) -> Result<Vec<String>>;
        }
    }

    // Each ID uses exactly 1 KiB of the request payload.
    fn kib_ids(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| format!("{i:0>width$}", width = 1024 - OVERHEAD_PER_ID))
            .collect()
    }

    #[test_case(0, 0, 0)]
    #[test_case(1, 1, 0)]
    #[test_case(511, 511, 0; "fits")]
    #[test_case(512, 511, 1; "overhead pushes one out")]
    #[test_case(2000, 511, 1489)]
    fn split(count: usize, want_head: usize, want_tail: usize) {
        let ids = kib_ids(count);
        let (head, tail) = split_ack_ids(&ids);
        assert_eq!(head.len(), want_head);
        assert_eq!(tail.len(), want_tail);
        assert_eq!([head, tail].concat(), ids);
    }

    #[test]
    fn split_oversized_id() {
        let ids = vec!["a".repeat(MAX_PAYLOAD), "b".to_string()];
        let (head, tail) = split_ack_ids(&ids);
        assert_eq!(head, &ids[..1]);
        assert_eq!(tail, &ids[1..]);
    }

    #[tokio::test]
    async fn acknowledge_all_batches() -> anyhow::Result<()> {
        let ids = kib_ids(1200);
        let batches = Arc::new(Mutex::new(Vec::new()));
        let mut mock = MockService::new();
        let captured = batches.clone();
        mock.expect_acknowledge()
            .withf(|sub, _, _| sub == "projects/p/subscriptions/s")
            .times(3)
            .returning(move |_, ids, _| {
                captured.lock().unwrap().push(ids.to_vec());
                Ok(())
            });

        acknowledge_all(
            &mock,
            "projects/p/subscriptions/s",
            &ids,
            RequestOptions::default(),
        )
        .await?;
        let batches = batches.lock().unwrap();
        let sizes = batches.iter().map(Vec::len).collect::<Vec<_>>();
        assert_eq!(sizes, vec![511, 511, 178]);
        assert_eq!(batches.concat(), ids);
        Ok(())
    }

    #[tokio::test]
    async fn acknowledge_all_empty() -> anyhow::Result<()> {
        let mut mock = MockService::new();
        mock.expect_acknowledge().never();
        acknowledge_all(
            &mock,
            "projects/p/subscriptions/s",
            &[],
            RequestOptions::default(),
        )
        .await?;
        Ok(())
    }

    #[tokio::test]
    async fn acknowledge_all_stops_on_error() {
        let ids = kib_ids(1200);
        let mut mock = MockService::new();
        mock.expect_acknowledge()
            .times(1)
            .returning(|_, _, _| Err(Error::io("connection reset")));
        let got = acknowledge_all(
            &mock,
            "projects/p/subscriptions/s",
            &ids,
            RequestOptions::default(),
        )
        .await;
        assert!(matches!(&got, Err(e) if e.is_io()), "{got:?}");
    }

    #[tokio::test]
    async fn modify_ack_deadline_all_batches() -> anyhow::Result<()> {
        let ids = kib_ids(600);
        let mut mock = MockService::new();
        mock.expect_modify_ack_deadline()
            .withf(|_, deadline, _, _| *deadline == Duration::from_secs(30))
            .times(2)
            .returning(|_, _, _, _| Ok(()));

        // Works with trait objects too.
        let service: &dyn Service = &mock;
        modify_ack_deadline_all(
            service,
            "projects/p/subscriptions/s",
            Duration::from_secs(30),
            &ids,
            RequestOptions::default(),
        )
        .await?;
        Ok(())
    }
}
