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

//! Topic and subscription lifecycle operations for [Pub/Sub].
//!
//! The [Service] trait is the interface the rest of an application programs
//! against. [ApiService] implements it with the Pub/Sub v1 REST API:
//!
//! ```no_run
//! # async fn sample() -> anyhow::Result<()> {
//! use pubsub_service::{ApiService, RequestOptions, Service};
//! use std::time::Duration;
//!
//! let service = ApiService::builder().build()?;
//! let topic = "projects/my-project/topics/my-topic";
//! if !service.topic_exists(topic, RequestOptions::default()).await? {
//!     service.create_topic(topic, RequestOptions::default()).await?;
//! }
//! service
//!     .create_subscription(
//!         topic,
//!         "projects/my-project/subscriptions/my-sub",
//!         Duration::from_secs(30),
//!         None,
//!         RequestOptions::default(),
//!     )
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Set `PUBSUB_EMULATOR_HOST` to send the requests to a local emulator.
//!
//! [Pub/Sub]: https://cloud.google.com/pubsub

pub mod ack;
pub mod builder;
pub mod model;
mod service;

pub use pubsub_rest::Error;
pub use pubsub_rest::Result;
pub use pubsub_rest::options::{RequestOptions, RequestOptionsBuilder};
pub use service::{ApiService, Service};
