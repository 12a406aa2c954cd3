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

//! Bindings for the Pub/Sub v1 REST API.
//!
//! This crate contains the JSON wire model, a [client][client::PubSub] with
//! one request builder per RPC, and the supporting transport. Each request
//! is sent exactly once. The crate does not retry, and it does not discover
//! credentials. Applications that need authentication supply a configured
//! [reqwest::Client] via [ClientBuilder::with_http_client][client::ClientBuilder::with_http_client].
//!
//! Errors carry the HTTP status code and, when the service returns one, the
//! decoded [Status][error::rpc::Status]:
//!
//! ```no_run
//! # async fn sample() -> anyhow::Result<()> {
//! use pubsub_rest::client::PubSub;
//! let client = PubSub::builder().build()?;
//! match client.get_topic("projects/p/topics/t").send().await {
//!     Ok(topic) => println!("found {}", topic.name),
//!     Err(e) if e.http_status_code() == Some(404) => println!("not found"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(()) }
//! ```

pub mod builder;
pub mod client;
pub mod error;
pub(crate) mod http;
pub mod model;
pub mod options;
pub mod paginator;
mod path;

pub use error::Error;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The default endpoint for the Pub/Sub service.
pub const DEFAULT_HOST: &str = "https://pubsub.googleapis.com";
