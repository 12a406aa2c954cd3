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

use crate::service::ApiService;
use pubsub_rest::client::{BuilderError, PubSub};

/// The environment variable naming the `host:port` of a Pub/Sub emulator.
pub const EMULATOR_HOST_VAR: &str = "PUBSUB_EMULATOR_HOST";

/// A builder for [ApiService].
///
/// When `PUBSUB_EMULATOR_HOST` is set, and the application does not
/// configure an endpoint, the service sends requests to
/// `http://${PUBSUB_EMULATOR_HOST}`.
///
/// # Example
/// ```
/// # use pubsub_service::ApiService;
/// # fn sample() -> anyhow::Result<()> {
/// let service = ApiService::builder()
///     .with_endpoint("http://localhost:8085")
///     .with_user_agent("my-app/1.0")
///     .build()?;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct ClientBuilder {
    inner: pubsub_rest::client::ClientBuilder,
    has_endpoint: bool,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            inner: PubSub::builder(),
            has_endpoint: false,
        }
    }

    /// Sets the endpoint.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.inner = self.inner.with_endpoint(v);
        self.has_endpoint = true;
        self
    }

    /// Sets the HTTP client used to send requests.
    ///
    /// The client must add any authentication headers the service requires.
    pub fn with_http_client(mut self, v: reqwest::Client) -> Self {
        self.inner = self.inner.with_http_client(v);
        self
    }

    /// Sets a prefix for the `user-agent` header.
    pub fn with_user_agent<V: Into<String>>(mut self, v: V) -> Self {
        self.inner = self.inner.with_user_agent(v);
        self
    }

    /// Enables a tracing span for each request.
    pub fn with_tracing(mut self) -> Self {
        self.inner = self.inner.with_tracing();
        self
    }

    /// Creates the service.
    pub fn build(self) -> Result<ApiService, BuilderError> {
        let mut inner = self.inner;
        if !self.has_endpoint {
            if let Some(host) = emulator_host() {
                tracing::debug!("using the Pub/Sub emulator at {host}");
                inner = inner.with_endpoint(format!("http://{host}"));
            }
        }
        Ok(ApiService::new(inner.build()?))
    }
}

fn emulator_host() -> Option<String> {
    std::env::var(EMULATOR_HOST_VAR)
        .ok()
        .filter(|h| !h.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_env::ScopedEnv;

    // These tests must run serially because they manipulate the environment.
    #[test]
    #[serial_test::serial]
    fn emulator_host_unset() -> anyhow::Result<()> {
        let _e = ScopedEnv::remove(EMULATOR_HOST_VAR);
        assert_eq!(emulator_host(), None);
        let _e = ScopedEnv::set(EMULATOR_HOST_VAR, "");
        assert_eq!(emulator_host(), None);
        let service = ApiService::builder().build()?;
        assert_eq!(service.endpoint(), pubsub_rest::DEFAULT_HOST);
        Ok(())
    }

    #[test]
    #[serial_test::serial]
    fn emulator_host_set() -> anyhow::Result<()> {
        let _e = ScopedEnv::set(EMULATOR_HOST_VAR, "localhost:8085");
        assert_eq!(emulator_host().as_deref(), Some("localhost:8085"));
        let service = ApiService::builder().with_tracing().build()?;
        assert_eq!(service.endpoint(), "http://localhost:8085");

        let service = ApiService::builder()
            .with_endpoint("http://127.0.0.1:9000")
            .build()?;
        assert_eq!(service.endpoint(), "http://127.0.0.1:9000");
        Ok(())
    }

    #[test]
    fn invalid_endpoint() {
        let got = ApiService::builder().with_endpoint("not a url").build();
        assert!(
            matches!(&got, Err(BuilderError::InvalidEndpoint { .. })),
            "{got:?}"
        );
    }
}
