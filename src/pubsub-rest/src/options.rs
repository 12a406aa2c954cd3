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

//! Client configuration and per request options.
//!
//! The client defaults work for most applications talking to the production
//! service. Applications using the emulator, a private endpoint, or an HTTP
//! client with custom authentication change the [ClientConfig] via the
//! [ClientBuilder][crate::client::ClientBuilder].
//!
//! Each request may also override a couple of settings, notably its timeout.
//! The per-RPC builders implement [RequestOptionsBuilder] for this purpose.

use std::time::Duration;

pub(crate) const LOGGING_VAR: &str = "GOOGLE_CLOUD_RUST_LOGGING";

/// A set of options configuring a single request.
///
/// Requests carry their deadline here. Cancellation needs no option: dropping
/// the future returned by `send()` abandons the request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    user_agent: Option<String>,
    attempt_timeout: Option<Duration>,
}

impl RequestOptions {
    /// Prepends this prefix to the user agent header value.
    pub fn set_user_agent<T: Into<String>>(&mut self, v: T) {
        self.user_agent = Some(v.into());
    }

    /// Gets the current user-agent prefix.
    pub fn user_agent(&self) -> &Option<String> {
        &self.user_agent
    }

    /// Sets the timeout for the request.
    ///
    /// The request fails with [Error::is_timeout][crate::Error::is_timeout]
    /// if no complete response arrives in time.
    pub fn set_attempt_timeout<T: Into<Duration>>(&mut self, v: T) {
        self.attempt_timeout = Some(v.into());
    }

    /// Gets the current timeout.
    pub fn attempt_timeout(&self) -> &Option<Duration> {
        &self.attempt_timeout
    }
}

/// Implementations of this trait provide setters to configure request options.
pub trait RequestOptionsBuilder {
    /// Set the user agent header.
    fn with_user_agent<V: Into<String>>(self, v: V) -> Self;

    /// Sets the timeout for the request.
    fn with_attempt_timeout<V: Into<Duration>>(self, v: V) -> Self;
}

/// The configuration shared by all the requests made by a client.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub endpoint: Option<String>,
    pub http_client: Option<reqwest::Client>,
    pub user_agent: Option<String>,
    pub tracing: bool,
}

// Returns true if the environment or client configuration enables tracing.
pub(crate) fn tracing_enabled(config: &ClientConfig) -> bool {
    if config.tracing {
        return true;
    }
    std::env::var(LOGGING_VAR)
        .map(|v| v == "true")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_env::ScopedEnv;

    #[test]
    fn request_options() {
        let mut options = RequestOptions::default();
        assert_eq!(options.user_agent(), &None);
        assert_eq!(options.attempt_timeout(), &None);

        options.set_user_agent("test-only/1.2.3");
        options.set_attempt_timeout(Duration::from_secs(3));
        assert_eq!(options.user_agent().as_deref(), Some("test-only/1.2.3"));
        assert_eq!(options.attempt_timeout(), &Some(Duration::from_secs(3)));
    }

    // This test must run serially because it manipulates the environment.
    #[test]
    #[serial_test::serial]
    fn config_tracing() {
        let _e = ScopedEnv::remove(LOGGING_VAR);
        let config = ClientConfig::default();
        assert!(!tracing_enabled(&config), "expected tracing to be disabled");
        let config = ClientConfig {
            tracing: true,
            ..Default::default()
        };
        assert!(tracing_enabled(&config), "expected tracing to be enabled");

        let _e = ScopedEnv::set(LOGGING_VAR, "true");
        let config = ClientConfig::default();
        assert!(tracing_enabled(&config), "expected tracing to be enabled");

        let _e = ScopedEnv::set(LOGGING_VAR, "not-true");
        let config = ClientConfig::default();
        assert!(!tracing_enabled(&config), "expected tracing to be disabled");
    }
}
