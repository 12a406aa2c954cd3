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
use crate::error::Error;
use crate::error::rpc::Status;
use crate::options::{ClientConfig, RequestOptions};
use tracing::Instrument;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Sends JSON requests to the service and decodes the responses.
///
/// The client performs exactly one attempt per request. Any failure is
/// returned to the caller.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    endpoint: String,
    user_agent: Option<String>,
    tracing: bool,
}

impl ReqwestClient {
    pub fn new(config: ClientConfig, default_endpoint: &str) -> Self {
        let tracing = crate::options::tracing_enabled(&config);
        let endpoint = config
            .endpoint
            .unwrap_or_else(|| default_endpoint.to_string());
        Self {
            inner: config.http_client.unwrap_or_default(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            user_agent: config.user_agent,
            tracing,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn builder(&self, method: reqwest::Method, path: String) -> reqwest::RequestBuilder {
        self.inner
            .request(method, format!("{}{path}", &self.endpoint))
    }

    pub async fn execute<I: serde::ser::Serialize, O: serde::de::DeserializeOwned + Default>(
        &self,
        mut builder: reqwest::RequestBuilder,
        body: Option<I>,
        options: RequestOptions,
    ) -> Result<O> {
        let user_agent = match (options.user_agent(), &self.user_agent) {
            (Some(prefix), _) | (None, Some(prefix)) => format!("{prefix} {DEFAULT_USER_AGENT}"),
            (None, None) => DEFAULT_USER_AGENT.to_string(),
        };
        builder = builder.header(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_str(&user_agent).map_err(Error::ser)?,
        );
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        if let Some(timeout) = options.attempt_timeout() {
            builder = builder.timeout(*timeout);
        }
        let request = builder.build().map_err(Error::ser)?;
        if !self.tracing {
            return self.request_attempt(request).await;
        }
        let span = tracing::debug_span!(
            "http_request",
            http.request.method = %request.method(),
            url.full = %request.url(),
            http.response.status_code = tracing::field::Empty,
        );
        self.request_attempt(request).instrument(span).await
    }

    async fn request_attempt<O: serde::de::DeserializeOwned + Default>(
        &self,
        request: reqwest::Request,
    ) -> Result<O> {
        let response = self
            .inner
            .execute(request)
            .await
            .map_err(Self::map_send_error)?;
        tracing::Span::current().record("http.response.status_code", response.status().as_u16());
        if !response.status().is_success() {
            return self::to_http_error(response).await;
        }
        self::to_http_response(response).await
    }

    fn map_send_error(err: reqwest::Error) -> Error {
        match err {
            e if e.is_timeout() => Error::timeout(e),
            e => Error::io(e),
        }
    }
}

#[derive(serde::Serialize)]
pub(crate) struct NoBody;

pub(crate) async fn to_http_error<O>(response: reqwest::Response) -> Result<O> {
    let status_code = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(map_body_error)?;

    let error = match Status::try_from(&body) {
        Ok(status) => Error::service_with_http_metadata(status, Some(status_code), Some(headers)),
        Err(_) => Error::http(status_code, headers, body),
    };
    tracing::debug!("request failed: {error}");
    Err(error)
}

fn map_body_error(err: reqwest::Error) -> Error {
    match err {
        e if e.is_timeout() => Error::timeout(e),
        e => Error::io(e),
    }
}

async fn to_http_response<O: serde::de::DeserializeOwned + Default>(
    response: reqwest::Response,
) -> Result<O> {
    // 204 No Content has no body and throws EOF error if we try to parse with serde::json
    let no_content_status = response.status() == reqwest::StatusCode::NO_CONTENT;
    let body = response.bytes().await.map_err(map_body_error)?;
    match body {
        content if (content.is_empty() && no_content_status) => Ok(O::default()),
        content => serde_json::from_slice::<O>(&content).map_err(Error::deser),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::rpc::Code;
    use crate::model::Empty;
    use http::{HeaderMap, HeaderValue};
    use test_case::test_case;

    type TestResult = anyhow::Result<()>;

    fn json_headers() -> HeaderMap {
        let mut want = HeaderMap::new();
        want.insert("content-type", HeaderValue::from_static("application/json"));
        want
    }

    fn resp_from_code_content(
        code: reqwest::StatusCode,
        content: &str,
    ) -> http::Result<reqwest::Response> {
        let http_resp = http::Response::builder()
            .header("Content-Type", "application/json")
            .status(code)
            .body(content.to_string())?;
        Ok(http_resp.into())
    }

    #[tokio::test]
    async fn client_http_error_bytes() -> TestResult {
        let response = resp_from_code_content(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error": "bad request"}"#,
        )?;
        let err = super::to_http_error::<()>(response).await.unwrap_err();
        assert!(err.status().is_none(), "{err:?}");
        assert_eq!(err.http_status_code(), Some(400));
        assert_eq!(err.http_headers(), Some(&json_headers()));
        assert_eq!(
            err.http_payload(),
            Some(bytes::Bytes::from(r#"{"error": "bad request"}"#)).as_ref()
        );
        Ok(())
    }

    #[tokio::test]
    async fn client_error_with_status() -> TestResult {
        let body = serde_json::json!({"error": {
            "code": 404,
            "message": "Resource not found (resource=my-topic).",
            "status": "NOT_FOUND",
        }});
        let response = resp_from_code_content(reqwest::StatusCode::NOT_FOUND, &body.to_string())?;
        let err = super::to_http_error::<()>(response).await.unwrap_err();
        let want_status = Status::default()
            .set_code(Code::NotFound)
            .set_message("Resource not found (resource=my-topic).");
        assert_eq!(err.status(), Some(&want_status));
        assert_eq!(err.http_status_code(), Some(404_u16));
        assert_eq!(err.http_headers(), Some(&json_headers()));
        Ok(())
    }

    #[tokio::test]
    #[test_case(reqwest::StatusCode::OK, "{}"; "200 with empty object")]
    #[test_case(reqwest::StatusCode::NO_CONTENT, "{}"; "204 with empty object")]
    #[test_case(reqwest::StatusCode::NO_CONTENT, ""; "204 with empty content")]
    async fn client_empty_content(code: reqwest::StatusCode, content: &str) -> TestResult {
        let response = resp_from_code_content(code, content)?;
        let body = super::to_http_response::<Empty>(response).await?;
        assert_eq!(body, Empty::default());
        Ok(())
    }

    #[tokio::test]
    async fn client_error_with_empty_content() -> TestResult {
        let response = resp_from_code_content(reqwest::StatusCode::OK, "")?;
        let response = super::to_http_response::<Empty>(response).await;
        assert!(
            matches!(&response, Err(e) if e.is_deserialization()),
            "{response:?}"
        );
        Ok(())
    }

    #[test]
    fn endpoint_default_and_override() {
        let client = ReqwestClient::new(ClientConfig::default(), "https://pubsub.googleapis.com");
        assert_eq!(client.endpoint(), "https://pubsub.googleapis.com");

        let config = ClientConfig {
            endpoint: Some("http://localhost:8085/".to_string()),
            ..Default::default()
        };
        let client = ReqwestClient::new(config, "https://pubsub.googleapis.com");
        assert_eq!(client.endpoint(), "http://localhost:8085");
    }
}
