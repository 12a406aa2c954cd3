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

use super::rpc::Status;
use http::HeaderMap;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The error returned by every request made through this crate.
///
/// The service may reject the request, the connection may fail, the request
/// may exceed its deadline, or a resource name may not fit the REST path.
/// Most applications just return or log the error. Applications that need to
/// branch on the failure use the `is_*` predicates, [status][Error::status],
/// and the HTTP accessors.
///
/// # Example
/// ```
/// use pubsub_rest::Error;
/// match example_function() {
///     Err(e) if e.is_not_found() => { println!("no such topic {e}"); },
///     Err(e) if e.is_timeout() => { println!("not enough time {e}"); },
///     Err(e) => { println!("some other error {e}"); },
///     Ok(_) => { println!("success"); },
/// }
///
/// fn example_function() -> Result<String, Error> {
///     # Err(Error::http(404, http::HeaderMap::new(), bytes::Bytes::from_static(b"NOT FOUND")))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

#[derive(Debug)]
enum ErrorKind {
    Binding,
    Serialization,
    Deserialization,
    Timeout,
    // No HTTP response was received.
    Io,
    // An HTTP error without the service error envelope.
    Http(Box<HttpResponse>, bytes::Bytes),
    Service(Option<Box<HttpResponse>>, Box<Status>),
}

#[derive(Debug)]
struct HttpResponse {
    status_code: u16,
    headers: HeaderMap,
}

impl Error {
    fn new(kind: ErrorKind, source: Option<BoxError>) -> Self {
        Self { kind, source }
    }

    /// Creates an error with the [Status] returned by the service.
    ///
    /// # Example
    /// ```
    /// use pubsub_rest::Error;
    /// use pubsub_rest::error::rpc::{Code, Status};
    /// let status = Status::default().set_code(Code::NotFound).set_message("NOT FOUND");
    /// let error = Error::service(status.clone());
    /// assert_eq!(error.status(), Some(&status));
    /// ```
    pub fn service(status: Status) -> Self {
        Self::new(ErrorKind::Service(None, Box::new(status)), None)
    }

    /// Creates a service error, including the HTTP status code and headers
    /// of the response that carried it.
    ///
    /// The status code and headers are only kept when both are present.
    pub fn service_with_http_metadata(
        status: Status,
        status_code: Option<u16>,
        headers: Option<HeaderMap>,
    ) -> Self {
        let response = status_code.map(|status_code| {
            Box::new(HttpResponse {
                status_code,
                headers: headers.unwrap_or_default(),
            })
        });
        Self::new(ErrorKind::Service(response, Box::new(status)), None)
    }

    /// Creates an error for an HTTP response without a service [Status].
    pub fn http(status_code: u16, headers: HeaderMap, payload: bytes::Bytes) -> Self {
        let response = Box::new(HttpResponse {
            status_code,
            headers,
        });
        Self::new(ErrorKind::Http(response, payload), None)
    }

    /// Creates an error for a request that exceeded its deadline.
    ///
    /// ```
    /// use std::error::Error as _;
    /// use pubsub_rest::Error;
    /// let error = Error::timeout("simulated timeout");
    /// assert!(error.is_timeout());
    /// assert!(error.source().is_some());
    /// ```
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Timeout, Some(source.into()))
    }

    /// Creates an error for a response that does not parse.
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Deserialization, Some(source.into()))
    }

    /// Creates an error for a request that cannot be formatted.
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Serialization, Some(source.into()))
    }

    /// Creates an error for a malformed resource name.
    pub fn binding<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Binding, Some(source.into()))
    }

    /// Creates an error for a request that received no HTTP response, e.g.
    /// because the connection was refused.
    pub fn io<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Io, Some(source.into()))
    }

    /// The request did not complete before its deadline.
    ///
    /// The request may or may not have reached the service.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// The response does not match the expected shape.
    ///
    /// The request completed in the service. For mutating requests the change
    /// may have been applied.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// The request could not be formatted. It was never sent.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// A resource name does not have the required format. No request was sent.
    ///
    /// Topic names have the form `projects/{project}/topics/{topic}`,
    /// subscription names `projects/{project}/subscriptions/{subscription}`,
    /// and project names `projects/{project}`.
    pub fn is_binding(&self) -> bool {
        matches!(self.kind, ErrorKind::Binding)
    }

    /// The request failed without receiving any HTTP response.
    pub fn is_io(&self) -> bool {
        matches!(self.kind, ErrorKind::Io)
    }

    /// The request failed in the transport layer.
    ///
    /// This includes HTTP errors that did not carry the service error
    /// envelope, e.g. errors generated by a proxy.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Io | ErrorKind::Http(..))
    }

    /// The service rejected the request and returned a [Status].
    pub fn is_service(&self) -> bool {
        matches!(self.kind, ErrorKind::Service(..))
    }

    /// The HTTP status code is 404.
    ///
    /// The status code decides, whether or not the response carried a
    /// [Status] with code `NOT_FOUND`.
    pub fn is_not_found(&self) -> bool {
        self.http_status_code() == Some(404)
    }

    /// The [Status] returned by the service, if any.
    ///
    /// # Example
    /// ```
    /// use pubsub_rest::Error;
    /// use pubsub_rest::error::rpc::{Code, Status};
    /// let error = Error::service(Status::default().set_code(Code::NotFound));
    /// if let Some(status) = error.status() {
    ///     if status.code == Code::NotFound {
    ///         println!("cannot find the thing, more details in {:?}", status.details);
    ///     }
    /// }
    /// ```
    pub fn status(&self) -> Option<&Status> {
        match &self.kind {
            ErrorKind::Service(_, status) => Some(status.as_ref()),
            _ => None,
        }
    }

    /// The HTTP status code of the response, if one was received.
    pub fn http_status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status_code)
    }

    /// The headers of the response, if one was received.
    pub fn http_headers(&self) -> Option<&HeaderMap> {
        self.response().map(|r| &r.headers)
    }

    /// The raw response body.
    ///
    /// Only set for HTTP errors that did not parse as a service [Status].
    pub fn http_payload(&self) -> Option<&bytes::Bytes> {
        match &self.kind {
            ErrorKind::Http(_, payload) => Some(payload),
            _ => None,
        }
    }

    fn response(&self) -> Option<&HttpResponse> {
        match &self.kind {
            ErrorKind::Http(r, _) => Some(r.as_ref()),
            ErrorKind::Service(r, _) => r.as_deref(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ErrorKind::Binding => f.write_str("cannot format the request path")?,
            ErrorKind::Serialization => f.write_str("cannot serialize the request")?,
            ErrorKind::Deserialization => f.write_str("cannot deserialize the response")?,
            ErrorKind::Timeout => f.write_str("the request exceeded its deadline")?,
            ErrorKind::Io => f.write_str("the request did not receive a response")?,
            ErrorKind::Http(r, payload) => match std::str::from_utf8(payload) {
                Ok(p) => write!(f, "the HTTP request failed with [{}]: {p}", r.status_code)?,
                Err(_) => write!(
                    f,
                    "the HTTP request failed with [{}]: {payload:?}",
                    r.status_code
                )?,
            },
            ErrorKind::Service(_, status) => write!(
                f,
                "the service reports an error with code {}: {}",
                status.code, status.message
            )?,
        }
        match &self.source {
            Some(e) => write!(f, ": {e}"),
            None => Ok(()),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &dyn StdError)
    }
}
