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

//! Response types.
//!
//! This module contains the `Response` type returned by all client methods.
//! The response carries the deserialized body, as well as the HTTP status code
//! and headers. The Azure services return useful information in the headers,
//! for example, `x-ms-request-id` or `ETag`.
//!
//! # Examples
//!
//! Creating a response for mocks
//!
//! ```
//! # use azure_sdk_core::Result;
//! # use azure_sdk_core::response::Response;
//! struct QueueProperties {
//!   // ...
//! }
//!
//! fn make_mock_response(body: QueueProperties) -> Result<Response<QueueProperties>> {
//!     Ok(Response::from(body))
//! }
//! ```

/// Represents an Azure service response.
///
/// A response consists of a body (potentially the unit type), and some
/// metadata, the HTTP status code and headers.
///
/// # Examples
/// ```no_run
/// # use azure_sdk_core::Result;
/// # use azure_sdk_core::response::Response;
/// struct Key {
///   // ...
/// }
///
/// async fn get_key(name: &str) -> Result<Response<Key>> {
///   // ...
/// # panic!()
/// }
///
/// # tokio_test::block_on(async {
/// let response = get_key("my-key").await?;
/// if let Some(id) = response.headers().get("x-ms-request-id") {
///     println!("request id = {id:?}");
/// }
/// let key = response.body();
/// # Result::<()>::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct Response<T> {
    parts: Parts,
    body: T,
}

impl<T> Response<T> {
    /// Creates a response from the body.
    ///
    /// The status code is `200 OK` and the headers are empty.
    ///
    /// # Example
    /// ```
    /// # use azure_sdk_core::response::Response;
    /// let response = Response::from("test".to_string());
    /// assert_eq!(response.status(), http::StatusCode::OK);
    /// ```
    pub fn from(body: T) -> Self {
        Self {
            body,
            parts: Parts::default(),
        }
    }

    /// Creates a response from the given parts.
    ///
    /// # Example
    /// ```
    /// # use azure_sdk_core::response::{Parts, Response};
    /// let mut headers = http::HeaderMap::new();
    /// headers.insert("x-ms-request-id", http::HeaderValue::from_static("abc"));
    /// let response = Response::from_parts(
    ///     Parts::new().set_status(http::StatusCode::CREATED).set_headers(headers), ());
    /// assert_eq!(response.status(), http::StatusCode::CREATED);
    /// assert!(response.headers().get("x-ms-request-id").is_some());
    /// ```
    pub fn from_parts(parts: Parts, body: T) -> Self {
        Self { parts, body }
    }

    /// Returns the headers associated with this response.
    pub fn headers(&self) -> &http::HeaderMap<http::HeaderValue> {
        &self.parts.headers
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> http::StatusCode {
        self.parts.status
    }

    /// Returns the body associated with this response.
    pub fn body(&self) -> &T {
        &self.body
    }

    /// Consumes the response returning the metadata, and body.
    pub fn into_parts(self) -> (Parts, T) {
        (self.parts, self.body)
    }

    /// Consumes the response returning only its body.
    pub fn into_body(self) -> T {
        self.body
    }

    /// Replaces the body, preserving the status code and headers.
    ///
    /// # Example
    /// ```
    /// # use azure_sdk_core::response::Response;
    /// let response = Response::from("42".to_string());
    /// let response = response.map(|s| s.parse::<i32>());
    /// assert!(matches!(response.body(), Ok(42)));
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            parts: self.parts,
            body: f(self.body),
        }
    }
}

/// Component parts of a response.
///
/// # Example
/// ```
/// # use azure_sdk_core::response::Parts;
/// let mut headers = http::HeaderMap::new();
/// headers.insert(http::header::CONTENT_TYPE, http::HeaderValue::from_static("application/xml"));
/// let parts = Parts::new().set_headers(headers);
///
/// assert_eq!(
///     parts.headers.get(http::header::CONTENT_TYPE),
///     Some(&http::HeaderValue::from_static("application/xml"))
/// );
/// ```
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct Parts {
    /// The HTTP status code.
    pub status: http::StatusCode,
    /// The HTTP headers.
    pub headers: http::HeaderMap<http::HeaderValue>,
}

impl Parts {
    /// Create a new instance.
    pub fn new() -> Self {
        Parts::default()
    }

    /// Set the status code.
    pub fn set_status<V>(mut self, v: V) -> Self
    where
        V: Into<http::StatusCode>,
    {
        self.status = v.into();
        self
    }

    /// Set the headers.
    pub fn set_headers<V>(mut self, v: V) -> Self
    where
        V: Into<http::HeaderMap>,
    {
        self.headers = v.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_from() {
        let response = Response::from("abc123".to_string());
        assert!(response.headers().is_empty());
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(response.body().as_str(), "abc123");

        let body = response.into_body();
        assert_eq!(body.as_str(), "abc123");
    }

    #[test]
    fn response_from_parts() {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        let parts = Parts::new()
            .set_status(http::StatusCode::ACCEPTED)
            .set_headers(headers.clone());

        let response = Response::from_parts(parts, "abc123".to_string());
        assert_eq!(response.body().as_str(), "abc123");
        assert_eq!(response.headers(), &headers);
        assert_eq!(response.status(), http::StatusCode::ACCEPTED);

        let (parts, body) = response.into_parts();
        assert_eq!(body.as_str(), "abc123");
        assert_eq!(parts.headers, headers);
        assert_eq!(parts.status, http::StatusCode::ACCEPTED);
    }

    #[test]
    fn response_map() {
        let parts = Parts::new().set_status(http::StatusCode::CREATED);
        let response = Response::from_parts(parts, 42_u32);
        let response = response.map(|v| v.to_string());
        assert_eq!(response.status(), http::StatusCode::CREATED);
        assert_eq!(response.body(), "42");
    }
}
