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

//! Operation descriptors and request binding.
//!
//! Each REST call is described by a static [Operation]: the HTTP method, the
//! path template, constant query parameters, the expected status codes, and
//! the default idempotency. The client methods bind the request parameters to
//! an [OperationRequest] and hand it to the
//! [PipelineClient][crate::client::PipelineClient].
//!
//! # Example
//! ```
//! # use azure_sdk_core_internal::operation::*;
//! static GET_KEY: Operation = Operation {
//!     name: "KeyClient::get_key",
//!     method: http::Method::GET,
//!     path: "/keys/{key-name}/{key-version}",
//!     query: &[],
//!     expected: &[200],
//!     format: Format::Json,
//!     idempotent: true,
//! };
//! let request = OperationRequest::new(&GET_KEY, Default::default())
//!     .path_param("key-name", "my key")
//!     .path_param("key-version", "");
//! assert_eq!(request.path()?, "/keys/my%20key/");
//! # Ok::<(), azcore::error::Error>(())
//! ```

use azcore::Result;
use azcore::error::Error;
use azcore::options::RequestOptions;
use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::collections::HashMap;

const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

// File and directory paths keep their separators.
const PATH_ENCODE_SET: &AsciiSet = &QUERY_ENCODE_SET.remove(b'/');

// The only path parameter whose value is itself a path. Names (shares, queues,
// keys, versions) are a single segment and must encode `/`.
const PATH_PARAMETER: &str = "path";

/// The wire format of the response body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
    Bytes,
    None,
}

impl Format {
    pub(crate) fn accept(&self) -> Option<&'static str> {
        match self {
            Self::Json => Some("application/json"),
            Self::Xml => Some("application/xml"),
            Self::Bytes | Self::None => None,
        }
    }
}

/// A static description of a REST call.
#[derive(Debug)]
pub struct Operation {
    /// The name used in tracing spans, e.g. `QueueClient::create`.
    pub name: &'static str,
    pub method: http::Method,
    /// The path template, relative to the endpoint. Parameters are written
    /// as `{name}`.
    pub path: &'static str,
    /// Query parameters sent with every request, e.g. `restype=share`.
    pub query: &'static [(&'static str, &'static str)],
    /// The status codes indicating success. If empty, any 2xx code.
    pub expected: &'static [u16],
    pub format: Format,
    pub idempotent: bool,
}

/// The parameters for one call of an [Operation].
#[derive(Debug)]
pub struct OperationRequest {
    pub(crate) operation: &'static Operation,
    pub(crate) path_params: Vec<(&'static str, String)>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) content_type: Option<&'static str>,
    pub(crate) options: RequestOptions,
}

impl OperationRequest {
    /// Creates a request, applying the operation's default idempotency.
    pub fn new(operation: &'static Operation, options: RequestOptions) -> Self {
        let options =
            azcore::options::internal::set_default_idempotency(options, operation.idempotent);
        Self {
            operation,
            path_params: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: Bytes::new(),
            content_type: None,
            options,
        }
    }

    pub fn operation(&self) -> &'static Operation {
        self.operation
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Binds a path parameter.
    pub fn path_param<V: Into<String>>(mut self, name: &'static str, value: V) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Adds a query parameter.
    pub fn query<V: ToString>(mut self, name: &str, value: V) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds a query parameter if `value` is present.
    pub fn query_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(name, v),
            None => self,
        }
    }

    /// Adds a header.
    pub fn header<V: ToString>(mut self, name: &str, value: V) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds a header if `value` is present.
    pub fn header_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.header(name, v),
            None => self,
        }
    }

    /// Adds one `x-ms-meta-{name}` header per metadata entry.
    pub fn metadata(self, metadata: &HashMap<String, String>) -> Self {
        let mut entries = metadata.iter().collect::<Vec<_>>();
        entries.sort();
        entries.into_iter().fold(self, |r, (k, v)| {
            r.header(&format!("{}{k}", crate::headers::META_PREFIX), v)
        })
    }

    /// Sets a JSON body.
    pub fn json_body<T: serde::Serialize>(mut self, body: &T) -> Result<Self> {
        let body = serde_json::to_vec(body).map_err(Error::ser)?;
        self.body = Bytes::from(body);
        self.content_type = Some("application/json");
        Ok(self)
    }

    /// Sets an XML body, using `root` as the document element.
    pub fn xml_body<T: serde::Serialize>(mut self, root: &str, body: &T) -> Result<Self> {
        self.body = crate::xml::to_bytes(root, body)?;
        self.content_type = Some("application/xml");
        Ok(self)
    }

    /// Sets a binary body.
    pub fn bytes_body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = body.into();
        self.content_type = Some("application/octet-stream");
        self
    }

    /// Expands the path template.
    ///
    /// Returns a binding error if a parameter in the template is not bound.
    pub fn path(&self) -> Result<String> {
        let mut path = String::with_capacity(self.operation.path.len());
        let mut rest = self.operation.path;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            let name = &rest[start + 1..start + len];
            let value = self
                .path_params
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v)
                .ok_or_else(|| missing(name))?;
            path.push_str(&rest[..start]);
            let set = if name == PATH_PARAMETER {
                PATH_ENCODE_SET
            } else {
                QUERY_ENCODE_SET
            };
            path.extend(utf8_percent_encode(value, set));
            rest = &rest[start + len + 1..];
        }
        path.push_str(rest);
        Ok(path)
    }

    /// The query string, including the operation's constant parameters.
    pub(crate) fn query_string(&self, extra: &[(&str, String)]) -> String {
        let constant = self
            .operation
            .query
            .iter()
            .map(|(k, v)| (*k, v.to_string()));
        let dynamic = self.query.iter().map(|(k, v)| (k.as_str(), v.clone()));
        let extra = extra.iter().map(|(k, v)| (*k, v.clone()));
        constant
            .chain(dynamic)
            .chain(extra)
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_ENCODE_SET),
                    utf8_percent_encode(&v, QUERY_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Returns a required path segment, or a binding error if it is empty.
///
/// Key, queue and share names cannot be empty, and an empty name would
/// silently change the target of the request.
pub fn required<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(missing(name));
    }
    Ok(value)
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum BindingError {
    #[error("missing required parameter {0}")]
    MissingRequiredParameter(String),
    #[error("parameters {0} and {1} cannot be set on the same request")]
    ConflictingParameters(String, String),
}

pub fn missing(name: &str) -> Error {
    Error::binding(BindingError::MissingRequiredParameter(name.to_string()))
}
