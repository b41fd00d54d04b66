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

//! The generic client used by all the client libraries.

use crate::operation::{Format, Operation, OperationRequest};
use crate::options::{ClientConfig, ClientInfo};
use crate::pipeline::{Context, HttpTransport, Pipeline, RawResponse, Request};
use azcore::Result;
use azcore::client_builder::Error as BuilderError;
use azcore::error::Error;
use azcore::options::RequestOptions;
use azcore::response::{Parts, Response};
use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderName, HeaderValue};
use std::sync::Arc;
use url::Url;

/// How the client sends the service API version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiVersion {
    /// As the `api-version` query parameter (Key Vault).
    Query(&'static str),
    /// As the `x-ms-version` header (Storage). The storage services also
    /// receive the server-side `timeout` query parameter.
    Header(&'static str),
}

/// Sends [OperationRequest]s through the [Pipeline] and decodes the
/// responses.
#[derive(Clone, Debug)]
pub struct PipelineClient {
    endpoint: Url,
    pipeline: Pipeline,
    api_version: ApiVersion,
}

impl PipelineClient {
    pub fn new(
        config: ClientConfig,
        info: &'static ClientInfo,
        api_version: ApiVersion,
    ) -> azcore::client_builder::Result<Self> {
        let endpoint = Self::endpoint_from(&config)?;
        let pipeline = Pipeline::new(&config, info)?;
        Ok(Self {
            endpoint,
            pipeline,
            api_version,
        })
    }

    /// Creates a client with a custom transport.
    pub fn with_transport(
        config: ClientConfig,
        info: &'static ClientInfo,
        api_version: ApiVersion,
        transport: Arc<dyn HttpTransport>,
    ) -> azcore::client_builder::Result<Self> {
        let endpoint = Self::endpoint_from(&config)?;
        let pipeline = Pipeline::with_transport(&config, info, transport);
        Ok(Self {
            endpoint,
            pipeline,
            api_version,
        })
    }

    fn endpoint_from(config: &ClientConfig) -> azcore::client_builder::Result<Url> {
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or_else(|| BuilderError::config("the endpoint is required"))?;
        let url = Url::parse(endpoint).map_err(BuilderError::config)?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(BuilderError::config(format!(
                "the endpoint must be an http or https URL, got {endpoint}"
            )));
        }
        Ok(url)
    }

    /// The service endpoint, e.g. `https://myvault.vault.azure.net/`.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the endpoint with `path` appended. Any query in the endpoint,
    /// such as a SAS token, is preserved.
    pub fn url_for(&self, path: &str) -> Url {
        let mut url = self.endpoint.clone();
        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base}{path}"));
        url
    }

    /// Sends the request and returns the raw body.
    pub async fn send(&self, request: OperationRequest) -> Result<Response<Bytes>> {
        let raw = self.execute(request).await?;
        Ok(into_response(raw, |b| b))
    }

    /// Sends the request and ignores the body.
    pub async fn empty(&self, request: OperationRequest) -> Result<Response<()>> {
        let raw = self.execute(request).await?;
        Ok(into_response(raw, |_| ()))
    }

    /// Sends the request and decodes the JSON body.
    pub async fn json<O>(&self, request: OperationRequest) -> Result<Response<O>>
    where
        O: serde::de::DeserializeOwned,
    {
        let raw = self.execute(request).await?;
        decode_json(raw)
    }

    /// Sends the request and decodes the XML body.
    pub async fn xml<O>(&self, request: OperationRequest) -> Result<Response<O>>
    where
        O: serde::de::DeserializeOwned,
    {
        let raw = self.execute(request).await?;
        let body = crate::xml::from_slice::<O>(&raw.body)?;
        Ok(into_response(raw, |_| body))
    }

    /// Sends a request to an absolute URL and decodes the JSON body.
    ///
    /// Used to fetch the next page of a listing from a `nextLink`.
    pub async fn json_url<O>(
        &self,
        operation: &'static Operation,
        url: &str,
        options: RequestOptions,
    ) -> Result<Response<O>>
    where
        O: serde::de::DeserializeOwned,
    {
        let raw = self.send_url(operation, url, options).await?;
        decode_json(raw)
    }

    /// Sends a body-less request to an absolute URL.
    pub async fn send_url(
        &self,
        operation: &'static Operation,
        url: &str,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        let mut url = Url::parse(url).map_err(Error::binding)?;
        if let ApiVersion::Query(version) = self.api_version {
            if !url.query_pairs().any(|(k, _)| k == "api-version") {
                url.query_pairs_mut().append_pair("api-version", version);
            }
        }
        let options =
            azcore::options::internal::set_default_idempotency(options, operation.idempotent);
        let mut request = Request::new(operation.method.clone(), url);
        self.common_headers(&mut request, operation.format);
        let ctx = Context::new(operation.name, operation.expected, options);
        self.pipeline.send(&ctx, &mut request).await
    }

    async fn execute(&self, request: OperationRequest) -> Result<RawResponse> {
        let (ctx, mut raw) = self.prepare(request)?;
        self.pipeline.send(&ctx, &mut raw).await
    }

    fn prepare(&self, request: OperationRequest) -> Result<(Context, Request)> {
        let operation = request.operation();
        let mut url = self.url_for(&request.path()?);

        let mut extra = Vec::new();
        match self.api_version {
            ApiVersion::Query(v) => extra.push(("api-version", v.to_string())),
            ApiVersion::Header(_) => {
                if let Some(timeout) = request.options().server_timeout() {
                    extra.push(("timeout", timeout.as_secs().to_string()));
                }
            }
        }
        let query = request.query_string(&extra);
        let query = match self.endpoint.query().filter(|q| !q.is_empty()) {
            Some(existing) if query.is_empty() => existing.to_string(),
            Some(existing) => format!("{existing}&{query}"),
            None => query,
        };
        url.set_query((!query.is_empty()).then_some(query.as_str()));

        let mut raw = Request::new(operation.method.clone(), url);
        self.common_headers(&mut raw, operation.format);
        if let Some(content_type) = request.content_type {
            raw.headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(Error::binding)?;
            let value = HeaderValue::from_str(value).map_err(Error::binding)?;
            raw.headers.insert(name, value);
        }
        raw.body = request.body;
        let ctx = Context::new(operation.name, operation.expected, request.options);
        Ok((ctx, raw))
    }

    fn common_headers(&self, request: &mut Request, format: Format) {
        if let ApiVersion::Header(v) = self.api_version {
            request
                .headers
                .insert(crate::headers::VERSION, HeaderValue::from_static(v));
        }
        if let Some(accept) = format.accept() {
            request
                .headers
                .insert(ACCEPT, HeaderValue::from_static(accept));
        }
    }
}

fn into_response<T, F>(raw: RawResponse, body: F) -> Response<T>
where
    F: FnOnce(Bytes) -> T,
{
    let parts = Parts::new().set_status(raw.status).set_headers(raw.headers);
    Response::from_parts(parts, body(raw.body))
}

fn decode_json<O: serde::de::DeserializeOwned>(raw: RawResponse) -> Result<Response<O>> {
    let body = serde_json::from_slice::<O>(&raw.body).map_err(Error::deser)?;
    Ok(into_response(raw, |_| body))
}
