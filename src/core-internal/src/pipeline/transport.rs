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

use super::{Context, Policy, RawResponse, Request};
use crate::options::ClientConfig;
use azcore::Result;
use azcore::client_builder::Error as BuilderError;
use azcore::error::Error;
use std::sync::Arc;

/// Sends HTTP requests.
///
/// The client libraries use [ReqwestTransport]. Tests may replace it with a
/// mock.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: Request) -> Result<RawResponse>;
}

/// The last policy in the pipeline, sends the request using the transport.
#[derive(Debug)]
pub struct TransportPolicy {
    transport: Arc<dyn HttpTransport>,
}

impl TransportPolicy {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait::async_trait]
impl Policy for TransportPolicy {
    async fn send(
        &self,
        _ctx: &Context,
        request: &mut Request,
        _next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        self.transport.send(request.clone()).await
    }
}

const PROXY_VARS: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "HTTP_PROXY", "http_proxy"];

/// A [HttpTransport] based on [reqwest].
///
/// Redirects are handled by the pipeline, the client does not follow them.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> azcore::client_builder::Result<Self> {
        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        if let Some(proxy) = proxy_url(config) {
            let proxy = reqwest::Proxy::all(proxy).map_err(BuilderError::transport)?;
            builder = builder.proxy(proxy);
        }
        let inner = builder.build().map_err(BuilderError::transport)?;
        Ok(Self { inner })
    }

    fn map_send_error(err: reqwest::Error) -> Error {
        match err {
            e if e.is_timeout() => Error::timeout(e),
            e => Error::io(e),
        }
    }
}

// The client configuration takes precedence over the environment.
fn proxy_url(config: &ClientConfig) -> Option<String> {
    config.proxy.clone().or_else(|| {
        PROXY_VARS
            .iter()
            .find_map(|v| std::env::var(v).ok().filter(|p| !p.is_empty()))
    })
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<RawResponse> {
        let mut builder = self
            .inner
            .request(request.method, request.url)
            .headers(request.headers)
            .body(request.body);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        let response = builder.send().await.map_err(Self::map_send_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Self::map_send_error)?;
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
