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

//! The request pipeline.
//!
//! Every request flows through an ordered chain of [Policy] objects. Each
//! policy receives the request and the remainder of the chain. It may modify
//! the request, send it to the next policy (possibly multiple times), and
//! inspect or transform the response. The last policy sends the request using
//! an [HttpTransport].

use crate::options::{ClientConfig, ClientInfo};
use azcore::Result;
use azcore::error::Error;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

mod authentication;
mod deserialize;
mod exponential_retry;
mod redirect;
mod request_id;
mod system_retry;
mod throttling;
mod trace;
mod transport;
mod user_agent;

pub use authentication::{BearerTokenPolicy, SasPolicy, SharedKeyPolicy};
pub use deserialize::{DeserializationPolicy, service_error};
pub use exponential_retry::ExponentialRetryPolicy;
pub use redirect::RedirectPolicy;
pub use request_id::RequestIdPolicy;
pub use system_retry::SystemErrorRetryPolicy;
pub use throttling::ThrottlingRetryPolicy;
pub use trace::TracingPolicy;
pub use transport::{HttpTransport, ReqwestTransport, TransportPolicy};
pub use user_agent::UserAgentPolicy;

/// An HTTP request, as seen by the policies.
#[derive(Clone, Debug)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// The timeout for a single attempt, set by the retry policies.
    pub timeout: Option<Duration>,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            timeout: None,
        }
    }
}

/// An HTTP response with the full body.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}

/// Per-request information shared by all the policies.
#[derive(Clone, Debug)]
pub struct Context {
    /// The operation name, e.g. `ShareClient::create`.
    pub operation: &'static str,
    /// The status codes indicating success, any 2xx code if empty.
    pub expected: &'static [u16],
    pub options: azcore::options::RequestOptions,
}

impl Context {
    pub fn new(
        operation: &'static str,
        expected: &'static [u16],
        options: azcore::options::RequestOptions,
    ) -> Self {
        Self {
            operation,
            expected,
            options,
        }
    }
}

/// A stage in the request pipeline.
#[async_trait::async_trait]
pub trait Policy: Send + Sync + std::fmt::Debug {
    /// Processes `request`, `next` contains the remaining policies.
    ///
    /// Implementations call [send_next] to forward the request.
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse>;
}

/// Forwards the request to the first policy in `next`.
pub async fn send_next(
    ctx: &Context,
    request: &mut Request,
    next: &[Arc<dyn Policy>],
) -> Result<RawResponse> {
    match next.split_first() {
        Some((policy, rest)) => policy.send(ctx, request, rest).await,
        None => Err(Error::other("the request pipeline has no transport")),
    }
}

/// The ordered policies used by a client.
#[derive(Clone, Debug)]
pub struct Pipeline {
    policies: Arc<[Arc<dyn Policy>]>,
}

impl Pipeline {
    /// Creates the pipeline, using `reqwest` as the transport.
    pub fn new(
        config: &ClientConfig,
        info: &'static ClientInfo,
    ) -> azcore::client_builder::Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(config, info, Arc::new(transport)))
    }

    /// Creates the pipeline with a custom transport.
    pub fn with_transport(
        config: &ClientConfig,
        info: &'static ClientInfo,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let mut policies: Vec<Arc<dyn Policy>> = Vec::new();
        if crate::options::tracing_enabled(config) {
            policies.push(Arc::new(TracingPolicy::new(info)));
        }
        policies.push(Arc::new(UserAgentPolicy::new(config, info)));
        policies.push(Arc::new(RequestIdPolicy));
        policies.push(Arc::new(DeserializationPolicy));
        policies.push(Arc::new(ThrottlingRetryPolicy::default()));
        policies.push(Arc::new(SystemErrorRetryPolicy::new(config)));
        policies.push(Arc::new(ExponentialRetryPolicy::new(config)));
        policies.push(Arc::new(RedirectPolicy::new(config)));
        if let Some(policy) = authentication::from_config(config, info) {
            policies.push(policy);
        }
        policies.push(Arc::new(TransportPolicy::new(transport)));
        Self {
            policies: policies.into(),
        }
    }

    /// Sends the request through all the policies.
    pub async fn send(&self, ctx: &Context, request: &mut Request) -> Result<RawResponse> {
        send_next(ctx, request, &self.policies).await
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.policies.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use auth::credentials::Credentials;
    use auth::credentials::SharedKeyCredential;

    mockall::mock! {
        #[derive(Debug)]
        pub Transport {}
        #[async_trait::async_trait]
        impl HttpTransport for Transport {
            async fn send(&self, request: Request) -> Result<RawResponse>;
        }
    }

    pub(crate) static TEST_INFO: ClientInfo = ClientInfo {
        service_name: "test",
        package_name: "azure-test-client",
        package_version: "1.2.3",
        token_scope: Some("https://test.azure.net/.default"),
    };

    pub(crate) fn test_context() -> Context {
        Context::new("Test::op", &[200], azcore::options::RequestOptions::default())
    }

    pub(crate) fn test_request() -> Request {
        Request::new(
            Method::GET,
            Url::parse("https://account.queue.core.windows.net/q1?comp=metadata")
                .expect("hard-coded URLs are valid"),
        )
    }

    pub(crate) fn response(status: u16) -> Result<RawResponse> {
        let status = StatusCode::from_u16(status).map_err(Error::other)?;
        Ok(RawResponse::new(status))
    }

    #[tokio::test]
    async fn empty_chain() {
        let mut request = test_request();
        let err = send_next(&test_context(), &mut request, &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no transport"), "{err}");
    }

    #[tokio::test]
    async fn pipeline_sends_to_transport() -> anyhow::Result<()> {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .once()
            .withf(|r| {
                r.headers.contains_key(http::header::USER_AGENT)
                    && r.headers.contains_key(crate::headers::CLIENT_REQUEST_ID)
            })
            .returning(|_| response(200));
        let config = ClientConfig::default();
        let pipeline = Pipeline::with_transport(&config, &TEST_INFO, Arc::new(transport));
        let response = pipeline
            .send(&test_context(), &mut test_request())
            .await?;
        assert_eq!(response.status, StatusCode::OK);
        Ok(())
    }

    #[derive(Debug, Default)]
    struct ConnectionReset(std::sync::atomic::AtomicUsize);

    #[async_trait::async_trait]
    impl HttpTransport for ConnectionReset {
        async fn send(&self, _request: Request) -> Result<RawResponse> {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Err(Error::io("connection reset by peer"))
        }
    }

    #[test_case::test_case(true; "idempotent")]
    #[test_case::test_case(false; "not idempotent")]
    #[tokio::test]
    async fn io_errors_retried_once_per_attempt(idempotent: bool) {
        let transport = Arc::new(ConnectionReset::default());
        let mut config = ClientConfig::default();
        config.backoff_policy = Some(Arc::new(
            azcore::exponential_backoff::ExponentialBackoffBuilder::new()
                .with_initial_delay(Duration::from_millis(1))
                .with_maximum_delay(Duration::from_millis(1))
                .clamp(),
        ));
        let pipeline = Pipeline::with_transport(&config, &TEST_INFO, transport.clone());
        let mut ctx = test_context();
        ctx.options.set_idempotency(idempotent);
        let err = pipeline
            .send(&ctx, &mut test_request())
            .await
            .unwrap_err();
        assert!(err.is_io(), "{err:?}");
        // The initial attempt plus three retries.
        assert_eq!(transport.0.load(std::sync::atomic::Ordering::SeqCst), 4);
    }

    #[test]
    #[serial_test::serial]
    fn policy_count() -> anyhow::Result<()> {
        let _e = scoped_env::ScopedEnv::remove(crate::options::LOGGING_VAR);
        let transport = Arc::new(MockTransport::new());
        let mut config = ClientConfig::default();
        let pipeline = Pipeline::with_transport(&config, &TEST_INFO, transport.clone());
        assert_eq!(pipeline.len(), 8, "{pipeline:?}");

        config.tracing = true;
        config.cred = Some(Credentials::from(SharedKeyCredential::new(
            "devstoreaccount1",
            auth::connection_string::DEVELOPMENT_ACCOUNT_KEY,
        )?));
        let pipeline = Pipeline::with_transport(&config, &TEST_INFO, transport);
        assert_eq!(pipeline.len(), 10, "{pipeline:?}");
        Ok(())
    }
}
