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

use super::{Context, Policy, RawResponse, Request, send_next};
use crate::options::ClientConfig;
use azcore::Result;
use azcore::backoff_policy::BackoffPolicy;
use azcore::retry_loop_internal::retry_loop_with_callback;
use azcore::retry_policy::{RetryPolicy, RetryPolicyExt, SystemErrors};
use std::sync::Arc;

// The initial attempt plus three retries.
const MAX_ATTEMPTS: u32 = 4;

/// Retries requests that failed without an HTTP response.
///
/// Connection errors and attempt timeouts are retried regardless of the
/// operation idempotency, using the client's backoff policy.
#[derive(Debug)]
pub struct SystemErrorRetryPolicy {
    retry_policy: Arc<dyn RetryPolicy>,
    backoff_policy: Arc<dyn BackoffPolicy>,
}

impl SystemErrorRetryPolicy {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            retry_policy: Arc::new(SystemErrors.with_attempt_limit(MAX_ATTEMPTS)),
            backoff_policy: config
                .backoff_policy
                .clone()
                .unwrap_or_else(super::exponential_retry::default_backoff),
        }
    }
}

#[async_trait::async_trait]
impl Policy for SystemErrorRetryPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        let backoff = ctx
            .options
            .backoff_policy()
            .clone()
            .unwrap_or_else(|| self.backoff_policy.clone());
        let operation = ctx.operation;
        let inner = {
            let ctx = ctx.clone();
            let original = request.clone();
            let next = next.to_vec();
            move |_| {
                let ctx = ctx.clone();
                let next = next.clone();
                let mut attempt = original.clone();
                async move { send_next(&ctx, &mut attempt, &next).await }
            }
        };
        retry_loop_with_callback(
            inner,
            tokio::time::sleep,
            true,
            self.retry_policy.clone(),
            backoff,
            move |count, error, delay| {
                tracing::debug!(
                    operation,
                    attempt = count,
                    "system error {error}, retrying in {delay:?}"
                )
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::*;
    use super::*;
    use azcore::error::Error;
    use azcore::exponential_backoff::ExponentialBackoffBuilder;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug)]
    struct Script(Mutex<Vec<Result<RawResponse>>>);

    #[async_trait::async_trait]
    impl Policy for Script {
        async fn send(
            &self,
            _ctx: &Context,
            _request: &mut Request,
            _next: &[Arc<dyn Policy>],
        ) -> Result<RawResponse> {
            self.0
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(Error::other("no more responses")))
        }
    }

    fn policy() -> SystemErrorRetryPolicy {
        let mut config = ClientConfig::default();
        config.backoff_policy = Some(Arc::new(
            ExponentialBackoffBuilder::new()
                .with_initial_delay(Duration::from_millis(1))
                .with_maximum_delay(Duration::from_millis(1))
                .clamp(),
        ));
        SystemErrorRetryPolicy::new(&config)
    }

    async fn run(mut script: Vec<Result<RawResponse>>) -> Result<RawResponse> {
        script.reverse();
        let next: Vec<Arc<dyn Policy>> = vec![Arc::new(Script(Mutex::new(script)))];
        let mut ctx = test_context();
        // Not idempotent, system errors are retried anyway.
        ctx.options.set_idempotency(false);
        policy().send(&ctx, &mut test_request(), &next).await
    }

    #[tokio::test]
    async fn recovers() -> anyhow::Result<()> {
        let response = run(vec![
            Err(Error::io("connection reset")),
            Err(Error::timeout("attempt timeout")),
            response(200),
        ])
        .await?;
        assert_eq!(response.status.as_u16(), 200);
        Ok(())
    }

    #[tokio::test]
    async fn gives_up() {
        let err = run(vec![
            Err(Error::io("e1")),
            Err(Error::io("e2")),
            Err(Error::io("e3")),
            Err(Error::io("e4")),
            response(200),
        ])
        .await
        .unwrap_err();
        assert!(err.is_io(), "{err:?}");
    }

    #[tokio::test]
    async fn responses_pass_through() -> anyhow::Result<()> {
        let got = run(vec![response(503), response(200)]).await?;
        assert_eq!(got.status.as_u16(), 503);
        let err = run(vec![
            Err(Error::http(500, Default::default(), Default::default())),
            response(200),
        ])
        .await
        .unwrap_err();
        assert_eq!(err.http_status_code(), Some(500));
        Ok(())
    }
}
