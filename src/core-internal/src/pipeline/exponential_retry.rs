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
use azcore::error::Error;
use azcore::exponential_backoff::ExponentialBackoffBuilder;
use azcore::retry_loop_internal::{effective_timeout, retry_loop_with_callback};
use azcore::retry_policy::{RetryPolicy, RetryPolicyExt, RetryableErrors};
use azcore::retry_result::RetryResult;
use std::sync::Arc;
use std::time::Duration;

// The initial attempt plus three retries.
const MAX_ATTEMPTS: u32 = 4;
const INITIAL_DELAY: Duration = Duration::from_secs(3);
const MAXIMUM_DELAY: Duration = Duration::from_secs(90);

pub(crate) fn default_backoff() -> Arc<dyn BackoffPolicy> {
    Arc::new(
        ExponentialBackoffBuilder::new()
            .with_initial_delay(INITIAL_DELAY)
            .with_maximum_delay(MAXIMUM_DELAY)
            .clamp(),
    )
}

/// Retries requests that returned a transient HTTP status.
///
/// Responses with status `408` or any `5xx` (except `501` and `505`) are
/// turned into errors and offered to the retry policy. The retry and backoff
/// policies come from the request options, then the client configuration,
/// and otherwise default to [RetryableErrors] limited to three retries with
/// exponential backoff.
#[derive(Debug)]
pub struct ExponentialRetryPolicy {
    retry_policy: Arc<dyn RetryPolicy>,
    backoff_policy: Arc<dyn BackoffPolicy>,
}

impl ExponentialRetryPolicy {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            retry_policy: config
                .retry_policy
                .clone()
                .unwrap_or_else(|| Arc::new(RetryableErrors.with_attempt_limit(MAX_ATTEMPTS))),
            backoff_policy: config
                .backoff_policy
                .clone()
                .unwrap_or_else(default_backoff),
        }
    }
}

fn is_retryable_status(status: u16) -> bool {
    status == 408 || (status >= 500 && status != 501 && status != 505)
}

// Errors without an HTTP status belong to the system error policy, which
// wraps this one. Retrying them here multiplies the attempts.
#[derive(Debug)]
struct HttpErrorsOnly(Arc<dyn RetryPolicy>);

impl RetryPolicy for HttpErrorsOnly {
    fn on_error(
        &self,
        loop_start: std::time::Instant,
        attempt_count: u32,
        idempotent: bool,
        error: Error,
    ) -> RetryResult {
        if error.http_status_code().is_none() {
            return RetryResult::Permanent(error);
        }
        self.0.on_error(loop_start, attempt_count, idempotent, error)
    }

    fn remaining_time(
        &self,
        loop_start: std::time::Instant,
        attempt_count: u32,
    ) -> Option<Duration> {
        self.0.remaining_time(loop_start, attempt_count)
    }
}

#[async_trait::async_trait]
impl Policy for ExponentialRetryPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        let retry_policy = ctx
            .options
            .retry_policy()
            .clone()
            .unwrap_or_else(|| self.retry_policy.clone());
        let backoff_policy = ctx
            .options
            .backoff_policy()
            .clone()
            .unwrap_or_else(|| self.backoff_policy.clone());
        let idempotent = ctx.options.idempotent().unwrap_or(false);
        let operation = ctx.operation;
        let inner = {
            let ctx = ctx.clone();
            let original = request.clone();
            let next = next.to_vec();
            move |remaining_time| {
                let ctx = ctx.clone();
                let next = next.clone();
                let mut attempt = original.clone();
                async move {
                    attempt.timeout = effective_timeout(&ctx.options, remaining_time);
                    let response = send_next(&ctx, &mut attempt, &next).await?;
                    if is_retryable_status(response.status.as_u16()) {
                        return Err(Error::http(
                            response.status.as_u16(),
                            response.headers,
                            response.body,
                        ));
                    }
                    Ok(response)
                }
            }
        };
        retry_loop_with_callback(
            inner,
            tokio::time::sleep,
            idempotent,
            Arc::new(HttpErrorsOnly(retry_policy)),
            backoff_policy,
            move |count, error, delay| {
                tracing::debug!(
                    operation,
                    attempt = count,
                    "retryable error {error}, retrying in {delay:?}"
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
    use azcore::retry_policy::NeverRetry;
    use std::sync::Mutex;
    use test_case::test_case;

    #[derive(Debug, Default)]
    struct Script {
        responses: Mutex<Vec<Result<RawResponse>>>,
        timeouts: Mutex<Vec<Option<Duration>>>,
    }

    #[async_trait::async_trait]
    impl Policy for Script {
        async fn send(
            &self,
            _ctx: &Context,
            request: &mut Request,
            _next: &[Arc<dyn Policy>],
        ) -> Result<RawResponse> {
            self.timeouts.lock().unwrap().push(request.timeout);
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(Error::other("no more responses")))
        }
    }

    fn test_config() -> ClientConfig {
        let mut config = ClientConfig::default();
        config.backoff_policy = Some(Arc::new(
            ExponentialBackoffBuilder::new()
                .with_initial_delay(Duration::from_millis(1))
                .with_maximum_delay(Duration::from_millis(1))
                .clamp(),
        ));
        config
    }

    async fn run(
        ctx: Context,
        mut responses: Vec<Result<RawResponse>>,
    ) -> (Result<RawResponse>, Vec<Option<Duration>>) {
        responses.reverse();
        let script = Arc::new(Script {
            responses: Mutex::new(responses),
            ..Default::default()
        });
        let next: Vec<Arc<dyn Policy>> = vec![script.clone()];
        let result = ExponentialRetryPolicy::new(&test_config())
            .send(&ctx, &mut test_request(), &next)
            .await;
        let timeouts = script.timeouts.lock().unwrap().clone();
        (result, timeouts)
    }

    fn idempotent_context() -> Context {
        let mut ctx = test_context();
        ctx.options.set_idempotency(true);
        ctx
    }

    #[test_case(408, true)]
    #[test_case(500, true)]
    #[test_case(501, false)]
    #[test_case(503, true)]
    #[test_case(505, false)]
    #[test_case(429, false)]
    #[test_case(404, false)]
    fn retryable_status(status: u16, want: bool) {
        assert_eq!(is_retryable_status(status), want);
    }

    #[tokio::test]
    async fn recovers() -> anyhow::Result<()> {
        let (result, timeouts) = run(
            idempotent_context(),
            vec![response(503), response(500), response(200)],
        )
        .await;
        assert_eq!(result?.status.as_u16(), 200);
        assert_eq!(timeouts.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn exhausted() {
        let (result, timeouts) = run(
            idempotent_context(),
            vec![
                response(503),
                response(503),
                response(503),
                response(503),
                response(200),
            ],
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.http_status_code(), Some(503), "{err:?}");
        assert_eq!(timeouts.len(), 4);
    }

    #[tokio::test]
    async fn non_idempotent_not_retried() {
        let mut ctx = test_context();
        ctx.options.set_idempotency(false);
        let (result, timeouts) = run(ctx, vec![response(503), response(200)]).await;
        let err = result.unwrap_err();
        assert_eq!(err.http_status_code(), Some(503), "{err:?}");
        assert!(err.http_payload().is_some(), "{err:?}");
        assert_eq!(timeouts.len(), 1);
    }

    #[tokio::test]
    async fn permanent_status_passes_through() -> anyhow::Result<()> {
        let (result, timeouts) =
            run(idempotent_context(), vec![response(404), response(200)]).await;
        assert_eq!(result?.status.as_u16(), 404);
        assert_eq!(timeouts.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn errors_without_status_are_not_retried() {
        let (result, timeouts) = run(
            idempotent_context(),
            vec![Err(Error::io("connection reset")), response(200)],
        )
        .await;
        let err = result.unwrap_err();
        assert!(err.is_io(), "{err:?}");
        assert_eq!(timeouts.len(), 1);
    }

    #[tokio::test]
    async fn request_options_override() {
        let mut ctx = idempotent_context();
        ctx.options.set_retry_policy(NeverRetry);
        ctx.options.set_attempt_timeout(Duration::from_secs(7));
        let (result, timeouts) = run(ctx, vec![response(503), response(200)]).await;
        assert!(result.is_err(), "{result:?}");
        assert_eq!(timeouts, vec![Some(Duration::from_secs(7))]);
    }
}
