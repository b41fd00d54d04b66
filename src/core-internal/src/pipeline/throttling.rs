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
use azcore::Result;
use http::HeaderMap;
use std::sync::Arc;
use std::time::Duration;

const MAX_THROTTLING_RETRIES: u32 = 3;

/// Retries throttled requests after the delay requested by the service.
///
/// Only `429` and `503` responses with a `Retry-After`, `retry-after-ms` or
/// `x-ms-retry-after-ms` header are retried.
#[derive(Debug)]
pub struct ThrottlingRetryPolicy {
    max_retries: u32,
}

impl Default for ThrottlingRetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_THROTTLING_RETRIES,
        }
    }
}

fn throttle_delay(status: u16, headers: &HeaderMap) -> Option<Duration> {
    if status != 429 && status != 503 {
        return None;
    }
    crate::headers::retry_after(headers, chrono::Utc::now())
}

#[async_trait::async_trait]
impl Policy for ThrottlingRetryPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        let mut retries = 0;
        loop {
            let mut attempt = request.clone();
            let result = send_next(ctx, &mut attempt, next).await;
            let delay = match &result {
                Ok(r) => throttle_delay(r.status.as_u16(), &r.headers),
                Err(e) => e
                    .http_status_code()
                    .zip(e.http_headers())
                    .and_then(|(code, headers)| throttle_delay(code, headers)),
            };
            let Some(delay) = delay else {
                return result;
            };
            if retries >= self.max_retries {
                return result;
            }
            retries += 1;
            tracing::debug!(
                operation = ctx.operation,
                retries,
                "request throttled, retrying in {delay:?}"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::*;
    use super::*;
    use azcore::error::Error;
    use http::HeaderValue;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Script(Mutex<Vec<Result<RawResponse>>>);

    impl Script {
        fn new(mut responses: Vec<Result<RawResponse>>) -> Self {
            responses.reverse();
            Self(Mutex::new(responses))
        }
    }

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

    fn throttled(status: u16, header: &'static str, value: &'static str) -> Result<RawResponse> {
        let mut r = response(status)?;
        r.headers.insert(header, HeaderValue::from_static(value));
        Ok(r)
    }

    async fn run(script: Script) -> Result<RawResponse> {
        let next: Vec<Arc<dyn Policy>> = vec![Arc::new(script)];
        ThrottlingRetryPolicy::default()
            .send(&test_context(), &mut test_request(), &next)
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_seconds() -> anyhow::Result<()> {
        let start = tokio::time::Instant::now();
        let script = Script::new(vec![throttled(429, "retry-after", "2"), response(200)]);
        let got = run(script).await?;
        assert_eq!(got.status.as_u16(), 200);
        assert!(start.elapsed() >= Duration::from_secs(2), "{:?}", start.elapsed());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_ms() -> anyhow::Result<()> {
        let start = tokio::time::Instant::now();
        let script = Script::new(vec![
            throttled(503, "x-ms-retry-after-ms", "100"),
            throttled(429, "retry-after-ms", "50"),
            response(200),
        ]);
        let got = run(script).await?;
        assert_eq!(got.status.as_u16(), 200);
        assert!(start.elapsed() >= Duration::from_millis(150), "{:?}", start.elapsed());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn throttled_http_error() -> anyhow::Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("1"));
        let script = Script::new(vec![
            Err(Error::http(503, headers, bytes::Bytes::new())),
            response(200),
        ]);
        let got = run(script).await?;
        assert_eq!(got.status.as_u16(), 200);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn too_many_throttles() -> anyhow::Result<()> {
        let script = Script::new(vec![
            throttled(429, "retry-after", "1"),
            throttled(429, "retry-after", "1"),
            throttled(429, "retry-after", "1"),
            throttled(429, "retry-after", "1"),
            response(200),
        ]);
        let got = run(script).await?;
        assert_eq!(got.status.as_u16(), 429);
        Ok(())
    }

    #[tokio::test]
    async fn no_retry_without_header() -> anyhow::Result<()> {
        let script = Script::new(vec![response(429), response(200)]);
        let got = run(script).await?;
        assert_eq!(got.status.as_u16(), 429);

        let script = Script::new(vec![throttled(500, "retry-after", "1"), response(200)]);
        let got = run(script).await?;
        assert_eq!(got.status.as_u16(), 500);
        Ok(())
    }
}
