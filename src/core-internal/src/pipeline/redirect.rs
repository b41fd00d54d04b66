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
use bytes::Bytes;
use http::Method;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use std::sync::Arc;

const DEFAULT_MAX_REDIRECTS: u32 = 1;
const REDIRECT_CODES: [u16; 6] = [300, 301, 302, 303, 307, 308];

/// Follows redirects.
///
/// The policy sits before the authentication policy, so each redirected
/// request is signed for its new URL. A `303 See Other` response changes the
/// request into a `GET` without a body.
#[derive(Debug)]
pub struct RedirectPolicy {
    max_redirects: u32,
}

impl RedirectPolicy {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            max_redirects: config.max_redirects.unwrap_or(DEFAULT_MAX_REDIRECTS),
        }
    }
}

#[async_trait::async_trait]
impl Policy for RedirectPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        let mut current = request.clone();
        let mut redirects = 0;
        loop {
            let mut attempt = current.clone();
            let response = send_next(ctx, &mut attempt, next).await?;
            if redirects >= self.max_redirects
                || !REDIRECT_CODES.contains(&response.status.as_u16())
            {
                return Ok(response);
            }
            let Some(location) = crate::headers::get_str(&response.headers, LOCATION.as_str())
            else {
                return Ok(response);
            };
            let Ok(url) = current.url.join(location) else {
                tracing::warn!(
                    operation = ctx.operation,
                    "cannot parse redirect location {location}"
                );
                return Ok(response);
            };
            redirects += 1;
            tracing::debug!(operation = ctx.operation, "redirected to {url}");
            current.url = url;
            if response.status.as_u16() == 303 {
                current.method = Method::GET;
                current.body = Bytes::new();
                current.headers.remove(CONTENT_LENGTH);
                current.headers.remove(CONTENT_TYPE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::*;
    use super::*;
    use http::HeaderValue;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Script {
        responses: Mutex<Vec<RawResponse>>,
        requests: Mutex<Vec<(Method, String, usize)>>,
    }

    #[async_trait::async_trait]
    impl Policy for Script {
        async fn send(
            &self,
            _ctx: &Context,
            request: &mut Request,
            _next: &[Arc<dyn Policy>],
        ) -> Result<RawResponse> {
            self.requests.lock().unwrap().push((
                request.method.clone(),
                request.url.to_string(),
                request.body.len(),
            ));
            let scripted = self.responses.lock().unwrap().pop();
            match scripted {
                Some(r) => Ok(r),
                None => response(200),
            }
        }
    }

    fn redirect(status: u16, location: &'static str) -> RawResponse {
        let mut r = response(status).unwrap();
        r.headers.insert(LOCATION, HeaderValue::from_static(location));
        r
    }

    async fn run(
        max: Option<u32>,
        mut responses: Vec<RawResponse>,
        method: Method,
    ) -> anyhow::Result<(RawResponse, Vec<(Method, String, usize)>)> {
        responses.reverse();
        let script = Arc::new(Script {
            responses: Mutex::new(responses),
            ..Default::default()
        });
        let next: Vec<Arc<dyn Policy>> = vec![script.clone()];
        let mut config = ClientConfig::default();
        config.max_redirects = max;
        let mut request = test_request();
        request.method = method;
        request.body = Bytes::from_static(b"payload");
        let response = RedirectPolicy::new(&config)
            .send(&test_context(), &mut request, &next)
            .await?;
        let requests = script.requests.lock().unwrap().clone();
        Ok((response, requests))
    }

    #[tokio::test]
    async fn follows_once_by_default() -> anyhow::Result<()> {
        let (response, requests) = run(
            None,
            vec![
                redirect(307, "https://other.queue.core.windows.net/q1"),
                redirect(307, "https://third.queue.core.windows.net/q1"),
            ],
            Method::PUT,
        )
        .await?;
        assert_eq!(response.status.as_u16(), 307);
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1],
            (
                Method::PUT,
                "https://other.queue.core.windows.net/q1".to_string(),
                7
            )
        );
        Ok(())
    }

    #[tokio::test]
    async fn configurable_limit() -> anyhow::Result<()> {
        let (response, requests) = run(
            Some(3),
            vec![redirect(301, "/a"), redirect(302, "/b"), redirect(308, "/c")],
            Method::GET,
        )
        .await?;
        assert_eq!(response.status.as_u16(), 200);
        let urls = requests.iter().map(|r| r.1.as_str()).collect::<Vec<_>>();
        assert_eq!(
            urls,
            vec![
                "https://account.queue.core.windows.net/q1?comp=metadata",
                "https://account.queue.core.windows.net/a",
                "https://account.queue.core.windows.net/b",
                "https://account.queue.core.windows.net/c",
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn see_other() -> anyhow::Result<()> {
        let (_, requests) = run(None, vec![redirect(303, "/status")], Method::POST).await?;
        assert_eq!(requests[0].0, Method::POST);
        assert_eq!(
            requests[1],
            (
                Method::GET,
                "https://account.queue.core.windows.net/status".to_string(),
                0
            )
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_location() -> anyhow::Result<()> {
        let (response, requests) = run(None, vec![response(302)?], Method::GET).await?;
        assert_eq!(response.status.as_u16(), 302);
        assert_eq!(requests.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn disabled() -> anyhow::Result<()> {
        let (response, requests) = run(Some(0), vec![redirect(301, "/a")], Method::GET).await?;
        assert_eq!(response.status.as_u16(), 301);
        assert_eq!(requests.len(), 1);
        Ok(())
    }
}
