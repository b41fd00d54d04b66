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
use crate::headers::CLIENT_REQUEST_ID;
use azcore::Result;
use azcore::error::Error;
use http::HeaderValue;
use std::sync::Arc;

/// Sets the `x-ms-client-request-id` header.
///
/// Uses the value in the request options, or a new UUID. An existing header
/// is preserved.
#[derive(Debug)]
pub struct RequestIdPolicy;

#[async_trait::async_trait]
impl Policy for RequestIdPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        if !request.headers.contains_key(CLIENT_REQUEST_ID) {
            let id = ctx
                .options
                .client_request_id()
                .map(str::to_string)
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let value = HeaderValue::from_str(&id).map_err(Error::binding)?;
            request.headers.insert(CLIENT_REQUEST_ID, value);
        }
        send_next(ctx, request, next).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::*;
    use super::*;

    #[derive(Debug)]
    struct Echo;

    #[async_trait::async_trait]
    impl Policy for Echo {
        async fn send(
            &self,
            _ctx: &Context,
            request: &mut Request,
            _next: &[Arc<dyn Policy>],
        ) -> Result<RawResponse> {
            let mut response = response(200)?;
            if let Some(v) = request.headers.get(CLIENT_REQUEST_ID) {
                response.headers.insert(CLIENT_REQUEST_ID, v.clone());
            }
            Ok(response)
        }
    }

    async fn sent_id(ctx: &Context, request: &mut Request) -> anyhow::Result<String> {
        let next: Vec<Arc<dyn Policy>> = vec![Arc::new(Echo)];
        let response = RequestIdPolicy.send(ctx, request, &next).await?;
        let id = crate::headers::get_string(&response.headers, CLIENT_REQUEST_ID);
        id.ok_or_else(|| anyhow::anyhow!("missing request id"))
    }

    #[tokio::test]
    async fn generated() -> anyhow::Result<()> {
        let first = sent_id(&test_context(), &mut test_request()).await?;
        let second = sent_id(&test_context(), &mut test_request()).await?;
        assert_ne!(first, second);
        assert!(uuid::Uuid::parse_str(&first).is_ok(), "{first}");
        Ok(())
    }

    #[tokio::test]
    async fn from_options() -> anyhow::Result<()> {
        let mut ctx = test_context();
        ctx.options.set_client_request_id("my-request-id");
        let got = sent_id(&ctx, &mut test_request()).await?;
        assert_eq!(got, "my-request-id");
        Ok(())
    }

    #[tokio::test]
    async fn preserved() -> anyhow::Result<()> {
        let mut request = test_request();
        request
            .headers
            .insert(CLIENT_REQUEST_ID, HeaderValue::from_static("existing"));
        let got = sent_id(&test_context(), &mut request).await?;
        assert_eq!(got, "existing");
        Ok(())
    }
}
