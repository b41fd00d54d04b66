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
use crate::options::{ClientConfig, ClientInfo};
use azcore::Result;
use azcore::error::Error;
use http::HeaderValue;
use http::header::USER_AGENT;
use std::sync::Arc;

/// Sets the `User-Agent` header.
///
/// The header contains the telemetry prefix from the request options, the
/// telemetry prefix from the client configuration, the client library
/// identifier, and the platform. Repeated components are removed.
#[derive(Debug)]
pub struct UserAgentPolicy {
    client_prefix: Option<String>,
    library: String,
    platform: String,
}

impl UserAgentPolicy {
    pub fn new(config: &ClientConfig, info: &'static ClientInfo) -> Self {
        Self {
            client_prefix: config.user_agent_prefix.clone(),
            library: format!("azsdk-rust-{}/{}", info.package_name, info.package_version),
            platform: format!(
                "({}; {})",
                crate::build_info::RUSTC_VERSION,
                std::env::consts::OS
            ),
        }
    }

    fn header_value(&self, request_prefix: Option<&str>) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let candidates = [
            request_prefix,
            self.client_prefix.as_deref(),
            Some(self.library.as_str()),
            Some(self.platform.as_str()),
        ];
        for part in candidates.into_iter().flatten() {
            let part = part.trim();
            if !part.is_empty() && !parts.contains(&part) {
                parts.push(part);
            }
        }
        parts.join(" ")
    }
}

#[async_trait::async_trait]
impl Policy for UserAgentPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        let value = self.header_value(ctx.options.user_agent().as_deref());
        let value = HeaderValue::from_str(&value).map_err(Error::binding)?;
        request.headers.insert(USER_AGENT, value);
        send_next(ctx, request, next).await
    }
}
