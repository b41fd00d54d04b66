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

use crate::Result;
use crate::token::{AccessToken, TokenCredential};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
// Using tokio's wrapper makes the cache testable without relying on clock times.
use tokio::time::Instant;

/// Tokens are refreshed when they expire within this margin.
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(120);

/// A [TokenCredential] caching the tokens returned by another credential.
///
/// The cached token is reused until it is about to expire, or until a token
/// for different scopes is requested. Concurrent callers wait for a single
/// refresh. Errors are not cached, the next call retries the refresh.
#[derive(Debug)]
pub struct TokenCache {
    inner: Arc<dyn TokenCredential>,
    refresh_margin: Duration,
    cached: Mutex<Option<Entry>>,
}

#[derive(Debug)]
struct Entry {
    scopes: Vec<String>,
    token: AccessToken,
}

impl TokenCache {
    /// Creates a cache using the default refresh margin of two minutes.
    pub fn new(inner: Arc<dyn TokenCredential>) -> Self {
        Self::with_refresh_margin(inner, DEFAULT_REFRESH_MARGIN)
    }

    /// Creates a cache refreshing tokens that expire within `refresh_margin`.
    pub fn with_refresh_margin(inner: Arc<dyn TokenCredential>, refresh_margin: Duration) -> Self {
        Self {
            inner,
            refresh_margin,
            cached: Mutex::new(None),
        }
    }

    fn needs_refresh(&self, token: &AccessToken) -> bool {
        token
            .expires_on
            .is_some_and(|e| e <= Instant::now() + self.refresh_margin)
    }
}

#[async_trait::async_trait]
impl TokenCredential for TokenCache {
    async fn get_token(&self, scopes: &[String]) -> Result<AccessToken> {
        let mut guard = self.cached.lock().await;
        if let Some(entry) = guard.as_ref() {
            if entry.scopes.as_slice() == scopes && !self.needs_refresh(&entry.token) {
                return Ok(entry.token.clone());
            }
        }
        tracing::debug!(?scopes, "refreshing access token");
        let token = self.inner.get_token(scopes).await?;
        *guard = Some(Entry {
            scopes: scopes.to_vec(),
            token: token.clone(),
        });
        Ok(token)
    }
}
