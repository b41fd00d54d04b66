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

//! Credentials backed by a fixed access token.
//!
//! Use these credentials when the application obtains access tokens through
//! some other mechanism, for example, from the Azure CLI, or in tests.
//!
//! # Example
//! ```
//! # use azure_sdk_auth::credentials::static_token::Builder;
//! # use std::time::Duration;
//! let credentials = Builder::new("my-access-token")
//!     .with_expires_in(Duration::from_secs(3600))
//!     .build();
//! ```

use super::Credentials;
use crate::Result;
use crate::token::{AccessToken, TokenCredential};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// A builder for credentials returning a fixed access token.
#[derive(Debug)]
pub struct Builder {
    token: String,
    expires_in: Option<Duration>,
}

impl Builder {
    /// Creates a new builder using `token` as the access token.
    pub fn new<T: Into<String>>(token: T) -> Self {
        Self {
            token: token.into(),
            expires_in: None,
        }
    }

    /// Sets how long the token remains valid, starting from [build][Builder::build].
    ///
    /// Without this setting the token never expires.
    pub fn with_expires_in(mut self, v: Duration) -> Self {
        self.expires_in = Some(v);
        self
    }

    /// Returns a [Credentials] instance.
    pub fn build(self) -> Credentials {
        Credentials::Token(Arc::new(self.build_credential()))
    }

    fn build_credential(self) -> StaticTokenCredential {
        let expires_on = self.expires_in.map(|d| Instant::now() + d);
        StaticTokenCredential {
            token: AccessToken {
                token: self.token,
                expires_on,
            },
        }
    }
}

#[derive(Debug)]
struct StaticTokenCredential {
    token: AccessToken,
}

#[async_trait::async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(&self, _scopes: &[String]) -> Result<AccessToken> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_token() -> anyhow::Result<()> {
        let creds = Builder::new("test-only-token").build_credential();
        let token = creds.get_token(&[]).await?;
        assert_eq!(token.token, "test-only-token");
        assert_eq!(token.expires_on, None);

        let again = creds.get_token(&["scope".to_string()]).await?;
        assert_eq!(again, token);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn expiration() -> anyhow::Result<()> {
        let now = Instant::now();
        let creds = Builder::new("test-only-token")
            .with_expires_in(Duration::from_secs(60))
            .build_credential();
        let token = creds.get_token(&[]).await?;
        assert_eq!(token.expires_on, Some(now + Duration::from_secs(60)));
        Ok(())
    }

    #[test]
    fn build() {
        let creds = Builder::new("test-only-token").build();
        assert!(matches!(creds, Credentials::Token(_)), "{creds:?}");
        let fmt = format!("{creds:?}");
        assert!(!fmt.contains("test-only-token"), "{fmt}");
    }
}
