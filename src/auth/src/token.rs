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
use tokio::time::Instant;

/// Represents an OAuth2 access token.
#[derive(Clone, PartialEq)]
pub struct AccessToken {
    /// The actual token string.
    ///
    /// This is the value used in the `Authorization: Bearer` header.
    pub token: String,

    /// The instant at which the token expires.
    ///
    /// If `None`, the token does not expire.
    pub expires_on: Option<Instant>,
}

impl AccessToken {
    /// Creates a token without an expiration time.
    pub fn new<T: Into<String>>(token: T) -> Self {
        Self {
            token: token.into(),
            expires_on: None,
        }
    }

    /// Sets the expiration time.
    pub fn with_expires_on(mut self, v: Instant) -> Self {
        self.expires_on = Some(v);
        self
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[censored]")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Implementations of this trait obtain access tokens for a set of scopes.
///
/// Key Vault requests a token for the scope advertised in the service's
/// authentication challenge, e.g. `https://vault.azure.net/.default`.
/// Acquiring tokens from Microsoft Entra ID is outside the scope of this
/// crate, applications provide their own implementation or use
/// [static_token][crate::credentials::static_token].
#[async_trait::async_trait]
pub trait TokenCredential: std::fmt::Debug + Send + Sync {
    /// Returns an access token valid for `scopes`.
    async fn get_token(&self, scopes: &[String]) -> Result<AccessToken>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::time::Duration;

    // Used by tests in other modules.
    mockall::mock! {
        #[derive(Debug)]
        pub TokenCredential { }

        #[async_trait::async_trait]
        impl TokenCredential for TokenCredential {
            async fn get_token(&self, scopes: &[String]) -> Result<AccessToken>;
        }
    }

    #[test]
    fn debug() {
        let expires_on = Instant::now() + Duration::from_secs(3600);
        let token = AccessToken::new("token-test-only").with_expires_on(expires_on);
        let got = format!("{token:?}");
        assert!(!got.contains("token-test-only"), "{got}");
        assert!(got.contains("token: \"[censored]\""), "{got}");
        assert!(
            got.contains(&format!("expires_on: Some({expires_on:?}")),
            "{got}"
        );
    }

    #[test]
    fn new() {
        let token = AccessToken::new("abc");
        assert_eq!(token.token, "abc");
        assert_eq!(token.expires_on, None);
    }
}
