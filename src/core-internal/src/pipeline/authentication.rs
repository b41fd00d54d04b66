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
use crate::options::{ClientConfig, ClientInfo, Credentials};
use auth::challenge::Challenge;
use auth::credentials::{SasCredential, SharedKeyCredential, TokenCredential};
use auth::token_cache::TokenCache;
use azcore::Result;
use azcore::error::Error;
use http::HeaderValue;
use http::header::{AUTHORIZATION, CONTENT_LENGTH, WWW_AUTHENTICATE};
use std::sync::{Arc, RwLock};

/// Returns the authentication policy for the configured credentials.
///
/// Anonymous (or missing) credentials need no policy.
pub(crate) fn from_config(
    config: &ClientConfig,
    info: &'static ClientInfo,
) -> Option<Arc<dyn Policy>> {
    match config.cred.as_ref()? {
        Credentials::Token(c) => Some(Arc::new(BearerTokenPolicy::new(c.clone(), info.token_scope))),
        Credentials::SharedKey(c) => Some(Arc::new(SharedKeyPolicy::new(c.clone()))),
        Credentials::Sas(c) => Some(Arc::new(SasPolicy::new(c.clone()))),
        Credentials::Anonymous => None,
    }
}

/// Adds `Authorization: Bearer` headers.
///
/// With a fixed scope every request carries a token. Without one, the policy
/// sends the first request unauthenticated and takes the scope from the
/// `WWW-Authenticate` challenge in the `401` response. The discovered scope is
/// reused by later requests. Tokens are cached and refreshed shortly before
/// they expire.
#[derive(Debug)]
pub struct BearerTokenPolicy {
    cache: TokenCache,
    challenge_based: bool,
    scope: RwLock<Option<String>>,
}

impl BearerTokenPolicy {
    pub fn new(credential: Arc<dyn TokenCredential>, scope: Option<&str>) -> Self {
        Self {
            cache: TokenCache::new(credential),
            challenge_based: scope.is_none(),
            scope: RwLock::new(scope.map(str::to_string)),
        }
    }

    fn scope(&self) -> Option<String> {
        self.scope.read().ok().and_then(|s| s.clone())
    }

    fn set_scope(&self, scope: String) {
        if let Ok(mut guard) = self.scope.write() {
            *guard = Some(scope);
        }
    }

    async fn authorize(&self, request: &mut Request, scope: String) -> Result<()> {
        let token = self
            .cache
            .get_token(&[scope])
            .await
            .map_err(Error::authentication)?;
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.token))
            .map_err(Error::binding)?;
        value.set_sensitive(true);
        request.headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    // Returns the scope in a `401` challenge, if it differs from `current`.
    fn challenge_scope(&self, response: &RawResponse, current: Option<&str>) -> Option<String> {
        if !self.challenge_based || response.status.as_u16() != 401 {
            return None;
        }
        let header = crate::headers::get_str(&response.headers, WWW_AUTHENTICATE.as_str())?;
        let scope = Challenge::parse(header)?.scope()?;
        if current == Some(scope.as_str()) {
            return None;
        }
        Some(scope)
    }
}

#[async_trait::async_trait]
impl Policy for BearerTokenPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        let current = self.scope();
        let mut attempt = request.clone();
        if let Some(scope) = current.clone() {
            self.authorize(&mut attempt, scope).await?;
        }
        let response = send_next(ctx, &mut attempt, next).await?;
        let Some(scope) = self.challenge_scope(&response, current.as_deref()) else {
            return Ok(response);
        };
        tracing::debug!(operation = ctx.operation, "authentication challenge for {scope}");
        self.set_scope(scope.clone());
        let mut attempt = request.clone();
        self.authorize(&mut attempt, scope).await?;
        send_next(ctx, &mut attempt, next).await
    }
}

/// Signs requests with the storage account key.
#[derive(Debug)]
pub struct SharedKeyPolicy {
    credential: SharedKeyCredential,
}

impl SharedKeyPolicy {
    pub fn new(credential: SharedKeyCredential) -> Self {
        Self { credential }
    }
}

#[async_trait::async_trait]
impl Policy for SharedKeyPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        // The signature covers Content-Length, it must match what is sent.
        if !request.body.is_empty() {
            request
                .headers
                .insert(CONTENT_LENGTH, HeaderValue::from(request.body.len()));
        }
        self.credential
            .sign(&request.method, &request.url, &mut request.headers)
            .map_err(Error::authentication)?;
        send_next(ctx, request, next).await
    }
}

/// Appends a shared access signature to the request URL.
#[derive(Debug)]
pub struct SasPolicy {
    credential: SasCredential,
}

impl SasPolicy {
    pub fn new(credential: SasCredential) -> Self {
        Self { credential }
    }
}

#[async_trait::async_trait]
impl Policy for SasPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        self.credential.sign(&mut request.url);
        send_next(ctx, request, next).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::*;
    use super::*;
    use auth::credentials::AccessToken;
    use azcore::error::CredentialsError;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct FakeCredential {
        scopes: Mutex<Vec<Vec<String>>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl TokenCredential for FakeCredential {
        async fn get_token(
            &self,
            scopes: &[String],
        ) -> std::result::Result<AccessToken, CredentialsError> {
            self.scopes.lock().unwrap().push(scopes.to_vec());
            if self.fail {
                return Err(CredentialsError::from_msg(false, "no token for you"));
            }
            Ok(AccessToken::new(format!("token-for-{}", scopes.join(","))))
        }
    }

    /// Records the `Authorization` header, returns 401 with a challenge for
    /// unauthenticated requests.
    #[derive(Debug, Default)]
    struct FakeService {
        seen: Mutex<Vec<Option<String>>>,
        challenge: Option<&'static str>,
    }

    #[async_trait::async_trait]
    impl Policy for FakeService {
        async fn send(
            &self,
            _ctx: &Context,
            request: &mut Request,
            _next: &[Arc<dyn Policy>],
        ) -> Result<RawResponse> {
            let auth = crate::headers::get_string(&request.headers, AUTHORIZATION.as_str());
            self.seen.lock().unwrap().push(auth.clone());
            match (auth, self.challenge) {
                (None, Some(challenge)) => {
                    let mut r = response(401)?;
                    r.headers
                        .insert(WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
                    Ok(r)
                }
                _ => response(200),
            }
        }
    }

    const CHALLENGE: &str = r#"Bearer authorization="https://login.windows.net/tenant-id", resource="https://vault.azure.net""#;

    #[tokio::test]
    async fn fixed_scope() -> anyhow::Result<()> {
        let credential = Arc::new(FakeCredential::default());
        let service = Arc::new(FakeService::default());
        let policy = BearerTokenPolicy::new(credential.clone(), Some("https://storage.azure.com/.default"));
        let next: Vec<Arc<dyn Policy>> = vec![service.clone()];
        for _ in 0..2 {
            let response = policy.send(&test_context(), &mut test_request(), &next).await?;
            assert_eq!(response.status.as_u16(), 200);
        }
        let seen = service.seen.lock().unwrap().clone();
        let want = Some("Bearer token-for-https://storage.azure.com/.default".to_string());
        assert_eq!(seen, vec![want.clone(), want]);
        // The token is cached.
        assert_eq!(credential.scopes.lock().unwrap().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn challenge_flow() -> anyhow::Result<()> {
        let credential = Arc::new(FakeCredential::default());
        let service = Arc::new(FakeService {
            challenge: Some(CHALLENGE),
            ..Default::default()
        });
        let policy = BearerTokenPolicy::new(credential.clone(), None);
        let next: Vec<Arc<dyn Policy>> = vec![service.clone()];

        let response = policy.send(&test_context(), &mut test_request(), &next).await?;
        assert_eq!(response.status.as_u16(), 200);
        let response = policy.send(&test_context(), &mut test_request(), &next).await?;
        assert_eq!(response.status.as_u16(), 200);

        let want = Some("Bearer token-for-https://vault.azure.net/.default".to_string());
        let seen = service.seen.lock().unwrap().clone();
        // The first request discovers the scope, the second uses it directly.
        assert_eq!(seen, vec![None, want.clone(), want]);
        let scopes = credential.scopes.lock().unwrap().clone();
        assert_eq!(scopes[0], vec!["https://vault.azure.net/.default".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn challenge_without_header() -> anyhow::Result<()> {
        let credential = Arc::new(FakeCredential::default());
        let service = Arc::new(FakeService::default());
        let policy = BearerTokenPolicy::new(credential.clone(), None);
        let next: Vec<Arc<dyn Policy>> = vec![service.clone()];
        let response = policy.send(&test_context(), &mut test_request(), &next).await?;
        assert_eq!(response.status.as_u16(), 200);
        assert!(credential.scopes.lock().unwrap().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn token_error() {
        let credential = Arc::new(FakeCredential {
            fail: true,
            ..Default::default()
        });
        let service = Arc::new(FakeService::default());
        let policy = BearerTokenPolicy::new(credential, Some("scope"));
        let next: Vec<Arc<dyn Policy>> = vec![service.clone()];
        let err = policy
            .send(&test_context(), &mut test_request(), &next)
            .await
            .unwrap_err();
        assert!(err.is_authentication(), "{err:?}");
        assert!(service.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn shared_key() -> anyhow::Result<()> {
        let credential = SharedKeyCredential::new(
            "devstoreaccount1",
            auth::connection_string::DEVELOPMENT_ACCOUNT_KEY,
        )?;
        let service = Arc::new(FakeService::default());
        let next: Vec<Arc<dyn Policy>> = vec![service.clone()];
        let mut request = test_request();
        request.body = bytes::Bytes::from_static(b"hello");
        SharedKeyPolicy::new(credential)
            .send(&test_context(), &mut request, &next)
            .await?;
        let seen = service.seen.lock().unwrap().clone();
        let auth = seen[0].clone().unwrap_or_default();
        assert!(auth.starts_with("SharedKey devstoreaccount1:"), "{auth}");
        assert!(request.headers.contains_key("x-ms-date"), "{request:?}");
        assert_eq!(request.headers.get(CONTENT_LENGTH).unwrap(), "5");
        Ok(())
    }

    #[tokio::test]
    async fn sas() -> anyhow::Result<()> {
        let credential = SasCredential::new("?sv=2018-03-28&sig=abc")?;
        let service = Arc::new(FakeService::default());
        let next: Vec<Arc<dyn Policy>> = vec![service.clone()];
        let mut request = test_request();
        SasPolicy::new(credential)
            .send(&test_context(), &mut request, &next)
            .await?;
        assert_eq!(request.url.query(), Some("comp=metadata&sv=2018-03-28&sig=abc"));
        assert_eq!(service.seen.lock().unwrap().clone(), vec![None]);
        Ok(())
    }

    #[test]
    fn policy_selection() -> anyhow::Result<()> {
        let mut config = ClientConfig::default();
        assert!(from_config(&config, &TEST_INFO).is_none());
        config.cred = Some(Credentials::Anonymous);
        assert!(from_config(&config, &TEST_INFO).is_none());
        config.cred = Some(Credentials::from(SasCredential::new("sig=abc")?));
        let policy = from_config(&config, &TEST_INFO).expect("SAS needs a policy");
        assert!(format!("{policy:?}").contains("SasPolicy"), "{policy:?}");
        Ok(())
    }
}
