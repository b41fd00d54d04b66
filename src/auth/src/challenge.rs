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

//! Parse bearer token authentication challenges.
//!
//! Key Vault rejects unauthenticated requests with `401 Unauthorized` and a
//! `WWW-Authenticate` header describing how to obtain a token:
//!
//! ```text
//! WWW-Authenticate: Bearer authorization="https://login.windows.net/{tenant}", resource="https://vault.azure.net"
//! ```
//!
//! Newer service versions advertise a `scope` instead of a `resource`.

/// A parsed `Bearer` challenge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Challenge {
    /// The authority issuing tokens, from `authorization` or `authorization_uri`.
    pub authorization: Option<String>,
    /// The resource the token is requested for.
    pub resource: Option<String>,
    /// The scope the token is requested for.
    pub scope: Option<String>,
}

impl Challenge {
    /// Parses the value of a `WWW-Authenticate` header.
    ///
    /// Returns `None` if the header is not a `Bearer` challenge.
    ///
    /// # Example
    /// ```
    /// # use azure_sdk_auth::challenge::Challenge;
    /// let challenge = Challenge::parse(
    ///     r#"Bearer authorization="https://login.windows.net/tenant", resource="https://vault.azure.net""#,
    /// ).unwrap();
    /// assert_eq!(challenge.scope().as_deref(), Some("https://vault.azure.net/.default"));
    /// ```
    pub fn parse(header: &str) -> Option<Self> {
        let header = header.trim();
        let (scheme, rest) = header.split_once(char::is_whitespace).unwrap_or((header, ""));
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let mut challenge = Challenge::default();
        for (key, value) in parameters(rest) {
            match key.to_ascii_lowercase().as_str() {
                "authorization" | "authorization_uri" => challenge.authorization = Some(value),
                "resource" => challenge.resource = Some(value),
                "scope" => challenge.scope = Some(value),
                _ => {}
            }
        }
        Some(challenge)
    }

    /// The scope to request a token for.
    ///
    /// Uses the `scope` parameter if present, otherwise the `resource`
    /// followed by `/.default`.
    pub fn scope(&self) -> Option<String> {
        if let Some(scope) = self.scope.as_ref().filter(|s| !s.is_empty()) {
            return Some(scope.clone());
        }
        self.resource
            .as_ref()
            .filter(|r| !r.is_empty())
            .map(|r| format!("{}/.default", r.trim_end_matches('/')))
    }

    /// The tenant id, the last path segment of the authorization URL.
    pub fn tenant_id(&self) -> Option<&str> {
        self.authorization
            .as_deref()
            .and_then(|a| a.trim_end_matches('/').rsplit('/').next())
            .filter(|t| !t.is_empty() && !t.contains(':'))
    }
}

// Splits `key="value", key=value` lists. Commas between parameters are
// optional, some services separate parameters with spaces only.
fn parameters(input: &str) -> Vec<(String, String)> {
    let mut result = Vec::new();
    let mut chars = input.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace() || *c == ',').is_some() {}
        let key: String = std::iter::from_fn(|| chars.next_if(|c| *c != '=' && !c.is_whitespace()))
            .collect();
        if key.is_empty() {
            break;
        }
        if chars.next_if_eq(&'=').is_none() {
            continue;
        }
        let value: String = if chars.next_if_eq(&'"').is_some() {
            let v = std::iter::from_fn(|| chars.next_if(|c| *c != '"')).collect();
            chars.next();
            v
        } else {
            std::iter::from_fn(|| chars.next_if(|c| *c != ',' && !c.is_whitespace())).collect()
        };
        result.push((key, value));
    }
    result
}
