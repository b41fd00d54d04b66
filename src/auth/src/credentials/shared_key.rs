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

//! Shared key credentials.
//!
//! The storage services authenticate requests signed with the storage account
//! key. The signature is an HMAC-SHA256 over a canonical representation of
//! the request, see [Authorize with Shared Key].
//!
//! [Authorize with Shared Key]: https://learn.microsoft.com/rest/api/storageservices/authorize-with-shared-key

use crate::Result;
use crate::build_errors::Error as BuildError;
use azcore::error::CredentialsError;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use http::header::{
    AUTHORIZATION, CONTENT_ENCODING, CONTENT_LANGUAGE, CONTENT_LENGTH, CONTENT_TYPE, DATE,
    HeaderMap, HeaderName, HeaderValue, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH,
    IF_UNMODIFIED_SINCE, RANGE,
};
use sha2::Sha256;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

const X_MS_DATE: &str = "x-ms-date";
const CONTENT_MD5: &str = "content-md5";

/// Signs requests with a storage account name and key.
///
/// # Example
/// ```
/// # use azure_sdk_auth::credentials::SharedKeyCredential;
/// # fn sample() -> Result<(), azure_sdk_auth::build_errors::Error> {
/// let credential = SharedKeyCredential::new("myaccount", "a2V5LWZvci10ZXN0cw==")?;
/// assert_eq!(credential.account_name(), "myaccount");
/// # Ok(()) }
/// ```
#[derive(Clone)]
pub struct SharedKeyCredential {
    account_name: String,
    account_key: Arc<Vec<u8>>,
}

impl SharedKeyCredential {
    /// Creates a new credential.
    ///
    /// The `account_key` is the base64 encoded key shown in the Azure portal.
    pub fn new<N: Into<String>>(
        account_name: N,
        account_key: &str,
    ) -> std::result::Result<Self, BuildError> {
        let account_name = account_name.into();
        if account_name.is_empty() {
            return Err(BuildError::missing_field("account_name"));
        }
        let account_key = BASE64_STANDARD
            .decode(account_key.trim())
            .map_err(BuildError::invalid_key)?;
        Ok(Self {
            account_name,
            account_key: Arc::new(account_key),
        })
    }

    /// The storage account name.
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Signs a request.
    ///
    /// Sets the `x-ms-date` header to the current time and the
    /// `Authorization` header to the shared key signature.
    pub fn sign(
        &self,
        method: &http::Method,
        url: &url::Url,
        headers: &mut HeaderMap,
    ) -> Result<()> {
        self.sign_at(method, url, headers, Utc::now())
    }

    pub(crate) fn sign_at(
        &self,
        method: &http::Method,
        url: &url::Url,
        headers: &mut HeaderMap,
        now: DateTime<Utc>,
    ) -> Result<()> {
        headers.insert(
            HeaderName::from_static(X_MS_DATE),
            HeaderValue::from_str(&format_http_date(now))
                .map_err(|e| CredentialsError::new(false, e))?,
        );
        let string_to_sign = string_to_sign(&self.account_name, method, url, headers);
        tracing::trace!("string to sign: {string_to_sign:?}");

        let mut mac = Hmac::<Sha256>::new_from_slice(&self.account_key)
            .map_err(|e| CredentialsError::from_msg(false, e.to_string()))?;
        mac.update(string_to_sign.as_bytes());
        let signature = BASE64_STANDARD.encode(mac.finalize().into_bytes());

        let mut value = HeaderValue::from_str(&format!(
            "SharedKey {}:{signature}",
            self.account_name
        ))
        .map_err(|e| CredentialsError::new(false, e))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

impl std::fmt::Debug for SharedKeyCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedKeyCredential")
            .field("account_name", &self.account_name)
            .field("account_key", &"[censored]")
            .finish()
    }
}

fn format_http_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn header_or_default<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn string_to_sign(
    account_name: &str,
    method: &http::Method,
    url: &url::Url,
    headers: &HeaderMap,
) -> String {
    let content_length = match header_or_default(headers, CONTENT_LENGTH.as_str()) {
        "0" => "",
        v => v,
    };
    let standard = [
        header_or_default(headers, CONTENT_ENCODING.as_str()),
        header_or_default(headers, CONTENT_LANGUAGE.as_str()),
        content_length,
        header_or_default(headers, CONTENT_MD5),
        header_or_default(headers, CONTENT_TYPE.as_str()),
        header_or_default(headers, DATE.as_str()),
        header_or_default(headers, IF_MODIFIED_SINCE.as_str()),
        header_or_default(headers, IF_MATCH.as_str()),
        header_or_default(headers, IF_NONE_MATCH.as_str()),
        header_or_default(headers, IF_UNMODIFIED_SINCE.as_str()),
        header_or_default(headers, RANGE.as_str()),
    ];

    let mut s = String::with_capacity(256);
    s.push_str(method.as_str());
    s.push('\n');
    for v in standard {
        s.push_str(v);
        s.push('\n');
    }
    s.push_str(&canonicalize_headers(headers));
    s.push('\n');
    s.push_str(&canonicalize_resource(account_name, url));
    s
}

fn canonicalize_headers(headers: &HeaderMap) -> String {
    let mut names = headers
        .keys()
        .map(HeaderName::as_str)
        .filter(|n| n.starts_with("x-ms-"))
        .collect::<Vec<_>>();
    names.sort_unstable();
    names
        .into_iter()
        .map(|name| {
            let values = headers
                .get_all(name)
                .iter()
                .filter_map(|v| v.to_str().ok())
                .map(str::trim)
                .collect::<Vec<_>>();
            format!("{name}:{}", values.join(","))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn canonicalize_resource(account_name: &str, url: &url::Url) -> String {
    let mut s = format!("/{account_name}{}", url.path());
    let mut query = BTreeMap::<String, Vec<String>>::new();
    for (k, v) in url.query_pairs() {
        query
            .entry(k.to_lowercase())
            .or_default()
            .push(v.into_owned());
    }
    for (k, mut values) in query {
        values.sort_unstable();
        let _ = write!(&mut s, "\n{k}:{}", values.join(","));
    }
    s
}
