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

//! Shared access signature credentials.
//!
//! A [shared access signature] (SAS) is a set of query parameters granting
//! restricted access to storage resources. The client appends the parameters
//! to the URL of every request.
//!
//! [shared access signature]: https://learn.microsoft.com/azure/storage/common/storage-sas-overview

use crate::build_errors::Error as BuildError;

/// Authorizes requests with a shared access signature.
///
/// # Example
/// ```
/// # use azure_sdk_auth::credentials::SasCredential;
/// # fn sample() -> Result<(), azure_sdk_auth::build_errors::Error> {
/// let sas = SasCredential::new("?sv=2019-02-02&ss=q&sig=abc%3D")?;
/// let mut url = url::Url::parse("https://myaccount.queue.core.windows.net/q1").unwrap();
/// sas.sign(&mut url);
/// assert_eq!(url.query(), Some("sv=2019-02-02&ss=q&sig=abc%3D"));
/// # Ok(()) }
/// ```
#[derive(Clone)]
pub struct SasCredential {
    token: String,
}

impl SasCredential {
    /// Creates a new credential from a SAS token.
    ///
    /// The token may include a leading `?`.
    pub fn new<T: Into<String>>(token: T) -> Result<Self, BuildError> {
        let token = token.into();
        let token = token.trim().trim_start_matches('?');
        if token.is_empty() {
            return Err(BuildError::missing_field("token"));
        }
        if token.contains(|c: char| c.is_whitespace() || c == '#') {
            return Err(BuildError::invalid_token(
                "the token contains characters not allowed in a URL query",
            ));
        }
        Ok(Self {
            token: token.to_string(),
        })
    }

    /// Appends the SAS parameters to `url`.
    ///
    /// URLs that already carry a signature (`sig`) are not modified, this
    /// happens when following a redirect to a pre-signed URL.
    pub fn sign(&self, url: &mut url::Url) {
        if url.query_pairs().any(|(k, _)| k == "sig") {
            return;
        }
        let query = match url.query() {
            Some(q) if !q.is_empty() => format!("{q}&{}", self.token),
            _ => self.token.clone(),
        };
        url.set_query(Some(&query));
    }
}

impl std::fmt::Debug for SasCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SasCredential")
            .field("token", &"[censored]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const TOKEN: &str = "sv=2019-02-02&ss=f&sp=rl&se=2030-01-01T00%3A00%3A00Z&sig=abc%2Bdef%3D";

    #[test_case("https://a.file.core.windows.net/share", &format!("https://a.file.core.windows.net/share?{TOKEN}"); "no query")]
    #[test_case("https://a.file.core.windows.net/share?restype=share", &format!("https://a.file.core.windows.net/share?restype=share&{TOKEN}"); "with query")]
    #[test_case("https://a.file.core.windows.net/share?sig=xyz", "https://a.file.core.windows.net/share?sig=xyz"; "already signed")]
    fn sign(input: &str, want: &str) -> anyhow::Result<()> {
        let sas = SasCredential::new(format!("?{TOKEN}"))?;
        let mut url = url::Url::parse(input)?;
        sas.sign(&mut url);
        assert_eq!(url.as_str(), want);
        Ok(())
    }

    #[test_case(""; "empty")]
    #[test_case("?"; "only question mark")]
    fn missing(input: &str) {
        let err = SasCredential::new(input).unwrap_err();
        assert!(err.is_missing_field(), "{err:?}");
    }

    #[test]
    fn invalid() {
        let err = SasCredential::new("sv=1 &sig=a").unwrap_err();
        assert!(err.is_invalid_token(), "{err:?}");
    }

    #[test]
    fn debug() -> anyhow::Result<()> {
        let sas = SasCredential::new(TOKEN)?;
        let fmt = format!("{sas:?}");
        assert!(!fmt.contains("abc"), "{fmt}");
        Ok(())
    }
}
