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

//! The credentials consumed by the client libraries.
//!
//! Each client holds one [Credentials] value. The request pipeline inspects
//! the variant to decide how requests are authenticated:
//!
//! * [Credentials::Token] adds an `Authorization: Bearer` header, caching the
//!   access token until shortly before it expires.
//! * [Credentials::SharedKey] signs each request with the storage account
//!   key.
//! * [Credentials::Sas] appends a shared access signature to the URL.
//! * [Credentials::Anonymous] sends requests without authentication, useful
//!   for public resources and local emulators.
//!
//! # Example
//! ```
//! # use azure_sdk_auth::credentials::{Credentials, SharedKeyCredential};
//! # fn sample() -> Result<(), azure_sdk_auth::build_errors::Error> {
//! let key = SharedKeyCredential::new("myaccount", "a2V5LWZvci10ZXN0cw==")?;
//! let credentials = Credentials::from(key);
//! assert!(matches!(credentials, Credentials::SharedKey(_)));
//! # Ok(()) }
//! ```

pub mod anonymous;
pub mod sas;
pub mod shared_key;
pub mod static_token;

pub use crate::token::{AccessToken, TokenCredential};
pub use sas::SasCredential;
pub use shared_key::SharedKeyCredential;
use std::sync::Arc;

/// The authentication mechanism used by a client.
#[derive(Clone, Debug)]
pub enum Credentials {
    /// OAuth2 bearer tokens obtained from a [TokenCredential].
    Token(Arc<dyn TokenCredential>),
    /// Requests signed with the storage account key.
    SharedKey(SharedKeyCredential),
    /// Requests authorized by a shared access signature.
    Sas(SasCredential),
    /// No authentication.
    Anonymous,
}

impl Credentials {
    /// Wraps a [TokenCredential] implementation.
    pub fn from_token<T>(credential: T) -> Self
    where
        T: TokenCredential + 'static,
    {
        Self::Token(Arc::new(credential))
    }

    /// The storage account name, if known.
    ///
    /// Only shared key credentials carry the account name.
    pub fn account_name(&self) -> Option<&str> {
        match self {
            Self::SharedKey(c) => Some(c.account_name()),
            _ => None,
        }
    }
}

impl From<SharedKeyCredential> for Credentials {
    fn from(value: SharedKeyCredential) -> Self {
        Self::SharedKey(value)
    }
}

impl From<SasCredential> for Credentials {
    fn from(value: SasCredential) -> Self {
        Self::Sas(value)
    }
}

impl From<Arc<dyn TokenCredential>> for Credentials {
    fn from(value: Arc<dyn TokenCredential>) -> Self {
        Self::Token(value)
    }
}
