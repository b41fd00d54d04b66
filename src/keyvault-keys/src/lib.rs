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

//! Azure SDK Client Libraries for Rust - Key Vault Keys
//!
//! This crate contains types and functions to manage the keys stored in
//! [Azure Key Vault]. Most applications will use [KeyClient][client::KeyClient]
//! to create, read, update, delete and list keys.
//!
//! The client requires bearer token credentials. The authentication scope is
//! discovered from the challenge returned by the vault, so the same client
//! works with any Azure cloud.
//!
//! **WARNING:** this crate is under active development. We expect multiple
//! breaking changes in the upcoming releases.
//!
//! [Azure Key Vault]: https://learn.microsoft.com/azure/key-vault/

pub use azcore::Result;
pub use azcore::error::Error;

/// The messages and enums that are part of this client library.
pub mod model;

/// Request builders.
pub mod builder;

/// The client to interact with Key Vault keys.
pub mod client;

mod operations;

pub(crate) mod info {
    use azcorei::options::ClientInfo;

    pub(crate) static CLIENT_INFO: ClientInfo = ClientInfo {
        service_name: "keyvault",
        package_name: env!("CARGO_PKG_NAME"),
        package_version: env!("CARGO_PKG_VERSION"),
        token_scope: None,
    };

    /// The Key Vault REST API version implemented by this crate.
    pub(crate) const API_VERSION: &str = "7.0";
}

#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    assert_impl_all!(crate::client::KeyClient: Send, Sync, Clone, std::fmt::Debug);
    assert_impl_all!(crate::builder::key_client::CreateKey: Send, Sync);
    assert_impl_all!(crate::model::Key: Send, Sync, Clone);
}
