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

//! Azure SDK Client Libraries for Rust - Storage Files
//!
//! This crate contains types and functions to interact with [Azure Files].
//! The clients follow the resource hierarchy of the service:
//!
//! - [FileServiceClient][client::FileServiceClient] manages the account
//!   settings and lists the shares.
//! - [ShareClient][client::ShareClient] manages a share, its snapshots,
//!   quota, access policies and file permissions.
//! - [DirectoryClient][client::DirectoryClient] manages a directory, lists
//!   its contents and the open SMB handles.
//! - [FileClient][client::FileClient] uploads, downloads and copies files.
//!
//! The clients accept shared key or shared access signature credentials,
//! and can be configured from a storage connection string.
//!
//! **WARNING:** this crate is under active development. We expect multiple
//! breaking changes in the upcoming releases.
//!
//! [Azure Files]: https://learn.microsoft.com/azure/storage/files/

pub use azcore::Result;
pub use azcore::error::Error;

/// The messages and enums that are part of this client library.
pub mod model;

/// Request builders.
pub mod builder;

/// The clients to interact with Azure Files.
pub mod client;

mod operations;

pub(crate) mod info {
    use azcorei::options::ClientInfo;

    pub(crate) static CLIENT_INFO: ClientInfo = ClientInfo {
        service_name: "file",
        package_name: env!("CARGO_PKG_NAME"),
        package_version: env!("CARGO_PKG_VERSION"),
        token_scope: Some("https://storage.azure.com/.default"),
    };

    /// The value of the `x-ms-version` header.
    pub(crate) const API_VERSION: &str = "2019-02-02";
}
