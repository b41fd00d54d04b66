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

//! Azure SDK Client Libraries for Rust - Storage Queues
//!
//! This crate contains types and functions to interact with
//! [Azure Queue Storage]. Use
//! [QueueServiceClient][client::QueueServiceClient] to manage the account
//! settings and list the queues, and [QueueClient][client::QueueClient] to
//! manage a queue and its messages.
//!
//! The clients accept shared key, shared access signature, token, or
//! anonymous credentials. They can also be configured from a storage
//! connection string, including `UseDevelopmentStorage=true`.
//!
//! **WARNING:** this crate is under active development. We expect multiple
//! breaking changes in the upcoming releases.
//!
//! [Azure Queue Storage]: https://learn.microsoft.com/azure/storage/queues/

pub use azcore::Result;
pub use azcore::error::Error;

/// The messages and enums that are part of this client library.
pub mod model;

/// Request builders.
pub mod builder;

/// The clients to interact with Queue Storage.
pub mod client;

mod operations;

pub(crate) mod info {
    use azcorei::options::ClientInfo;

    pub(crate) static CLIENT_INFO: ClientInfo = ClientInfo {
        service_name: "queue",
        package_name: env!("CARGO_PKG_NAME"),
        package_version: env!("CARGO_PKG_VERSION"),
        token_scope: Some("https://storage.azure.com/.default"),
    };

    /// The value of the `x-ms-version` header.
    pub(crate) const API_VERSION: &str = "2018-03-28";
}
