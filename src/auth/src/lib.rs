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

//! Azure SDK Client Libraries for Rust - Authentication Components
//!
//! This crate contains types and functions used to authenticate requests to
//! Azure services. The client libraries consume a [credentials::Credentials]
//! value and use it to authenticate every request issued by the application.
//!
//! Key Vault requires OAuth2 bearer tokens, see [credentials::TokenCredential].
//! The Storage services also accept requests signed with the account key
//! ([credentials::SharedKeyCredential]) or authorized by a shared access
//! signature ([credentials::SasCredential]). Storage clients are often
//! configured from a [connection string][connection_string].

pub mod build_errors;

/// Types and functions to work with Azure authentication credentials.
pub mod credentials;

/// Types and functions to work with OAuth2 access tokens.
pub mod token;

/// Caches access tokens until they are about to expire.
pub mod token_cache;

pub mod challenge;
pub mod connection_string;

/// A `Result` alias where the `Err` case is
/// `azure_sdk_core::error::CredentialsError`.
pub(crate) type Result<T> = std::result::Result<T, azcore::error::CredentialsError>;
