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

pub use auth::credentials::Credentials;

/// The client configuration for [crate::client::PipelineClient].
pub type ClientConfig = azcore::client_builder::internal::ClientConfig<Credentials>;

pub(crate) const LOGGING_VAR: &str = "AZURE_SDK_RUST_LOGGING";

/// Describes the client library making requests.
///
/// Each client library defines a static instance of this type. It is used in
/// the `User-Agent` header, in tracing spans, and to select the
/// authentication flow for bearer tokens.
#[derive(Copy, Clone, Debug)]
pub struct ClientInfo {
    /// The short service name, e.g. "keyvault", "queue".
    pub service_name: &'static str,
    /// The name of the client library crate.
    pub package_name: &'static str,
    /// The version of the client library crate.
    pub package_version: &'static str,
    /// The scope requested for bearer tokens.
    ///
    /// If `None` the client discovers the scope from the authentication
    /// challenge returned by the service.
    pub token_scope: Option<&'static str>,
}

// Returns true if the environment or client configuration enables tracing.
pub fn tracing_enabled(config: &ClientConfig) -> bool {
    if config.tracing {
        return true;
    }
    std::env::var(LOGGING_VAR)
        .map(|v| v == "true")
        .unwrap_or(false)
}
