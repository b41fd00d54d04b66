// Copyright 2024 Google LLC
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

/// The error details reported by a service.
///
/// Key Vault reports errors as a JSON object:
/// ```json
/// {"error": {"code": "KeyNotFound", "message": "A key with (name/id) k1 was not found in this key vault."}}
/// ```
/// Storage services report errors as an XML document, and sometimes only via
/// the `x-ms-error-code` header:
/// ```xml
/// <Error><Code>ShareNotFound</Code><Message>The specified share does not exist.</Message></Error>
/// ```
/// The client libraries normalize both forms to this type.
///
/// # Example
/// ```
/// # use azure_sdk_core::error::Status;
/// let status = Status::default()
///     .set_code("QueueNotFound")
///     .set_message("The specified queue does not exist.");
/// assert_eq!(status.code, "QueueNotFound");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Status {
    /// The error code, e.g. `KeyNotFound`, `ShareAlreadyExists`.
    pub code: String,

    /// A developer-facing, human readable description of the problem.
    pub message: String,
}

impl Status {
    /// Sets the value of [code][Status::code].
    pub fn set_code<T: Into<String>>(mut self, v: T) -> Self {
        self.code = v.into();
        self
    }

    /// Sets the value of [message][Status::message].
    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }
}
