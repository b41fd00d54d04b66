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

//! Azure SDK helpers.
//!
//! This crate contains the types and functions shared by the Azure SDK client
//! libraries for Rust: the error type, request options, retry and backoff
//! policies, the paginator used by list operations, and the generic client
//! builder.
//!
//! <div class="warning">
//! Types and functions in modules named <code>internal</code> are <b>not</b>
//! intended for general use. They remain unstable even if used by stable
//! client libraries.
//! </div>

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions wrapping REST calls.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by the clients.
pub mod error;

/// Defines some types and traits to convert and use list operations as a
/// [Stream][futures::Stream].
pub mod paginator;

pub mod backoff_policy;
pub mod client_builder;
pub mod exponential_backoff;
pub mod options;
pub mod response;
pub mod retry_policy;
pub mod retry_result;

#[doc(hidden)]
pub mod retry_loop_internal;
