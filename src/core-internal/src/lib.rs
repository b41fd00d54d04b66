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

//! Implementation details for the Azure SDK client libraries.
//!
//! <div class="warning">
//! All the types, traits, and functions defined in this crate are
//! <b>not</b> intended for general use. This crate will remain unstable for
//! the foreseeable future, even if used in stable SDK components. We (the
//! Azure SDK for Rust team) control both this crate and the SDK components
//! where it is used, so we can make incompatible changes to both. The types,
//! traits, and functions defined in this crate are undocumented, and
//! intentionally so.
//! </div>

mod macros;

pub mod client;
pub mod headers;
pub mod operation;
pub mod options;
pub mod pipeline;
pub mod storage;
pub mod xml;

mod build_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/build_env.rs"));
}
