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

use super::{Context, Policy, RawResponse, Request, send_next};
use crate::headers::ERROR_CODE;
use azcore::Result;
use azcore::error::{Error, Status};
use http::{HeaderMap, StatusCode};
use std::sync::Arc;

/// Converts unexpected responses into service errors.
///
/// A response is successful if its status code is in the operation's
/// expected list, or is any 2xx code when the list is empty. The retry
/// policies return raw HTTP errors after exhausting their attempts, these are
/// converted too.
#[derive(Debug)]
pub struct DeserializationPolicy;

#[async_trait::async_trait]
impl Policy for DeserializationPolicy {
    async fn send(
        &self,
        ctx: &Context,
        request: &mut Request,
        next: &[Arc<dyn Policy>],
    ) -> Result<RawResponse> {
        match send_next(ctx, request, next).await {
            Ok(response) if is_expected(ctx.expected, response.status) => Ok(response),
            Ok(response) => Err(service_error(
                response.status,
                response.headers,
                &response.body,
            )),
            Err(e) => Err(from_http_error(e)),
        }
    }
}

fn is_expected(expected: &[u16], status: StatusCode) -> bool {
    if expected.is_empty() {
        return status.is_success();
    }
    expected.contains(&status.as_u16())
}

fn from_http_error(error: Error) -> Error {
    if error.status().is_some() {
        return error;
    }
    let (Some(code), Some(payload)) = (error.http_status_code(), error.http_payload()) else {
        return error;
    };
    let Ok(status) = StatusCode::from_u16(code) else {
        return error;
    };
    let headers = error.http_headers().cloned().unwrap_or_default();
    service_error(status, headers, payload)
}

#[derive(serde::Deserialize)]
struct JsonError {
    error: JsonStatus,
}

#[derive(serde::Deserialize)]
struct JsonStatus {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Creates the error for an unsuccessful response.
///
/// Key Vault returns JSON error bodies, the storage services return XML error
/// bodies or, for `HEAD` requests, only the `x-ms-error-code` header.
pub fn service_error(status: StatusCode, headers: HeaderMap, body: &[u8]) -> Error {
    let parsed = serde_json::from_slice::<JsonError>(body)
        .ok()
        .map(|e| {
            Status::default()
                .set_code(e.error.code)
                .set_message(e.error.message)
        })
        .or_else(|| crate::xml::parse_error(body));
    let mut result = parsed.unwrap_or_else(|| {
        let message = match std::str::from_utf8(body) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => status.canonical_reason().unwrap_or_default().to_string(),
        };
        Status::default().set_message(message)
    });
    if result.code.is_empty() {
        result.code = crate::headers::get_str(&headers, ERROR_CODE)
            .or(status.canonical_reason())
            .unwrap_or_default()
            .to_string();
    }
    Error::service_with_http_metadata(result, Some(status.as_u16()), Some(headers))
}
