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

use crate::Result;
use crate::model::{ResponseMetadata, format_iso8601, names};
use azcore::error::Error;
use azcore::options::RequestOptions;
use azcore::response::Response;
use azcorei::client::PipelineClient;
use azcorei::operation::{BindingError, Operation, OperationRequest, required};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub mod directory_client;
pub mod file_client;
pub mod file_service_client;
pub mod handles;
pub mod share_client;

/// The share, and the directory or file path, targeted by a request.
///
/// The path is relative to the share root, without leading or trailing
/// separators.
#[derive(Clone, Debug, Default)]
pub(crate) struct Target {
    pub(crate) share: String,
    pub(crate) path: String,
    pub(crate) snapshot: Option<String>,
}

/// Common implementation for the file request builders.
#[derive(Clone, Debug)]
pub(crate) struct RequestBuilder<R: std::default::Default> {
    inner: Arc<PipelineClient>,
    operation: &'static Operation,
    target: Target,
    request: R,
    options: RequestOptions,
}

impl<R> RequestBuilder<R>
where
    R: std::default::Default,
{
    pub(crate) fn new(
        inner: Arc<PipelineClient>,
        operation: &'static Operation,
        target: Target,
    ) -> Self {
        Self {
            inner,
            operation,
            target,
            request: R::default(),
            options: RequestOptions::default(),
        }
    }

    fn with_request(mut self, request: R) -> Self {
        self.request = request;
        self
    }

    fn operation_request(&self) -> OperationRequest {
        OperationRequest::new(self.operation, self.options.clone())
    }

    fn share_request(&self) -> Result<OperationRequest> {
        Ok(self
            .operation_request()
            .path_param("share-name", required("share_name", &self.target.share)?))
    }

    // The share root has an empty path.
    fn directory_request(&self) -> Result<OperationRequest> {
        let path = match self.target.path.as_str() {
            "" => String::new(),
            p => format!("/{p}"),
        };
        Ok(self.share_request()?.path_param("directory-path", path))
    }

    fn file_request(&self) -> Result<OperationRequest> {
        Ok(self
            .share_request()?
            .path_param("file-path", required("file_path", &self.target.path)?))
    }

    fn snapshot(&self, request: OperationRequest) -> OperationRequest {
        request.query_opt("sharesnapshot", self.target.snapshot.as_deref())
    }
}

macro_rules! request_builder {
    ($name:ident) => {
        #[doc(hidden)]
        impl azcore::options::internal::RequestBuilder for $name {
            fn request_options(&mut self) -> &mut RequestOptions {
                &mut self.0.options
            }
        }
    };
}
use request_builder;

macro_rules! metadata_setter {
    () => {
        /// Sets the metadata, replacing any existing metadata.
        pub fn set_metadata<T, K, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: Into<String>,
        {
            self.0.request.metadata = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
            self
        }
    };
}
use metadata_setter;

macro_rules! smb_setters {
    () => {
        /// Sets the permission, in SDDL format.
        ///
        /// Permissions larger than 8 KiB must be stored with
        /// [ShareClient::create_permission][crate::client::ShareClient::create_permission]
        /// and referenced by key.
        pub fn set_file_permission<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.smb.permission = Some(v.into());
            self
        }

        /// Sets the permission by key.
        ///
        /// The request fails with a binding error if a permission is also set.
        pub fn set_file_permission_key<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.smb.permission_key = Some(v.into());
            self
        }

        /// Sets the SMB attributes, separated by `|`, e.g. `ReadOnly|Hidden`.
        pub fn set_file_attributes<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.smb.attributes = Some(v.into());
            self
        }

        pub fn set_creation_time(mut self, v: chrono::DateTime<chrono::Utc>) -> Self {
            self.0.request.smb.creation_time = Some(v);
            self
        }

        pub fn set_last_write_time(mut self, v: chrono::DateTime<chrono::Utc>) -> Self {
            self.0.request.smb.last_write_time = Some(v);
            self
        }
    };
}
use smb_setters;

/// The values sent for the SMB properties not set by the application.
#[derive(Debug)]
pub(crate) struct SmbDefaults {
    permission: &'static str,
    attributes: &'static str,
    time: &'static str,
}

pub(crate) const CREATE_FILE_DEFAULTS: SmbDefaults = SmbDefaults {
    permission: "inherit",
    attributes: "None",
    time: "now",
};

pub(crate) const CREATE_DIRECTORY_DEFAULTS: SmbDefaults = SmbDefaults {
    permission: "inherit",
    attributes: "Directory",
    time: "now",
};

pub(crate) const PRESERVE: SmbDefaults = SmbDefaults {
    permission: "preserve",
    attributes: "preserve",
    time: "preserve",
};

/// The SMB properties set by a request.
#[derive(Clone, Debug, Default)]
pub(crate) struct SmbRequest {
    permission: Option<String>,
    permission_key: Option<String>,
    attributes: Option<String>,
    creation_time: Option<DateTime<Utc>>,
    last_write_time: Option<DateTime<Utc>>,
}

impl SmbRequest {
    fn apply(&self, request: OperationRequest, defaults: &SmbDefaults) -> Result<OperationRequest> {
        let time = |v: &Option<DateTime<Utc>>| {
            v.as_ref()
                .map(format_iso8601)
                .unwrap_or_else(|| defaults.time.to_string())
        };
        let request = match (&self.permission, &self.permission_key) {
            (Some(_), Some(_)) => {
                return Err(Error::binding(BindingError::ConflictingParameters(
                    "file_permission".to_string(),
                    "file_permission_key".to_string(),
                )));
            }
            (None, Some(key)) => request.header(names::FILE_PERMISSION_KEY, key),
            (permission, None) => request.header(
                names::FILE_PERMISSION,
                permission.as_deref().unwrap_or(defaults.permission),
            ),
        };
        Ok(request
            .header(
                names::FILE_ATTRIBUTES,
                self.attributes.as_deref().unwrap_or(defaults.attributes),
            )
            .header(names::FILE_CREATION_TIME, time(&self.creation_time))
            .header(names::FILE_LAST_WRITE_TIME, time(&self.last_write_time)))
    }
}

fn response_metadata<T>(response: &Response<T>) -> Result<ResponseMetadata> {
    ResponseMetadata::from_headers(response.headers())
}
