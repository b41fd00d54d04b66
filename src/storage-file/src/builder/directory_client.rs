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

use super::{
    CREATE_DIRECTORY_DEFAULTS, PRESERVE, RequestBuilder, SmbRequest, Target, metadata_setter,
    request_builder, response_metadata, smb_setters,
};
use crate::Result;
use crate::model::*;
use azcore::options::RequestOptions;
use azcore::paginator::{ItemPaginator, PageSettings, Paginator};
use azcorei::client::PipelineClient;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub(crate) struct DirectoryRequest {
    metadata: HashMap<String, String>,
    smb: SmbRequest,
}

/// The request builder for [DirectoryClient::create][crate::client::DirectoryClient::create] calls.
///
/// The parent directory must exist.
///
/// # Example
/// ```no_run
/// # use azure_storage_file::builder::directory_client::Create;
/// # tokio_test::block_on(async {
/// let builder = prepare_request_builder();
/// let info = builder
///     .set_metadata([("owner", "finance")])
///     .set_file_attributes("Directory|Hidden")
///     .send()
///     .await?;
/// println!("created directory {:?}", info.smb.file_id);
/// # azure_storage_file::Result::<()>::Ok(()) });
///
/// fn prepare_request_builder() -> Create {
///   # panic!();
///   // ... details omitted ...
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Create(RequestBuilder<DirectoryRequest>);

impl Create {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(inner, &crate::operations::CREATE_DIRECTORY, target))
    }

    /// Sends the request.
    #[tracing::instrument(name = "DirectoryClient::create", level = "debug", skip_all)]
    pub async fn send(self) -> Result<DirectoryInfo> {
        let request = self
            .0
            .request
            .smb
            .apply(self.0.directory_request()?, &CREATE_DIRECTORY_DEFAULTS)?
            .metadata(&self.0.request.metadata);
        let response = self.0.inner.empty(request).await?;
        DirectoryInfo::from_headers(response.headers())
    }

    metadata_setter!();
    smb_setters!();
}

request_builder!(Create);

/// The request builder for [DirectoryClient::get_properties][crate::client::DirectoryClient::get_properties] calls.
#[derive(Clone, Debug)]
pub struct GetProperties(RequestBuilder<()>);

impl GetProperties {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(
            inner,
            &crate::operations::GET_DIRECTORY_PROPERTIES,
            target,
        ))
    }

    /// Sends the request.
    #[tracing::instrument(name = "DirectoryClient::get_properties", level = "debug", skip_all)]
    pub async fn send(self) -> Result<DirectoryProperties> {
        let request = self.0.snapshot(self.0.directory_request()?);
        let response = self.0.inner.empty(request).await?;
        DirectoryProperties::from_headers(response.headers())
    }
}

request_builder!(GetProperties);

/// The request builder for [DirectoryClient::delete][crate::client::DirectoryClient::delete] calls.
///
/// Only empty directories can be deleted.
#[derive(Clone, Debug)]
pub struct Delete(RequestBuilder<()>);

impl Delete {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(inner, &crate::operations::DELETE_DIRECTORY, target))
    }

    /// Sends the request.
    #[tracing::instrument(name = "DirectoryClient::delete", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ResponseMetadata> {
        let request = self.0.directory_request()?;
        let response = self.0.inner.empty(request).await?;
        response_metadata(&response)
    }
}

request_builder!(Delete);

/// The request builder for [DirectoryClient::set_properties][crate::client::DirectoryClient::set_properties] calls.
///
/// The SMB properties not set in the builder keep their current values.
#[derive(Clone, Debug)]
pub struct SetProperties(RequestBuilder<DirectoryRequest>);

impl SetProperties {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(
            inner,
            &crate::operations::SET_DIRECTORY_PROPERTIES,
            target,
        ))
    }

    /// Sends the request.
    #[tracing::instrument(name = "DirectoryClient::set_properties", level = "debug", skip_all)]
    pub async fn send(self) -> Result<DirectoryInfo> {
        let request = self
            .0
            .request
            .smb
            .apply(self.0.directory_request()?, &PRESERVE)?;
        let response = self.0.inner.empty(request).await?;
        DirectoryInfo::from_headers(response.headers())
    }

    smb_setters!();
}

request_builder!(SetProperties);

/// The request builder for [DirectoryClient::set_metadata][crate::client::DirectoryClient::set_metadata] calls.
#[derive(Clone, Debug)]
pub struct SetMetadata(RequestBuilder<DirectoryRequest>);

impl SetMetadata {
    pub(crate) fn new(
        inner: Arc<PipelineClient>,
        target: Target,
        metadata: HashMap<String, String>,
    ) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::SET_DIRECTORY_METADATA, target)
                .with_request(DirectoryRequest {
                    metadata,
                    ..Default::default()
                }),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "DirectoryClient::set_metadata", level = "debug", skip_all)]
    pub async fn send(self) -> Result<DirectoryInfo> {
        let request = self
            .0
            .directory_request()?
            .metadata(&self.0.request.metadata);
        let response = self.0.inner.empty(request).await?;
        DirectoryInfo::from_headers(response.headers())
    }
}

request_builder!(SetMetadata);

#[derive(Clone, Debug, Default)]
pub(crate) struct ListFilesRequest {
    prefix: Option<String>,
    max_page_size: Option<i32>,
    continuation_token: Option<String>,
}

impl RequestBuilder<ListFilesRequest> {
    async fn fetch(self, marker: String) -> Result<ListFilesAndDirectoriesPage> {
        let request = self
            .snapshot(self.directory_request()?)
            .query_opt("prefix", self.request.prefix.as_deref())
            .query_opt("marker", (!marker.is_empty()).then_some(marker))
            .query_opt("maxresults", self.request.max_page_size);
        let response = self
            .inner
            .xml::<ListFilesAndDirectoriesResult>(request)
            .await?;
        let metadata = response_metadata(&response)?;
        Ok(ListFilesAndDirectoriesPage::new(response.into_body(), metadata))
    }
}

/// The request builder for [DirectoryClient::list_files_and_directories][crate::client::DirectoryClient::list_files_and_directories] calls.
///
/// The listing is not recursive, subdirectories are returned as
/// [DirectoryEntry::Directory] entries.
///
/// # Example
/// ```no_run
/// # use azure_storage_file::builder::directory_client::ListFilesAndDirectories;
/// # tokio_test::block_on(async {
/// use azure_storage_file::model::DirectoryEntry;
/// use futures::TryStreamExt;
/// let builder = prepare_request_builder();
/// let mut entries = builder.by_item();
/// while let Some(entry) = entries.try_next().await? {
///     match entry {
///         DirectoryEntry::File(f) => println!("{} {}", f.name, f.properties.content_length),
///         DirectoryEntry::Directory(d) => println!("{}/", d.name),
///         _ => {}
///     }
/// }
/// # azure_storage_file::Result::<()>::Ok(()) });
///
/// fn prepare_request_builder() -> ListFilesAndDirectories {
///   # panic!();
///   // ... details omitted ...
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ListFilesAndDirectories(RequestBuilder<ListFilesRequest>);

impl ListFilesAndDirectories {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(
            inner,
            &crate::operations::LIST_FILES_AND_DIRECTORIES,
            target,
        ))
    }

    /// Sends the request, returns a single page.
    #[tracing::instrument(name = "DirectoryClient::list_files_and_directories", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ListFilesAndDirectoriesPage> {
        let marker = self.0.request.continuation_token.clone().unwrap_or_default();
        self.0.fetch(marker).await
    }

    /// Streams the pages of the listing.
    pub fn by_page(self) -> Paginator<ListFilesAndDirectoriesPage, crate::Error> {
        let seed = self.0.request.continuation_token.clone().unwrap_or_default();
        let execute = move |marker: String| {
            let builder = self.0.clone();
            builder.fetch(marker)
        };
        Paginator::new(seed, execute)
    }

    /// Streams the entries, fetching new pages as needed.
    pub fn by_item(self) -> ItemPaginator<ListFilesAndDirectoriesPage, crate::Error> {
        self.by_page().items()
    }

    /// Only list the entries with names starting with this prefix.
    pub fn set_prefix<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.prefix = Some(v.into());
        self
    }

    /// The maximum number of entries in each page, at most 5000.
    pub fn set_max_page_size(mut self, v: i32) -> Self {
        self.0.request.max_page_size = Some(v);
        self
    }

    /// Resumes a listing from the `next_marker` of a previous page.
    pub fn set_continuation_token<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.continuation_token = Some(v.into());
        self
    }

    /// Applies the continuation token and page size in `v`.
    pub fn with_page_settings(mut self, v: PageSettings) -> Self {
        if let Some(token) = v.continuation_token {
            self.0.request.continuation_token = Some(token);
        }
        if let Some(size) = v.max_page_size {
            self.0.request.max_page_size = Some(size);
        }
        self
    }
}

request_builder!(ListFilesAndDirectories);
