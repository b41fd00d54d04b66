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

//! Request builders for the SMB handle operations, shared by
//! [DirectoryClient][crate::client::DirectoryClient] and
//! [FileClient][crate::client::FileClient].

use super::{RequestBuilder, Target, request_builder, response_metadata};
use crate::Result;
use crate::model::*;
use azcore::options::RequestOptions;
use azcore::paginator::{ItemPaginator, PageSettings, Paginator};
use azcorei::client::PipelineClient;
use azcorei::operation::{OperationRequest, required};
use std::sync::Arc;

/// Whether the handles are listed or closed on a directory or a file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Kind {
    #[default]
    Directory,
    File,
}

impl<R> RequestBuilder<R>
where
    R: std::default::Default,
{
    fn handles_request(&self, kind: Kind, recursive: bool) -> Result<OperationRequest> {
        let request = match kind {
            Kind::Directory => self
                .directory_request()?
                .header_opt(names::RECURSIVE, recursive.then_some(true)),
            Kind::File => self.file_request()?,
        };
        Ok(self.snapshot(request))
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ListHandlesRequest {
    kind: Kind,
    recursive: bool,
    max_page_size: Option<i32>,
    continuation_token: Option<String>,
}

impl RequestBuilder<ListHandlesRequest> {
    async fn fetch(self, marker: String) -> Result<ListHandlesPage> {
        let request = self
            .handles_request(self.request.kind, self.request.recursive)?
            .query_opt("marker", (!marker.is_empty()).then_some(marker))
            .query_opt("maxresults", self.request.max_page_size);
        let response = self.inner.xml::<ListHandlesResult>(request).await?;
        let metadata = response_metadata(&response)?;
        Ok(ListHandlesPage::new(response.into_body(), metadata))
    }
}

/// The request builder for
/// [DirectoryClient::list_handles][crate::client::DirectoryClient::list_handles] and
/// [FileClient::list_handles][crate::client::FileClient::list_handles] calls.
///
/// # Example
/// ```no_run
/// # use azure_storage_file::builder::handles::ListHandles;
/// # tokio_test::block_on(async {
/// use futures::TryStreamExt;
/// let builder = prepare_request_builder();
/// let mut handles = builder.set_recursive(true).by_item();
/// while let Some(handle) = handles.try_next().await? {
///     println!("{} opened by {}", handle.path, handle.client_ip);
/// }
/// # azure_storage_file::Result::<()>::Ok(()) });
///
/// fn prepare_request_builder() -> ListHandles {
///   # panic!();
///   // ... details omitted ...
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ListHandles(RequestBuilder<ListHandlesRequest>);

impl ListHandles {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target, kind: Kind) -> Self {
        let operation = match kind {
            Kind::Directory => &crate::operations::LIST_DIRECTORY_HANDLES,
            Kind::File => &crate::operations::LIST_FILE_HANDLES,
        };
        let mut builder = RequestBuilder::<ListHandlesRequest>::new(inner, operation, target);
        builder.request.kind = kind;
        Self(builder)
    }

    /// Sends the request, returns a single page.
    #[tracing::instrument(name = "list_handles", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ListHandlesPage> {
        let marker = self.0.request.continuation_token.clone().unwrap_or_default();
        self.0.fetch(marker).await
    }

    /// Streams the pages of the listing.
    pub fn by_page(self) -> Paginator<ListHandlesPage, crate::Error> {
        let seed = self.0.request.continuation_token.clone().unwrap_or_default();
        let execute = move |marker: String| {
            let builder = self.0.clone();
            builder.fetch(marker)
        };
        Paginator::new(seed, execute)
    }

    /// Streams the handles, fetching new pages as needed.
    pub fn by_item(self) -> ItemPaginator<ListHandlesPage, crate::Error> {
        self.by_page().items()
    }

    /// Include the handles open on the files and subdirectories. Ignored
    /// for files.
    pub fn set_recursive(mut self, v: bool) -> Self {
        self.0.request.recursive = v;
        self
    }

    /// The maximum number of handles in each page, at most 5000.
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

request_builder!(ListHandles);

#[derive(Clone, Debug, Default)]
pub(crate) struct CloseHandlesRequest {
    kind: Kind,
    handle_id: String,
    recursive: bool,
    marker: Option<String>,
}

impl RequestBuilder<CloseHandlesRequest> {
    fn new_close(inner: Arc<PipelineClient>, target: Target, kind: Kind, handle_id: String) -> Self {
        let operation = match kind {
            Kind::Directory => &crate::operations::FORCE_CLOSE_DIRECTORY_HANDLES,
            Kind::File => &crate::operations::FORCE_CLOSE_FILE_HANDLES,
        };
        Self::new(inner, operation, target).with_request(CloseHandlesRequest {
            kind,
            handle_id,
            ..Default::default()
        })
    }

    async fn close(&self) -> Result<ForceCloseHandlesResult> {
        let request = self
            .handles_request(self.request.kind, self.request.recursive)?
            .query_opt("marker", self.request.marker.as_deref())
            .header(
                names::HANDLE_ID,
                required("handle_id", &self.request.handle_id)?,
            );
        let response = self.inner.empty(request).await?;
        ForceCloseHandlesResult::from_headers(response.headers())
    }
}

/// The request builder for
/// [DirectoryClient::force_close_handles][crate::client::DirectoryClient::force_close_handles] and
/// [FileClient::force_close_handles][crate::client::FileClient::force_close_handles] calls.
///
/// The service may close only some of the handles. Check the `marker` in
/// the result and repeat the call with [ForceCloseHandles::set_marker], or
/// use `force_close_all_handles()`.
#[derive(Clone, Debug)]
pub struct ForceCloseHandles(RequestBuilder<CloseHandlesRequest>);

impl ForceCloseHandles {
    pub(crate) fn new(
        inner: Arc<PipelineClient>,
        target: Target,
        kind: Kind,
        handle_id: String,
    ) -> Self {
        Self(RequestBuilder::new_close(inner, target, kind, handle_id))
    }

    /// Sends the request.
    #[tracing::instrument(name = "force_close_handles", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ForceCloseHandlesResult> {
        self.0.close().await
    }

    /// Continues closing handles from the `marker` of a previous result.
    pub fn set_marker<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.marker = Some(v.into());
        self
    }

    /// Also close the handles open on the files and subdirectories. Ignored
    /// for files.
    pub fn set_recursive(mut self, v: bool) -> Self {
        self.0.request.recursive = v;
        self
    }
}

request_builder!(ForceCloseHandles);

/// The request builder for
/// [DirectoryClient::force_close_all_handles][crate::client::DirectoryClient::force_close_all_handles]
/// and [FileClient::force_close_all_handles][crate::client::FileClient::force_close_all_handles]
/// calls.
///
/// Sends force close requests until the service reports no handles remain.
/// The result contains the total number of closed handles.
#[derive(Clone, Debug)]
pub struct ForceCloseAllHandles(RequestBuilder<CloseHandlesRequest>);

impl ForceCloseAllHandles {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target, kind: Kind) -> Self {
        Self(RequestBuilder::new_close(inner, target, kind, "*".to_string()))
    }

    /// Sends the requests.
    #[tracing::instrument(name = "force_close_all_handles", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ForceCloseHandlesResult> {
        let mut builder = self.0;
        let mut closed = 0;
        loop {
            let result = builder.close().await?;
            closed += result.closed_handles_count;
            if result.marker.is_empty() {
                return Ok(ForceCloseHandlesResult {
                    closed_handles_count: closed,
                    ..result
                });
            }
            tracing::debug!(closed, "more handles remain");
            builder.request.marker = Some(result.marker);
        }
    }

    /// Also close the handles open on the files and subdirectories. Ignored
    /// for files.
    pub fn set_recursive(mut self, v: bool) -> Self {
        self.0.request.recursive = v;
        self
    }
}

request_builder!(ForceCloseAllHandles);
