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
    CREATE_FILE_DEFAULTS, PRESERVE, RequestBuilder, SmbRequest, Target, metadata_setter,
    request_builder, response_metadata, smb_setters,
};
use crate::Result;
use crate::model::*;
use azcore::error::Error;
use azcore::options::RequestOptions;
use azcorei::client::PipelineClient;
use azcorei::headers;
use azcorei::operation::{OperationRequest, required};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;

/// A builder for [FileClient][crate::client::FileClient].
///
/// ```no_run
/// # tokio_test::block_on(async {
/// # use azure_storage_file::*;
/// # use builder::file_client::ClientBuilder;
/// # use client::FileClient;
/// let builder: ClientBuilder = FileClient::builder(
///     "https://myaccount.file.core.windows.net",
///     "my-share",
///     "reports/2019/january.csv",
/// );
/// let client = builder.build().await?;
/// # anyhow::Result::<()>::Ok(()) });
/// ```
pub type ClientBuilder =
    azcore::client_builder::ClientBuilder<client::Factory, azcorei::options::Credentials>;

pub(crate) mod client {
    use crate::client::FileClient;
    #[derive(Debug)]
    pub struct Factory(pub(crate) String, pub(crate) String);
    impl azcore::client_builder::internal::ClientFactory for Factory {
        type Client = FileClient;
        type Credentials = azcorei::options::Credentials;
        async fn build(
            self,
            config: azcorei::options::ClientConfig,
        ) -> azcore::client_builder::Result<Self::Client> {
            Self::Client::new(config, self.0, self.1).await
        }
    }
}

fn apply_http_headers(request: OperationRequest, http_headers: &FileHttpHeaders) -> OperationRequest {
    http_headers
        .request_headers()
        .into_iter()
        .fold(request, |r, (name, value)| r.header(name, value))
}

#[derive(Debug, thiserror::Error)]
#[error("cannot upload or clear an empty range at offset {0}")]
struct EmptyRange(u64);

#[derive(Clone, Debug, Default)]
pub(crate) struct CreateFileRequest {
    size: u64,
    http_headers: FileHttpHeaders,
    metadata: HashMap<String, String>,
    smb: SmbRequest,
}

/// The request builder for [FileClient::create][crate::client::FileClient::create] calls.
///
/// Creates a new file, or replaces an existing file, with the given size.
/// The file content is initially zeroes, use
/// [FileClient::upload_range][crate::client::FileClient::upload_range] to
/// write the data.
///
/// # Example
/// ```no_run
/// # use azure_storage_file::builder::file_client::Create;
/// # tokio_test::block_on(async {
/// use azure_storage_file::model::FileHttpHeaders;
/// let builder = prepare_request_builder();
/// let info = builder
///     .set_http_headers(FileHttpHeaders::new().set_content_type("text/csv"))
///     .set_metadata([("source", "billing")])
///     .send()
///     .await?;
/// println!("created file {:?}", info.smb.file_id);
/// # azure_storage_file::Result::<()>::Ok(()) });
///
/// fn prepare_request_builder() -> Create {
///   # panic!();
///   // ... details omitted ...
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Create(RequestBuilder<CreateFileRequest>);

impl Create {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target, size: u64) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::CREATE_FILE, target).with_request(
                CreateFileRequest {
                    size,
                    ..Default::default()
                },
            ),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileClient::create", level = "debug", skip_all)]
    pub async fn send(self) -> Result<FileInfo> {
        let request = self
            .0
            .request
            .smb
            .apply(self.0.file_request()?, &CREATE_FILE_DEFAULTS)?
            .header(names::TYPE, "file")
            .header(names::CONTENT_LENGTH, self.0.request.size)
            .metadata(&self.0.request.metadata);
        let request = apply_http_headers(request, &self.0.request.http_headers);
        let response = self.0.inner.empty(request).await?;
        FileInfo::from_headers(response.headers())
    }

    /// Sets the content type, encoding, and other standard HTTP properties.
    pub fn set_http_headers(mut self, v: FileHttpHeaders) -> Self {
        self.0.request.http_headers = v;
        self
    }

    metadata_setter!();
    smb_setters!();
}

request_builder!(Create);

#[derive(Clone, Debug, Default)]
pub(crate) struct DownloadRequest {
    range: Option<FileRange>,
    range_content_md5: bool,
}

/// The request builder for [FileClient::download][crate::client::FileClient::download] calls.
///
/// # Example
/// ```no_run
/// # use azure_storage_file::builder::file_client::Download;
/// # tokio_test::block_on(async {
/// use azure_storage_file::model::FileRange;
/// let builder = prepare_request_builder();
/// let download = builder.set_range(FileRange::new(0, 1023)).send().await?;
/// println!("read {} of {} bytes", download.content.len(), download.file_size());
/// # azure_storage_file::Result::<()>::Ok(()) });
///
/// fn prepare_request_builder() -> Download {
///   # panic!();
///   // ... details omitted ...
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Download(RequestBuilder<DownloadRequest>);

impl Download {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(inner, &crate::operations::DOWNLOAD, target))
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileClient::download", level = "debug", skip_all)]
    pub async fn send(self) -> Result<FileDownload> {
        let range = self.0.request.range;
        let request = self
            .0
            .snapshot(self.0.file_request()?)
            .header_opt(names::RANGE, range.map(|r| r.header_value()))
            .header_opt(
                names::RANGE_GET_CONTENT_MD5,
                (range.is_some() && self.0.request.range_content_md5).then_some(true),
            );
        let response = self.0.inner.send(request).await?;
        let properties = FileProperties::from_headers(response.headers())?;
        let content_range =
            headers::get_string(response.headers(), http::header::CONTENT_RANGE.as_str());
        Ok(FileDownload {
            content: response.into_body(),
            content_range,
            properties,
        })
    }

    /// Only download the bytes in this range.
    pub fn set_range(mut self, v: FileRange) -> Self {
        self.0.request.range = Some(v);
        self
    }

    /// Ask the service to return the MD5 hash of the range.
    ///
    /// Only used with [Download::set_range], the range must be at most
    /// 4 MiB.
    pub fn set_range_content_md5(mut self, v: bool) -> Self {
        self.0.request.range_content_md5 = v;
        self
    }
}

request_builder!(Download);

/// The request builder for [FileClient::get_properties][crate::client::FileClient::get_properties] calls.
#[derive(Clone, Debug)]
pub struct GetProperties(RequestBuilder<()>);

impl GetProperties {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(
            inner,
            &crate::operations::GET_FILE_PROPERTIES,
            target,
        ))
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileClient::get_properties", level = "debug", skip_all)]
    pub async fn send(self) -> Result<FileProperties> {
        let request = self.0.snapshot(self.0.file_request()?);
        let response = self.0.inner.empty(request).await?;
        FileProperties::from_headers(response.headers())
    }
}

request_builder!(GetProperties);

/// The request builder for [FileClient::delete][crate::client::FileClient::delete] calls.
#[derive(Clone, Debug)]
pub struct Delete(RequestBuilder<()>);

impl Delete {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(inner, &crate::operations::DELETE_FILE, target))
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileClient::delete", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ResponseMetadata> {
        let request = self.0.file_request()?;
        let response = self.0.inner.empty(request).await?;
        response_metadata(&response)
    }
}

request_builder!(Delete);

#[derive(Clone, Debug, Default)]
pub(crate) struct SetHttpHeadersRequest {
    http_headers: FileHttpHeaders,
    size: Option<u64>,
    smb: SmbRequest,
}

/// The request builder for [FileClient::set_http_headers][crate::client::FileClient::set_http_headers] calls.
///
/// The standard HTTP properties are replaced: any property not set in
/// [SetHttpHeaders::set_http_headers] is cleared. The SMB properties not set
/// in the builder keep their current values.
#[derive(Clone, Debug)]
pub struct SetHttpHeaders(RequestBuilder<SetHttpHeadersRequest>);

impl SetHttpHeaders {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(inner, &crate::operations::SET_HTTP_HEADERS, target))
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileClient::set_http_headers", level = "debug", skip_all)]
    pub async fn send(self) -> Result<FileInfo> {
        let request = self
            .0
            .request
            .smb
            .apply(self.0.file_request()?, &PRESERVE)?
            .header_opt(names::CONTENT_LENGTH, self.0.request.size);
        let request = apply_http_headers(request, &self.0.request.http_headers);
        let response = self.0.inner.empty(request).await?;
        FileInfo::from_headers(response.headers())
    }

    /// Sets the content type, encoding, and other standard HTTP properties.
    pub fn set_http_headers(mut self, v: FileHttpHeaders) -> Self {
        self.0.request.http_headers = v;
        self
    }

    /// Resizes the file. Growing a file fills the new bytes with zeroes,
    /// shrinking it discards the data beyond the new size.
    pub fn set_file_size(mut self, v: u64) -> Self {
        self.0.request.size = Some(v);
        self
    }

    smb_setters!();
}

request_builder!(SetHttpHeaders);

/// The request builder for [FileClient::set_metadata][crate::client::FileClient::set_metadata] calls.
#[derive(Clone, Debug)]
pub struct SetMetadata(RequestBuilder<HashMap<String, String>>);

impl SetMetadata {
    pub(crate) fn new(
        inner: Arc<PipelineClient>,
        target: Target,
        metadata: HashMap<String, String>,
    ) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::SET_FILE_METADATA, target)
                .with_request(metadata),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileClient::set_metadata", level = "debug", skip_all)]
    pub async fn send(self) -> Result<FileInfo> {
        let request = self.0.file_request()?.metadata(&self.0.request);
        let response = self.0.inner.empty(request).await?;
        FileInfo::from_headers(response.headers())
    }
}

request_builder!(SetMetadata);

#[derive(Clone, Debug, Default)]
pub(crate) struct UploadRangeRequest {
    offset: u64,
    data: Bytes,
    content_md5: Option<Vec<u8>>,
}

/// The request builder for [FileClient::upload_range][crate::client::FileClient::upload_range] calls.
///
/// Writes the data at the given offset. The range must be within the file
/// size and at most 4 MiB. Empty uploads are rejected with a binding error.
///
/// # Example
/// ```no_run
/// # use azure_storage_file::builder::file_client::UploadRange;
/// # tokio_test::block_on(async {
/// let builder = prepare_request_builder();
/// let info = builder.send().await?;
/// println!("range written, etag={:?}", info.etag);
/// # azure_storage_file::Result::<()>::Ok(()) });
///
/// fn prepare_request_builder() -> UploadRange {
///   # panic!();
///   // ... details omitted ...
/// }
/// ```
#[derive(Clone, Debug)]
pub struct UploadRange(RequestBuilder<UploadRangeRequest>);

impl UploadRange {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target, offset: u64, data: Bytes) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::UPLOAD_RANGE, target).with_request(
                UploadRangeRequest {
                    offset,
                    data,
                    content_md5: None,
                },
            ),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileClient::upload_range", level = "debug", skip_all)]
    pub async fn send(self) -> Result<RangeInfo> {
        let UploadRangeRequest {
            offset,
            data,
            content_md5,
        } = self.0.request.clone();
        let range = FileRange::with_len(offset, data.len() as u64)
            .ok_or_else(|| Error::binding(EmptyRange(offset)))?;
        let request = self
            .0
            .file_request()?
            .header(names::RANGE, range.header_value())
            .header(names::WRITE, "update")
            .header_opt(
                "content-md5",
                content_md5.map(|v| {
                    use base64::Engine;
                    base64::engine::general_purpose::STANDARD.encode(v)
                }),
            )
            .bytes_body(data);
        let response = self.0.inner.empty(request).await?;
        RangeInfo::from_headers(response.headers())
    }

    /// The MD5 hash of the data. The service rejects the upload if the data
    /// does not match.
    pub fn set_content_md5<T: Into<Vec<u8>>>(mut self, v: T) -> Self {
        self.0.request.content_md5 = Some(v.into());
        self
    }
}

request_builder!(UploadRange);

/// The request builder for [FileClient::clear_range][crate::client::FileClient::clear_range] calls.
///
/// The cleared range no longer uses storage, reads return zeroes.
#[derive(Clone, Debug)]
pub struct ClearRange(RequestBuilder<FileRange>);

impl ClearRange {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target, range: FileRange) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::CLEAR_RANGE, target)
                .with_request(range),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileClient::clear_range", level = "debug", skip_all)]
    pub async fn send(self) -> Result<RangeInfo> {
        let range = self.0.request;
        if range.end < range.start {
            return Err(Error::binding(EmptyRange(range.start)));
        }
        let request = self
            .0
            .file_request()?
            .header(names::RANGE, range.header_value())
            .header(names::WRITE, "clear");
        let response = self.0.inner.empty(request).await?;
        RangeInfo::from_headers(response.headers())
    }
}

request_builder!(ClearRange);

/// The request builder for [FileClient::get_range_list][crate::client::FileClient::get_range_list] calls.
#[derive(Clone, Debug)]
pub struct GetRangeList(RequestBuilder<Option<FileRange>>);

impl GetRangeList {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(inner, &crate::operations::GET_RANGE_LIST, target))
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileClient::get_range_list", level = "debug", skip_all)]
    pub async fn send(self) -> Result<RangeList> {
        let request = self
            .0
            .snapshot(self.0.file_request()?)
            .header_opt(names::RANGE, self.0.request.map(|r| r.header_value()));
        let response = self.0.inner.xml::<RangesResult>(request).await?;
        Ok(RangeList {
            file_content_length: headers::get_parse::<i64>(
                response.headers(),
                names::CONTENT_LENGTH,
            )?
            .unwrap_or_default(),
            etag: headers::etag(response.headers()),
            last_modified: headers::last_modified(response.headers())?,
            response: response_metadata(&response)?,
            ranges: response.into_body().items,
        })
    }

    /// Only list the valid ranges overlapping this range.
    pub fn set_range(mut self, v: FileRange) -> Self {
        self.0.request = Some(v);
        self
    }
}

request_builder!(GetRangeList);

#[derive(Clone, Debug, Default)]
pub(crate) struct StartCopyRequest {
    source: String,
    metadata: HashMap<String, String>,
}

/// The request builder for [FileClient::start_copy][crate::client::FileClient::start_copy] calls.
///
/// The copy runs in the background. Poll
/// [FileClient::get_properties][crate::client::FileClient::get_properties]
/// until the copy status is no longer `pending`.
#[derive(Clone, Debug)]
pub struct StartCopy(RequestBuilder<StartCopyRequest>);

impl StartCopy {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target, source: String) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::START_COPY, target).with_request(
                StartCopyRequest {
                    source,
                    ..Default::default()
                },
            ),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileClient::start_copy", level = "debug", skip_all)]
    pub async fn send(self) -> Result<CopyInfo> {
        let request = self
            .0
            .file_request()?
            .header(
                names::COPY_SOURCE,
                required("source_url", &self.0.request.source)?,
            )
            .metadata(&self.0.request.metadata);
        let response = self.0.inner.empty(request).await?;
        CopyInfo::from_headers(response.headers())
    }

    metadata_setter!();
}

request_builder!(StartCopy);

/// The request builder for [FileClient::abort_copy][crate::client::FileClient::abort_copy] calls.
///
/// Aborting leaves the destination file with zero length and full metadata.
#[derive(Clone, Debug)]
pub struct AbortCopy(RequestBuilder<String>);

impl AbortCopy {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target, copy_id: String) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::ABORT_COPY, target)
                .with_request(copy_id),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileClient::abort_copy", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ResponseMetadata> {
        let request = self
            .0
            .file_request()?
            .query("copyid", required("copy_id", &self.0.request)?)
            .header(names::COPY_ACTION, "abort");
        let response = self.0.inner.empty(request).await?;
        response_metadata(&response)
    }
}

request_builder!(AbortCopy);
