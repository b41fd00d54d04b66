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

use super::{RequestBuilder, Target, request_builder, response_metadata};
use crate::Result;
use crate::model::*;
use azcore::options::RequestOptions;
use azcore::paginator::{ItemPaginator, PageSettings, Paginator};
use azcorei::client::PipelineClient;
use std::sync::Arc;

/// A builder for [FileServiceClient][crate::client::FileServiceClient].
///
/// ```no_run
/// # tokio_test::block_on(async {
/// # use azure_storage_file::*;
/// # use builder::file_service_client::ClientBuilder;
/// # use client::FileServiceClient;
/// let builder: ClientBuilder = FileServiceClient::builder("https://myaccount.file.core.windows.net");
/// let client = builder
///     .with_user_agent_prefix("my-app/1.0")
///     .build()
///     .await?;
/// # anyhow::Result::<()>::Ok(()) });
/// ```
pub type ClientBuilder =
    azcore::client_builder::ClientBuilder<client::Factory, azcorei::options::Credentials>;

pub(crate) mod client {
    use crate::client::FileServiceClient;
    #[derive(Debug)]
    pub struct Factory;
    impl azcore::client_builder::internal::ClientFactory for Factory {
        type Client = FileServiceClient;
        type Credentials = azcorei::options::Credentials;
        async fn build(
            self,
            config: azcorei::options::ClientConfig,
        ) -> azcore::client_builder::Result<Self::Client> {
            Self::Client::new(config).await
        }
    }
}

/// The request builder for [FileServiceClient::get_properties][crate::client::FileServiceClient::get_properties] calls.
#[derive(Clone, Debug)]
pub struct GetProperties(RequestBuilder<()>);

impl GetProperties {
    pub(crate) fn new(inner: Arc<PipelineClient>) -> Self {
        Self(RequestBuilder::new(
            inner,
            &crate::operations::GET_SERVICE_PROPERTIES,
            Target::default(),
        ))
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileServiceClient::get_properties", level = "debug", skip_all)]
    pub async fn send(self) -> Result<FileServiceProperties> {
        let response = self
            .0
            .inner
            .xml::<FileServiceProperties>(self.0.operation_request())
            .await?;
        let metadata = response_metadata(&response)?;
        let mut properties = response.into_body();
        properties.response = metadata;
        Ok(properties)
    }
}

request_builder!(GetProperties);

/// The request builder for [FileServiceClient::set_properties][crate::client::FileServiceClient::set_properties] calls.
#[derive(Clone, Debug)]
pub struct SetProperties(RequestBuilder<FileServiceProperties>);

impl SetProperties {
    pub(crate) fn new(inner: Arc<PipelineClient>, properties: FileServiceProperties) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::SET_SERVICE_PROPERTIES, Target::default())
                .with_request(properties),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "FileServiceClient::set_properties", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ResponseMetadata> {
        let request = self
            .0
            .operation_request()
            .xml_body("StorageServiceProperties", &self.0.request)?;
        let response = self.0.inner.empty(request).await?;
        response_metadata(&response)
    }

    /// Sets the hourly metrics settings.
    pub fn set_hour_metrics(mut self, v: Metrics) -> Self {
        self.0.request.hour_metrics = Some(v);
        self
    }

    /// Sets the minute metrics settings.
    pub fn set_minute_metrics(mut self, v: Metrics) -> Self {
        self.0.request.minute_metrics = Some(v);
        self
    }

    /// Replaces the CORS rules. An empty list removes all the rules.
    pub fn set_cors<T: IntoIterator<Item = CorsRule>>(mut self, v: T) -> Self {
        self.0.request.cors = Some(Cors::new(v));
        self
    }
}

request_builder!(SetProperties);

#[derive(Clone, Debug, Default)]
pub(crate) struct ListSharesRequest {
    prefix: Option<String>,
    include_metadata: bool,
    include_snapshots: bool,
    max_page_size: Option<i32>,
    continuation_token: Option<String>,
}

impl ListSharesRequest {
    fn include(&self) -> Option<String> {
        let values = [
            (self.include_snapshots, "snapshots"),
            (self.include_metadata, "metadata"),
        ]
        .into_iter()
        .filter_map(|(enabled, name)| enabled.then_some(name))
        .collect::<Vec<_>>();
        (!values.is_empty()).then(|| values.join(","))
    }
}

impl RequestBuilder<ListSharesRequest> {
    async fn fetch(self, marker: String) -> Result<ListSharesPage> {
        let request = self
            .operation_request()
            .query_opt("prefix", self.request.prefix.as_deref())
            .query_opt("marker", (!marker.is_empty()).then_some(marker))
            .query_opt("maxresults", self.request.max_page_size)
            .query_opt("include", self.request.include());
        let response = self.inner.xml::<ListSharesResult>(request).await?;
        let metadata = response_metadata(&response)?;
        Ok(ListSharesPage::new(response.into_body(), metadata))
    }
}

/// The request builder for [FileServiceClient::list_shares][crate::client::FileServiceClient::list_shares] calls.
///
/// # Example
/// ```no_run
/// # use azure_storage_file::builder::file_service_client::ListShares;
/// # tokio_test::block_on(async {
/// use futures::TryStreamExt;
/// let builder = prepare_request_builder();
/// let mut shares = builder.set_include_snapshots(true).by_item();
/// while let Some(share) = shares.try_next().await? {
///     println!("{} {:?}", share.name, share.snapshot);
/// }
/// # azure_storage_file::Result::<()>::Ok(()) });
///
/// fn prepare_request_builder() -> ListShares {
///   # panic!();
///   // ... details omitted ...
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ListShares(RequestBuilder<ListSharesRequest>);

impl ListShares {
    pub(crate) fn new(inner: Arc<PipelineClient>) -> Self {
        Self(RequestBuilder::new(
            inner,
            &crate::operations::LIST_SHARES,
            Target::default(),
        ))
    }

    /// Sends the request, returns a single page.
    #[tracing::instrument(name = "FileServiceClient::list_shares", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ListSharesPage> {
        let marker = self.0.request.continuation_token.clone().unwrap_or_default();
        self.0.fetch(marker).await
    }

    /// Streams the pages of the listing.
    pub fn by_page(self) -> Paginator<ListSharesPage, crate::Error> {
        let seed = self.0.request.continuation_token.clone().unwrap_or_default();
        let execute = move |marker: String| {
            let builder = self.0.clone();
            builder.fetch(marker)
        };
        Paginator::new(seed, execute)
    }

    /// Streams the shares, fetching new pages as needed.
    pub fn by_item(self) -> ItemPaginator<ListSharesPage, crate::Error> {
        self.by_page().items()
    }

    /// Only list the shares with names starting with this prefix.
    pub fn set_prefix<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.prefix = Some(v.into());
        self
    }

    /// Include the metadata of each share.
    pub fn set_include_metadata(mut self, v: bool) -> Self {
        self.0.request.include_metadata = v;
        self
    }

    /// Include the share snapshots, listed after their base share.
    pub fn set_include_snapshots(mut self, v: bool) -> Self {
        self.0.request.include_snapshots = v;
        self
    }

    /// The maximum number of shares in each page, at most 5000.
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

request_builder!(ListShares);
