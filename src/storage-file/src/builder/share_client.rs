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

use super::{RequestBuilder, Target, metadata_setter, request_builder, response_metadata};
use crate::Result;
use crate::model::*;
use azcore::options::RequestOptions;
use azcorei::client::PipelineClient;
use azcorei::headers;
use azcorei::operation::{OperationRequest, required};
use std::collections::HashMap;
use std::sync::Arc;

/// A builder for [ShareClient][crate::client::ShareClient].
///
/// ```no_run
/// # tokio_test::block_on(async {
/// # use azure_storage_file::*;
/// # use builder::share_client::ClientBuilder;
/// # use client::ShareClient;
/// let builder: ClientBuilder =
///     ShareClient::builder("https://myaccount.file.core.windows.net", "my-share");
/// let client = builder.with_tracing().build().await?;
/// # anyhow::Result::<()>::Ok(()) });
/// ```
pub type ClientBuilder =
    azcore::client_builder::ClientBuilder<client::Factory, azcorei::options::Credentials>;

pub(crate) mod client {
    use crate::client::ShareClient;
    #[derive(Debug)]
    pub struct Factory(pub(crate) String);
    impl azcore::client_builder::internal::ClientFactory for Factory {
        type Client = ShareClient;
        type Credentials = azcorei::options::Credentials;
        async fn build(
            self,
            config: azcorei::options::ClientConfig,
        ) -> azcore::client_builder::Result<Self::Client> {
            Self::Client::new(config, self.0).await
        }
    }
}

impl<R> RequestBuilder<R>
where
    R: std::default::Default,
{
    async fn share_info(self) -> Result<ShareInfo>
    where
        R: ShareBody,
    {
        let request = self.request.apply(self.share_request()?)?;
        let response = self.inner.empty(request).await?;
        ShareInfo::from_headers(response.headers())
    }
}

/// The request parameters and body of the operations returning [ShareInfo].
trait ShareBody {
    fn apply(&self, request: OperationRequest) -> Result<OperationRequest>;
}

#[derive(Clone, Debug, Default)]
pub(crate) struct CreateShareRequest {
    metadata: HashMap<String, String>,
    quota: Option<i32>,
}

impl ShareBody for CreateShareRequest {
    fn apply(&self, request: OperationRequest) -> Result<OperationRequest> {
        Ok(request
            .metadata(&self.metadata)
            .header_opt(names::SHARE_QUOTA, self.quota))
    }
}

/// The request builder for [ShareClient::create][crate::client::ShareClient::create] calls.
///
/// Creating a share that already exists fails with a `409 Conflict` error.
#[derive(Clone, Debug)]
pub struct Create(RequestBuilder<CreateShareRequest>);

impl Create {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(inner, &crate::operations::CREATE_SHARE, target))
    }

    /// Sends the request.
    #[tracing::instrument(name = "ShareClient::create", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ShareInfo> {
        self.0.share_info().await
    }

    metadata_setter!();

    /// The maximum size of the share, in GiB. The service uses 5 TiB by
    /// default.
    pub fn set_quota(mut self, v: i32) -> Self {
        self.0.request.quota = Some(v);
        self
    }
}

request_builder!(Create);

/// The request builder for [ShareClient::get_properties][crate::client::ShareClient::get_properties] calls.
#[derive(Clone, Debug)]
pub struct GetProperties(RequestBuilder<()>);

impl GetProperties {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(
            inner,
            &crate::operations::GET_SHARE_PROPERTIES,
            target,
        ))
    }

    /// Sends the request.
    #[tracing::instrument(name = "ShareClient::get_properties", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ShareProperties> {
        let request = self.0.snapshot(self.0.share_request()?);
        let response = self.0.inner.empty(request).await?;
        ShareProperties::from_headers(response.headers())
    }
}

request_builder!(GetProperties);

/// The request builder for [ShareClient::delete][crate::client::ShareClient::delete] calls.
///
/// A share with snapshots cannot be deleted unless the snapshots are
/// included, see [Delete::set_include_snapshots]. If the client targets a
/// snapshot, only the snapshot is deleted.
#[derive(Clone, Debug)]
pub struct Delete(RequestBuilder<bool>);

impl Delete {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(inner, &crate::operations::DELETE_SHARE, target))
    }

    /// Sends the request.
    #[tracing::instrument(name = "ShareClient::delete", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ResponseMetadata> {
        let request = self
            .0
            .snapshot(self.0.share_request()?)
            .header_opt(names::DELETE_SNAPSHOTS, self.0.request.then_some("include"));
        let response = self.0.inner.empty(request).await?;
        response_metadata(&response)
    }

    /// Also delete the snapshots of the share.
    pub fn set_include_snapshots(mut self, v: bool) -> Self {
        self.0.request = v;
        self
    }
}

request_builder!(Delete);

#[derive(Clone, Debug, Default)]
pub(crate) struct MetadataRequest {
    metadata: HashMap<String, String>,
}

impl ShareBody for MetadataRequest {
    fn apply(&self, request: OperationRequest) -> Result<OperationRequest> {
        Ok(request.metadata(&self.metadata))
    }
}

/// The request builder for [ShareClient::create_snapshot][crate::client::ShareClient::create_snapshot] calls.
#[derive(Clone, Debug)]
pub struct CreateSnapshot(RequestBuilder<MetadataRequest>);

impl CreateSnapshot {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(inner, &crate::operations::CREATE_SNAPSHOT, target))
    }

    /// Sends the request.
    #[tracing::instrument(name = "ShareClient::create_snapshot", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ShareSnapshot> {
        let request = self.0.request.apply(self.0.share_request()?)?;
        let response = self.0.inner.empty(request).await?;
        ShareSnapshot::from_headers(response.headers())
    }

    /// Sets the snapshot metadata. By default the snapshot has the same
    /// metadata as the share.
    pub fn set_metadata<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.0.request.metadata = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }
}

request_builder!(CreateSnapshot);

/// The request builder for [ShareClient::set_metadata][crate::client::ShareClient::set_metadata] calls.
#[derive(Clone, Debug)]
pub struct SetMetadata(RequestBuilder<MetadataRequest>);

impl SetMetadata {
    pub(crate) fn new(
        inner: Arc<PipelineClient>,
        target: Target,
        metadata: HashMap<String, String>,
    ) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::SET_SHARE_METADATA, target)
                .with_request(MetadataRequest { metadata }),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "ShareClient::set_metadata", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ShareInfo> {
        self.0.share_info().await
    }
}

request_builder!(SetMetadata);

#[derive(Clone, Debug, Default)]
pub(crate) struct QuotaRequest {
    quota: i32,
}

impl ShareBody for QuotaRequest {
    fn apply(&self, request: OperationRequest) -> Result<OperationRequest> {
        Ok(request.header(names::SHARE_QUOTA, self.quota))
    }
}

/// The request builder for [ShareClient::set_quota][crate::client::ShareClient::set_quota] calls.
#[derive(Clone, Debug)]
pub struct SetQuota(RequestBuilder<QuotaRequest>);

impl SetQuota {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target, quota: i32) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::SET_QUOTA, target)
                .with_request(QuotaRequest { quota }),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "ShareClient::set_quota", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ShareInfo> {
        self.0.share_info().await
    }
}

request_builder!(SetQuota);

#[derive(Clone, Debug, Default)]
pub(crate) struct AccessPolicyRequest {
    identifiers: Vec<SignedIdentifier>,
}

impl ShareBody for AccessPolicyRequest {
    fn apply(&self, request: OperationRequest) -> Result<OperationRequest> {
        let body = SignedIdentifiers {
            items: self.identifiers.clone(),
        };
        request.xml_body("SignedIdentifiers", &body)
    }
}

/// The request builder for [ShareClient::set_access_policy][crate::client::ShareClient::set_access_policy] calls.
///
/// # Example
/// ```no_run
/// # use azure_storage_file::builder::share_client::SetAccessPolicy;
/// # tokio_test::block_on(async {
/// use azure_storage_file::model::{AccessPolicy, SignedIdentifier};
/// use chrono::{Duration, Utc};
/// let builder = prepare_request_builder();
/// let policy = AccessPolicy::new()
///     .set_start(Utc::now())
///     .set_expiry(Utc::now() + Duration::days(7))
///     .set_permission("rl");
/// builder
///     .set_signed_identifiers([SignedIdentifier::new("read-only", policy)])
///     .send()
///     .await?;
/// # azure_storage_file::Result::<()>::Ok(()) });
///
/// fn prepare_request_builder() -> SetAccessPolicy {
///   # panic!();
///   // ... details omitted ...
/// }
/// ```
#[derive(Clone, Debug)]
pub struct SetAccessPolicy(RequestBuilder<AccessPolicyRequest>);

impl SetAccessPolicy {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(inner, &crate::operations::SET_ACCESS_POLICY, target))
    }

    /// Sends the request.
    #[tracing::instrument(name = "ShareClient::set_access_policy", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ShareInfo> {
        self.0.share_info().await
    }

    /// Replaces the stored access policies. A share has at most five
    /// policies, an empty list removes all of them.
    pub fn set_signed_identifiers<T: IntoIterator<Item = SignedIdentifier>>(mut self, v: T) -> Self {
        self.0.request.identifiers = v.into_iter().collect();
        self
    }
}

request_builder!(SetAccessPolicy);

/// The request builder for [ShareClient::get_access_policy][crate::client::ShareClient::get_access_policy] calls.
#[derive(Clone, Debug)]
pub struct GetAccessPolicy(RequestBuilder<()>);

impl GetAccessPolicy {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(inner, &crate::operations::GET_ACCESS_POLICY, target))
    }

    /// Sends the request.
    #[tracing::instrument(name = "ShareClient::get_access_policy", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ShareAccessPolicy> {
        let request = self.0.share_request()?;
        let response = self.0.inner.xml::<SignedIdentifiers>(request).await?;
        Ok(ShareAccessPolicy {
            etag: headers::etag(response.headers()),
            last_modified: headers::last_modified(response.headers())?,
            response: response_metadata(&response)?,
            signed_identifiers: response.into_body().items,
        })
    }
}

request_builder!(GetAccessPolicy);

/// The request builder for [ShareClient::get_statistics][crate::client::ShareClient::get_statistics] calls.
#[derive(Clone, Debug)]
pub struct GetStatistics(RequestBuilder<()>);

impl GetStatistics {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target) -> Self {
        Self(RequestBuilder::new(
            inner,
            &crate::operations::GET_SHARE_STATISTICS,
            target,
        ))
    }

    /// Sends the request.
    #[tracing::instrument(name = "ShareClient::get_statistics", level = "debug", skip_all)]
    pub async fn send(self) -> Result<ShareStatistics> {
        let request = self.0.share_request()?;
        let response = self.0.inner.xml::<ShareStatistics>(request).await?;
        let metadata = response_metadata(&response)?;
        let mut statistics = response.into_body();
        statistics.response = metadata;
        Ok(statistics)
    }
}

request_builder!(GetStatistics);

/// The request builder for [ShareClient::create_permission][crate::client::ShareClient::create_permission] calls.
#[derive(Clone, Debug)]
pub struct CreatePermission(RequestBuilder<String>);

impl CreatePermission {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target, permission: String) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::CREATE_PERMISSION, target)
                .with_request(permission),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "ShareClient::create_permission", level = "debug", skip_all)]
    pub async fn send(self) -> Result<PermissionKey> {
        let body = SharePermission {
            permission: required("permission", &self.0.request)?.to_string(),
            response: ResponseMetadata::default(),
        };
        let request = self.0.share_request()?.json_body(&body)?;
        let response = self.0.inner.empty(request).await?;
        Ok(PermissionKey {
            key: headers::required_str(response.headers(), names::FILE_PERMISSION_KEY)?
                .to_string(),
            response: response_metadata(&response)?,
        })
    }
}

request_builder!(CreatePermission);

/// The request builder for [ShareClient::get_permission][crate::client::ShareClient::get_permission] calls.
#[derive(Clone, Debug)]
pub struct GetPermission(RequestBuilder<String>);

impl GetPermission {
    pub(crate) fn new(inner: Arc<PipelineClient>, target: Target, key: String) -> Self {
        Self(
            RequestBuilder::new(inner, &crate::operations::GET_PERMISSION, target)
                .with_request(key),
        )
    }

    /// Sends the request.
    #[tracing::instrument(name = "ShareClient::get_permission", level = "debug", skip_all)]
    pub async fn send(self) -> Result<SharePermission> {
        let request = self.0.share_request()?.header(
            names::FILE_PERMISSION_KEY,
            required("permission_key", &self.0.request)?,
        );
        let response = self.0.inner.json::<SharePermission>(request).await?;
        let metadata = response_metadata(&response)?;
        let mut permission = response.into_body();
        permission.response = metadata;
        Ok(permission)
    }
}

request_builder!(GetPermission);
