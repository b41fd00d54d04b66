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

use crate::builder::handles::{self, Kind};
use crate::builder::{
    Target, directory_client, file_client, file_service_client, share_client,
};
use crate::model::{FileRange, FileServiceProperties};
use auth::connection_string::{self, Service};
use azcore::client_builder::Error as BuilderError;
use azcorei::client::{ApiVersion, PipelineClient};
use azcorei::options::{ClientConfig, Credentials};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;

/// Implements a client for the File service of a storage account.
///
/// # Example
/// ```no_run
/// # tokio_test::block_on(async {
/// # use azure_storage_file::client::FileServiceClient;
/// use futures::TryStreamExt;
/// let client = FileServiceClient::from_connection_string(
///     "DefaultEndpointsProtocol=https;AccountName=myaccount;AccountKey=a2V5LWZvci10ZXN0cw==;EndpointSuffix=core.windows.net",
/// )?
/// .build()
/// .await?;
/// let mut shares = client.list_shares().by_item();
/// while let Some(share) = shares.try_next().await? {
///     println!("{} quota={}", share.name, share.properties.quota);
/// }
/// # anyhow::Result::<()>::Ok(()) });
/// ```
///
/// # Configuration
///
/// To configure `FileServiceClient` use the `with_*` methods in the type
/// returned by [builder()][FileServiceClient::builder]. The endpoint is
/// required. The File service does not support anonymous requests, use
/// shared key or shared access signature credentials.
///
/// # Pooling and Cloning
///
/// `FileServiceClient` holds a connection pool internally, it is advised to
/// create one and then reuse it. The [ShareClient]s returned by
/// [share_client()][FileServiceClient::share_client] share the same pool.
#[derive(Clone, Debug)]
pub struct FileServiceClient {
    inner: Arc<PipelineClient>,
}

impl FileServiceClient {
    /// Returns a builder for [FileServiceClient].
    pub fn builder<V: Into<String>>(endpoint: V) -> file_service_client::ClientBuilder {
        azcore::client_builder::internal::new_builder(file_service_client::client::Factory)
            .with_endpoint(endpoint)
    }

    /// Returns a builder configured from a storage connection string.
    ///
    /// The connection string must contain a `FileEndpoint` or the values to
    /// compute it: `AccountName` and `EndpointSuffix`. The development
    /// storage emulator does not support the File service.
    pub fn from_connection_string(
        connection_string: &str,
    ) -> azcore::client_builder::Result<file_service_client::ClientBuilder> {
        let (endpoint, credentials) = parse_connection_string(connection_string)?;
        Ok(Self::builder(endpoint).with_credentials(credentials))
    }

    pub(crate) async fn new(config: ClientConfig) -> azcore::client_builder::Result<Self> {
        Ok(Self {
            inner: Arc::new(new_pipeline_client(config)?),
        })
    }

    /// The File service endpoint.
    pub fn url(&self) -> &str {
        self.inner.endpoint().as_str()
    }

    /// Returns a client for the named share.
    ///
    /// The share is not created, see [ShareClient::create].
    pub fn share_client<T: Into<String>>(&self, share_name: T) -> ShareClient {
        ShareClient {
            inner: self.inner.clone(),
            share: share_name.into(),
            snapshot: None,
        }
    }

    /// Gets the metrics and CORS settings of the File service.
    pub fn get_properties(&self) -> file_service_client::GetProperties {
        file_service_client::GetProperties::new(self.inner.clone())
    }

    /// Changes the metrics and CORS settings of the File service.
    ///
    /// Settings not included in `properties` are left unchanged.
    pub fn set_properties(
        &self,
        properties: FileServiceProperties,
    ) -> file_service_client::SetProperties {
        file_service_client::SetProperties::new(self.inner.clone(), properties)
    }

    /// Lists the shares in the account.
    pub fn list_shares(&self) -> file_service_client::ListShares {
        file_service_client::ListShares::new(self.inner.clone())
    }
}

/// Implements a client for a file share.
///
/// # Example
/// ```no_run
/// # tokio_test::block_on(async {
/// # use azure_storage_file::client::ShareClient;
/// let client = ShareClient::builder("https://myaccount.file.core.windows.net", "reports")
///     .build()
///     .await?;
/// client.create().set_quota(10).send().await?;
/// let snapshot = client.create_snapshot().send().await?;
/// let frozen = client.with_snapshot(snapshot.snapshot);
/// let properties = frozen.get_properties().send().await?;
/// println!("{properties:?}");
/// # anyhow::Result::<()>::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct ShareClient {
    inner: Arc<PipelineClient>,
    share: String,
    snapshot: Option<String>,
}

impl ShareClient {
    /// Returns a builder for a [ShareClient] targeting `share_name` in the
    /// File service at `endpoint`.
    pub fn builder<E, S>(endpoint: E, share_name: S) -> share_client::ClientBuilder
    where
        E: Into<String>,
        S: Into<String>,
    {
        azcore::client_builder::internal::new_builder(share_client::client::Factory(
            share_name.into(),
        ))
        .with_endpoint(endpoint)
    }

    /// Returns a builder configured from a storage connection string.
    pub fn from_connection_string<S: Into<String>>(
        connection_string: &str,
        share_name: S,
    ) -> azcore::client_builder::Result<share_client::ClientBuilder> {
        let (endpoint, credentials) = parse_connection_string(connection_string)?;
        Ok(Self::builder(endpoint, share_name).with_credentials(credentials))
    }

    pub(crate) async fn new(
        config: ClientConfig,
        share: String,
    ) -> azcore::client_builder::Result<Self> {
        Ok(Self {
            inner: Arc::new(new_pipeline_client(config)?),
            share,
            snapshot: None,
        })
    }

    /// The share name.
    pub fn name(&self) -> &str {
        &self.share
    }

    /// The share snapshot targeted by this client, if any.
    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    /// The share URL.
    pub fn url(&self) -> String {
        self.inner.url_for(&format!("/{}", self.share)).to_string()
    }

    /// Returns a client targeting a snapshot of this share.
    ///
    /// The read operations of the returned client, and of the directory and
    /// file clients created from it, use the snapshot. Snapshots are read
    /// only.
    pub fn with_snapshot<T: Into<String>>(&self, snapshot: T) -> Self {
        Self {
            inner: self.inner.clone(),
            share: self.share.clone(),
            snapshot: Some(snapshot.into()),
        }
    }

    /// Returns a client for a directory in this share.
    ///
    /// The path is relative to the share root. An empty path is the root
    /// directory.
    pub fn directory_client<T: AsRef<str>>(&self, directory_path: T) -> DirectoryClient {
        DirectoryClient {
            inner: self.inner.clone(),
            target: self.target(normalize(directory_path.as_ref())),
        }
    }

    /// Returns a client for the root directory of this share.
    pub fn root_directory_client(&self) -> DirectoryClient {
        self.directory_client("")
    }

    /// Returns a client for a file in this share.
    ///
    /// The path is relative to the share root.
    pub fn file_client<T: AsRef<str>>(&self, file_path: T) -> FileClient {
        FileClient {
            inner: self.inner.clone(),
            target: self.target(normalize(file_path.as_ref())),
        }
    }

    /// Creates the share.
    pub fn create(&self) -> share_client::Create {
        share_client::Create::new(self.inner.clone(), self.target(String::new()))
    }

    /// Gets the share properties and metadata.
    pub fn get_properties(&self) -> share_client::GetProperties {
        share_client::GetProperties::new(self.inner.clone(), self.target(String::new()))
    }

    /// Deletes the share, or the snapshot targeted by this client.
    pub fn delete(&self) -> share_client::Delete {
        share_client::Delete::new(self.inner.clone(), self.target(String::new()))
    }

    /// Creates a read-only snapshot of the share.
    pub fn create_snapshot(&self) -> share_client::CreateSnapshot {
        share_client::CreateSnapshot::new(self.inner.clone(), self.target(String::new()))
    }

    /// Stores a permission, in SDDL format, at the share level.
    ///
    /// Returns a key that can be used when creating or changing files and
    /// directories.
    pub fn create_permission<T: Into<String>>(&self, permission: T) -> share_client::CreatePermission {
        share_client::CreatePermission::new(
            self.inner.clone(),
            self.target(String::new()),
            permission.into(),
        )
    }

    /// Gets a permission, in SDDL format, by key.
    pub fn get_permission<T: Into<String>>(&self, permission_key: T) -> share_client::GetPermission {
        share_client::GetPermission::new(
            self.inner.clone(),
            self.target(String::new()),
            permission_key.into(),
        )
    }

    /// Changes the maximum size of the share, in GiB.
    pub fn set_quota(&self, quota: i32) -> share_client::SetQuota {
        share_client::SetQuota::new(self.inner.clone(), self.target(String::new()), quota)
    }

    /// Replaces the share metadata.
    pub fn set_metadata<T, K, V>(&self, metadata: T) -> share_client::SetMetadata
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        share_client::SetMetadata::new(
            self.inner.clone(),
            self.target(String::new()),
            collect_metadata(metadata),
        )
    }

    /// Gets the stored access policies of the share.
    pub fn get_access_policy(&self) -> share_client::GetAccessPolicy {
        share_client::GetAccessPolicy::new(self.inner.clone(), self.target(String::new()))
    }

    /// Replaces the stored access policies of the share.
    pub fn set_access_policy(&self) -> share_client::SetAccessPolicy {
        share_client::SetAccessPolicy::new(self.inner.clone(), self.target(String::new()))
    }

    /// Gets the approximate size of the data stored in the share.
    pub fn get_statistics(&self) -> share_client::GetStatistics {
        share_client::GetStatistics::new(self.inner.clone(), self.target(String::new()))
    }

    fn target(&self, path: String) -> Target {
        Target {
            share: self.share.clone(),
            path,
            snapshot: self.snapshot.clone(),
        }
    }
}

/// Implements a client for a directory in a file share.
///
/// # Example
/// ```no_run
/// # tokio_test::block_on(async {
/// # use azure_storage_file::client::ShareClient;
/// let share = ShareClient::builder("https://myaccount.file.core.windows.net", "reports")
///     .build()
///     .await?;
/// let directory = share.directory_client("2019/january");
/// directory.create().send().await?;
/// let file = directory.file_client("summary.csv");
/// file.create(1024).send().await?;
/// # anyhow::Result::<()>::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct DirectoryClient {
    inner: Arc<PipelineClient>,
    target: Target,
}

impl DirectoryClient {
    /// The share name.
    pub fn share_name(&self) -> &str {
        &self.target.share
    }

    /// The directory path, relative to the share root. Empty for the root
    /// directory.
    pub fn path(&self) -> &str {
        &self.target.path
    }

    /// The directory URL.
    pub fn url(&self) -> String {
        self.inner.url_for(&item_path(&self.target)).to_string()
    }

    /// Returns a client for a file in this directory.
    pub fn file_client<T: AsRef<str>>(&self, file_name: T) -> FileClient {
        FileClient {
            inner: self.inner.clone(),
            target: self.child(file_name.as_ref()),
        }
    }

    /// Returns a client for a subdirectory of this directory.
    pub fn subdirectory_client<T: AsRef<str>>(&self, directory_name: T) -> DirectoryClient {
        DirectoryClient {
            inner: self.inner.clone(),
            target: self.child(directory_name.as_ref()),
        }
    }

    /// Creates the directory.
    pub fn create(&self) -> directory_client::Create {
        directory_client::Create::new(self.inner.clone(), self.target.clone())
    }

    /// Gets the directory properties and metadata.
    pub fn get_properties(&self) -> directory_client::GetProperties {
        directory_client::GetProperties::new(self.inner.clone(), self.target.clone())
    }

    /// Deletes the directory, which must be empty.
    pub fn delete(&self) -> directory_client::Delete {
        directory_client::Delete::new(self.inner.clone(), self.target.clone())
    }

    /// Changes the SMB properties of the directory.
    pub fn set_properties(&self) -> directory_client::SetProperties {
        directory_client::SetProperties::new(self.inner.clone(), self.target.clone())
    }

    /// Replaces the directory metadata.
    pub fn set_metadata<T, K, V>(&self, metadata: T) -> directory_client::SetMetadata
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        directory_client::SetMetadata::new(
            self.inner.clone(),
            self.target.clone(),
            collect_metadata(metadata),
        )
    }

    /// Lists the files and subdirectories in this directory.
    pub fn list_files_and_directories(&self) -> directory_client::ListFilesAndDirectories {
        directory_client::ListFilesAndDirectories::new(self.inner.clone(), self.target.clone())
    }

    /// Lists the SMB handles open on this directory.
    pub fn list_handles(&self) -> handles::ListHandles {
        handles::ListHandles::new(self.inner.clone(), self.target.clone(), Kind::Directory)
    }

    /// Closes an SMB handle open on this directory, use `"*"` for all the
    /// handles.
    pub fn force_close_handles<T: Into<String>>(&self, handle_id: T) -> handles::ForceCloseHandles {
        handles::ForceCloseHandles::new(
            self.inner.clone(),
            self.target.clone(),
            Kind::Directory,
            handle_id.into(),
        )
    }

    /// Closes all the SMB handles open on this directory.
    pub fn force_close_all_handles(&self) -> handles::ForceCloseAllHandles {
        handles::ForceCloseAllHandles::new(self.inner.clone(), self.target.clone(), Kind::Directory)
    }

    fn child(&self, name: &str) -> Target {
        let name = normalize(name);
        let path = match (self.target.path.as_str(), name.as_str()) {
            ("", n) => n.to_string(),
            (p, "") => p.to_string(),
            (p, n) => format!("{p}/{n}"),
        };
        Target {
            path,
            ..self.target.clone()
        }
    }
}

/// Implements a client for a file in a file share.
///
/// # Example
/// ```no_run
/// # tokio_test::block_on(async {
/// # use azure_storage_file::client::FileClient;
/// let client = FileClient::builder(
///     "https://myaccount.file.core.windows.net",
///     "reports",
///     "2019/january/summary.csv",
/// )
/// .build()
/// .await?;
/// let data = bytes::Bytes::from_static(b"id,total\n1,42\n");
/// client.create(data.len() as u64).send().await?;
/// client.upload_range(0, data).send().await?;
/// let download = client.download().send().await?;
/// println!("{:?}", download.content);
/// # anyhow::Result::<()>::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct FileClient {
    inner: Arc<PipelineClient>,
    target: Target,
}

impl FileClient {
    /// Returns a builder for a [FileClient] targeting `file_path` in the
    /// share `share_name`.
    pub fn builder<E, S, P>(endpoint: E, share_name: S, file_path: P) -> file_client::ClientBuilder
    where
        E: Into<String>,
        S: Into<String>,
        P: AsRef<str>,
    {
        azcore::client_builder::internal::new_builder(file_client::client::Factory(
            share_name.into(),
            normalize(file_path.as_ref()),
        ))
        .with_endpoint(endpoint)
    }

    /// Returns a builder configured from a storage connection string.
    pub fn from_connection_string<S, P>(
        connection_string: &str,
        share_name: S,
        file_path: P,
    ) -> azcore::client_builder::Result<file_client::ClientBuilder>
    where
        S: Into<String>,
        P: AsRef<str>,
    {
        let (endpoint, credentials) = parse_connection_string(connection_string)?;
        Ok(Self::builder(endpoint, share_name, file_path).with_credentials(credentials))
    }

    pub(crate) async fn new(
        config: ClientConfig,
        share: String,
        path: String,
    ) -> azcore::client_builder::Result<Self> {
        Ok(Self {
            inner: Arc::new(new_pipeline_client(config)?),
            target: Target {
                share,
                path,
                snapshot: None,
            },
        })
    }

    /// The share name.
    pub fn share_name(&self) -> &str {
        &self.target.share
    }

    /// The file path, relative to the share root.
    pub fn path(&self) -> &str {
        &self.target.path
    }

    /// The file URL.
    pub fn url(&self) -> String {
        self.inner.url_for(&item_path(&self.target)).to_string()
    }

    /// Creates the file with the given size, replacing any existing file.
    pub fn create(&self, size: u64) -> file_client::Create {
        file_client::Create::new(self.inner.clone(), self.target.clone(), size)
    }

    /// Downloads the file content and properties.
    pub fn download(&self) -> file_client::Download {
        file_client::Download::new(self.inner.clone(), self.target.clone())
    }

    /// Gets the file properties and metadata.
    pub fn get_properties(&self) -> file_client::GetProperties {
        file_client::GetProperties::new(self.inner.clone(), self.target.clone())
    }

    /// Deletes the file.
    pub fn delete(&self) -> file_client::Delete {
        file_client::Delete::new(self.inner.clone(), self.target.clone())
    }

    /// Changes the standard HTTP properties, the size, or the SMB properties
    /// of the file.
    pub fn set_http_headers(&self) -> file_client::SetHttpHeaders {
        file_client::SetHttpHeaders::new(self.inner.clone(), self.target.clone())
    }

    /// Replaces the file metadata.
    pub fn set_metadata<T, K, V>(&self, metadata: T) -> file_client::SetMetadata
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        file_client::SetMetadata::new(
            self.inner.clone(),
            self.target.clone(),
            collect_metadata(metadata),
        )
    }

    /// Writes `data` at `offset`.
    pub fn upload_range<T: Into<Bytes>>(&self, offset: u64, data: T) -> file_client::UploadRange {
        file_client::UploadRange::new(self.inner.clone(), self.target.clone(), offset, data.into())
    }

    /// Clears a range of the file.
    pub fn clear_range(&self, range: FileRange) -> file_client::ClearRange {
        file_client::ClearRange::new(self.inner.clone(), self.target.clone(), range)
    }

    /// Lists the ranges of the file containing data.
    pub fn get_range_list(&self) -> file_client::GetRangeList {
        file_client::GetRangeList::new(self.inner.clone(), self.target.clone())
    }

    /// Starts copying a file or blob into this file.
    ///
    /// The source is a URL, including a shared access signature if needed.
    pub fn start_copy<T: Into<String>>(&self, source_url: T) -> file_client::StartCopy {
        file_client::StartCopy::new(self.inner.clone(), self.target.clone(), source_url.into())
    }

    /// Aborts a pending copy.
    pub fn abort_copy<T: Into<String>>(&self, copy_id: T) -> file_client::AbortCopy {
        file_client::AbortCopy::new(self.inner.clone(), self.target.clone(), copy_id.into())
    }

    /// Lists the SMB handles open on this file.
    pub fn list_handles(&self) -> handles::ListHandles {
        handles::ListHandles::new(self.inner.clone(), self.target.clone(), Kind::File)
    }

    /// Closes an SMB handle open on this file, use `"*"` for all the
    /// handles.
    pub fn force_close_handles<T: Into<String>>(&self, handle_id: T) -> handles::ForceCloseHandles {
        handles::ForceCloseHandles::new(
            self.inner.clone(),
            self.target.clone(),
            Kind::File,
            handle_id.into(),
        )
    }

    /// Closes all the SMB handles open on this file.
    pub fn force_close_all_handles(&self) -> handles::ForceCloseAllHandles {
        handles::ForceCloseAllHandles::new(self.inner.clone(), self.target.clone(), Kind::File)
    }
}

// Leading, trailing, and repeated separators are ignored.
fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn item_path(target: &Target) -> String {
    match target.path.as_str() {
        "" => format!("/{}", target.share),
        p => format!("/{}/{p}", target.share),
    }
}

fn collect_metadata<T, K, V>(metadata: T) -> HashMap<String, String>
where
    T: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    metadata
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

fn new_pipeline_client(config: ClientConfig) -> azcore::client_builder::Result<PipelineClient> {
    PipelineClient::new(
        config,
        &crate::info::CLIENT_INFO,
        ApiVersion::Header(crate::info::API_VERSION),
    )
}

fn parse_connection_string(
    connection_string: &str,
) -> azcore::client_builder::Result<(String, Credentials)> {
    let parsed =
        connection_string::parse(connection_string, Service::File).map_err(BuilderError::config)?;
    let credentials = parsed.credentials().map_err(BuilderError::cred)?;
    Ok((parsed.endpoint, credentials))
}
