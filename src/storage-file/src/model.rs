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

//! The types returned by, and sent to, the File service.

use crate::Result;
use azcore::error::Error;
use azcorei::headers::{self, rfc1123, rfc1123_option};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use azcorei::headers::ResponseMetadata;
pub use azcorei::storage::{Cors, CorsRule, Metrics, RetentionPolicy};

/// Names of the File service headers.
pub(crate) mod names {
    pub(crate) const SHARE_QUOTA: &str = "x-ms-share-quota";
    pub(crate) const SNAPSHOT: &str = "x-ms-snapshot";
    pub(crate) const DELETE_SNAPSHOTS: &str = "x-ms-delete-snapshots";
    pub(crate) const FILE_PERMISSION: &str = "x-ms-file-permission";
    pub(crate) const FILE_PERMISSION_KEY: &str = "x-ms-file-permission-key";
    pub(crate) const FILE_ATTRIBUTES: &str = "x-ms-file-attributes";
    pub(crate) const FILE_CREATION_TIME: &str = "x-ms-file-creation-time";
    pub(crate) const FILE_LAST_WRITE_TIME: &str = "x-ms-file-last-write-time";
    pub(crate) const FILE_CHANGE_TIME: &str = "x-ms-file-change-time";
    pub(crate) const FILE_ID: &str = "x-ms-file-id";
    pub(crate) const FILE_PARENT_ID: &str = "x-ms-file-parent-id";
    pub(crate) const REQUEST_SERVER_ENCRYPTED: &str = "x-ms-request-server-encrypted";
    pub(crate) const SERVER_ENCRYPTED: &str = "x-ms-server-encrypted";
    pub(crate) const TYPE: &str = "x-ms-type";
    pub(crate) const CONTENT_LENGTH: &str = "x-ms-content-length";
    pub(crate) const CONTENT_TYPE: &str = "x-ms-content-type";
    pub(crate) const CONTENT_ENCODING: &str = "x-ms-content-encoding";
    pub(crate) const CONTENT_LANGUAGE: &str = "x-ms-content-language";
    pub(crate) const CACHE_CONTROL: &str = "x-ms-cache-control";
    pub(crate) const CONTENT_MD5: &str = "x-ms-content-md5";
    pub(crate) const CONTENT_DISPOSITION: &str = "x-ms-content-disposition";
    pub(crate) const RANGE: &str = "x-ms-range";
    pub(crate) const RANGE_GET_CONTENT_MD5: &str = "x-ms-range-get-content-md5";
    pub(crate) const WRITE: &str = "x-ms-write";
    pub(crate) const COPY_SOURCE: &str = "x-ms-copy-source";
    pub(crate) const COPY_ID: &str = "x-ms-copy-id";
    pub(crate) const COPY_STATUS: &str = "x-ms-copy-status";
    pub(crate) const COPY_PROGRESS: &str = "x-ms-copy-progress";
    pub(crate) const COPY_COMPLETION_TIME: &str = "x-ms-copy-completion-time";
    pub(crate) const COPY_STATUS_DESCRIPTION: &str = "x-ms-copy-status-description";
    pub(crate) const COPY_ACTION: &str = "x-ms-copy-action";
    pub(crate) const HANDLE_ID: &str = "x-ms-handle-id";
    pub(crate) const RECURSIVE: &str = "x-ms-recursive";
    pub(crate) const MARKER: &str = "x-ms-marker";
    pub(crate) const NUMBER_OF_HANDLES_CLOSED: &str = "x-ms-number-of-handles-closed";
}

/// Formats a timestamp as expected by the SMB headers and the access
/// policies, e.g. `2019-02-14T10:00:00.0000000Z`.
pub(crate) fn format_iso8601(value: &DateTime<Utc>) -> String {
    format!(
        "{}.{:07}Z",
        value.format("%Y-%m-%dT%H:%M:%S"),
        value.timestamp_subsec_nanos() / 100
    )
}

pub(crate) fn parse_iso8601(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(Error::deser)
}

fn get_iso8601(headers: &HeaderMap, name: &str) -> Result<Option<DateTime<Utc>>> {
    headers::get_str(headers, name)
        .map(parse_iso8601)
        .transpose()
}

fn get_md5(headers: &HeaderMap, name: &str) -> Result<Option<Vec<u8>>> {
    headers::get_str(headers, name)
        .map(|v| STANDARD.decode(v).map_err(Error::deser))
        .transpose()
}

fn get_bool(headers: &HeaderMap, name: &str) -> Result<bool> {
    Ok(headers::get_parse::<bool>(headers, name)?.unwrap_or_default())
}

mod iso8601_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_str(&super::format_iso8601(v)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value = Option::<String>::deserialize(d)?;
        match value.as_deref() {
            None | Some("") => Ok(None),
            Some(v) => super::parse_iso8601(v)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// The File service properties of a storage account.
///
/// Settings left as `None` are not changed by
/// [FileServiceClient::set_properties][crate::client::FileServiceClient::set_properties].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct FileServiceProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_metrics: Option<Metrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute_metrics: Option<Metrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors: Option<Cors>,
    /// Only set in responses.
    #[serde(skip)]
    pub response: ResponseMetadata,
}

impl FileServiceProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [hour_metrics][FileServiceProperties::hour_metrics].
    pub fn set_hour_metrics(mut self, v: Metrics) -> Self {
        self.hour_metrics = Some(v);
        self
    }

    /// Sets the value of [minute_metrics][FileServiceProperties::minute_metrics].
    pub fn set_minute_metrics(mut self, v: Metrics) -> Self {
        self.minute_metrics = Some(v);
        self
    }

    /// Sets the value of [cors][FileServiceProperties::cors].
    pub fn set_cors(mut self, v: Cors) -> Self {
        self.cors = Some(v);
        self
    }
}

/// A share returned by
/// [FileServiceClient::list_shares][crate::client::FileServiceClient::list_shares].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct ShareItem {
    pub name: String,
    /// Set if this item is a share snapshot.
    #[serde(default)]
    pub snapshot: Option<String>,
    pub properties: ShareItemProperties,
    /// Only included if requested.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct ShareItemProperties {
    #[serde(rename = "Last-Modified", with = "rfc1123")]
    pub last_modified: DateTime<Utc>,
    #[serde(rename = "Etag")]
    pub etag: String,
    /// The share size limit, in GiB.
    #[serde(rename = "Quota")]
    pub quota: i32,
}

/// A page of shares.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ListSharesPage {
    pub service_endpoint: String,
    pub prefix: Option<String>,
    pub shares: Vec<ShareItem>,
    /// The marker for the next page, empty on the last page.
    pub next_marker: String,
    pub response: ResponseMetadata,
}

impl azcore::paginator::PageableResponse for ListSharesPage {
    type PageItem = ShareItem;

    fn items(self) -> Vec<ShareItem> {
        self.shares
    }

    fn next_page_token(&self) -> String {
        self.next_marker.clone()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListSharesResult {
    #[serde(rename = "@ServiceEndpoint", default)]
    service_endpoint: String,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    shares: Option<ShareList>,
    #[serde(default)]
    next_marker: String,
}

#[derive(Debug, Default, Deserialize)]
struct ShareList {
    #[serde(rename = "Share", default)]
    items: Vec<ShareItem>,
}

impl ListSharesPage {
    pub(crate) fn new(result: ListSharesResult, response: ResponseMetadata) -> Self {
        Self {
            service_endpoint: result.service_endpoint,
            prefix: result.prefix.filter(|p| !p.is_empty()),
            shares: result.shares.map(|s| s.items).unwrap_or_default(),
            next_marker: result.next_marker,
            response,
        }
    }
}

/// The properties of a share.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ShareProperties {
    /// The share size limit, in GiB.
    pub quota: i32,
    pub metadata: HashMap<String, String>,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub response: ResponseMetadata,
}

impl ShareProperties {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            quota: headers::get_parse::<i32>(headers, names::SHARE_QUOTA)?.unwrap_or_default(),
            metadata: headers::metadata(headers),
            etag: headers::etag(headers),
            last_modified: headers::last_modified(headers)?,
            response: ResponseMetadata::from_headers(headers)?,
        })
    }
}

/// The result of the operations changing a share.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ShareInfo {
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub response: ResponseMetadata,
}

impl ShareInfo {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            etag: headers::etag(headers),
            last_modified: headers::last_modified(headers)?,
            response: ResponseMetadata::from_headers(headers)?,
        })
    }
}

/// A snapshot created by
/// [ShareClient::create_snapshot][crate::client::ShareClient::create_snapshot].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ShareSnapshot {
    /// Identifies the snapshot, use it with
    /// [ShareClient::with_snapshot][crate::client::ShareClient::with_snapshot].
    pub snapshot: String,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub response: ResponseMetadata,
}

impl ShareSnapshot {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            snapshot: headers::required_str(headers, names::SNAPSHOT)?.to_string(),
            etag: headers::etag(headers),
            last_modified: headers::last_modified(headers)?,
            response: ResponseMetadata::from_headers(headers)?,
        })
    }
}

/// A security descriptor in SDDL format.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SharePermission {
    pub permission: String,
    #[serde(skip)]
    pub response: ResponseMetadata,
}

/// The key of a permission stored by
/// [ShareClient::create_permission][crate::client::ShareClient::create_permission].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct PermissionKey {
    /// Use this key to set the permission of files and directories.
    pub key: String,
    pub response: ResponseMetadata,
}

/// A stored access policy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct AccessPolicy {
    #[serde(with = "iso8601_option", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(with = "iso8601_option", default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    /// The permissions, e.g. `rwdl`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [start][AccessPolicy::start].
    pub fn set_start(mut self, v: DateTime<Utc>) -> Self {
        self.start = Some(v);
        self
    }

    /// Sets the value of [expiry][AccessPolicy::expiry].
    pub fn set_expiry(mut self, v: DateTime<Utc>) -> Self {
        self.expiry = Some(v);
        self
    }

    /// Sets the value of [permission][AccessPolicy::permission].
    pub fn set_permission<T: Into<String>>(mut self, v: T) -> Self {
        self.permission = Some(v.into());
        self
    }
}

/// Associates an id with an [AccessPolicy]. Shared access signatures
/// reference the policy by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct SignedIdentifier {
    pub id: String,
    #[serde(default)]
    pub access_policy: AccessPolicy,
}

impl SignedIdentifier {
    pub fn new<T: Into<String>>(id: T, access_policy: AccessPolicy) -> Self {
        Self {
            id: id.into(),
            access_policy,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct SignedIdentifiers {
    #[serde(rename = "SignedIdentifier", default)]
    pub(crate) items: Vec<SignedIdentifier>,
}

/// The stored access policies of a share.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ShareAccessPolicy {
    pub signed_identifiers: Vec<SignedIdentifier>,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub response: ResponseMetadata,
}

/// The usage statistics of a share.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct ShareStatistics {
    /// The approximate size of the data in the share.
    pub share_usage_bytes: i64,
    #[serde(skip)]
    pub response: ResponseMetadata,
}

/// The SMB properties of a file or directory.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct SmbProperties {
    /// The attributes, separated by `|`, e.g. `ReadOnly|Archive`.
    pub file_attributes: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
    pub last_write_time: Option<DateTime<Utc>>,
    pub change_time: Option<DateTime<Utc>>,
    /// The key of the permission, see
    /// [ShareClient::get_permission][crate::client::ShareClient::get_permission].
    pub permission_key: Option<String>,
    pub file_id: Option<String>,
    pub parent_id: Option<String>,
}

impl SmbProperties {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            file_attributes: headers::get_string(headers, names::FILE_ATTRIBUTES),
            creation_time: get_iso8601(headers, names::FILE_CREATION_TIME)?,
            last_write_time: get_iso8601(headers, names::FILE_LAST_WRITE_TIME)?,
            change_time: get_iso8601(headers, names::FILE_CHANGE_TIME)?,
            permission_key: headers::get_string(headers, names::FILE_PERMISSION_KEY),
            file_id: headers::get_string(headers, names::FILE_ID),
            parent_id: headers::get_string(headers, names::FILE_PARENT_ID),
        })
    }
}

/// The result of the operations creating or changing a directory.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct DirectoryInfo {
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    /// The request contents were encrypted by the service.
    pub server_encrypted: bool,
    pub smb: SmbProperties,
    pub response: ResponseMetadata,
}

impl DirectoryInfo {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            etag: headers::etag(headers),
            last_modified: headers::last_modified(headers)?,
            server_encrypted: get_bool(headers, names::REQUEST_SERVER_ENCRYPTED)?,
            smb: SmbProperties::from_headers(headers)?,
            response: ResponseMetadata::from_headers(headers)?,
        })
    }
}

/// The properties of a directory.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct DirectoryProperties {
    pub metadata: HashMap<String, String>,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    /// The directory metadata is encrypted.
    pub server_encrypted: bool,
    pub smb: SmbProperties,
    pub response: ResponseMetadata,
}

impl DirectoryProperties {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            metadata: headers::metadata(headers),
            etag: headers::etag(headers),
            last_modified: headers::last_modified(headers)?,
            server_encrypted: get_bool(headers, names::SERVER_ENCRYPTED)?,
            smb: SmbProperties::from_headers(headers)?,
            response: ResponseMetadata::from_headers(headers)?,
        })
    }
}

/// A file returned by
/// [DirectoryClient::list_files_and_directories][crate::client::DirectoryClient::list_files_and_directories].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct FileItem {
    pub name: String,
    pub properties: FileItemProperties,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[non_exhaustive]
pub struct FileItemProperties {
    /// The file size in bytes. The value may be stale while the file is
    /// open in an SMB client.
    #[serde(rename = "Content-Length")]
    pub content_length: i64,
}

/// A subdirectory returned by
/// [DirectoryClient::list_files_and_directories][crate::client::DirectoryClient::list_files_and_directories].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct DirectoryItem {
    pub name: String,
}

/// An entry in a directory listing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[non_exhaustive]
pub enum DirectoryEntry {
    File(FileItem),
    Directory(DirectoryItem),
}

impl DirectoryEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => &f.name,
            Self::Directory(d) => &d.name,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

/// A page of files and directories.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ListFilesAndDirectoriesPage {
    pub service_endpoint: String,
    pub share_name: String,
    pub share_snapshot: Option<String>,
    pub directory_path: String,
    pub prefix: Option<String>,
    /// The files and directories, in the order returned by the service.
    pub entries: Vec<DirectoryEntry>,
    /// The marker for the next page, empty on the last page.
    pub next_marker: String,
    pub response: ResponseMetadata,
}

impl azcore::paginator::PageableResponse for ListFilesAndDirectoriesPage {
    type PageItem = DirectoryEntry;

    fn items(self) -> Vec<DirectoryEntry> {
        self.entries
    }

    fn next_page_token(&self) -> String {
        self.next_marker.clone()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListFilesAndDirectoriesResult {
    #[serde(rename = "@ServiceEndpoint", default)]
    service_endpoint: String,
    #[serde(rename = "@ShareName", default)]
    share_name: String,
    #[serde(rename = "@ShareSnapshot", default)]
    share_snapshot: Option<String>,
    #[serde(rename = "@DirectoryPath", default)]
    directory_path: String,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    entries: Option<EntryList>,
    #[serde(default)]
    next_marker: String,
}

#[derive(Debug, Default, Deserialize)]
struct EntryList {
    #[serde(rename = "$value", default)]
    items: Vec<DirectoryEntry>,
}

impl ListFilesAndDirectoriesPage {
    pub(crate) fn new(result: ListFilesAndDirectoriesResult, response: ResponseMetadata) -> Self {
        Self {
            service_endpoint: result.service_endpoint,
            share_name: result.share_name,
            share_snapshot: result.share_snapshot.filter(|s| !s.is_empty()),
            directory_path: result.directory_path,
            prefix: result.prefix.filter(|p| !p.is_empty()),
            entries: result.entries.map(|e| e.items).unwrap_or_default(),
            next_marker: result.next_marker,
            response,
        }
    }
}

/// An open SMB handle.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct HandleItem {
    /// Use this id to close the handle.
    pub handle_id: String,
    /// The path of the file or directory, relative to the share root.
    pub path: String,
    pub file_id: String,
    #[serde(default)]
    pub parent_id: String,
    /// The SMB session owning the handle.
    pub session_id: String,
    #[serde(default)]
    pub client_ip: String,
    #[serde(with = "rfc1123")]
    pub open_time: DateTime<Utc>,
    #[serde(with = "rfc1123_option", default)]
    pub last_reconnect_time: Option<DateTime<Utc>>,
}

/// A page of open handles.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ListHandlesPage {
    pub handles: Vec<HandleItem>,
    /// The marker for the next page, empty on the last page.
    pub next_marker: String,
    pub response: ResponseMetadata,
}

impl azcore::paginator::PageableResponse for ListHandlesPage {
    type PageItem = HandleItem;

    fn items(self) -> Vec<HandleItem> {
        self.handles
    }

    fn next_page_token(&self) -> String {
        self.next_marker.clone()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListHandlesResult {
    #[serde(default)]
    entries: Option<HandleList>,
    #[serde(default)]
    next_marker: String,
}

#[derive(Debug, Default, Deserialize)]
struct HandleList {
    #[serde(rename = "Handle", default)]
    items: Vec<HandleItem>,
}

impl ListHandlesPage {
    pub(crate) fn new(result: ListHandlesResult, response: ResponseMetadata) -> Self {
        Self {
            handles: result.entries.map(|e| e.items).unwrap_or_default(),
            next_marker: result.next_marker,
            response,
        }
    }
}

/// The result of a force close handles call.
///
/// The service closes the handles in batches. A non-empty `marker` means
/// more handles remain, send the request again with this marker.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ForceCloseHandlesResult {
    pub marker: String,
    pub closed_handles_count: i32,
    pub response: ResponseMetadata,
}

impl ForceCloseHandlesResult {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            marker: headers::get_string(headers, names::MARKER).unwrap_or_default(),
            closed_handles_count: headers::get_parse::<i32>(headers, names::NUMBER_OF_HANDLES_CLOSED)?
                .unwrap_or_default(),
            response: ResponseMetadata::from_headers(headers)?,
        })
    }
}

/// The standard HTTP properties of a file.
///
/// These are returned in the standard headers when the file is downloaded.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct FileHttpHeaders {
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
    pub content_language: Option<String>,
    pub cache_control: Option<String>,
    pub content_disposition: Option<String>,
    /// The MD5 hash of the file content. The service does not validate it.
    pub content_md5: Option<Vec<u8>>,
}

impl FileHttpHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [content_type][FileHttpHeaders::content_type].
    pub fn set_content_type<T: Into<String>>(mut self, v: T) -> Self {
        self.content_type = Some(v.into());
        self
    }

    /// Sets the value of [content_encoding][FileHttpHeaders::content_encoding].
    pub fn set_content_encoding<T: Into<String>>(mut self, v: T) -> Self {
        self.content_encoding = Some(v.into());
        self
    }

    /// Sets the value of [content_language][FileHttpHeaders::content_language].
    pub fn set_content_language<T: Into<String>>(mut self, v: T) -> Self {
        self.content_language = Some(v.into());
        self
    }

    /// Sets the value of [cache_control][FileHttpHeaders::cache_control].
    pub fn set_cache_control<T: Into<String>>(mut self, v: T) -> Self {
        self.cache_control = Some(v.into());
        self
    }

    /// Sets the value of [content_disposition][FileHttpHeaders::content_disposition].
    pub fn set_content_disposition<T: Into<String>>(mut self, v: T) -> Self {
        self.content_disposition = Some(v.into());
        self
    }

    /// Sets the value of [content_md5][FileHttpHeaders::content_md5].
    pub fn set_content_md5<T: Into<Vec<u8>>>(mut self, v: T) -> Self {
        self.content_md5 = Some(v.into());
        self
    }

    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        use http::header;
        Ok(Self {
            content_type: headers::get_string(headers, header::CONTENT_TYPE.as_str()),
            content_encoding: headers::get_string(headers, header::CONTENT_ENCODING.as_str()),
            content_language: headers::get_string(headers, header::CONTENT_LANGUAGE.as_str()),
            cache_control: headers::get_string(headers, header::CACHE_CONTROL.as_str()),
            content_disposition: headers::get_string(headers, header::CONTENT_DISPOSITION.as_str()),
            content_md5: get_md5(headers, "content-md5")?,
        })
    }

    /// The `x-ms-*` request headers setting these properties.
    pub(crate) fn request_headers(&self) -> Vec<(&'static str, String)> {
        [
            (names::CONTENT_TYPE, self.content_type.clone()),
            (names::CONTENT_ENCODING, self.content_encoding.clone()),
            (names::CONTENT_LANGUAGE, self.content_language.clone()),
            (names::CACHE_CONTROL, self.cache_control.clone()),
            (names::CONTENT_DISPOSITION, self.content_disposition.clone()),
            (names::CONTENT_MD5, self.content_md5.as_ref().map(|v| STANDARD.encode(v))),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

azcorei::string_enum! {
    /// The state of a copy operation.
    CopyStatus {
        Pending => "pending",
        Success => "success",
        Aborted => "aborted",
        Failed => "failed",
    }
}

/// The last copy operation targeting a file.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct CopyProperties {
    pub copy_id: Option<String>,
    pub copy_status: Option<CopyStatus>,
    pub copy_source: Option<String>,
    /// The bytes copied and the total bytes, e.g. `1024/4096`.
    pub copy_progress: Option<String>,
    pub copy_completion_time: Option<DateTime<Utc>>,
    /// Describes the cause of a failed copy.
    pub copy_status_description: Option<String>,
}

impl CopyProperties {
    fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            copy_id: headers::get_string(headers, names::COPY_ID),
            copy_status: headers::get_str(headers, names::COPY_STATUS).map(CopyStatus::from),
            copy_source: headers::get_string(headers, names::COPY_SOURCE),
            copy_progress: headers::get_string(headers, names::COPY_PROGRESS),
            copy_completion_time: headers::get_date(headers, names::COPY_COMPLETION_TIME)?,
            copy_status_description: headers::get_string(headers, names::COPY_STATUS_DESCRIPTION),
        })
    }
}

/// The properties of a file.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct FileProperties {
    /// The number of bytes in the response body. This is the file size,
    /// except in ranged downloads.
    pub content_length: i64,
    pub http_headers: FileHttpHeaders,
    pub metadata: HashMap<String, String>,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub copy: CopyProperties,
    /// The file data and metadata are encrypted.
    pub server_encrypted: bool,
    pub smb: SmbProperties,
    pub response: ResponseMetadata,
}

impl FileProperties {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            content_length: headers::get_parse::<i64>(headers, http::header::CONTENT_LENGTH.as_str())?
                .unwrap_or_default(),
            http_headers: FileHttpHeaders::from_headers(headers)?,
            metadata: headers::metadata(headers),
            etag: headers::etag(headers),
            last_modified: headers::last_modified(headers)?,
            copy: CopyProperties::from_headers(headers)?,
            server_encrypted: get_bool(headers, names::SERVER_ENCRYPTED)?,
            smb: SmbProperties::from_headers(headers)?,
            response: ResponseMetadata::from_headers(headers)?,
        })
    }
}

/// The result of
/// [FileClient::download][crate::client::FileClient::download].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct FileDownload {
    pub content: Bytes,
    /// Set for ranged downloads, e.g. `bytes 0-511/4096`.
    pub content_range: Option<String>,
    pub properties: FileProperties,
}

impl FileDownload {
    /// The size of the file.
    ///
    /// For ranged downloads the size is the total in `content_range`.
    pub fn file_size(&self) -> i64 {
        self.content_range
            .as_deref()
            .and_then(|r| r.rsplit_once('/'))
            .and_then(|(_, total)| total.parse().ok())
            .unwrap_or(self.properties.content_length)
    }
}

/// The result of the operations creating or changing a file.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct FileInfo {
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    /// The request contents were encrypted by the service.
    pub server_encrypted: bool,
    pub smb: SmbProperties,
    pub response: ResponseMetadata,
}

impl FileInfo {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            etag: headers::etag(headers),
            last_modified: headers::last_modified(headers)?,
            server_encrypted: get_bool(headers, names::REQUEST_SERVER_ENCRYPTED)?,
            smb: SmbProperties::from_headers(headers)?,
            response: ResponseMetadata::from_headers(headers)?,
        })
    }
}

/// The result of
/// [FileClient::upload_range][crate::client::FileClient::upload_range] and
/// [FileClient::clear_range][crate::client::FileClient::clear_range].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct RangeInfo {
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    /// The MD5 hash of the uploaded range, computed by the service.
    pub content_md5: Option<Vec<u8>>,
    pub server_encrypted: bool,
    pub response: ResponseMetadata,
}

impl RangeInfo {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            etag: headers::etag(headers),
            last_modified: headers::last_modified(headers)?,
            content_md5: get_md5(headers, "content-md5")?,
            server_encrypted: get_bool(headers, names::REQUEST_SERVER_ENCRYPTED)?,
            response: ResponseMetadata::from_headers(headers)?,
        })
    }
}

/// A range of bytes, both ends inclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct FileRange {
    pub start: u64,
    pub end: u64,
}

impl FileRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// The range covering `len` bytes from `offset`.
    ///
    /// Returns `None` if `len` is zero.
    pub fn with_len(offset: u64, len: u64) -> Option<Self> {
        (len > 0).then(|| Self::new(offset, offset + len - 1))
    }

    pub fn len(&self) -> u64 {
        self.end + 1 - self.start
    }

    /// The value of the `x-ms-range` header.
    pub(crate) fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RangesResult {
    #[serde(rename = "Range", default)]
    pub(crate) items: Vec<FileRange>,
}

/// The valid ranges of a file.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct RangeList {
    /// The ranges with data, sorted by offset.
    pub ranges: Vec<FileRange>,
    /// The size of the file.
    pub file_content_length: i64,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub response: ResponseMetadata,
}

/// A copy started by
/// [FileClient::start_copy][crate::client::FileClient::start_copy].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct CopyInfo {
    /// Use this id to abort the copy.
    pub copy_id: String,
    pub copy_status: CopyStatus,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub response: ResponseMetadata,
}

impl CopyInfo {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            copy_id: headers::required_str(headers, names::COPY_ID)?.to_string(),
            copy_status: CopyStatus::from(headers::required_str(headers, names::COPY_STATUS)?),
            etag: headers::etag(headers),
            last_modified: headers::last_modified(headers)?,
            response: ResponseMetadata::from_headers(headers)?,
        })
    }
}
