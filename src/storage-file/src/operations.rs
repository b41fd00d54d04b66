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

//! The REST calls made by the file clients.

use azcorei::operation::{Format, Operation};
use http::Method;

macro_rules! file_operation {
    ($id:ident, $name:literal, $method:ident, $path:literal, $query:expr, $expected:expr, $format:ident) => {
        pub(crate) static $id: Operation = Operation {
            name: $name,
            method: Method::$method,
            path: $path,
            query: $query,
            expected: $expected,
            format: Format::$format,
            idempotent: true,
        };
    };
}

const SERVICE_PROPERTIES: &[(&str, &str)] = &[("restype", "service"), ("comp", "properties")];

file_operation!(GET_SERVICE_PROPERTIES, "FileServiceClient::get_properties", GET, "/", SERVICE_PROPERTIES, &[200], Xml);
file_operation!(SET_SERVICE_PROPERTIES, "FileServiceClient::set_properties", PUT, "/", SERVICE_PROPERTIES, &[202], None);
file_operation!(LIST_SHARES, "FileServiceClient::list_shares", GET, "/", &[("comp", "list")], &[200], Xml);

const SHARE: &[(&str, &str)] = &[("restype", "share")];
const SHARE_PERMISSION: &[(&str, &str)] = &[("restype", "share"), ("comp", "filepermission")];
const SHARE_ACL: &[(&str, &str)] = &[("restype", "share"), ("comp", "acl")];

file_operation!(CREATE_SHARE, "ShareClient::create", PUT, "/{share-name}", SHARE, &[201], None);
file_operation!(GET_SHARE_PROPERTIES, "ShareClient::get_properties", GET, "/{share-name}", SHARE, &[200], None);
file_operation!(DELETE_SHARE, "ShareClient::delete", DELETE, "/{share-name}", SHARE, &[202], None);
file_operation!(CREATE_SNAPSHOT, "ShareClient::create_snapshot", PUT, "/{share-name}", &[("restype", "share"), ("comp", "snapshot")], &[201], None);
file_operation!(CREATE_PERMISSION, "ShareClient::create_permission", PUT, "/{share-name}", SHARE_PERMISSION, &[201], None);
file_operation!(GET_PERMISSION, "ShareClient::get_permission", GET, "/{share-name}", SHARE_PERMISSION, &[200], Json);
file_operation!(SET_QUOTA, "ShareClient::set_quota", PUT, "/{share-name}", &[("restype", "share"), ("comp", "properties")], &[200], None);
file_operation!(SET_SHARE_METADATA, "ShareClient::set_metadata", PUT, "/{share-name}", &[("restype", "share"), ("comp", "metadata")], &[200], None);
file_operation!(GET_ACCESS_POLICY, "ShareClient::get_access_policy", GET, "/{share-name}", SHARE_ACL, &[200], Xml);
file_operation!(SET_ACCESS_POLICY, "ShareClient::set_access_policy", PUT, "/{share-name}", SHARE_ACL, &[200], None);
file_operation!(GET_SHARE_STATISTICS, "ShareClient::get_statistics", GET, "/{share-name}", &[("restype", "share"), ("comp", "stats")], &[200], Xml);

// The directory path is empty for the share root, or starts with a `/`.
const DIRECTORY: &[(&str, &str)] = &[("restype", "directory")];

file_operation!(CREATE_DIRECTORY, "DirectoryClient::create", PUT, "/{share-name}{directory-path}", DIRECTORY, &[201], None);
file_operation!(GET_DIRECTORY_PROPERTIES, "DirectoryClient::get_properties", GET, "/{share-name}{directory-path}", DIRECTORY, &[200], None);
file_operation!(DELETE_DIRECTORY, "DirectoryClient::delete", DELETE, "/{share-name}{directory-path}", DIRECTORY, &[202], None);
file_operation!(SET_DIRECTORY_PROPERTIES, "DirectoryClient::set_properties", PUT, "/{share-name}{directory-path}", &[("restype", "directory"), ("comp", "properties")], &[200], None);
file_operation!(SET_DIRECTORY_METADATA, "DirectoryClient::set_metadata", PUT, "/{share-name}{directory-path}", &[("restype", "directory"), ("comp", "metadata")], &[200], None);
file_operation!(LIST_FILES_AND_DIRECTORIES, "DirectoryClient::list_files_and_directories", GET, "/{share-name}{directory-path}", &[("restype", "directory"), ("comp", "list")], &[200], Xml);
file_operation!(LIST_DIRECTORY_HANDLES, "DirectoryClient::list_handles", GET, "/{share-name}{directory-path}", &[("comp", "listhandles")], &[200], Xml);
file_operation!(FORCE_CLOSE_DIRECTORY_HANDLES, "DirectoryClient::force_close_handles", PUT, "/{share-name}{directory-path}", &[("comp", "forceclosehandles")], &[200], None);

file_operation!(CREATE_FILE, "FileClient::create", PUT, "/{share-name}/{file-path}", &[], &[201], None);
file_operation!(DOWNLOAD, "FileClient::download", GET, "/{share-name}/{file-path}", &[], &[200, 206], Bytes);
file_operation!(GET_FILE_PROPERTIES, "FileClient::get_properties", HEAD, "/{share-name}/{file-path}", &[], &[200], None);
file_operation!(DELETE_FILE, "FileClient::delete", DELETE, "/{share-name}/{file-path}", &[], &[202], None);
file_operation!(SET_HTTP_HEADERS, "FileClient::set_http_headers", PUT, "/{share-name}/{file-path}", &[("comp", "properties")], &[200], None);
file_operation!(SET_FILE_METADATA, "FileClient::set_metadata", PUT, "/{share-name}/{file-path}", &[("comp", "metadata")], &[200], None);
file_operation!(UPLOAD_RANGE, "FileClient::upload_range", PUT, "/{share-name}/{file-path}", &[("comp", "range")], &[201], None);
file_operation!(CLEAR_RANGE, "FileClient::clear_range", PUT, "/{share-name}/{file-path}", &[("comp", "range")], &[201], None);
file_operation!(GET_RANGE_LIST, "FileClient::get_range_list", GET, "/{share-name}/{file-path}", &[("comp", "rangelist")], &[200], Xml);
file_operation!(START_COPY, "FileClient::start_copy", PUT, "/{share-name}/{file-path}", &[], &[202], None);
file_operation!(ABORT_COPY, "FileClient::abort_copy", PUT, "/{share-name}/{file-path}", &[("comp", "copy")], &[204], None);
file_operation!(LIST_FILE_HANDLES, "FileClient::list_handles", GET, "/{share-name}/{file-path}", &[("comp", "listhandles")], &[200], Xml);
file_operation!(FORCE_CLOSE_FILE_HANDLES, "FileClient::force_close_handles", PUT, "/{share-name}/{file-path}", &[("comp", "forceclosehandles")], &[200], None);
