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

//! The REST calls made by [KeyClient][crate::client::KeyClient].

use azcorei::operation::{Format, Operation};
use http::Method;

macro_rules! key_operation {
    ($id:ident, $name:literal, $method:ident, $path:literal, $expected:expr) => {
        pub(crate) static $id: Operation = Operation {
            name: $name,
            method: Method::$method,
            path: $path,
            query: &[],
            expected: $expected,
            format: Format::Json,
            idempotent: true,
        };
    };
}

key_operation!(CREATE_KEY, "KeyClient::create_key", POST, "/keys/{key-name}/create", &[200]);
key_operation!(CREATE_EC_KEY, "KeyClient::create_ec_key", POST, "/keys/{key-name}/create", &[200]);
key_operation!(CREATE_RSA_KEY, "KeyClient::create_rsa_key", POST, "/keys/{key-name}/create", &[200]);
key_operation!(IMPORT_KEY, "KeyClient::import_key", PUT, "/keys/{key-name}", &[200]);
key_operation!(DELETE_KEY, "KeyClient::delete_key", DELETE, "/keys/{key-name}", &[200]);
key_operation!(UPDATE_KEY, "KeyClient::update_key", PATCH, "/keys/{key-name}/{key-version}", &[200]);
key_operation!(GET_KEY, "KeyClient::get_key", GET, "/keys/{key-name}/{key-version}", &[200]);
key_operation!(GET_DELETED_KEY, "KeyClient::get_deleted_key", GET, "/deletedkeys/{key-name}", &[200]);
key_operation!(PURGE_DELETED_KEY, "KeyClient::purge_deleted_key", DELETE, "/deletedkeys/{key-name}", &[204]);
key_operation!(RECOVER_DELETED_KEY, "KeyClient::recover_deleted_key", POST, "/deletedkeys/{key-name}/recover", &[200]);
key_operation!(BACKUP_KEY, "KeyClient::backup_key", POST, "/keys/{key-name}/backup", &[200]);
key_operation!(RESTORE_KEY_BACKUP, "KeyClient::restore_key_backup", POST, "/keys/restore", &[200]);
key_operation!(LIST_KEYS, "KeyClient::list_keys", GET, "/keys", &[200]);
key_operation!(LIST_KEY_VERSIONS, "KeyClient::list_key_versions", GET, "/keys/{key-name}/versions", &[200]);
key_operation!(LIST_DELETED_KEYS, "KeyClient::list_deleted_keys", GET, "/deletedkeys", &[200]);
