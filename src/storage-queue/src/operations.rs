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

//! The REST calls made by the queue clients.

use azcorei::operation::{Format, Operation};
use http::Method;

macro_rules! queue_operation {
    ($id:ident, $name:literal, $method:ident, $path:literal, $query:expr, $expected:expr, $format:ident) => {
        queue_operation!($id, $name, $method, $path, $query, $expected, $format, true);
    };
    ($id:ident, $name:literal, $method:ident, $path:literal, $query:expr, $expected:expr, $format:ident, $idempotent:literal) => {
        pub(crate) static $id: Operation = Operation {
            name: $name,
            method: Method::$method,
            path: $path,
            query: $query,
            expected: $expected,
            format: Format::$format,
            idempotent: $idempotent,
        };
    };
}

const SERVICE_PROPERTIES: &[(&str, &str)] = &[("restype", "service"), ("comp", "properties")];
const METADATA: &[(&str, &str)] = &[("comp", "metadata")];

queue_operation!(GET_SERVICE_PROPERTIES, "QueueServiceClient::get_properties", GET, "/", SERVICE_PROPERTIES, &[200], Xml);
queue_operation!(SET_SERVICE_PROPERTIES, "QueueServiceClient::set_properties", PUT, "/", SERVICE_PROPERTIES, &[202], None);
queue_operation!(GET_STATISTICS, "QueueServiceClient::get_statistics", GET, "/", &[("restype", "service"), ("comp", "stats")], &[200], Xml);
queue_operation!(LIST_QUEUES, "QueueServiceClient::list_queues", GET, "/", &[("comp", "list")], &[200], Xml);

queue_operation!(CREATE_QUEUE, "QueueClient::create", PUT, "/{queue-name}", &[], &[201, 204], None);
queue_operation!(DELETE_QUEUE, "QueueClient::delete", DELETE, "/{queue-name}", &[], &[204], None);
queue_operation!(GET_QUEUE_PROPERTIES, "QueueClient::get_properties", GET, "/{queue-name}", METADATA, &[200], None);
queue_operation!(SET_QUEUE_METADATA, "QueueClient::set_metadata", PUT, "/{queue-name}", METADATA, &[204], None);

// A retry may enqueue the message twice.
queue_operation!(SEND_MESSAGE, "QueueClient::send_message", POST, "/{queue-name}/messages", &[], &[201], Xml, false);
queue_operation!(RECEIVE_MESSAGES, "QueueClient::receive_messages", GET, "/{queue-name}/messages", &[], &[200], Xml);
queue_operation!(PEEK_MESSAGES, "QueueClient::peek_messages", GET, "/{queue-name}/messages", &[("peekonly", "true")], &[200], Xml);
queue_operation!(CLEAR_MESSAGES, "QueueClient::clear_messages", DELETE, "/{queue-name}/messages", &[], &[204], None);
queue_operation!(UPDATE_MESSAGE, "QueueClient::update_message", PUT, "/{queue-name}/messages/{message-id}", &[], &[204], None);
queue_operation!(DELETE_MESSAGE, "QueueClient::delete_message", DELETE, "/{queue-name}/messages/{message-id}", &[], &[204], None);
