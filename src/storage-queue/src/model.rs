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

//! The types returned by, and sent to, the Queue service.

use azcorei::headers::{rfc1123, rfc1123_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use azcorei::headers::ResponseMetadata;
pub use azcorei::storage::{Cors, CorsRule, Metrics, RetentionPolicy};

/// The Storage Analytics logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Logging {
    pub version: String,
    /// Log delete requests.
    pub delete: bool,
    /// Log read requests.
    pub read: bool,
    /// Log write requests.
    pub write: bool,
    pub retention_policy: RetentionPolicy,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            delete: false,
            read: false,
            write: false,
            retention_policy: RetentionPolicy::default(),
        }
    }
}

impl Logging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [delete][Logging::delete].
    pub fn set_delete(mut self, v: bool) -> Self {
        self.delete = v;
        self
    }

    /// Sets the value of [read][Logging::read].
    pub fn set_read(mut self, v: bool) -> Self {
        self.read = v;
        self
    }

    /// Sets the value of [write][Logging::write].
    pub fn set_write(mut self, v: bool) -> Self {
        self.write = v;
        self
    }

    /// Sets the value of [retention_policy][Logging::retention_policy].
    pub fn set_retention_policy(mut self, v: RetentionPolicy) -> Self {
        self.retention_policy = v;
        self
    }
}

/// The Queue service properties of a storage account.
///
/// Settings left as `None` are not changed by
/// [QueueServiceClient::set_properties][crate::client::QueueServiceClient::set_properties].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct QueueServiceProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,
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

impl QueueServiceProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [logging][QueueServiceProperties::logging].
    pub fn set_logging(mut self, v: Logging) -> Self {
        self.logging = Some(v);
        self
    }

    /// Sets the value of [hour_metrics][QueueServiceProperties::hour_metrics].
    pub fn set_hour_metrics(mut self, v: Metrics) -> Self {
        self.hour_metrics = Some(v);
        self
    }

    /// Sets the value of [minute_metrics][QueueServiceProperties::minute_metrics].
    pub fn set_minute_metrics(mut self, v: Metrics) -> Self {
        self.minute_metrics = Some(v);
        self
    }

    /// Sets the value of [cors][QueueServiceProperties::cors].
    pub fn set_cors(mut self, v: Cors) -> Self {
        self.cors = Some(v);
        self
    }
}

azcorei::string_enum! {
    /// The status of the secondary location.
    GeoReplicationStatus {
        /// The secondary location is active and operational.
        Live => "live",
        /// Initial synchronization from the primary location is in progress.
        Bootstrap => "bootstrap",
        Unavailable => "unavailable",
    }
}

/// Geo-replication information for the secondary location.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct GeoReplication {
    pub status: GeoReplicationStatus,
    /// All writes before this time are available for reads from the
    /// secondary location.
    #[serde(with = "rfc1123_option", default)]
    pub last_sync_time: Option<DateTime<Utc>>,
}

/// The replication statistics of the Queue service.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct QueueServiceStatistics {
    pub geo_replication: Option<GeoReplication>,
    #[serde(skip)]
    pub response: ResponseMetadata,
}

/// A queue returned by
/// [QueueServiceClient::list_queues][crate::client::QueueServiceClient::list_queues].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct QueueItem {
    pub name: String,
    /// Only included if requested.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A page of queues.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ListQueuesPage {
    pub service_endpoint: String,
    pub prefix: Option<String>,
    pub queues: Vec<QueueItem>,
    /// The marker for the next page, empty on the last page.
    pub next_marker: String,
    pub response: ResponseMetadata,
}

impl azcore::paginator::PageableResponse for ListQueuesPage {
    type PageItem = QueueItem;

    fn items(self) -> Vec<QueueItem> {
        self.queues
    }

    fn next_page_token(&self) -> String {
        self.next_marker.clone()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListQueuesResult {
    #[serde(rename = "@ServiceEndpoint", default)]
    pub(crate) service_endpoint: String,
    #[serde(default)]
    pub(crate) prefix: Option<String>,
    #[serde(default)]
    pub(crate) queues: Option<QueueList>,
    #[serde(default)]
    pub(crate) next_marker: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueueList {
    #[serde(rename = "Queue", default)]
    pub(crate) items: Vec<QueueItem>,
}

impl ListQueuesPage {
    pub(crate) fn new(result: ListQueuesResult, response: ResponseMetadata) -> Self {
        Self {
            service_endpoint: result.service_endpoint,
            prefix: result.prefix.filter(|p| !p.is_empty()),
            queues: result.queues.map(|q| q.items).unwrap_or_default(),
            next_marker: result.next_marker,
            response,
        }
    }
}

/// The properties of a queue.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct QueueProperties {
    /// The approximate number of messages in the queue. The service may
    /// return more or fewer messages.
    pub approximate_messages_count: i64,
    pub metadata: HashMap<String, String>,
    pub response: ResponseMetadata,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueueMessage<'a> {
    #[serde(rename = "MessageText")]
    pub(crate) message_text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueueMessagesList<T> {
    #[serde(rename = "QueueMessage", default = "Vec::new")]
    pub(crate) messages: Vec<T>,
}

/// A message added by
/// [QueueClient::send_message][crate::client::QueueClient::send_message].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct SentMessage {
    pub message_id: String,
    /// Required to update or delete the message.
    pub pop_receipt: String,
    #[serde(with = "rfc1123")]
    pub insertion_time: DateTime<Utc>,
    #[serde(with = "rfc1123")]
    pub expiration_time: DateTime<Utc>,
    /// When the message becomes visible to receivers.
    #[serde(with = "rfc1123")]
    pub time_next_visible: DateTime<Utc>,
    #[serde(skip)]
    pub response: ResponseMetadata,
}

/// A message returned by
/// [QueueClient::receive_messages][crate::client::QueueClient::receive_messages].
///
/// The message stays in the queue, invisible to other receivers until
/// `time_next_visible`. Delete it once it is processed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct ReceivedMessage {
    pub message_id: String,
    pub pop_receipt: String,
    #[serde(with = "rfc1123")]
    pub insertion_time: DateTime<Utc>,
    #[serde(with = "rfc1123")]
    pub expiration_time: DateTime<Utc>,
    #[serde(with = "rfc1123")]
    pub time_next_visible: DateTime<Utc>,
    /// The number of times the message has been received.
    pub dequeue_count: i64,
    #[serde(default)]
    pub message_text: String,
}

/// A message returned by
/// [QueueClient::peek_messages][crate::client::QueueClient::peek_messages].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct PeekedMessage {
    pub message_id: String,
    #[serde(with = "rfc1123")]
    pub insertion_time: DateTime<Utc>,
    #[serde(with = "rfc1123")]
    pub expiration_time: DateTime<Utc>,
    pub dequeue_count: i64,
    #[serde(default)]
    pub message_text: String,
}

/// The messages returned by a receive call, possibly empty.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ReceivedMessages {
    pub messages: Vec<ReceivedMessage>,
    pub response: ResponseMetadata,
}

/// The messages returned by a peek call, possibly empty.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct PeekedMessages {
    pub messages: Vec<PeekedMessage>,
    pub response: ResponseMetadata,
}

/// The result of
/// [QueueClient::update_message][crate::client::QueueClient::update_message].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct UpdatedMessage {
    /// Replaces the pop receipt used in the update.
    pub pop_receipt: String,
    pub time_next_visible: Option<DateTime<Utc>>,
    pub response: ResponseMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use azcore::paginator::PageableResponse;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn service_properties() -> anyhow::Result<()> {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
<StorageServiceProperties>
  <Logging>
    <Version>1.0</Version>
    <Delete>true</Delete>
    <Read>false</Read>
    <Write>true</Write>
    <RetentionPolicy><Enabled>false</Enabled></RetentionPolicy>
  </Logging>
  <HourMetrics>
    <Version>1.0</Version>
    <Enabled>false</Enabled>
    <RetentionPolicy><Enabled>false</Enabled></RetentionPolicy>
  </HourMetrics>
  <Cors />
</StorageServiceProperties>"#;
        let got = azcorei::xml::from_slice::<QueueServiceProperties>(body.as_bytes())?;
        let want = QueueServiceProperties::new()
            .set_logging(Logging::new().set_delete(true).set_write(true))
            .set_hour_metrics(
                Metrics::new()
                    .set_enabled(false)
                    .set_retention_policy(RetentionPolicy::new()),
            )
            .set_cors(Cors::default());
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn set_properties_body() -> anyhow::Result<()> {
        let properties = QueueServiceProperties::new().set_logging(Logging::new().set_read(true));
        let bytes = azcorei::xml::to_bytes("StorageServiceProperties", &properties)?;
        let text = std::str::from_utf8(&bytes)?;
        assert!(
            text.ends_with("<StorageServiceProperties><Logging><Version>1.0</Version><Delete>false</Delete><Read>true</Read><Write>false</Write><RetentionPolicy><Enabled>false</Enabled></RetentionPolicy></Logging></StorageServiceProperties>"),
            "{text}"
        );
        Ok(())
    }

    #[test]
    fn statistics() -> anyhow::Result<()> {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
<StorageServiceStats>
  <GeoReplication>
    <Status>live</Status>
    <LastSyncTime>Thu, 14 Feb 2019 10:00:00 GMT</LastSyncTime>
  </GeoReplication>
</StorageServiceStats>"#;
        let got = azcorei::xml::from_slice::<QueueServiceStatistics>(body.as_bytes())?;
        let geo = got.geo_replication.expect("geo replication is present");
        assert_eq!(geo.status, GeoReplicationStatus::Live);
        assert_eq!(
            geo.last_sync_time,
            Some(Utc.with_ymd_and_hms(2019, 2, 14, 10, 0, 0).unwrap())
        );
        Ok(())
    }

    #[test]
    fn list_queues() -> anyhow::Result<()> {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
<EnumerationResults ServiceEndpoint="https://myaccount.queue.core.windows.net/">
  <Prefix>q</Prefix>
  <MaxResults>2</MaxResults>
  <Queues>
    <Queue>
      <Name>q1</Name>
      <Metadata><color>blue</color></Metadata>
    </Queue>
    <Queue><Name>q2</Name></Queue>
  </Queues>
  <NextMarker>/myaccount/q3</NextMarker>
</EnumerationResults>"#;
        let result = azcorei::xml::from_slice::<ListQueuesResult>(body.as_bytes())?;
        let page = ListQueuesPage::new(result, ResponseMetadata::default());
        assert_eq!(page.service_endpoint, "https://myaccount.queue.core.windows.net/");
        assert_eq!(page.prefix.as_deref(), Some("q"));
        assert_eq!(page.next_page_token(), "/myaccount/q3");
        let queues = page.items();
        assert_eq!(queues.len(), 2);
        assert_eq!(queues[0].name, "q1");
        assert_eq!(queues[0].metadata.get("color").map(String::as_str), Some("blue"));
        assert_eq!(queues[1].name, "q2");
        assert!(queues[1].metadata.is_empty());
        Ok(())
    }

    #[test]
    fn list_queues_last_page() -> anyhow::Result<()> {
        let body = r#"<EnumerationResults ServiceEndpoint="http://127.0.0.1:10001/devstoreaccount1"><Queues /><NextMarker /></EnumerationResults>"#;
        let result = azcorei::xml::from_slice::<ListQueuesResult>(body.as_bytes())?;
        let page = ListQueuesPage::new(result, ResponseMetadata::default());
        assert!(page.queues.is_empty());
        assert_eq!(page.next_page_token(), "");
        Ok(())
    }

    #[test]
    fn received_messages() -> anyhow::Result<()> {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
<QueueMessagesList>
  <QueueMessage>
    <MessageId>id-1</MessageId>
    <InsertionTime>Thu, 14 Feb 2019 10:00:00 GMT</InsertionTime>
    <ExpirationTime>Thu, 21 Feb 2019 10:00:00 GMT</ExpirationTime>
    <PopReceipt>AgAAAAMAAAA=</PopReceipt>
    <TimeNextVisible>Thu, 14 Feb 2019 10:00:30 GMT</TimeNextVisible>
    <DequeueCount>2</DequeueCount>
    <MessageText>hello</MessageText>
  </QueueMessage>
</QueueMessagesList>"#;
        let got = azcorei::xml::from_slice::<QueueMessagesList<ReceivedMessage>>(body.as_bytes())?;
        assert_eq!(got.messages.len(), 1);
        let message = &got.messages[0];
        assert_eq!(message.message_id, "id-1");
        assert_eq!(message.pop_receipt, "AgAAAAMAAAA=");
        assert_eq!(message.dequeue_count, 2);
        assert_eq!(message.message_text, "hello");
        assert_eq!(
            message.time_next_visible - message.insertion_time,
            chrono::Duration::seconds(30)
        );

        let got = azcorei::xml::from_slice::<QueueMessagesList<PeekedMessage>>(
            b"<QueueMessagesList />",
        )?;
        assert!(got.messages.is_empty());
        Ok(())
    }

    #[test]
    fn message_body() -> anyhow::Result<()> {
        let bytes = azcorei::xml::to_bytes(
            "QueueMessage",
            &QueueMessage {
                message_text: "1 < 2",
            },
        )?;
        let text = std::str::from_utf8(&bytes)?;
        assert!(
            text.ends_with("<QueueMessage><MessageText>1 &lt; 2</MessageText></QueueMessage>"),
            "{text}"
        );
        Ok(())
    }
}
