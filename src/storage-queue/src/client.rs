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

use crate::builder::{queue_client, queue_service_client};
use crate::model::QueueServiceProperties;
use auth::connection_string::{self, Service};
use azcore::client_builder::Error as BuilderError;
use azcorei::client::{ApiVersion, PipelineClient};
use azcorei::options::{ClientConfig, Credentials};
use std::collections::HashMap;
use std::sync::Arc;

/// Implements a client for the Queue service of a storage account.
///
/// # Example
/// ```no_run
/// # tokio_test::block_on(async {
/// # use azure_storage_queue::client::QueueServiceClient;
/// use futures::TryStreamExt;
/// let client = QueueServiceClient::from_connection_string("UseDevelopmentStorage=true")?
///     .build()
///     .await?;
/// let mut queues = client.list_queues().by_item();
/// while let Some(queue) = queues.try_next().await? {
///     println!("{}", queue.name);
/// }
/// # anyhow::Result::<()>::Ok(()) });
/// ```
///
/// # Configuration
///
/// To configure `QueueServiceClient` use the `with_*` methods in the type
/// returned by [builder()][QueueServiceClient::builder]. The endpoint is
/// required. Without credentials the requests are anonymous.
///
/// # Pooling and Cloning
///
/// `QueueServiceClient` holds a connection pool internally, it is advised to
/// create one and then reuse it. You do not need to wrap `QueueServiceClient`
/// in an [Rc](std::rc::Rc) or [Arc] to reuse it, because it already uses an
/// `Arc` internally. The [QueueClient]s returned by
/// [queue_client()][QueueServiceClient::queue_client] share the same pool.
#[derive(Clone, Debug)]
pub struct QueueServiceClient {
    inner: Arc<PipelineClient>,
}

impl QueueServiceClient {
    /// Returns a builder for [QueueServiceClient].
    ///
    /// ```no_run
    /// # tokio_test::block_on(async {
    /// # use azure_storage_queue::client::QueueServiceClient;
    /// use auth::credentials::SharedKeyCredential;
    /// let key = SharedKeyCredential::new("myaccount", "a2V5LWZvci10ZXN0cw==")?;
    /// let client = QueueServiceClient::builder("https://myaccount.queue.core.windows.net")
    ///     .with_credentials(key)
    ///     .build()
    ///     .await?;
    /// # anyhow::Result::<()>::Ok(()) });
    /// ```
    pub fn builder<V: Into<String>>(endpoint: V) -> queue_service_client::ClientBuilder {
        azcore::client_builder::internal::new_builder(queue_service_client::client::Factory)
            .with_endpoint(endpoint)
    }

    /// Returns a builder configured from a storage connection string.
    ///
    /// The endpoint and credentials are taken from the connection string,
    /// the other settings can be changed in the builder.
    pub fn from_connection_string(
        connection_string: &str,
    ) -> azcore::client_builder::Result<queue_service_client::ClientBuilder> {
        let (endpoint, credentials) = parse_connection_string(connection_string)?;
        Ok(Self::builder(endpoint).with_credentials(credentials))
    }

    pub(crate) async fn new(config: ClientConfig) -> azcore::client_builder::Result<Self> {
        Ok(Self {
            inner: Arc::new(new_pipeline_client(config)?),
        })
    }

    /// The Queue service endpoint.
    pub fn url(&self) -> &str {
        self.inner.endpoint().as_str()
    }

    /// Returns a client for the named queue.
    ///
    /// The queue is not created, see [QueueClient::create].
    pub fn queue_client<T: Into<String>>(&self, queue_name: T) -> QueueClient {
        QueueClient {
            inner: self.inner.clone(),
            name: queue_name.into(),
        }
    }

    /// Gets the logging, metrics and CORS settings of the Queue service.
    pub fn get_properties(&self) -> queue_service_client::GetProperties {
        queue_service_client::GetProperties::new(self.inner.clone())
    }

    /// Changes the logging, metrics and CORS settings of the Queue service.
    ///
    /// Settings not included in `properties` are left unchanged.
    pub fn set_properties(
        &self,
        properties: QueueServiceProperties,
    ) -> queue_service_client::SetProperties {
        queue_service_client::SetProperties::new(self.inner.clone(), properties)
    }

    /// Gets the replication statistics of the Queue service.
    pub fn get_statistics(&self) -> queue_service_client::GetStatistics {
        queue_service_client::GetStatistics::new(self.inner.clone())
    }

    /// Lists the queues in the account.
    pub fn list_queues(&self) -> queue_service_client::ListQueues {
        queue_service_client::ListQueues::new(self.inner.clone())
    }
}

/// Implements a client for a single queue and its messages.
///
/// # Example
/// ```no_run
/// # tokio_test::block_on(async {
/// # use azure_storage_queue::client::QueueClient;
/// let client = QueueClient::from_connection_string("UseDevelopmentStorage=true", "orders")?
///     .build()
///     .await?;
/// client.create().send().await?;
/// client.send_message("hello").send().await?;
/// let received = client.receive_messages().set_number_of_messages(10).send().await?;
/// for message in received.messages {
///     println!("{}", message.message_text);
///     client
///         .delete_message(message.message_id, message.pop_receipt)
///         .send()
///         .await?;
/// }
/// # anyhow::Result::<()>::Ok(()) });
/// ```
///
/// # Pooling and Cloning
///
/// `QueueClient` holds a connection pool internally, it is advised to create
/// one and then reuse it. Cloning the client is cheap.
#[derive(Clone, Debug)]
pub struct QueueClient {
    inner: Arc<PipelineClient>,
    name: String,
}

impl QueueClient {
    /// Returns a builder for a [QueueClient] targeting `queue_name` in the
    /// Queue service at `endpoint`.
    pub fn builder<E, Q>(endpoint: E, queue_name: Q) -> queue_client::ClientBuilder
    where
        E: Into<String>,
        Q: Into<String>,
    {
        azcore::client_builder::internal::new_builder(queue_client::client::Factory(
            queue_name.into(),
        ))
        .with_endpoint(endpoint)
    }

    /// Returns a builder configured from a storage connection string.
    pub fn from_connection_string<Q: Into<String>>(
        connection_string: &str,
        queue_name: Q,
    ) -> azcore::client_builder::Result<queue_client::ClientBuilder> {
        let (endpoint, credentials) = parse_connection_string(connection_string)?;
        Ok(Self::builder(endpoint, queue_name).with_credentials(credentials))
    }

    pub(crate) async fn new(
        config: ClientConfig,
        name: String,
    ) -> azcore::client_builder::Result<Self> {
        Ok(Self {
            inner: Arc::new(new_pipeline_client(config)?),
            name,
        })
    }

    /// The queue name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The queue URL.
    pub fn url(&self) -> String {
        self.inner.url_for(&format!("/{}", self.name)).to_string()
    }

    /// Creates the queue.
    pub fn create(&self) -> queue_client::Create {
        queue_client::Create::new(self.inner.clone(), self.name.clone())
    }

    /// Deletes the queue and all its messages.
    pub fn delete(&self) -> queue_client::Delete {
        queue_client::Delete::new(self.inner.clone(), self.name.clone())
    }

    /// Gets the queue metadata and the approximate number of messages.
    pub fn get_properties(&self) -> queue_client::GetProperties {
        queue_client::GetProperties::new(self.inner.clone(), self.name.clone())
    }

    /// Replaces the queue metadata.
    pub fn set_metadata<T, K, V>(&self, metadata: T) -> queue_client::SetMetadata
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let metadata: HashMap<String, String> = metadata
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        queue_client::SetMetadata::new(self.inner.clone(), self.name.clone(), metadata)
    }

    /// Adds a message to the back of the queue.
    ///
    /// The message text is sent as-is, it must be valid in an XML document
    /// and at most 64 KiB. Applications sending binary data should encode it,
    /// for example using base64.
    pub fn send_message<T: Into<String>>(&self, text: T) -> queue_client::SendMessage {
        queue_client::SendMessage::new(self.inner.clone(), self.name.clone(), text.into())
    }

    /// Receives messages from the front of the queue, hiding them from other
    /// receivers for the visibility timeout.
    pub fn receive_messages(&self) -> queue_client::ReceiveMessages {
        queue_client::ReceiveMessages::new(self.inner.clone(), self.name.clone())
    }

    /// Returns messages from the front of the queue without changing their
    /// visibility.
    pub fn peek_messages(&self) -> queue_client::PeekMessages {
        queue_client::PeekMessages::new(self.inner.clone(), self.name.clone())
    }

    /// Changes the visibility timeout, and optionally the content, of a
    /// received message.
    pub fn update_message<I, P>(&self, message_id: I, pop_receipt: P) -> queue_client::UpdateMessage
    where
        I: Into<String>,
        P: Into<String>,
    {
        queue_client::UpdateMessage::new(
            self.inner.clone(),
            self.name.clone(),
            message_id.into(),
            pop_receipt.into(),
        )
    }

    /// Deletes a received message.
    pub fn delete_message<I, P>(&self, message_id: I, pop_receipt: P) -> queue_client::DeleteMessage
    where
        I: Into<String>,
        P: Into<String>,
    {
        queue_client::DeleteMessage::new(
            self.inner.clone(),
            self.name.clone(),
            message_id.into(),
            pop_receipt.into(),
        )
    }

    /// Deletes all the messages in the queue.
    pub fn clear_messages(&self) -> queue_client::ClearMessages {
        queue_client::ClearMessages::new(self.inner.clone(), self.name.clone())
    }
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
        connection_string::parse(connection_string, Service::Queue).map_err(BuilderError::config)?;
    let credentials = parsed.credentials().map_err(BuilderError::cred)?;
    Ok((parsed.endpoint, credentials))
}
