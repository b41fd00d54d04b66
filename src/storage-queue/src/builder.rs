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

use crate::Result;
use crate::model::ResponseMetadata;
use azcore::options::RequestOptions;
use azcore::response::Response;
use azcorei::client::PipelineClient;
use azcorei::operation::{Operation, OperationRequest};
use std::sync::Arc;

/// Common implementation for the queue request builders.
#[derive(Clone, Debug)]
pub(crate) struct RequestBuilder<R: std::default::Default> {
    inner: Arc<PipelineClient>,
    operation: &'static Operation,
    request: R,
    options: RequestOptions,
}

impl<R> RequestBuilder<R>
where
    R: std::default::Default,
{
    pub(crate) fn new(inner: Arc<PipelineClient>, operation: &'static Operation) -> Self {
        Self {
            inner,
            operation,
            request: R::default(),
            options: RequestOptions::default(),
        }
    }

    fn operation_request(&self) -> OperationRequest {
        OperationRequest::new(self.operation, self.options.clone())
    }
}

macro_rules! request_builder {
    ($name:ident) => {
        #[doc(hidden)]
        impl azcore::options::internal::RequestBuilder for $name {
            fn request_options(&mut self) -> &mut RequestOptions {
                &mut self.0.options
            }
        }
    };
}

fn response_metadata<T>(response: &Response<T>) -> Result<ResponseMetadata> {
    ResponseMetadata::from_headers(response.headers())
}

pub mod queue_service_client {
    use super::{RequestBuilder, response_metadata};
    use crate::Result;
    use crate::model::*;
    use azcore::options::RequestOptions;
    use azcore::paginator::{ItemPaginator, PageSettings, Paginator};
    use azcorei::client::PipelineClient;
    use std::sync::Arc;

    /// A builder for [QueueServiceClient][crate::client::QueueServiceClient].
    ///
    /// ```no_run
    /// # tokio_test::block_on(async {
    /// # use azure_storage_queue::*;
    /// # use builder::queue_service_client::ClientBuilder;
    /// # use client::QueueServiceClient;
    /// let builder: ClientBuilder = QueueServiceClient::builder("https://myaccount.queue.core.windows.net");
    /// let client = builder
    ///     .with_user_agent_prefix("my-app/1.0")
    ///     .build()
    ///     .await?;
    /// # anyhow::Result::<()>::Ok(()) });
    /// ```
    pub type ClientBuilder =
        azcore::client_builder::ClientBuilder<client::Factory, azcorei::options::Credentials>;

    pub(crate) mod client {
        use crate::client::QueueServiceClient;
        #[derive(Debug)]
        pub struct Factory;
        impl azcore::client_builder::internal::ClientFactory for Factory {
            type Client = QueueServiceClient;
            type Credentials = azcorei::options::Credentials;
            async fn build(
                self,
                config: azcorei::options::ClientConfig,
            ) -> azcore::client_builder::Result<Self::Client> {
                Self::Client::new(config).await
            }
        }
    }

    /// The request builder for [QueueServiceClient::get_properties][crate::client::QueueServiceClient::get_properties] calls.
    #[derive(Clone, Debug)]
    pub struct GetProperties(RequestBuilder<()>);

    impl GetProperties {
        pub(crate) fn new(inner: Arc<PipelineClient>) -> Self {
            Self(RequestBuilder::new(
                inner,
                &crate::operations::GET_SERVICE_PROPERTIES,
            ))
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueServiceClient::get_properties", level = "debug", skip_all)]
        pub async fn send(self) -> Result<QueueServiceProperties> {
            let response = self
                .0
                .inner
                .xml::<QueueServiceProperties>(self.0.operation_request())
                .await?;
            let metadata = response_metadata(&response)?;
            let mut properties = response.into_body();
            properties.response = metadata;
            Ok(properties)
        }
    }

    request_builder!(GetProperties);

    /// The request builder for [QueueServiceClient::set_properties][crate::client::QueueServiceClient::set_properties] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use azure_storage_queue::builder::queue_service_client::SetProperties;
    /// # tokio_test::block_on(async {
    /// use azure_storage_queue::model::{Metrics, RetentionPolicy};
    /// let builder = prepare_request_builder();
    /// let metrics = Metrics::new()
    ///     .set_enabled(true)
    ///     .set_include_apis(true)
    ///     .set_retention_policy(RetentionPolicy::new().set_enabled(true).set_days(7));
    /// let response = builder.set_hour_metrics(metrics).send().await?;
    /// println!("request id {:?}", response.request_id);
    /// # azure_storage_queue::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> SetProperties {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct SetProperties(RequestBuilder<QueueServiceProperties>);

    impl SetProperties {
        pub(crate) fn new(inner: Arc<PipelineClient>, properties: QueueServiceProperties) -> Self {
            let mut builder =
                RequestBuilder::<QueueServiceProperties>::new(inner, &crate::operations::SET_SERVICE_PROPERTIES);
            builder.request = properties;
            Self(builder)
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueServiceClient::set_properties", level = "debug", skip_all)]
        pub async fn send(self) -> Result<ResponseMetadata> {
            let request = self
                .0
                .operation_request()
                .xml_body("StorageServiceProperties", &self.0.request)?;
            let response = self.0.inner.empty(request).await?;
            response_metadata(&response)
        }

        /// Sets the Storage Analytics logging settings.
        pub fn set_logging(mut self, v: Logging) -> Self {
            self.0.request.logging = Some(v);
            self
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

    /// The request builder for [QueueServiceClient::get_statistics][crate::client::QueueServiceClient::get_statistics] calls.
    ///
    /// The statistics are only available from the secondary endpoint of
    /// accounts with read-access geo-redundant replication.
    #[derive(Clone, Debug)]
    pub struct GetStatistics(RequestBuilder<()>);

    impl GetStatistics {
        pub(crate) fn new(inner: Arc<PipelineClient>) -> Self {
            Self(RequestBuilder::new(inner, &crate::operations::GET_STATISTICS))
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueServiceClient::get_statistics", level = "debug", skip_all)]
        pub async fn send(self) -> Result<QueueServiceStatistics> {
            let response = self
                .0
                .inner
                .xml::<QueueServiceStatistics>(self.0.operation_request())
                .await?;
            let metadata = response_metadata(&response)?;
            let mut statistics = response.into_body();
            statistics.response = metadata;
            Ok(statistics)
        }
    }

    request_builder!(GetStatistics);

    #[derive(Clone, Debug, Default)]
    pub(crate) struct ListQueuesRequest {
        prefix: Option<String>,
        include_metadata: bool,
        max_page_size: Option<i32>,
        continuation_token: Option<String>,
    }

    impl RequestBuilder<ListQueuesRequest> {
        async fn fetch(self, marker: String) -> Result<ListQueuesPage> {
            let request = self
                .operation_request()
                .query_opt("prefix", self.request.prefix.as_deref())
                .query_opt("marker", (!marker.is_empty()).then_some(marker))
                .query_opt("maxresults", self.request.max_page_size)
                .query_opt("include", self.request.include_metadata.then_some("metadata"));
            let response = self.inner.xml::<ListQueuesResult>(request).await?;
            let metadata = response_metadata(&response)?;
            Ok(ListQueuesPage::new(response.into_body(), metadata))
        }
    }

    /// The request builder for [QueueServiceClient::list_queues][crate::client::QueueServiceClient::list_queues] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use azure_storage_queue::builder::queue_service_client::ListQueues;
    /// # tokio_test::block_on(async {
    /// use futures::TryStreamExt;
    /// let builder = prepare_request_builder();
    /// let mut queues = builder.set_prefix("orders-").by_item();
    /// while let Some(queue) = queues.try_next().await? {
    ///     println!("{}", queue.name);
    /// }
    /// # azure_storage_queue::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> ListQueues {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct ListQueues(RequestBuilder<ListQueuesRequest>);

    impl ListQueues {
        pub(crate) fn new(inner: Arc<PipelineClient>) -> Self {
            Self(RequestBuilder::new(inner, &crate::operations::LIST_QUEUES))
        }

        /// Sends the request, returns a single page.
        #[tracing::instrument(name = "QueueServiceClient::list_queues", level = "debug", skip_all)]
        pub async fn send(self) -> Result<ListQueuesPage> {
            let marker = self.0.request.continuation_token.clone().unwrap_or_default();
            self.0.fetch(marker).await
        }

        /// Streams the pages of the listing.
        pub fn by_page(self) -> Paginator<ListQueuesPage, crate::Error> {
            let seed = self.0.request.continuation_token.clone().unwrap_or_default();
            let execute = move |marker: String| {
                let builder = self.0.clone();
                builder.fetch(marker)
            };
            Paginator::new(seed, execute)
        }

        /// Streams the queues, fetching new pages as needed.
        pub fn by_item(self) -> ItemPaginator<ListQueuesPage, crate::Error> {
            self.by_page().items()
        }

        /// Only list the queues with names starting with this prefix.
        pub fn set_prefix<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.prefix = Some(v.into());
            self
        }

        /// Include the metadata of each queue.
        pub fn set_include_metadata(mut self, v: bool) -> Self {
            self.0.request.include_metadata = v;
            self
        }

        /// The maximum number of queues in each page, at most 5000.
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

    request_builder!(ListQueues);
}

pub mod queue_client {
    use super::{RequestBuilder, response_metadata};
    use crate::Result;
    use crate::model::*;
    use azcore::error::Error;
    use azcore::options::RequestOptions;
    use azcorei::client::PipelineClient;
    use azcorei::headers;
    use azcorei::operation::{OperationRequest, required};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    /// A builder for [QueueClient][crate::client::QueueClient].
    ///
    /// ```no_run
    /// # tokio_test::block_on(async {
    /// # use azure_storage_queue::*;
    /// # use builder::queue_client::ClientBuilder;
    /// # use client::QueueClient;
    /// let builder: ClientBuilder =
    ///     QueueClient::builder("https://myaccount.queue.core.windows.net", "my-queue");
    /// let client = builder.with_tracing().build().await?;
    /// # anyhow::Result::<()>::Ok(()) });
    /// ```
    pub type ClientBuilder =
        azcore::client_builder::ClientBuilder<client::Factory, azcorei::options::Credentials>;

    pub(crate) mod client {
        use crate::client::QueueClient;
        #[derive(Debug)]
        pub struct Factory(pub(crate) String);
        impl azcore::client_builder::internal::ClientFactory for Factory {
            type Client = QueueClient;
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
        fn queue_request(&self, queue: &str) -> Result<OperationRequest> {
            Ok(self
                .operation_request()
                .path_param("queue-name", required("queue_name", queue)?))
        }
    }

    #[derive(Clone, Debug, Default)]
    pub(crate) struct QueueRequest {
        queue: String,
        metadata: HashMap<String, String>,
    }

    impl RequestBuilder<QueueRequest> {
        fn with_queue(inner: Arc<PipelineClient>, operation: &'static azcorei::operation::Operation, queue: String) -> Self {
            let mut builder = Self::new(inner, operation);
            builder.request.queue = queue;
            builder
        }

        async fn execute(self) -> Result<ResponseMetadata> {
            let request = self
                .queue_request(&self.request.queue)?
                .metadata(&self.request.metadata);
            let response = self.inner.empty(request).await?;
            response_metadata(&response)
        }
    }

    /// The request builder for [QueueClient::create][crate::client::QueueClient::create] calls.
    ///
    /// Creating a queue that already exists succeeds if the metadata is
    /// unchanged, and fails with a `409 Conflict` error otherwise.
    #[derive(Clone, Debug)]
    pub struct Create(RequestBuilder<QueueRequest>);

    impl Create {
        pub(crate) fn new(inner: Arc<PipelineClient>, queue: String) -> Self {
            Self(RequestBuilder::with_queue(inner, &crate::operations::CREATE_QUEUE, queue))
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueClient::create", level = "debug", skip_all)]
        pub async fn send(self) -> Result<ResponseMetadata> {
            self.0.execute().await
        }

        /// Sets the queue metadata.
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

    request_builder!(Create);

    /// The request builder for [QueueClient::delete][crate::client::QueueClient::delete] calls.
    #[derive(Clone, Debug)]
    pub struct Delete(RequestBuilder<QueueRequest>);

    impl Delete {
        pub(crate) fn new(inner: Arc<PipelineClient>, queue: String) -> Self {
            Self(RequestBuilder::with_queue(inner, &crate::operations::DELETE_QUEUE, queue))
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueClient::delete", level = "debug", skip_all)]
        pub async fn send(self) -> Result<ResponseMetadata> {
            self.0.execute().await
        }
    }

    request_builder!(Delete);

    /// The request builder for [QueueClient::set_metadata][crate::client::QueueClient::set_metadata] calls.
    ///
    /// The new metadata replaces all the existing metadata, an empty map
    /// clears it.
    #[derive(Clone, Debug)]
    pub struct SetMetadata(RequestBuilder<QueueRequest>);

    impl SetMetadata {
        pub(crate) fn new(inner: Arc<PipelineClient>, queue: String, metadata: HashMap<String, String>) -> Self {
            let mut builder =
                RequestBuilder::with_queue(inner, &crate::operations::SET_QUEUE_METADATA, queue);
            builder.request.metadata = metadata;
            Self(builder)
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueClient::set_metadata", level = "debug", skip_all)]
        pub async fn send(self) -> Result<ResponseMetadata> {
            self.0.execute().await
        }
    }

    request_builder!(SetMetadata);

    /// The request builder for [QueueClient::clear_messages][crate::client::QueueClient::clear_messages] calls.
    #[derive(Clone, Debug)]
    pub struct ClearMessages(RequestBuilder<QueueRequest>);

    impl ClearMessages {
        pub(crate) fn new(inner: Arc<PipelineClient>, queue: String) -> Self {
            Self(RequestBuilder::with_queue(inner, &crate::operations::CLEAR_MESSAGES, queue))
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueClient::clear_messages", level = "debug", skip_all)]
        pub async fn send(self) -> Result<ResponseMetadata> {
            self.0.execute().await
        }
    }

    request_builder!(ClearMessages);

    /// The request builder for [QueueClient::get_properties][crate::client::QueueClient::get_properties] calls.
    #[derive(Clone, Debug)]
    pub struct GetProperties(RequestBuilder<QueueRequest>);

    impl GetProperties {
        pub(crate) fn new(inner: Arc<PipelineClient>, queue: String) -> Self {
            Self(RequestBuilder::with_queue(
                inner,
                &crate::operations::GET_QUEUE_PROPERTIES,
                queue,
            ))
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueClient::get_properties", level = "debug", skip_all)]
        pub async fn send(self) -> Result<QueueProperties> {
            let request = self.0.queue_request(&self.0.request.queue)?;
            let response = self.0.inner.empty(request).await?;
            let count = headers::get_parse::<i64>(response.headers(), APPROXIMATE_MESSAGES_COUNT)?;
            Ok(QueueProperties {
                approximate_messages_count: count.unwrap_or_default(),
                metadata: headers::metadata(response.headers()),
                response: response_metadata(&response)?,
            })
        }
    }

    request_builder!(GetProperties);

    const APPROXIMATE_MESSAGES_COUNT: &str = "x-ms-approximate-messages-count";
    const POP_RECEIPT: &str = "x-ms-popreceipt";
    const TIME_NEXT_VISIBLE: &str = "x-ms-time-next-visible";

    #[derive(Clone, Debug, Default)]
    pub(crate) struct SendMessageRequest {
        queue: String,
        text: String,
        visibility_timeout: Option<u64>,
        time_to_live: Option<i64>,
    }

    /// The request builder for [QueueClient::send_message][crate::client::QueueClient::send_message] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use azure_storage_queue::builder::queue_client::SendMessage;
    /// # tokio_test::block_on(async {
    /// use std::time::Duration;
    /// let builder = prepare_request_builder();
    /// let message = builder
    ///     .set_visibility_timeout(Duration::from_secs(30))
    ///     .set_time_to_live(Duration::from_secs(3600))
    ///     .send()
    ///     .await?;
    /// println!("sent {} visible at {}", message.message_id, message.time_next_visible);
    /// # azure_storage_queue::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> SendMessage {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct SendMessage(RequestBuilder<SendMessageRequest>);

    impl SendMessage {
        pub(crate) fn new(inner: Arc<PipelineClient>, queue: String, text: String) -> Self {
            let mut builder =
                RequestBuilder::<SendMessageRequest>::new(inner, &crate::operations::SEND_MESSAGE);
            builder.request.queue = queue;
            builder.request.text = text;
            Self(builder)
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueClient::send_message", level = "debug", skip_all)]
        pub async fn send(self) -> Result<SentMessage> {
            let body = QueueMessage {
                message_text: &self.0.request.text,
            };
            let request = self
                .0
                .queue_request(&self.0.request.queue)?
                .query_opt("visibilitytimeout", self.0.request.visibility_timeout)
                .query_opt("messagettl", self.0.request.time_to_live)
                .xml_body("QueueMessage", &body)?;
            let response = self
                .0
                .inner
                .xml::<QueueMessagesList<SentMessage>>(request)
                .await?;
            let metadata = response_metadata(&response)?;
            let mut message = response
                .into_body()
                .messages
                .into_iter()
                .next()
                .ok_or_else(|| Error::deser("the response does not contain the sent message"))?;
            message.response = metadata;
            Ok(message)
        }

        /// Hide the message from receivers for this long, at most seven
        /// days. The message is visible immediately by default.
        pub fn set_visibility_timeout<T: Into<Duration>>(mut self, v: T) -> Self {
            self.0.request.visibility_timeout = Some(v.into().as_secs());
            self
        }

        /// Expire the message after this time. The service uses seven days by
        /// default.
        pub fn set_time_to_live<T: Into<Duration>>(mut self, v: T) -> Self {
            self.0.request.time_to_live = Some(v.into().as_secs() as i64);
            self
        }

        /// The message never expires.
        pub fn set_never_expires(mut self) -> Self {
            self.0.request.time_to_live = Some(-1);
            self
        }
    }

    request_builder!(SendMessage);

    #[derive(Clone, Debug, Default)]
    pub(crate) struct ReceiveRequest {
        queue: String,
        number_of_messages: Option<i32>,
        visibility_timeout: Option<u64>,
    }

    impl RequestBuilder<ReceiveRequest> {
        fn receive_request(&self) -> Result<OperationRequest> {
            Ok(self
                .queue_request(&self.request.queue)?
                .query_opt("numofmessages", self.request.number_of_messages)
                .query_opt("visibilitytimeout", self.request.visibility_timeout))
        }
    }

    /// The request builder for [QueueClient::receive_messages][crate::client::QueueClient::receive_messages] calls.
    #[derive(Clone, Debug)]
    pub struct ReceiveMessages(RequestBuilder<ReceiveRequest>);

    impl ReceiveMessages {
        pub(crate) fn new(inner: Arc<PipelineClient>, queue: String) -> Self {
            let mut builder =
                RequestBuilder::<ReceiveRequest>::new(inner, &crate::operations::RECEIVE_MESSAGES);
            builder.request.queue = queue;
            Self(builder)
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueClient::receive_messages", level = "debug", skip_all)]
        pub async fn send(self) -> Result<ReceivedMessages> {
            let request = self.0.receive_request()?;
            let response = self
                .0
                .inner
                .xml::<QueueMessagesList<ReceivedMessage>>(request)
                .await?;
            Ok(ReceivedMessages {
                response: response_metadata(&response)?,
                messages: response.into_body().messages,
            })
        }

        /// The number of messages to receive, from 1 to 32. The service
        /// returns one message by default.
        pub fn set_number_of_messages(mut self, v: i32) -> Self {
            self.0.request.number_of_messages = Some(v);
            self
        }

        /// Hide the received messages from other receivers for this long. The
        /// service uses 30 seconds by default.
        pub fn set_visibility_timeout<T: Into<Duration>>(mut self, v: T) -> Self {
            self.0.request.visibility_timeout = Some(v.into().as_secs());
            self
        }
    }

    request_builder!(ReceiveMessages);

    /// The request builder for [QueueClient::peek_messages][crate::client::QueueClient::peek_messages] calls.
    ///
    /// Peeking does not change the visibility of the messages.
    #[derive(Clone, Debug)]
    pub struct PeekMessages(RequestBuilder<ReceiveRequest>);

    impl PeekMessages {
        pub(crate) fn new(inner: Arc<PipelineClient>, queue: String) -> Self {
            let mut builder =
                RequestBuilder::<ReceiveRequest>::new(inner, &crate::operations::PEEK_MESSAGES);
            builder.request.queue = queue;
            Self(builder)
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueClient::peek_messages", level = "debug", skip_all)]
        pub async fn send(self) -> Result<PeekedMessages> {
            let request = self.0.receive_request()?;
            let response = self
                .0
                .inner
                .xml::<QueueMessagesList<PeekedMessage>>(request)
                .await?;
            Ok(PeekedMessages {
                response: response_metadata(&response)?,
                messages: response.into_body().messages,
            })
        }

        /// The number of messages to peek, from 1 to 32.
        pub fn set_number_of_messages(mut self, v: i32) -> Self {
            self.0.request.number_of_messages = Some(v);
            self
        }
    }

    request_builder!(PeekMessages);

    #[derive(Clone, Debug, Default)]
    pub(crate) struct MessageRequest {
        queue: String,
        message_id: String,
        pop_receipt: String,
        text: Option<String>,
        visibility_timeout: u64,
    }

    impl RequestBuilder<MessageRequest> {
        fn with_message(
            inner: Arc<PipelineClient>,
            operation: &'static azcorei::operation::Operation,
            queue: String,
            message_id: String,
            pop_receipt: String,
        ) -> Self {
            let mut builder = Self::new(inner, operation);
            builder.request.queue = queue;
            builder.request.message_id = message_id;
            builder.request.pop_receipt = pop_receipt;
            builder
        }

        fn message_request(&self) -> Result<OperationRequest> {
            Ok(self
                .queue_request(&self.request.queue)?
                .path_param(
                    "message-id",
                    required("message_id", &self.request.message_id)?,
                )
                .query("popreceipt", required("pop_receipt", &self.request.pop_receipt)?))
        }
    }

    /// The request builder for [QueueClient::update_message][crate::client::QueueClient::update_message] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use azure_storage_queue::builder::queue_client::UpdateMessage;
    /// # tokio_test::block_on(async {
    /// use std::time::Duration;
    /// let builder = prepare_request_builder();
    /// let updated = builder
    ///     .set_message_text("still working")
    ///     .set_visibility_timeout(Duration::from_secs(60))
    ///     .send()
    ///     .await?;
    /// println!("new pop receipt {}", updated.pop_receipt);
    /// # azure_storage_queue::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> UpdateMessage {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct UpdateMessage(RequestBuilder<MessageRequest>);

    impl UpdateMessage {
        pub(crate) fn new(
            inner: Arc<PipelineClient>,
            queue: String,
            message_id: String,
            pop_receipt: String,
        ) -> Self {
            Self(RequestBuilder::with_message(
                inner,
                &crate::operations::UPDATE_MESSAGE,
                queue,
                message_id,
                pop_receipt,
            ))
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueClient::update_message", level = "debug", skip_all)]
        pub async fn send(self) -> Result<UpdatedMessage> {
            let mut request = self
                .0
                .message_request()?
                .query("visibilitytimeout", self.0.request.visibility_timeout);
            if let Some(text) = &self.0.request.text {
                request = request.xml_body(
                    "QueueMessage",
                    &QueueMessage {
                        message_text: text,
                    },
                )?;
            }
            let response = self.0.inner.empty(request).await?;
            Ok(UpdatedMessage {
                pop_receipt: headers::required_str(response.headers(), POP_RECEIPT)?.to_string(),
                time_next_visible: headers::get_date(response.headers(), TIME_NEXT_VISIBLE)?,
                response: response_metadata(&response)?,
            })
        }

        /// Replaces the message content. The content is unchanged by
        /// default.
        pub fn set_message_text<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.text = Some(v.into());
            self
        }

        /// The message becomes visible after this time. By default it is
        /// visible immediately.
        pub fn set_visibility_timeout<T: Into<Duration>>(mut self, v: T) -> Self {
            self.0.request.visibility_timeout = v.into().as_secs();
            self
        }
    }

    request_builder!(UpdateMessage);

    /// The request builder for [QueueClient::delete_message][crate::client::QueueClient::delete_message] calls.
    #[derive(Clone, Debug)]
    pub struct DeleteMessage(RequestBuilder<MessageRequest>);

    impl DeleteMessage {
        pub(crate) fn new(
            inner: Arc<PipelineClient>,
            queue: String,
            message_id: String,
            pop_receipt: String,
        ) -> Self {
            Self(RequestBuilder::with_message(
                inner,
                &crate::operations::DELETE_MESSAGE,
                queue,
                message_id,
                pop_receipt,
            ))
        }

        /// Sends the request.
        #[tracing::instrument(name = "QueueClient::delete_message", level = "debug", skip_all)]
        pub async fn send(self) -> Result<ResponseMetadata> {
            let request = self.0.message_request()?;
            let response = self.0.inner.empty(request).await?;
            response_metadata(&response)
        }
    }

    request_builder!(DeleteMessage);
}
