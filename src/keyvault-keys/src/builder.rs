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

pub mod key_client {
    use crate::Result;
    use crate::model::*;
    use azcore::options::RequestOptions;
    use azcore::paginator::{ItemPaginator, Paginator};
    use azcore::response::Response;
    use azcorei::client::PipelineClient;
    use azcorei::operation::{Operation, OperationRequest, required};
    use chrono::{DateTime, Utc};
    use std::sync::Arc;

    /// A builder for [KeyClient][crate::client::KeyClient].
    ///
    /// ```no_run
    /// # tokio_test::block_on(async {
    /// # use azure_keyvault_keys::*;
    /// # use builder::key_client::ClientBuilder;
    /// # use client::KeyClient;
    /// let credentials = auth::credentials::static_token::Builder::new("my-token").build();
    /// let builder: ClientBuilder = KeyClient::builder("https://myvault.vault.azure.net");
    /// let client = builder
    ///     .with_credentials(credentials)
    ///     .with_user_agent_prefix("my-app/1.0")
    ///     .build()
    ///     .await?;
    /// # anyhow::Result::<()>::Ok(()) });
    /// ```
    pub type ClientBuilder =
        azcore::client_builder::ClientBuilder<client::Factory, azcorei::options::Credentials>;

    pub(crate) mod client {
        use crate::client::KeyClient;
        #[derive(Debug)]
        pub struct Factory;
        impl azcore::client_builder::internal::ClientFactory for Factory {
            type Client = KeyClient;
            type Credentials = azcorei::options::Credentials;
            async fn build(
                self,
                config: azcorei::options::ClientConfig,
            ) -> azcore::client_builder::Result<Self::Client> {
                Self::Client::new(config).await
            }
        }
    }

    /// Common implementation for [KeyClient][crate::client::KeyClient] request builders.
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

    #[derive(Clone, Debug, Default)]
    pub(crate) struct CreateKeyRequest {
        name: String,
        hsm: Option<bool>,
        params: KeyCreateParameters,
    }

    /// The request builder for [KeyClient::create_key][crate::client::KeyClient::create_key],
    /// [KeyClient::create_ec_key][crate::client::KeyClient::create_ec_key] and
    /// [KeyClient::create_rsa_key][crate::client::KeyClient::create_rsa_key] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use azure_keyvault_keys::builder::key_client::CreateKey;
    /// # tokio_test::block_on(async {
    /// # use azure_keyvault_keys::model::KeyOperation;
    /// let builder = prepare_request_builder();
    /// let key = builder
    ///     .set_key_size(4096)
    ///     .set_key_operations([KeyOperation::WrapKey, KeyOperation::UnwrapKey])
    ///     .send()
    ///     .await?;
    /// # azure_keyvault_keys::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> CreateKey {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct CreateKey(RequestBuilder<CreateKeyRequest>);

    impl CreateKey {
        pub(crate) fn new<N: Into<String>>(
            inner: Arc<PipelineClient>,
            operation: &'static Operation,
            name: N,
        ) -> Self {
            let mut builder = RequestBuilder::<CreateKeyRequest>::new(inner, operation);
            builder.request.name = name.into();
            Self(builder)
        }

        /// Sends the request.
        #[tracing::instrument(name = "KeyClient::create_key", level = "debug", skip_all, fields(operation = self.0.operation.name))]
        pub async fn send(self) -> Result<Key> {
            let mut params = self.0.request.params.clone();
            if let Some(hsm) = self.0.request.hsm {
                params.kty = params.kty.map(|kty| with_hsm(kty, hsm));
            }
            let request = self
                .0
                .operation_request()
                .path_param("key-name", required("name", &self.0.request.name)?)
                .json_body(&params)?;
            let bundle = self.0.inner.json::<KeyBundle>(request).await?;
            Key::try_from(bundle.into_body())
        }

        /// Sets the key type.
        pub fn set_key_type<T: Into<KeyType>>(mut self, v: T) -> Self {
            self.0.request.params.kty = Some(v.into());
            self
        }

        /// Create the key in a hardware security module.
        ///
        /// Only applies to elliptic curve and RSA keys.
        pub fn set_hsm(mut self, v: bool) -> Self {
            self.0.request.hsm = Some(v);
            self
        }

        /// Sets the key size in bits, e.g. 2048 or 4096 for RSA keys.
        pub fn set_key_size(mut self, v: i32) -> Self {
            self.0.request.params.key_size = Some(v);
            self
        }

        /// Sets the elliptic curve name.
        pub fn set_curve<T: Into<KeyCurveName>>(mut self, v: T) -> Self {
            self.0.request.params.crv = Some(v.into());
            self
        }

        /// Sets the operations permitted with the key.
        pub fn set_key_operations<T, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = V>,
            V: Into<KeyOperation>,
        {
            self.0.request.params.key_ops = v.into_iter().map(Into::into).collect();
            self
        }

        /// Creates the key in the enabled or disabled state.
        pub fn set_enabled(mut self, v: bool) -> Self {
            self.0.request.params.attributes.enabled = Some(v);
            self
        }

        /// The key cannot be used before this time.
        pub fn set_not_before<T: Into<DateTime<Utc>>>(mut self, v: T) -> Self {
            self.0.request.params.attributes.not_before = Some(v.into());
            self
        }

        /// The key cannot be used after this time.
        pub fn set_expires<T: Into<DateTime<Utc>>>(mut self, v: T) -> Self {
            self.0.request.params.attributes.expires = Some(v.into());
            self
        }

        /// Sets the application specific metadata.
        pub fn set_tags<T, K, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: Into<String>,
        {
            self.0.request.params.tags = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
            self
        }
    }

    request_builder!(CreateKey);

    fn with_hsm(kty: KeyType, hsm: bool) -> KeyType {
        match (kty, hsm) {
            (KeyType::Ec | KeyType::EcHsm, true) => KeyType::EcHsm,
            (KeyType::Ec | KeyType::EcHsm, false) => KeyType::Ec,
            (KeyType::Rsa | KeyType::RsaHsm, true) => KeyType::RsaHsm,
            (KeyType::Rsa | KeyType::RsaHsm, false) => KeyType::Rsa,
            (other, _) => other,
        }
    }

    #[derive(Clone, Debug, Default)]
    pub(crate) struct ImportKeyRequest {
        name: String,
        params: KeyImportParameters,
    }

    /// The request builder for [KeyClient::import_key][crate::client::KeyClient::import_key] calls.
    #[derive(Clone, Debug)]
    pub struct ImportKey(RequestBuilder<ImportKeyRequest>);

    impl ImportKey {
        pub(crate) fn new<N: Into<String>>(
            inner: Arc<PipelineClient>,
            name: N,
            key: JsonWebKey,
        ) -> Self {
            let mut builder =
                RequestBuilder::<ImportKeyRequest>::new(inner, &crate::operations::IMPORT_KEY);
            builder.request.name = name.into();
            builder.request.params.key = key;
            Self(builder)
        }

        /// Sends the request.
        #[tracing::instrument(name = "KeyClient::import_key", level = "debug", skip_all)]
        pub async fn send(self) -> Result<Key> {
            let request = self
                .0
                .operation_request()
                .path_param("key-name", required("name", &self.0.request.name)?)
                .json_body(&self.0.request.params)?;
            let bundle = self.0.inner.json::<KeyBundle>(request).await?;
            Key::try_from(bundle.into_body())
        }

        /// Store the key in a hardware security module.
        pub fn set_hardware_protected(mut self, v: bool) -> Self {
            self.0.request.params.hsm = Some(v);
            self
        }

        /// Imports the key in the enabled or disabled state.
        pub fn set_enabled(mut self, v: bool) -> Self {
            self.0.request.params.attributes.enabled = Some(v);
            self
        }

        /// The key cannot be used before this time.
        pub fn set_not_before<T: Into<DateTime<Utc>>>(mut self, v: T) -> Self {
            self.0.request.params.attributes.not_before = Some(v.into());
            self
        }

        /// The key cannot be used after this time.
        pub fn set_expires<T: Into<DateTime<Utc>>>(mut self, v: T) -> Self {
            self.0.request.params.attributes.expires = Some(v.into());
            self
        }

        /// Sets the application specific metadata.
        pub fn set_tags<T, K, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: Into<String>,
        {
            self.0.request.params.tags = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
            self
        }
    }

    request_builder!(ImportKey);

    #[derive(Clone, Debug, Default)]
    pub(crate) struct UpdateKeyRequest {
        name: String,
        version: String,
        params: KeyUpdateParameters,
    }

    /// The request builder for [KeyClient::update_key][crate::client::KeyClient::update_key] calls.
    ///
    /// Only the properties set in the builder are changed.
    #[derive(Clone, Debug)]
    pub struct UpdateKey(RequestBuilder<UpdateKeyRequest>);

    impl UpdateKey {
        pub(crate) fn new<N, V>(inner: Arc<PipelineClient>, name: N, version: V) -> Self
        where
            N: Into<String>,
            V: Into<String>,
        {
            let mut builder =
                RequestBuilder::<UpdateKeyRequest>::new(inner, &crate::operations::UPDATE_KEY);
            builder.request.name = name.into();
            builder.request.version = version.into();
            Self(builder)
        }

        /// Sends the request.
        #[tracing::instrument(name = "KeyClient::update_key", level = "debug", skip_all)]
        pub async fn send(self) -> Result<Key> {
            let request = self
                .0
                .operation_request()
                .path_param("key-name", required("name", &self.0.request.name)?)
                .path_param("key-version", self.0.request.version.as_str())
                .json_body(&self.0.request.params)?;
            let bundle = self.0.inner.json::<KeyBundle>(request).await?;
            Key::try_from(bundle.into_body())
        }

        /// Sets the operations permitted with the key.
        pub fn set_key_operations<T, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = V>,
            V: Into<KeyOperation>,
        {
            self.0.request.params.key_ops = v.into_iter().map(Into::into).collect();
            self
        }

        /// Enables or disables the key.
        pub fn set_enabled(mut self, v: bool) -> Self {
            self.0.request.params.attributes.enabled = Some(v);
            self
        }

        /// The key cannot be used before this time.
        pub fn set_not_before<T: Into<DateTime<Utc>>>(mut self, v: T) -> Self {
            self.0.request.params.attributes.not_before = Some(v.into());
            self
        }

        /// The key cannot be used after this time.
        pub fn set_expires<T: Into<DateTime<Utc>>>(mut self, v: T) -> Self {
            self.0.request.params.attributes.expires = Some(v.into());
            self
        }

        /// Replaces the application specific metadata.
        pub fn set_tags<T, K, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: Into<String>,
        {
            self.0.request.params.tags = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
            self
        }
    }

    request_builder!(UpdateKey);

    #[derive(Clone, Debug, Default)]
    pub(crate) struct KeyNameRequest {
        name: String,
        version: String,
    }

    impl RequestBuilder<KeyNameRequest> {
        fn by_name(&self) -> Result<OperationRequest> {
            Ok(self
                .operation_request()
                .path_param("key-name", required("name", &self.request.name)?))
        }
    }

    // The builders for the calls that only take the key name.
    macro_rules! by_name_builder {
        ($(#[$meta:meta])* $name:ident, $operation:ident) => {
            $(#[$meta])*
            #[derive(Clone, Debug)]
            pub struct $name(RequestBuilder<KeyNameRequest>);

            impl $name {
                pub(crate) fn new<N: Into<String>>(inner: Arc<PipelineClient>, name: N) -> Self {
                    let mut builder =
                        RequestBuilder::<KeyNameRequest>::new(inner, &crate::operations::$operation);
                    builder.request.name = name.into();
                    Self(builder)
                }
            }

            request_builder!($name);
        };
    }

    by_name_builder!(
        /// The request builder for [KeyClient::delete_key][crate::client::KeyClient::delete_key] calls.
        DeleteKey,
        DELETE_KEY
    );

    impl DeleteKey {
        /// Sends the request.
        #[tracing::instrument(name = "KeyClient::delete_key", level = "debug", skip_all)]
        pub async fn send(self) -> Result<DeletedKey> {
            let request = self.0.by_name()?;
            let bundle = self.0.inner.json::<KeyBundle>(request).await?;
            DeletedKey::try_from(bundle.into_body())
        }
    }

    by_name_builder!(
        /// The request builder for [KeyClient::get_deleted_key][crate::client::KeyClient::get_deleted_key] calls.
        GetDeletedKey,
        GET_DELETED_KEY
    );

    impl GetDeletedKey {
        /// Sends the request.
        #[tracing::instrument(name = "KeyClient::get_deleted_key", level = "debug", skip_all)]
        pub async fn send(self) -> Result<DeletedKey> {
            let request = self.0.by_name()?;
            let bundle = self.0.inner.json::<KeyBundle>(request).await?;
            DeletedKey::try_from(bundle.into_body())
        }
    }

    by_name_builder!(
        /// The request builder for [KeyClient::recover_deleted_key][crate::client::KeyClient::recover_deleted_key] calls.
        RecoverDeletedKey,
        RECOVER_DELETED_KEY
    );

    impl RecoverDeletedKey {
        /// Sends the request.
        #[tracing::instrument(name = "KeyClient::recover_deleted_key", level = "debug", skip_all)]
        pub async fn send(self) -> Result<Key> {
            let request = self.0.by_name()?;
            let bundle = self.0.inner.json::<KeyBundle>(request).await?;
            Key::try_from(bundle.into_body())
        }
    }

    by_name_builder!(
        /// The request builder for [KeyClient::backup_key][crate::client::KeyClient::backup_key] calls.
        BackupKey,
        BACKUP_KEY
    );

    impl BackupKey {
        /// Sends the request, returns the protected backup.
        #[tracing::instrument(name = "KeyClient::backup_key", level = "debug", skip_all)]
        pub async fn send(self) -> Result<Vec<u8>> {
            let request = self.0.by_name()?;
            let backup = self.0.inner.json::<BackupKeyResult>(request).await?;
            Ok(backup.into_body().value)
        }
    }

    by_name_builder!(
        /// The request builder for [KeyClient::purge_deleted_key][crate::client::KeyClient::purge_deleted_key] calls.
        PurgeDeletedKey,
        PURGE_DELETED_KEY
    );

    impl PurgeDeletedKey {
        /// Sends the request.
        #[tracing::instrument(name = "KeyClient::purge_deleted_key", level = "debug", skip_all)]
        pub async fn send(self) -> Result<()> {
            let request = self.0.by_name()?;
            self.0.inner.empty(request).await.map(Response::into_body)
        }
    }

    /// The request builder for [KeyClient::get_key][crate::client::KeyClient::get_key] calls.
    #[derive(Clone, Debug)]
    pub struct GetKey(RequestBuilder<KeyNameRequest>);

    impl GetKey {
        pub(crate) fn new<N: Into<String>>(inner: Arc<PipelineClient>, name: N) -> Self {
            let mut builder =
                RequestBuilder::<KeyNameRequest>::new(inner, &crate::operations::GET_KEY);
            builder.request.name = name.into();
            Self(builder)
        }

        /// Sends the request.
        #[tracing::instrument(name = "KeyClient::get_key", level = "debug", skip_all)]
        pub async fn send(self) -> Result<Key> {
            let request = self
                .0
                .operation_request()
                .path_param("key-name", required("name", &self.0.request.name)?)
                .path_param("key-version", self.0.request.version.as_str());
            let bundle = self.0.inner.json::<KeyBundle>(request).await?;
            Key::try_from(bundle.into_body())
        }

        /// Gets a specific version of the key, the latest version is
        /// returned by default.
        pub fn set_version<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.version = v.into();
            self
        }
    }

    request_builder!(GetKey);

    #[derive(Clone, Debug, Default)]
    pub(crate) struct RestoreKeyBackupRequest {
        backup: Vec<u8>,
    }

    /// The request builder for [KeyClient::restore_key_backup][crate::client::KeyClient::restore_key_backup] calls.
    #[derive(Clone, Debug)]
    pub struct RestoreKeyBackup(RequestBuilder<RestoreKeyBackupRequest>);

    impl RestoreKeyBackup {
        pub(crate) fn new<B: Into<Vec<u8>>>(inner: Arc<PipelineClient>, backup: B) -> Self {
            let mut builder =
                RequestBuilder::<RestoreKeyBackupRequest>::new(inner, &crate::operations::RESTORE_KEY_BACKUP);
            builder.request.backup = backup.into();
            Self(builder)
        }

        /// Sends the request.
        #[tracing::instrument(name = "KeyClient::restore_key_backup", level = "debug", skip_all)]
        pub async fn send(self) -> Result<Key> {
            let body = BackupKeyResult {
                value: self.0.request.backup.clone(),
            };
            let request = self.0.operation_request().json_body(&body)?;
            let bundle = self.0.inner.json::<KeyBundle>(request).await?;
            Key::try_from(bundle.into_body())
        }
    }

    request_builder!(RestoreKeyBackup);

    #[derive(Clone, Debug, Default)]
    pub(crate) struct ListRequest {
        name: Option<String>,
        max_page_size: Option<i32>,
        continuation_token: Option<String>,
    }

    impl RequestBuilder<ListRequest> {
        // The first page is requested from the vault, the following pages
        // from the `nextLink` returned by the previous page.
        async fn fetch(self, token: String) -> Result<KeyListResult> {
            if !token.is_empty() {
                let response = self
                    .inner
                    .json_url::<KeyListResult>(self.operation, &token, self.options)
                    .await?;
                return Ok(response.into_body());
            }
            let mut request = OperationRequest::new(self.operation, self.options)
                .query_opt("maxresults", self.request.max_page_size);
            if let Some(name) = &self.request.name {
                request = request.path_param("key-name", required("name", name)?);
            }
            let response = self.inner.json::<KeyListResult>(request).await?;
            Ok(response.into_body())
        }

        fn with_page_settings(mut self, settings: azcore::paginator::PageSettings) -> Self {
            if let Some(token) = settings.continuation_token {
                self.request.continuation_token = Some(token);
            }
            if let Some(size) = settings.max_page_size {
                self.request.max_page_size = Some(size);
            }
            self
        }

        fn seed(&self) -> String {
            self.request.continuation_token.clone().unwrap_or_default()
        }
    }

    /// The request builder for [KeyClient::list_keys][crate::client::KeyClient::list_keys]
    /// and [KeyClient::list_key_versions][crate::client::KeyClient::list_key_versions] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use azure_keyvault_keys::builder::key_client::ListKeys;
    /// # tokio_test::block_on(async {
    /// use futures::TryStreamExt;
    /// let builder = prepare_request_builder();
    /// let mut pages = builder.set_max_page_size(25).by_page();
    /// while let Some(page) = pages.try_next().await? {
    ///     println!("{} keys, resume from {:?}", page.keys.len(), page.next_link);
    /// }
    /// # azure_keyvault_keys::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> ListKeys {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct ListKeys(RequestBuilder<ListRequest>);

    impl ListKeys {
        pub(crate) fn new(
            inner: Arc<PipelineClient>,
            operation: &'static Operation,
            name: Option<String>,
        ) -> Self {
            let mut builder = RequestBuilder::<ListRequest>::new(inner, operation);
            builder.request.name = name;
            Self(builder)
        }

        /// Sends the request, returns a single page.
        #[tracing::instrument(name = "KeyClient::list_keys", level = "debug", skip_all, fields(operation = self.0.operation.name))]
        pub async fn send(self) -> Result<KeyPropertiesPage> {
            let token = self.0.seed();
            let result = self.0.fetch(token).await?;
            KeyPropertiesPage::try_from(result)
        }

        /// Streams the pages of the listing.
        pub fn by_page(self) -> Paginator<KeyPropertiesPage, crate::Error> {
            let seed = self.0.seed();
            let execute = move |token: String| {
                let builder = self.0.clone();
                async move { KeyPropertiesPage::try_from(builder.fetch(token).await?) }
            };
            Paginator::new(seed, execute)
        }

        /// Streams the keys, fetching new pages as needed.
        pub fn by_item(self) -> ItemPaginator<KeyPropertiesPage, crate::Error> {
            self.by_page().items()
        }

        /// A hint for the number of keys in each page.
        pub fn set_max_page_size(mut self, v: i32) -> Self {
            self.0.request.max_page_size = Some(v);
            self
        }

        /// Resumes a listing from the `next_link` of a previous page.
        pub fn set_continuation_token<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.continuation_token = Some(v.into());
            self
        }

        /// Applies the continuation token and page size in `v`.
        pub fn with_page_settings(mut self, v: azcore::paginator::PageSettings) -> Self {
            self.0 = self.0.with_page_settings(v);
            self
        }
    }

    request_builder!(ListKeys);

    /// The request builder for [KeyClient::list_deleted_keys][crate::client::KeyClient::list_deleted_keys] calls.
    #[derive(Clone, Debug)]
    pub struct ListDeletedKeys(RequestBuilder<ListRequest>);

    impl ListDeletedKeys {
        pub(crate) fn new(inner: Arc<PipelineClient>) -> Self {
            Self(RequestBuilder::new(
                inner,
                &crate::operations::LIST_DELETED_KEYS,
            ))
        }

        /// Sends the request, returns a single page.
        #[tracing::instrument(name = "KeyClient::list_deleted_keys", level = "debug", skip_all)]
        pub async fn send(self) -> Result<DeletedKeyPage> {
            let token = self.0.seed();
            let result = self.0.fetch(token).await?;
            DeletedKeyPage::try_from(result)
        }

        /// Streams the pages of the listing.
        pub fn by_page(self) -> Paginator<DeletedKeyPage, crate::Error> {
            let seed = self.0.seed();
            let execute = move |token: String| {
                let builder = self.0.clone();
                async move { DeletedKeyPage::try_from(builder.fetch(token).await?) }
            };
            Paginator::new(seed, execute)
        }

        /// Streams the deleted keys, fetching new pages as needed.
        pub fn by_item(self) -> ItemPaginator<DeletedKeyPage, crate::Error> {
            self.by_page().items()
        }

        /// A hint for the number of keys in each page.
        pub fn set_max_page_size(mut self, v: i32) -> Self {
            self.0.request.max_page_size = Some(v);
            self
        }

        /// Resumes a listing from the `next_link` of a previous page.
        pub fn set_continuation_token<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.continuation_token = Some(v.into());
            self
        }

        /// Applies the continuation token and page size in `v`.
        pub fn with_page_settings(mut self, v: azcore::paginator::PageSettings) -> Self {
            self.0 = self.0.with_page_settings(v);
            self
        }
    }

    request_builder!(ListDeletedKeys);

    #[cfg(test)]
    mod tests {
        use super::*;
        use test_case::test_case;

        #[test_case(KeyType::Ec, true, KeyType::EcHsm)]
        #[test_case(KeyType::EcHsm, false, KeyType::Ec)]
        #[test_case(KeyType::Rsa, true, KeyType::RsaHsm)]
        #[test_case(KeyType::RsaHsm, true, KeyType::RsaHsm)]
        #[test_case(KeyType::Oct, true, KeyType::Oct)]
        fn hsm_key_types(input: KeyType, hsm: bool, want: KeyType) {
            assert_eq!(with_hsm(input, hsm), want);
        }
    }
}
