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

use crate::builder::key_client::*;
use crate::model::{JsonWebKey, KeyType};
use azcore::client_builder::Error as BuilderError;
use azcorei::client::{ApiVersion, PipelineClient};
use azcorei::options::{ClientConfig, Credentials};
use std::sync::Arc;

/// Implements a client for the Key Vault keys service.
///
/// # Example
/// ```no_run
/// # tokio_test::block_on(async {
/// # use azure_keyvault_keys::client::KeyClient;
/// # use azure_keyvault_keys::model::KeyCurveName;
/// let credentials = auth::credentials::static_token::Builder::new("my-token").build();
/// let client = KeyClient::builder("https://myvault.vault.azure.net")
///     .with_credentials(credentials)
///     .build()
///     .await?;
/// let key = client
///     .create_ec_key("my-key")
///     .set_curve(KeyCurveName::P256)
///     .send()
///     .await?;
/// println!("created {:?}", key.properties.id);
/// # anyhow::Result::<()>::Ok(()) });
/// ```
///
/// # Configuration
///
/// To configure `KeyClient` use the `with_*` methods in the type returned by
/// [builder()][KeyClient::builder]. The vault URL is required, and the
/// credentials must produce bearer tokens.
///
/// # Pooling and Cloning
///
/// `KeyClient` holds a connection pool internally, it is advised to create
/// one and then reuse it. You do not need to wrap `KeyClient` in an
/// [Rc](std::rc::Rc) or [Arc] to reuse it, because it already uses an `Arc`
/// internally.
#[derive(Clone, Debug)]
pub struct KeyClient {
    inner: Arc<PipelineClient>,
}

impl KeyClient {
    /// Returns a builder for [KeyClient].
    ///
    /// ```no_run
    /// # tokio_test::block_on(async {
    /// # use azure_keyvault_keys::client::KeyClient;
    /// let credentials = auth::credentials::static_token::Builder::new("my-token").build();
    /// let client = KeyClient::builder("https://myvault.vault.azure.net")
    ///     .with_credentials(credentials)
    ///     .build()
    ///     .await?;
    /// # anyhow::Result::<()>::Ok(()) });
    /// ```
    pub fn builder<V: Into<String>>(vault_url: V) -> ClientBuilder {
        azcore::client_builder::internal::new_builder(client::Factory).with_endpoint(vault_url)
    }

    pub(crate) async fn new(config: ClientConfig) -> azcore::client_builder::Result<Self> {
        if !matches!(config.cred, Some(Credentials::Token(_))) {
            return Err(BuilderError::cred(
                "the Key Vault keys client requires token credentials",
            ));
        }
        let inner = PipelineClient::new(
            config,
            &crate::info::CLIENT_INFO,
            ApiVersion::Query(crate::info::API_VERSION),
        )?;
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// The vault URL.
    pub fn vault_url(&self) -> &str {
        self.inner.endpoint().as_str().trim_end_matches('/')
    }

    /// Creates a new key. If the named key already exists, Key Vault creates
    /// a new version of the key.
    pub fn create_key<N, T>(&self, name: N, key_type: T) -> CreateKey
    where
        N: Into<String>,
        T: Into<KeyType>,
    {
        CreateKey::new(self.inner.clone(), &crate::operations::CREATE_KEY, name)
            .set_key_type(key_type)
    }

    /// Creates a new elliptic curve key.
    ///
    /// Use [CreateKey::set_hsm] to create a key protected by a hardware
    /// security module.
    pub fn create_ec_key<N: Into<String>>(&self, name: N) -> CreateKey {
        CreateKey::new(self.inner.clone(), &crate::operations::CREATE_EC_KEY, name)
            .set_key_type(KeyType::Ec)
    }

    /// Creates a new RSA key.
    ///
    /// Use [CreateKey::set_hsm] to create a key protected by a hardware
    /// security module.
    pub fn create_rsa_key<N: Into<String>>(&self, name: N) -> CreateKey {
        CreateKey::new(self.inner.clone(), &crate::operations::CREATE_RSA_KEY, name)
            .set_key_type(KeyType::Rsa)
    }

    /// Imports an externally created key.
    pub fn import_key<N: Into<String>>(&self, name: N, key: JsonWebKey) -> ImportKey {
        ImportKey::new(self.inner.clone(), name, key)
    }

    /// Deletes all the versions of a key.
    ///
    /// The key material is not usable after this call. In vaults with soft
    /// delete enabled the key can be recovered until it is purged.
    pub fn delete_key<N: Into<String>>(&self, name: N) -> DeleteKey {
        DeleteKey::new(self.inner.clone(), name)
    }

    /// Updates the properties of a key version.
    ///
    /// The key material cannot be changed.
    pub fn update_key<N, V>(&self, name: N, version: V) -> UpdateKey
    where
        N: Into<String>,
        V: Into<String>,
    {
        UpdateKey::new(self.inner.clone(), name, version)
    }

    /// Gets a key. Without a version this returns the latest version.
    pub fn get_key<N: Into<String>>(&self, name: N) -> GetKey {
        GetKey::new(self.inner.clone(), name)
    }

    /// Gets a deleted key, including its deletion details.
    pub fn get_deleted_key<N: Into<String>>(&self, name: N) -> GetDeletedKey {
        GetDeletedKey::new(self.inner.clone(), name)
    }

    /// Permanently deletes a deleted key.
    pub fn purge_deleted_key<N: Into<String>>(&self, name: N) -> PurgeDeletedKey {
        PurgeDeletedKey::new(self.inner.clone(), name)
    }

    /// Recovers a deleted key to its latest version.
    pub fn recover_deleted_key<N: Into<String>>(&self, name: N) -> RecoverDeletedKey {
        RecoverDeletedKey::new(self.inner.clone(), name)
    }

    /// Downloads a protected backup of all the versions of a key.
    ///
    /// The backup can only be restored in a vault of the same Azure
    /// subscription and geography.
    pub fn backup_key<N: Into<String>>(&self, name: N) -> BackupKey {
        BackupKey::new(self.inner.clone(), name)
    }

    /// Restores a key, and all its versions, from a backup.
    pub fn restore_key_backup<B: Into<Vec<u8>>>(&self, backup: B) -> RestoreKeyBackup {
        RestoreKeyBackup::new(self.inner.clone(), backup)
    }

    /// Lists the keys in the vault. The listing includes the properties of
    /// the latest version of each key, but not the key material.
    ///
    /// ```no_run
    /// # tokio_test::block_on(async {
    /// # use azure_keyvault_keys::client::KeyClient;
    /// # let client = KeyClient::builder("https://myvault.vault.azure.net").build().await?;
    /// use futures::TryStreamExt;
    /// let mut keys = client.list_keys().by_item();
    /// while let Some(key) = keys.try_next().await? {
    ///     println!("{} {:?}", key.name, key.enabled);
    /// }
    /// # anyhow::Result::<()>::Ok(()) });
    /// ```
    pub fn list_keys(&self) -> ListKeys {
        ListKeys::new(self.inner.clone(), &crate::operations::LIST_KEYS, None)
    }

    /// Lists all the versions of a key.
    pub fn list_key_versions<N: Into<String>>(&self, name: N) -> ListKeys {
        ListKeys::new(
            self.inner.clone(),
            &crate::operations::LIST_KEY_VERSIONS,
            Some(name.into()),
        )
    }

    /// Lists the deleted keys in the vault.
    pub fn list_deleted_keys(&self) -> ListDeletedKeys {
        ListDeletedKeys::new(self.inner.clone())
    }
}
