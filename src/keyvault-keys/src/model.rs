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

//! The types returned by, and sent to, the Key Vault keys service.

use azcore::Result;
use azcore::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::base64::{Base64, UrlSafe};
use serde_with::formats::Unpadded;
use serde_with::serde_as;
use std::collections::HashMap;

azcorei::string_enum! {
    /// The type of a key.
    KeyType {
        /// Elliptic curve.
        Ec => "EC",
        /// Elliptic curve, protected by a hardware security module.
        EcHsm => "EC-HSM",
        /// RSA.
        Rsa => "RSA",
        /// RSA, protected by a hardware security module.
        RsaHsm => "RSA-HSM",
        /// Octet sequence, used for symmetric keys.
        Oct => "oct",
    }
}

azcorei::string_enum! {
    /// The operations permitted with a key.
    KeyOperation {
        Encrypt => "encrypt",
        Decrypt => "decrypt",
        Sign => "sign",
        Verify => "verify",
        WrapKey => "wrapKey",
        UnwrapKey => "unwrapKey",
    }
}

azcorei::string_enum! {
    /// Elliptic curve names.
    KeyCurveName {
        P256 => "P-256",
        P384 => "P-384",
        P521 => "P-521",
        P256K => "P-256K",
    }
}

/// A key stored in Key Vault, in JSON Web Key format (RFC 7517).
///
/// The binary fields are base64url encoded on the wire.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct JsonWebKey {
    /// The key identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kty: Option<KeyType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_ops: Vec<KeyOperation>,
    /// RSA modulus.
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<Vec<u8>>,
    /// RSA public exponent.
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<Vec<u8>>,
    /// RSA private exponent, or the D component of an EC private key.
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<Vec<u8>>,
    /// RSA private key parameter.
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<Vec<u8>>,
    /// RSA private key parameter.
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<Vec<u8>>,
    /// RSA private key parameter.
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<Vec<u8>>,
    /// RSA secret prime.
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<Vec<u8>>,
    /// RSA secret prime, with `p < q`.
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<Vec<u8>>,
    /// Symmetric key.
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<Vec<u8>>,
    /// HSM token, used with "Bring Your Own Key".
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(rename = "key_hsm", default, skip_serializing_if = "Option::is_none")]
    pub t: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<KeyCurveName>,
    /// X component of an EC public key.
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<u8>>,
    /// Y component of an EC public key.
    #[serde_as(as = "Option<Base64<UrlSafe, Unpadded>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<u8>>,
}

impl JsonWebKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [kty][JsonWebKey::kty].
    pub fn set_kty<T: Into<KeyType>>(mut self, v: T) -> Self {
        self.kty = Some(v.into());
        self
    }

    /// Sets the value of [key_ops][JsonWebKey::key_ops].
    pub fn set_key_ops<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<KeyOperation>,
    {
        self.key_ops = v.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the value of [n][JsonWebKey::n].
    pub fn set_n<T: Into<Vec<u8>>>(mut self, v: T) -> Self {
        self.n = Some(v.into());
        self
    }

    /// Sets the value of [e][JsonWebKey::e].
    pub fn set_e<T: Into<Vec<u8>>>(mut self, v: T) -> Self {
        self.e = Some(v.into());
        self
    }

    /// Sets the value of [d][JsonWebKey::d].
    pub fn set_d<T: Into<Vec<u8>>>(mut self, v: T) -> Self {
        self.d = Some(v.into());
        self
    }

    /// Sets the value of [k][JsonWebKey::k].
    pub fn set_k<T: Into<Vec<u8>>>(mut self, v: T) -> Self {
        self.k = Some(v.into());
        self
    }

    /// Sets the value of [crv][JsonWebKey::crv].
    pub fn set_crv<T: Into<KeyCurveName>>(mut self, v: T) -> Self {
        self.crv = Some(v.into());
        self
    }

    /// Sets the value of [x][JsonWebKey::x].
    pub fn set_x<T: Into<Vec<u8>>>(mut self, v: T) -> Self {
        self.x = Some(v.into());
        self
    }

    /// Sets the value of [y][JsonWebKey::y].
    pub fn set_y<T: Into<Vec<u8>>>(mut self, v: T) -> Self {
        self.y = Some(v.into());
        self
    }
}

/// The properties of a key, without the key material.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct KeyProperties {
    /// The key identifier, e.g.
    /// `https://myvault.vault.azure.net/keys/my-key/0123abcd`.
    pub id: Option<String>,
    /// The key name, parsed from the identifier.
    pub name: String,
    /// The vault URL, parsed from the identifier.
    pub vault_url: String,
    /// The key version, parsed from the identifier. Key listings return the
    /// identifier without a version.
    pub version: Option<String>,
    pub enabled: Option<bool>,
    /// The key cannot be used before this time.
    pub not_before: Option<DateTime<Utc>>,
    /// The key cannot be used after this time.
    pub expires: Option<DateTime<Utc>>,
    pub tags: HashMap<String, String>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    /// The deletion recovery level in effect for the key, e.g.
    /// `Recoverable+Purgeable`.
    pub recovery_level: Option<String>,
    /// True if the lifetime of the key is managed by Key Vault, for example,
    /// keys backing a certificate.
    pub managed: bool,
}

/// A key and its properties.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct Key {
    pub properties: KeyProperties,
    pub key_material: Option<JsonWebKey>,
    pub key_type: Option<KeyType>,
    pub key_operations: Vec<KeyOperation>,
}

/// A key in the deleted state.
///
/// Deleted keys returned by listings do not include the key material.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct DeletedKey {
    pub key: Key,
    /// The URL used to recover the key.
    pub recovery_id: Option<String>,
    /// When the key will be purged.
    pub scheduled_purge_date: Option<DateTime<Utc>>,
    /// When the key was deleted.
    pub deleted_date: Option<DateTime<Utc>>,
}

/// The components of a Key Vault key identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct KeyIdentifier {
    pub vault_url: String,
    pub name: String,
    pub version: Option<String>,
}

impl KeyIdentifier {
    /// Parses identifiers such as
    /// `https://myvault.vault.azure.net/keys/my-key/0123abcd`.
    pub fn parse(id: &str) -> Result<Self> {
        let url = url::Url::parse(id).map_err(Error::deser)?;
        let segments = url
            .path_segments()
            .map(|s| s.filter(|s| !s.is_empty()).collect::<Vec<_>>())
            .unwrap_or_default();
        let (name, version) = match segments.as_slice() {
            ["keys", name] => (*name, None),
            ["keys", name, version] => (*name, Some(version.to_string())),
            _ => {
                return Err(Error::deser(format!(
                    "`{id}` is not a valid Key Vault key identifier"
                )));
            }
        };
        Ok(Self {
            vault_url: url.origin().ascii_serialization(),
            name: name.to_string(),
            version,
        })
    }
}

// The remaining types describe the wire format.

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct KeyAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(
        rename = "nbf",
        with = "chrono::serde::ts_seconds_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub not_before: Option<DateTime<Utc>>,
    #[serde(
        rename = "exp",
        with = "chrono::serde::ts_seconds_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expires: Option<DateTime<Utc>>,
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        default,
        skip_serializing
    )]
    pub created: Option<DateTime<Utc>>,
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        default,
        skip_serializing
    )]
    pub updated: Option<DateTime<Utc>>,
    #[serde(rename = "recoveryLevel", default, skip_serializing)]
    pub recovery_level: Option<String>,
}

impl KeyAttributes {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.not_before.is_none() && self.expires.is_none()
    }
}

// A key bundle or a deleted key bundle, the latter adds the deletion fields.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct KeyBundle {
    #[serde(default)]
    pub key: Option<JsonWebKey>,
    #[serde(default)]
    pub attributes: Option<KeyAttributes>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default)]
    pub managed: Option<bool>,
    #[serde(default)]
    pub recovery_id: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option", default)]
    pub scheduled_purge_date: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option", default)]
    pub deleted_date: Option<DateTime<Utc>>,
}

// A key item or a deleted key item, as returned by the listings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct KeyItem {
    pub kid: String,
    #[serde(default)]
    pub attributes: Option<KeyAttributes>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default)]
    pub managed: Option<bool>,
    #[serde(default)]
    pub recovery_id: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option", default)]
    pub scheduled_purge_date: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds_option", default)]
    pub deleted_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct KeyListResult {
    #[serde(default)]
    pub value: Option<Vec<KeyItem>>,
    #[serde(default)]
    pub next_link: Option<String>,
}

#[serde_as]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(crate) struct BackupKeyResult {
    #[serde_as(as = "Base64<UrlSafe, Unpadded>")]
    pub value: Vec<u8>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub(crate) struct KeyCreateParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kty: Option<KeyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_size: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key_ops: Vec<KeyOperation>,
    #[serde(skip_serializing_if = "KeyAttributes::is_empty")]
    pub attributes: KeyAttributes,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<KeyCurveName>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub(crate) struct KeyImportParameters {
    #[serde(rename = "Hsm", skip_serializing_if = "Option::is_none")]
    pub hsm: Option<bool>,
    pub key: JsonWebKey,
    #[serde(skip_serializing_if = "KeyAttributes::is_empty")]
    pub attributes: KeyAttributes,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub(crate) struct KeyUpdateParameters {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key_ops: Vec<KeyOperation>,
    #[serde(skip_serializing_if = "KeyAttributes::is_empty")]
    pub attributes: KeyAttributes,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
}

fn properties(
    kid: Option<&str>,
    attributes: Option<KeyAttributes>,
    tags: Option<HashMap<String, String>>,
    managed: Option<bool>,
) -> Result<KeyProperties> {
    let (vault_url, name, version) = match kid {
        Some(kid) => {
            let id = KeyIdentifier::parse(kid)?;
            (id.vault_url, id.name, id.version)
        }
        None => Default::default(),
    };
    let attributes = attributes.unwrap_or_default();
    Ok(KeyProperties {
        id: kid.map(str::to_string),
        name,
        vault_url,
        version,
        enabled: attributes.enabled,
        not_before: attributes.not_before,
        expires: attributes.expires,
        tags: tags.unwrap_or_default(),
        created: attributes.created,
        updated: attributes.updated,
        recovery_level: attributes.recovery_level,
        managed: managed.unwrap_or(false),
    })
}

impl TryFrom<KeyBundle> for Key {
    type Error = Error;

    fn try_from(bundle: KeyBundle) -> Result<Self> {
        let kid = bundle.key.as_ref().and_then(|k| k.kid.clone());
        let properties = properties(
            kid.as_deref(),
            bundle.attributes,
            bundle.tags,
            bundle.managed,
        )?;
        let (key_type, key_operations) = bundle
            .key
            .as_ref()
            .map(|k| (k.kty.clone(), k.key_ops.clone()))
            .unwrap_or_default();
        Ok(Key {
            properties,
            key_material: bundle.key,
            key_type,
            key_operations,
        })
    }
}

impl TryFrom<KeyBundle> for DeletedKey {
    type Error = Error;

    fn try_from(mut bundle: KeyBundle) -> Result<Self> {
        let recovery_id = bundle.recovery_id.take();
        let scheduled_purge_date = bundle.scheduled_purge_date.take();
        let deleted_date = bundle.deleted_date.take();
        Ok(DeletedKey {
            key: Key::try_from(bundle)?,
            recovery_id,
            scheduled_purge_date,
            deleted_date,
        })
    }
}

impl TryFrom<KeyItem> for KeyProperties {
    type Error = Error;

    fn try_from(item: KeyItem) -> Result<Self> {
        properties(Some(&item.kid), item.attributes, item.tags, item.managed)
    }
}

impl TryFrom<KeyItem> for DeletedKey {
    type Error = Error;

    fn try_from(mut item: KeyItem) -> Result<Self> {
        let recovery_id = item.recovery_id.take();
        let scheduled_purge_date = item.scheduled_purge_date.take();
        let deleted_date = item.deleted_date.take();
        Ok(DeletedKey {
            key: Key {
                properties: KeyProperties::try_from(item)?,
                ..Default::default()
            },
            recovery_id,
            scheduled_purge_date,
            deleted_date,
        })
    }
}

/// A page of [KeyClient::list_keys][crate::client::KeyClient::list_keys] or
/// [KeyClient::list_key_versions][crate::client::KeyClient::list_key_versions]
/// results.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct KeyPropertiesPage {
    pub keys: Vec<KeyProperties>,
    /// The URL of the next page, empty on the last page.
    pub next_link: String,
}

impl azcore::paginator::PageableResponse for KeyPropertiesPage {
    type PageItem = KeyProperties;

    fn items(self) -> Vec<Self::PageItem> {
        self.keys
    }

    fn next_page_token(&self) -> String {
        self.next_link.clone()
    }
}

/// A page of [KeyClient::list_deleted_keys][crate::client::KeyClient::list_deleted_keys]
/// results.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct DeletedKeyPage {
    pub keys: Vec<DeletedKey>,
    /// The URL of the next page, empty on the last page.
    pub next_link: String,
}

impl azcore::paginator::PageableResponse for DeletedKeyPage {
    type PageItem = DeletedKey;

    fn items(self) -> Vec<Self::PageItem> {
        self.keys
    }

    fn next_page_token(&self) -> String {
        self.next_link.clone()
    }
}

// A page without `value` ends the listing, even if it has a `nextLink`.
fn page_items<T>(result: KeyListResult) -> Result<(Vec<T>, String)>
where
    T: TryFrom<KeyItem, Error = Error>,
{
    let Some(value) = result.value else {
        return Ok((Vec::new(), String::new()));
    };
    let items = value
        .into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>>>()?;
    Ok((items, result.next_link.unwrap_or_default()))
}

impl TryFrom<KeyListResult> for KeyPropertiesPage {
    type Error = Error;

    fn try_from(result: KeyListResult) -> Result<Self> {
        let (keys, next_link) = page_items(result)?;
        Ok(Self { keys, next_link })
    }
}

impl TryFrom<KeyListResult> for DeletedKeyPage {
    type Error = Error;

    fn try_from(result: KeyListResult) -> Result<Self> {
        let (keys, next_link) = page_items(result)?;
        Ok(Self { keys, next_link })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("https://myvault.vault.azure.net/keys/k1/v1", "https://myvault.vault.azure.net", "k1", Some("v1"))]
    #[test_case("https://myvault.vault.azure.net/keys/k1", "https://myvault.vault.azure.net", "k1", None)]
    #[test_case("https://myvault.vault.azure.net:8443/keys/k1/", "https://myvault.vault.azure.net:8443", "k1", None)]
    fn parse_identifier(id: &str, vault_url: &str, name: &str, version: Option<&str>) {
        let got = KeyIdentifier::parse(id).unwrap();
        assert_eq!(got.vault_url, vault_url);
        assert_eq!(got.name, name);
        assert_eq!(got.version.as_deref(), version);
    }

    #[test_case("not a url")]
    #[test_case("https://myvault.vault.azure.net/secrets/s1/v1")]
    #[test_case("https://myvault.vault.azure.net/keys")]
    #[test_case("https://myvault.vault.azure.net/keys/k1/v1/extra")]
    fn parse_identifier_errors(id: &str) {
        let err = KeyIdentifier::parse(id).unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
    }

    #[test]
    fn open_enums() {
        assert_eq!(KeyType::from("EC-HSM"), KeyType::EcHsm);
        assert_eq!(KeyType::from("RSA").as_str(), "RSA");
        let unknown = KeyType::from("AES");
        assert_eq!(unknown, KeyType::Unknown("AES".to_string()));
        assert_eq!(unknown.to_string(), "AES");
        assert_eq!(KeyOperation::from("wrapKey"), KeyOperation::WrapKey);
        assert_eq!(KeyCurveName::P256K.as_str(), "P-256K");
    }

    #[test]
    fn key_from_bundle() -> anyhow::Result<()> {
        let bundle = json!({
            "key": {
                "kid": "https://myvault.vault.azure.net/keys/k1/v1",
                "kty": "RSA",
                "key_ops": ["encrypt", "decrypt"],
                "n": "AQAB-_8",
                "e": "AQAB"
            },
            "attributes": {
                "enabled": true,
                "created": 1_500_000_000,
                "updated": 1_500_000_100,
                "exp": 1_600_000_000,
                "recoveryLevel": "Recoverable+Purgeable"
            },
            "tags": {"purpose": "test"}
        });
        let bundle = serde_json::from_value::<KeyBundle>(bundle)?;
        let key = Key::try_from(bundle)?;
        assert_eq!(key.key_type, Some(KeyType::Rsa));
        assert_eq!(
            key.key_operations,
            vec![KeyOperation::Encrypt, KeyOperation::Decrypt]
        );
        let material = key.key_material.as_ref().unwrap();
        assert_eq!(material.n.as_deref(), Some([1_u8, 0, 1, 251, 255].as_slice()));
        assert_eq!(material.e.as_deref(), Some([1_u8, 0, 1].as_slice()));
        let p = &key.properties;
        assert_eq!(p.name, "k1");
        assert_eq!(p.version.as_deref(), Some("v1"));
        assert_eq!(p.vault_url, "https://myvault.vault.azure.net");
        assert_eq!(p.enabled, Some(true));
        assert_eq!(p.created.map(|t| t.timestamp()), Some(1_500_000_000));
        assert_eq!(p.expires.map(|t| t.timestamp()), Some(1_600_000_000));
        assert_eq!(p.not_before, None);
        assert_eq!(p.recovery_level.as_deref(), Some("Recoverable+Purgeable"));
        assert_eq!(p.tags.get("purpose").map(String::as_str), Some("test"));
        assert!(!p.managed);
        Ok(())
    }

    #[test]
    fn deleted_key_from_item() -> anyhow::Result<()> {
        let item = json!({
            "kid": "https://myvault.vault.azure.net/keys/k1",
            "recoveryId": "https://myvault.vault.azure.net/deletedkeys/k1",
            "deletedDate": 1_500_000_000,
            "scheduledPurgeDate": 1_502_592_000,
            "managed": true
        });
        let item = serde_json::from_value::<KeyItem>(item)?;
        let deleted = DeletedKey::try_from(item)?;
        assert_eq!(deleted.key.properties.name, "k1");
        assert_eq!(deleted.key.properties.version, None);
        assert!(deleted.key.properties.managed);
        assert_eq!(deleted.key.key_material, None);
        assert_eq!(
            deleted.recovery_id.as_deref(),
            Some("https://myvault.vault.azure.net/deletedkeys/k1")
        );
        assert_eq!(deleted.deleted_date.map(|t| t.timestamp()), Some(1_500_000_000));
        assert_eq!(
            deleted.scheduled_purge_date.map(|t| t.timestamp()),
            Some(1_502_592_000)
        );
        Ok(())
    }

    #[test]
    fn create_parameters() -> anyhow::Result<()> {
        let params = KeyCreateParameters {
            kty: Some(KeyType::Ec),
            crv: Some(KeyCurveName::P384),
            attributes: KeyAttributes {
                enabled: Some(false),
                not_before: DateTime::from_timestamp(1_500_000_000, 0),
                ..Default::default()
            },
            tags: HashMap::from([("a".to_string(), "b".to_string())]),
            ..Default::default()
        };
        let got = serde_json::to_value(&params)?;
        assert_eq!(
            got,
            json!({
                "kty": "EC",
                "crv": "P-384",
                "attributes": {"enabled": false, "nbf": 1_500_000_000},
                "tags": {"a": "b"}
            })
        );
        Ok(())
    }

    #[test]
    fn import_parameters() -> anyhow::Result<()> {
        let params = KeyImportParameters {
            hsm: Some(true),
            key: JsonWebKey::new().set_kty(KeyType::Oct).set_k([0xfb_u8, 0xff]),
            ..Default::default()
        };
        let got = serde_json::to_value(&params)?;
        assert_eq!(got, json!({"Hsm": true, "key": {"kty": "oct", "k": "-_8"}}));
        Ok(())
    }

    #[test]
    fn page_without_value() -> anyhow::Result<()> {
        let result = serde_json::from_value::<KeyListResult>(json!({
            "nextLink": "https://myvault.vault.azure.net/keys?$skiptoken=abc"
        }))?;
        let page = KeyPropertiesPage::try_from(result)?;
        assert!(page.keys.is_empty());
        assert_eq!(page.next_link, "");

        let result = serde_json::from_value::<KeyListResult>(json!({
            "value": [{"kid": "https://myvault.vault.azure.net/keys/k1"}],
            "nextLink": null
        }))?;
        let page = DeletedKeyPage::try_from(result)?;
        assert_eq!(page.keys.len(), 1);
        assert_eq!(page.next_link, "");
        Ok(())
    }

    #[test]
    fn backup_value() -> anyhow::Result<()> {
        let got = serde_json::from_value::<BackupKeyResult>(json!({"value": "AAEC_w"}))?;
        assert_eq!(got.value, vec![0_u8, 1, 2, 255]);
        Ok(())
    }
}
