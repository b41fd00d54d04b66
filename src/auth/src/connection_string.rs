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

//! Parse storage account connection strings.
//!
//! A connection string is a `;` separated list of `Key=Value` settings, as
//! shown in the Azure portal:
//!
//! ```text
//! DefaultEndpointsProtocol=https;AccountName=myaccount;AccountKey=...;EndpointSuffix=core.windows.net
//! ```
//!
//! The string may name the service endpoints explicitly (`QueueEndpoint=`,
//! `FileEndpoint=`, ...), or let the client derive them from the account
//! name and endpoint suffix. `UseDevelopmentStorage=true` selects the local
//! storage emulator.

use crate::build_errors::Error as BuildError;
use crate::credentials::{Credentials, SasCredential, SharedKeyCredential};
use std::collections::HashMap;

/// The account used by the storage emulator.
pub const DEVELOPMENT_ACCOUNT_NAME: &str = "devstoreaccount1";

/// The well-known key of the storage emulator account.
pub const DEVELOPMENT_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";

const DEVELOPMENT_HOST: &str = "http://127.0.0.1";

/// The storage services addressed by a connection string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Service {
    Blob,
    Queue,
    File,
    Table,
}

impl Service {
    fn endpoint_key(&self) -> &'static str {
        match self {
            Self::Blob => "blobendpoint",
            Self::Queue => "queueendpoint",
            Self::File => "fileendpoint",
            Self::Table => "tableendpoint",
        }
    }

    fn endpoint_name(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Queue => "queue",
            Self::File => "file",
            Self::Table => "table",
        }
    }

    fn development_port(&self) -> Option<u16> {
        match self {
            Self::Blob => Some(10000),
            Self::Queue => Some(10001),
            Self::Table => Some(10002),
            Self::File => None,
        }
    }
}

/// Errors parsing a connection string.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid connection string, expected `=` in field `{0}`")]
    MalformedField(String),
    #[error("invalid DefaultEndpointsProtocol `{0}`, expected `http` or `https`")]
    InvalidProtocol(String),
    #[error("the connection string does not define an endpoint for the {0} service")]
    MissingEndpoint(&'static str),
    #[error("the storage emulator does not support the {0} service")]
    DevelopmentStorage(&'static str),
    #[error(transparent)]
    Credentials(#[from] BuildError),
}

/// The settings extracted from a connection string.
#[derive(Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ConnectionString {
    /// The service endpoint, e.g. `https://myaccount.queue.core.windows.net`.
    pub endpoint: String,
    /// The storage account name, if present.
    pub account_name: Option<String>,
    /// The base64 encoded account key, if present.
    pub account_key: Option<String>,
    /// The shared access signature, if present.
    pub sas: Option<String>,
}

impl ConnectionString {
    /// Creates the credentials described by the connection string.
    ///
    /// A shared access signature takes precedence over the account key. With
    /// neither the credentials are anonymous.
    pub fn credentials(&self) -> Result<Credentials, Error> {
        if let Some(sas) = &self.sas {
            return Ok(SasCredential::new(sas.as_str())?.into());
        }
        match (&self.account_name, &self.account_key) {
            (Some(name), Some(key)) => Ok(SharedKeyCredential::new(name.as_str(), key)?.into()),
            _ => Ok(Credentials::Anonymous),
        }
    }
}

impl std::fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionString")
            .field("endpoint", &self.endpoint)
            .field("account_name", &self.account_name)
            .field("account_key", &self.account_key.as_ref().map(|_| "[censored]"))
            .field("sas", &self.sas.as_ref().map(|_| "[censored]"))
            .finish()
    }
}

/// Parses a connection string for `service`.
///
/// # Example
/// ```
/// # use azure_sdk_auth::connection_string::{parse, Service};
/// let cs = parse("UseDevelopmentStorage=true", Service::Queue)?;
/// assert_eq!(cs.endpoint, "http://127.0.0.1:10001/devstoreaccount1");
/// assert_eq!(cs.account_name.as_deref(), Some("devstoreaccount1"));
/// # Ok::<(), azure_sdk_auth::connection_string::Error>(())
/// ```
pub fn parse(input: &str, service: Service) -> Result<ConnectionString, Error> {
    let settings = key_values(input)?;
    let get = |key: &str| settings.get(key).cloned();

    if get("usedevelopmentstorage").is_some_and(|v| v.eq_ignore_ascii_case("true")) {
        return development_storage(&settings, service);
    }

    let endpoint = match get(service.endpoint_key()) {
        Some(e) => e,
        None => endpoint_from_parts(&settings, service)?
            .ok_or(Error::MissingEndpoint(service.endpoint_name()))?,
    };
    Ok(ConnectionString {
        endpoint: endpoint.trim_end_matches('/').to_string(),
        account_name: get("accountname"),
        account_key: get("accountkey"),
        sas: get("sharedaccesssignature"),
    })
}

// Setting names are case insensitive, values are not.
fn key_values(input: &str) -> Result<HashMap<String, String>, Error> {
    input
        .trim()
        .split(';')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            let (key, value) = field
                .split_once('=')
                .ok_or_else(|| Error::MalformedField(field.to_string()))?;
            Ok((key.trim().to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}

fn development_storage(
    settings: &HashMap<String, String>,
    service: Service,
) -> Result<ConnectionString, Error> {
    let port = service
        .development_port()
        .ok_or(Error::DevelopmentStorage(service.endpoint_name()))?;
    let account_name = settings
        .get("accountname")
        .cloned()
        .unwrap_or_else(|| DEVELOPMENT_ACCOUNT_NAME.to_string());
    let account_key = settings
        .get("accountkey")
        .cloned()
        .unwrap_or_else(|| DEVELOPMENT_ACCOUNT_KEY.to_string());
    Ok(ConnectionString {
        endpoint: format!("{DEVELOPMENT_HOST}:{port}/{account_name}"),
        account_name: Some(account_name),
        account_key: Some(account_key),
        sas: None,
    })
}

fn endpoint_from_parts(
    settings: &HashMap<String, String>,
    service: Service,
) -> Result<Option<String>, Error> {
    let (Some(account_name), Some(suffix)) =
        (settings.get("accountname"), settings.get("endpointsuffix"))
    else {
        return Ok(None);
    };
    let protocol = settings
        .get("defaultendpointsprotocol")
        .map(String::as_str)
        .unwrap_or("https");
    if protocol != "http" && protocol != "https" {
        return Err(Error::InvalidProtocol(protocol.to_string()));
    }
    Ok(Some(format!(
        "{protocol}://{account_name}.{}.{suffix}",
        service.endpoint_name()
    )))
}
