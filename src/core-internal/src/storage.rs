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

//! Service properties shared by the storage services.
//!
//! The client libraries re-export these types in their `model` modules.

use serde::{Deserialize, Serialize};

/// How long the service keeps logs and metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct RetentionPolicy {
    pub enabled: bool,
    /// The number of days to keep the data, only used when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i32>,
}

impl RetentionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [enabled][RetentionPolicy::enabled].
    pub fn set_enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }

    /// Sets the value of [days][RetentionPolicy::days].
    pub fn set_days(mut self, v: i32) -> Self {
        self.days = Some(v);
        self
    }
}

/// Hourly or minute metrics settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Metrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub enabled: bool,
    /// Generate summary statistics for the API operations.
    #[serde(rename = "IncludeAPIs", skip_serializing_if = "Option::is_none")]
    pub include_apis: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_policy: Option<RetentionPolicy>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            version: Some("1.0".to_string()),
            ..Default::default()
        }
    }

    /// Sets the value of [enabled][Metrics::enabled].
    pub fn set_enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }

    /// Sets the value of [include_apis][Metrics::include_apis].
    pub fn set_include_apis(mut self, v: bool) -> Self {
        self.include_apis = Some(v);
        self
    }

    /// Sets the value of [retention_policy][Metrics::retention_policy].
    pub fn set_retention_policy(mut self, v: RetentionPolicy) -> Self {
        self.retention_policy = Some(v);
        self
    }
}

/// The cross-origin resource sharing rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Cors {
    #[serde(rename = "CorsRule", default)]
    pub rules: Vec<CorsRule>,
}

impl Cors {
    pub fn new<T: IntoIterator<Item = CorsRule>>(rules: T) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }
}

/// A CORS rule. Lists are comma separated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct CorsRule {
    /// The origin domains allowed to make requests, or `*`.
    #[serde(default)]
    pub allowed_origins: String,
    /// The HTTP methods the origins may use.
    #[serde(default)]
    pub allowed_methods: String,
    #[serde(default)]
    pub allowed_headers: String,
    #[serde(default)]
    pub exposed_headers: String,
    /// How long a browser may cache the preflight response.
    #[serde(default)]
    pub max_age_in_seconds: i32,
}

impl CorsRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [allowed_origins][CorsRule::allowed_origins].
    pub fn set_allowed_origins<T: Into<String>>(mut self, v: T) -> Self {
        self.allowed_origins = v.into();
        self
    }

    /// Sets the value of [allowed_methods][CorsRule::allowed_methods].
    pub fn set_allowed_methods<T: Into<String>>(mut self, v: T) -> Self {
        self.allowed_methods = v.into();
        self
    }

    /// Sets the value of [allowed_headers][CorsRule::allowed_headers].
    pub fn set_allowed_headers<T: Into<String>>(mut self, v: T) -> Self {
        self.allowed_headers = v.into();
        self
    }

    /// Sets the value of [exposed_headers][CorsRule::exposed_headers].
    pub fn set_exposed_headers<T: Into<String>>(mut self, v: T) -> Self {
        self.exposed_headers = v.into();
        self
    }

    /// Sets the value of [max_age_in_seconds][CorsRule::max_age_in_seconds].
    pub fn set_max_age_in_seconds(mut self, v: i32) -> Self {
        self.max_age_in_seconds = v;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Properties {
        #[serde(skip_serializing_if = "Option::is_none")]
        hour_metrics: Option<Metrics>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cors: Option<Cors>,
    }

    #[test]
    fn parse() -> anyhow::Result<()> {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
<StorageServiceProperties>
  <HourMetrics>
    <Version>1.0</Version>
    <Enabled>true</Enabled>
    <IncludeAPIs>false</IncludeAPIs>
    <RetentionPolicy><Enabled>true</Enabled><Days>7</Days></RetentionPolicy>
  </HourMetrics>
  <Cors>
    <CorsRule>
      <AllowedOrigins>*</AllowedOrigins>
      <AllowedMethods>GET,PUT</AllowedMethods>
      <AllowedHeaders />
      <ExposedHeaders>x-ms-*</ExposedHeaders>
      <MaxAgeInSeconds>60</MaxAgeInSeconds>
    </CorsRule>
  </Cors>
</StorageServiceProperties>"#;
        let got = crate::xml::from_slice::<Properties>(body.as_bytes())?;
        let want = Properties {
            hour_metrics: Some(
                Metrics::new()
                    .set_enabled(true)
                    .set_include_apis(false)
                    .set_retention_policy(RetentionPolicy::new().set_enabled(true).set_days(7)),
            ),
            cors: Some(Cors::new([CorsRule::new()
                .set_allowed_origins("*")
                .set_allowed_methods("GET,PUT")
                .set_exposed_headers("x-ms-*")
                .set_max_age_in_seconds(60)])),
        };
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn serialize() -> anyhow::Result<()> {
        let properties = Properties {
            hour_metrics: Some(Metrics::new().set_enabled(false)),
            cors: Some(Cors::new([])),
        };
        let bytes = crate::xml::to_bytes("StorageServiceProperties", &properties)?;
        let text = std::str::from_utf8(&bytes)?;
        assert!(
            text.contains("<HourMetrics><Version>1.0</Version><Enabled>false</Enabled></HourMetrics>"),
            "{text}"
        );
        Ok(())
    }
}
