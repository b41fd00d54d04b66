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

//! Typed access to the response headers used by the Azure services.

use azcore::Result;
use azcore::error::Error;
use chrono::{DateTime, Utc};
use http::HeaderMap;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

pub const CLIENT_REQUEST_ID: &str = "x-ms-client-request-id";
pub const REQUEST_ID: &str = "x-ms-request-id";
pub const VERSION: &str = "x-ms-version";
pub const ERROR_CODE: &str = "x-ms-error-code";
pub const META_PREFIX: &str = "x-ms-meta-";
pub const RETRY_AFTER_MS: &str = "retry-after-ms";
pub const X_MS_RETRY_AFTER_MS: &str = "x-ms-retry-after-ms";

const RFC1123: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formats a timestamp as used in HTTP headers, e.g.
/// `Thu, 14 Feb 2019 10:00:00 GMT`.
pub fn format_rfc1123(value: &DateTime<Utc>) -> String {
    value.format(RFC1123).to_string()
}

pub fn parse_rfc1123(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(Error::deser)
}

/// Returns the header value, if present and valid UTF-8.
pub fn get_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

pub fn get_string(headers: &HeaderMap, name: &str) -> Option<String> {
    get_str(headers, name).map(str::to_string)
}

/// Returns a header value that must be present.
pub fn required_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str> {
    get_str(headers, name).ok_or_else(|| Error::deser(format!("missing header {name}")))
}

/// Parses a header value, if present.
pub fn get_parse<T>(headers: &HeaderMap, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    get_str(headers, name)
        .map(|v| v.parse::<T>().map_err(Error::deser))
        .transpose()
}

/// Parses an RFC 1123 date header, if present.
pub fn get_date(headers: &HeaderMap, name: &str) -> Result<Option<DateTime<Utc>>> {
    get_str(headers, name).map(parse_rfc1123).transpose()
}

pub fn request_id(headers: &HeaderMap) -> Option<String> {
    get_string(headers, REQUEST_ID)
}

pub fn version(headers: &HeaderMap) -> Option<String> {
    get_string(headers, VERSION)
}

pub fn etag(headers: &HeaderMap) -> Option<String> {
    get_string(headers, http::header::ETAG.as_str())
}

pub fn date(headers: &HeaderMap) -> Result<Option<DateTime<Utc>>> {
    get_date(headers, http::header::DATE.as_str())
}

pub fn last_modified(headers: &HeaderMap) -> Result<Option<DateTime<Utc>>> {
    get_date(headers, http::header::LAST_MODIFIED.as_str())
}

/// Collects the `x-ms-meta-*` headers, without the prefix.
pub fn metadata(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(k, v)| {
            let name = k.as_str().strip_prefix(META_PREFIX)?;
            Some((name.to_string(), v.to_str().ok()?.to_string()))
        })
        .collect()
}

/// The headers returned by every storage operation.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ResponseMetadata {
    /// The `x-ms-request-id` header, identifies the request in the service
    /// logs.
    pub request_id: Option<String>,
    /// The service version used to process the request.
    pub version: Option<String>,
    /// The time the response was generated.
    pub date: Option<DateTime<Utc>>,
}

impl ResponseMetadata {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            request_id: request_id(headers),
            version: version(headers),
            date: date(headers)?,
        })
    }
}

/// Returns the delay requested by a throttled response.
///
/// The services use `retry-after-ms`, `x-ms-retry-after-ms`, or the standard
/// `Retry-After` header. The latter contains either a number of seconds or an
/// HTTP date, relative to `now`.
pub fn retry_after(headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
    for name in [RETRY_AFTER_MS, X_MS_RETRY_AFTER_MS] {
        if let Some(ms) = get_str(headers, name).and_then(|v| v.trim().parse::<u64>().ok()) {
            return Some(Duration::from_millis(ms));
        }
    }
    let value = get_str(headers, http::header::RETRY_AFTER.as_str())?.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    let when = parse_rfc1123(value).ok()?;
    Some((when - now).to_std().unwrap_or(Duration::ZERO))
}

/// Serialize and deserialize RFC 1123 timestamps, as used in the XML bodies of
/// the storage services.
pub mod rfc1123 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_rfc1123(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let value = String::deserialize(d)?;
        super::parse_rfc1123(&value).map_err(serde::de::Error::custom)
    }
}

/// Like [rfc1123] for optional fields. Empty elements map to `None`.
pub mod rfc1123_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => super::rfc1123::serialize(v, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value = Option::<String>::deserialize(d)?;
        match value.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) => super::parse_rfc1123(v)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use http::HeaderValue;
    use test_case::test_case;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        pairs
            .iter()
            .map(|(k, v)| {
                (
                    http::HeaderName::from_static(k),
                    HeaderValue::from_static(v),
                )
            })
            .collect()
    }

    #[test]
    fn rfc1123_format_and_parse() -> anyhow::Result<()> {
        let when = Utc.with_ymd_and_hms(2019, 2, 14, 10, 0, 0).unwrap();
        let formatted = format_rfc1123(&when);
        assert_eq!(formatted, "Thu, 14 Feb 2019 10:00:00 GMT");
        assert_eq!(parse_rfc1123(&formatted)?, when);
        assert!(parse_rfc1123("yesterday").is_err());
        Ok(())
    }

    #[test]
    fn common() -> anyhow::Result<()> {
        let h = headers(&[
            ("x-ms-request-id", "req-1"),
            ("x-ms-version", "2019-02-02"),
            ("etag", "\"0x8D\""),
            ("date", "Thu, 14 Feb 2019 10:00:00 GMT"),
            ("x-ms-share-quota", "5"),
        ]);
        assert_eq!(request_id(&h).as_deref(), Some("req-1"));
        assert_eq!(version(&h).as_deref(), Some("2019-02-02"));
        assert_eq!(etag(&h).as_deref(), Some("\"0x8D\""));
        assert_eq!(
            date(&h)?,
            Some(Utc.with_ymd_and_hms(2019, 2, 14, 10, 0, 0).unwrap())
        );
        assert_eq!(last_modified(&h)?, None);
        assert_eq!(get_parse::<i32>(&h, "x-ms-share-quota")?, Some(5));
        assert_eq!(get_parse::<i32>(&h, "x-ms-missing")?, None);
        assert!(required_str(&h, "x-ms-missing").is_err());
        Ok(())
    }

    #[test]
    fn bad_values() {
        let h = headers(&[("x-ms-share-quota", "many"), ("date", "not a date")]);
        let err = get_parse::<i32>(&h, "x-ms-share-quota").unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
        let err = date(&h).unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
    }

    #[test]
    fn metadata_headers() {
        let h = headers(&[
            ("x-ms-meta-color", "blue"),
            ("x-ms-meta-size", "large"),
            ("x-ms-request-id", "abc"),
        ]);
        let got = metadata(&h);
        let want = HashMap::from([
            ("color".to_string(), "blue".to_string()),
            ("size".to_string(), "large".to_string()),
        ]);
        assert_eq!(got, want);
    }

    #[test_case(&[("retry-after-ms", "250")], Some(Duration::from_millis(250)))]
    #[test_case(&[("x-ms-retry-after-ms", "100")], Some(Duration::from_millis(100)))]
    #[test_case(&[("retry-after", "3")], Some(Duration::from_secs(3)))]
    #[test_case(&[("retry-after", "Thu, 14 Feb 2019 10:00:05 GMT")], Some(Duration::from_secs(5)))]
    #[test_case(&[("retry-after", "Thu, 14 Feb 2019 09:00:00 GMT")], Some(Duration::ZERO))]
    #[test_case(&[("retry-after", "soon")], None)]
    #[test_case(&[], None)]
    fn retry_after_values(pairs: &[(&'static str, &'static str)], want: Option<Duration>) {
        let now = Utc.with_ymd_and_hms(2019, 2, 14, 10, 0, 0).unwrap();
        assert_eq!(retry_after(&headers(pairs), now), want);
    }

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    struct WithDates {
        #[serde(with = "rfc1123")]
        modified: DateTime<Utc>,
        #[serde(with = "rfc1123_option", default)]
        expires: Option<DateTime<Utc>>,
    }

    #[test]
    fn serde_helpers() -> anyhow::Result<()> {
        let input = serde_json::json!({
            "modified": "Thu, 14 Feb 2019 10:00:00 GMT",
            "expires": "",
        });
        let got = serde_json::from_value::<WithDates>(input)?;
        let when = Utc.with_ymd_and_hms(2019, 2, 14, 10, 0, 0).unwrap();
        assert_eq!(
            got,
            WithDates {
                modified: when,
                expires: None
            }
        );
        let value = serde_json::to_value(&got)?;
        assert_eq!(value["modified"], "Thu, 14 Feb 2019 10:00:00 GMT");
        Ok(())
    }

    #[test]
    fn response_metadata() -> anyhow::Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID, http::HeaderValue::from_static("req-1"));
        headers.insert(VERSION, http::HeaderValue::from_static("2018-03-28"));
        headers.insert(
            http::header::DATE,
            http::HeaderValue::from_static("Thu, 14 Feb 2019 10:00:00 GMT"),
        );
        let got = ResponseMetadata::from_headers(&headers)?;
        assert_eq!(got.request_id.as_deref(), Some("req-1"));
        assert_eq!(got.version.as_deref(), Some("2018-03-28"));
        assert_eq!(got.date.map(|d| d.timestamp()), Some(1_550_138_400));

        let got = ResponseMetadata::from_headers(&HeaderMap::new())?;
        assert_eq!(got, ResponseMetadata::default());
        Ok(())
    }
}
