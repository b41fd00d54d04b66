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

//! XML helpers for the storage services.

use azcore::Result;
use azcore::error::{Error, Status};
use bytes::Bytes;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Deserializes an XML document.
///
/// The services sometimes prefix the document with a UTF-8 byte order mark,
/// it is ignored.
pub fn from_slice<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T> {
    let body = body.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(body);
    let text = std::str::from_utf8(body).map_err(Error::deser)?;
    quick_xml::de::from_str(text).map_err(Error::deser)
}

/// Serializes `value` as an XML document with `root` as the document element.
pub fn to_bytes<T: serde::Serialize>(root: &str, value: &T) -> Result<Bytes> {
    let body = quick_xml::se::to_string_with_root(root, value).map_err(Error::ser)?;
    Ok(Bytes::from(format!("{DECLARATION}{body}")))
}

#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

/// Parses a storage error body:
/// `<Error><Code>..</Code><Message>..</Message></Error>`.
pub(crate) fn parse_error(body: &[u8]) -> Option<Status> {
    let body = from_slice::<ErrorBody>(body).ok()?;
    if body.code.is_empty() && body.message.is_empty() {
        return None;
    }
    Some(Status::default().set_code(body.code).set_message(body.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    struct QueueMessage {
        #[serde(rename = "MessageText")]
        text: String,
    }

    #[test]
    fn roundtrip_with_root() -> anyhow::Result<()> {
        let message = QueueMessage {
            text: "hello & goodbye".to_string(),
        };
        let bytes = to_bytes("QueueMessage", &message)?;
        let text = std::str::from_utf8(&bytes)?;
        assert!(text.starts_with(DECLARATION), "{text}");
        assert!(
            text.contains("<QueueMessage><MessageText>hello &amp; goodbye</MessageText></QueueMessage>"),
            "{text}"
        );
        let got = from_slice::<QueueMessage>(&bytes)?;
        assert_eq!(got, message);
        Ok(())
    }

    #[test]
    fn byte_order_mark() -> anyhow::Result<()> {
        let body = b"\xEF\xBB\xBF<QueueMessage><MessageText>hi</MessageText></QueueMessage>";
        let got = from_slice::<QueueMessage>(body)?;
        assert_eq!(got.text, "hi");
        Ok(())
    }

    #[test]
    fn bad_document() {
        let err = from_slice::<QueueMessage>(b"not xml").unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
    }

    #[test]
    fn error_body() {
        let body = br#"<?xml version="1.0" encoding="utf-8"?><Error><Code>ShareNotFound</Code><Message>The specified share does not exist.
RequestId:abc</Message></Error>"#;
        let status = parse_error(body).expect("valid error body");
        assert_eq!(status.code, "ShareNotFound");
        assert!(
            status.message.starts_with("The specified share does not exist."),
            "{status:?}"
        );
        assert!(parse_error(b"").is_none());
        assert!(parse_error(b"{\"error\":{}}").is_none());
    }
}
