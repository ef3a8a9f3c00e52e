use http::StatusCode;
use lambda_runtime::Error;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use std::collections::BTreeMap;
use std::io;

/// The response shape API Gateway expects back from a proxy integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// No whitespace at all: `{"message":"Hello World!"}`
    Compact,
    /// See [`to_spaced_json`].
    Spaced,
}

pub fn json_response<T: Serialize>(
    status: &StatusCode,
    body: &T,
    format: BodyFormat,
) -> Result<ProxyResponse, Error> {
    let body = match format {
        BodyFormat::Compact => serde_json::to_string(body)?,
        BodyFormat::Spaced => to_spaced_json(body)?,
    };

    Ok(ProxyResponse {
        status_code: status.as_u16(),
        headers: BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]),
        body,
    })
}

/// Serializes `value` as `{"key": "value", "other": [1, 2]}`, with a space
/// after every separator and everything outside printable ASCII escaped as
/// `\uXXXX`.
///
/// Existing clients of the region function compare the body byte for byte,
/// so this is the layout they expect.
pub fn to_spaced_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut writer = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, SpacedFormatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(writer).map_err(serde_json::Error::custom)
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    // serde_json has already escaped quotes, backslashes and control
    // characters by the time a fragment gets here.
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch < '\u{7f}' {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::{json_response, to_spaced_json, BodyFormat, ProxyResponse};
    use http::StatusCode;
    use serde_json::{json, Value};

    #[test]
    fn when_spaced_should_separate_members_with_spaces() {
        let body = to_spaced_json(&json!({"a": 1, "b": [true, null, "x"]})).unwrap();

        assert_eq!(body, r#"{"a": 1, "b": [true, null, "x"]}"#);
    }

    #[test]
    fn when_spaced_and_empty_containers_should_stay_tight() {
        assert_eq!(to_spaced_json(&json!({})).unwrap(), "{}");
        assert_eq!(to_spaced_json(&json!([])).unwrap(), "[]");
    }

    #[test]
    fn when_spaced_should_escape_non_ascii() {
        let body = to_spaced_json(&json!({"city": "Zürich \u{7f} 🦀"})).unwrap();

        assert_eq!(body, r#"{"city": "Z\u00fcrich \u007f \ud83e\udd80"}"#);
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["city"], "Zürich \u{7f} 🦀");
    }

    #[test]
    fn when_spaced_should_keep_standard_escapes() {
        let body = to_spaced_json(&json!("quote \" slash \\ tab \t")).unwrap();

        assert_eq!(body, r#""quote \" slash \\ tab \t""#);
    }

    #[test]
    fn when_compact_should_have_no_whitespace() {
        let response =
            json_response(&StatusCode::OK, &json!({"message": "Hello World!"}), BodyFormat::Compact)
                .unwrap();

        assert_eq!(response.body, r#"{"message":"Hello World!"}"#);
    }

    #[test]
    fn when_building_response_should_serialize_proxy_shape() {
        let response =
            json_response(&StatusCode::OK, &json!({"k": "v"}), BodyFormat::Spaced).unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 200,
                "headers": {"Content-Type": "application/json"},
                "body": "{\"k\": \"v\"}"
            })
        );
    }

    #[test]
    fn when_status_is_not_ok_should_carry_it_through() {
        let response: ProxyResponse =
            json_response(&StatusCode::NOT_FOUND, &json!({}), BodyFormat::Compact).unwrap();

        assert_eq!(response.status_code, 404);
        assert_eq!(response.headers.len(), 1);
    }
}
