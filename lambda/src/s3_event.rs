//! Parsing of S3 `ObjectCreated` notifications delivered to the Lambda.

use serde_json::Value;
use tracing::warn;

use crate::core::models::ObjectLocation;
use crate::errors::SummarizerError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// Extracts the bucket and decoded key of the first record.
///
/// # Errors
///
/// Returns `ParseError` when the payload has no records or the first record
/// lacks a bucket name or object key.
pub fn parse_object_location(payload: &Value) -> Result<ObjectLocation, SummarizerError> {
    let records = payload
        .get("Records")
        .and_then(|r| r.as_array())
        .ok_or_else(|| SummarizerError::ParseError("Event has no Records array".to_string()))?;

    let record = records
        .first()
        .ok_or_else(|| SummarizerError::ParseError("Event Records array is empty".to_string()))?;

    if records.len() > 1 {
        warn!(
            records = records.len(),
            "Event carries multiple records, only the first is processed"
        );
    }

    let bucket = v_str(record, &["s3", "bucket", "name"])
        .ok_or_else(|| SummarizerError::ParseError("Record missing s3.bucket.name".to_string()))?;
    let raw_key = v_str(record, &["s3", "object", "key"])
        .ok_or_else(|| SummarizerError::ParseError("Record missing s3.object.key".to_string()))?;

    Ok(ObjectLocation::new(bucket, decode_object_key(raw_key)))
}

/// Decodes a key as S3 puts it in notifications: `+` for spaces, then
/// percent-escapes. Invalid UTF-8 sequences become U+FFFD.
#[must_use]
pub fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_and_escapes_decode() {
        assert_eq!(
            decode_object_key("calls/team+sync%282024%29.txt"),
            "calls/team sync(2024).txt"
        );
        assert_eq!(decode_object_key("a%2Bb.txt"), "a+b.txt");
    }

    #[test]
    fn invalid_utf8_escapes_are_replaced() {
        assert_eq!(decode_object_key("notes%FF.txt"), "notes\u{FFFD}.txt");
        assert_eq!(decode_object_key("caf%C3%A9.txt"), "café.txt");
    }
}
