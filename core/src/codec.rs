//! Response body decoding keyed by declared content type.
//!
//! # Design
//! Every supported media type maps to a decoder that turns the raw body bytes
//! into a `serde_json::Value` tree, or `None` when the body carries no value
//! (`null`, empty). Records are then bound from the tree after
//! `canonicalize` has rewritten field names, so JSON and XML share one path
//! into the typed records. `LIST_DECODERS` only holds list-shaped decoders;
//! media types missing from it are left to the caller. Bytes are checked for
//! UTF-8 inside each decoder, never before a decoder has been picked.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::config::{APPLICATION_JSON, APPLICATION_XML};
use crate::error::ApiError;
use crate::types::WireRecord;

/// Turns a response body into a value tree, `None` meaning "no value".
pub type BodyDecoder = fn(&[u8]) -> Result<Option<Value>, ApiError>;

const LIST_DECODERS: &[(&str, BodyDecoder)] = &[
    (APPLICATION_JSON, decode_json),
    (APPLICATION_XML, decode_xml_list),
];

/// Lowercased media type of a `Content-Type` value, parameters stripped.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Looks up the contact-list decoder for a declared content type.
pub fn list_decoder_for(content_type: Option<&str>) -> Option<BodyDecoder> {
    let media = media_type(content_type?);
    LIST_DECODERS
        .iter()
        .find(|(known, _)| *known == media)
        .map(|(_, decoder)| *decoder)
}

pub fn decode_json(body: &[u8]) -> Result<Option<Value>, ApiError> {
    let body = utf8(body)?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(body).map_err(decode_failed)?;
    Ok((!value.is_null()).then_some(value))
}

/// Reads an XML list document into an array of flat objects.
///
/// The root element is the list, each child of the root is one record and
/// each grandchild is a field whose text becomes a string value. Deeper
/// nesting is skipped. A document without a root element has no value; one
/// with several root elements is rejected.
pub fn decode_xml_list(body: &[u8]) -> Result<Option<Value>, ApiError> {
    let mut reader = Reader::from_str(utf8(body)?);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut saw_root = false;
    let mut items = Vec::new();
    let mut record: Option<Map<String, Value>> = None;
    let mut field: Option<(String, String)> = None;

    loop {
        match reader.read_event().map_err(decode_failed)? {
            Event::Start(start) => {
                if depth == 0 && saw_root {
                    return Err(multiple_roots());
                }
                depth += 1;
                match depth {
                    1 => saw_root = true,
                    2 => record = Some(Map::new()),
                    3 => field = Some((local_name(&start)?, String::new())),
                    _ => {}
                }
            }
            Event::Empty(start) => match depth + 1 {
                1 if saw_root => return Err(multiple_roots()),
                1 => saw_root = true,
                2 => items.push(Value::Object(Map::new())),
                3 => {
                    if let Some(record) = record.as_mut() {
                        record.insert(local_name(&start)?, Value::String(String::new()));
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                let text = text.unescape().map_err(decode_failed)?;
                if depth == 0 && !text.is_empty() {
                    return Err(ApiError::DecodeFailed(
                        "text outside of the root element".to_string(),
                    ));
                }
                if let (3, Some((_, value))) = (depth, field.as_mut()) {
                    value.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let (3, Some((_, value))) = (depth, field.as_mut()) {
                    value.push_str(std::str::from_utf8(&data).map_err(decode_failed)?);
                }
            }
            Event::End(_) => {
                match depth {
                    3 => {
                        if let (Some((name, value)), Some(record)) = (field.take(), record.as_mut())
                        {
                            record.insert(name, Value::String(value));
                        }
                    }
                    2 => {
                        if let Some(record) = record.take() {
                            items.push(Value::Object(record));
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ApiError::DecodeFailed("unclosed XML element".to_string()));
    }
    Ok(saw_root.then_some(Value::Array(items)))
}

fn multiple_roots() -> ApiError {
    ApiError::DecodeFailed("multiple root elements".to_string())
}

fn utf8(body: &[u8]) -> Result<&str, ApiError> {
    std::str::from_utf8(body).map_err(decode_failed)
}

fn local_name(start: &BytesStart<'_>) -> Result<String, ApiError> {
    std::str::from_utf8(start.local_name().as_ref())
        .map(str::to_owned)
        .map_err(decode_failed)
}

/// Rewrites object keys that match one of `fields` ignoring ASCII case to the
/// canonical spelling. Applies to the top-level object or to each object of a
/// top-level array; nested values are left untouched.
pub fn canonicalize(value: Value, fields: &[&str]) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| canonicalize_object(item, fields))
                .collect(),
        ),
        other => canonicalize_object(other, fields),
    }
}

fn canonicalize_object(value: Value, fields: &[&str]) -> Value {
    let Value::Object(map) = value else {
        return value;
    };
    Value::Object(
        map.into_iter()
            .map(|(key, value)| {
                let key = fields
                    .iter()
                    .find(|field| field.eq_ignore_ascii_case(&key))
                    .map_or(key, |field| (*field).to_string());
                (key, value)
            })
            .collect(),
    )
}

pub fn decode_record<T: WireRecord>(tree: Value) -> Result<T, ApiError> {
    serde_json::from_value(canonicalize(tree, T::FIELDS)).map_err(decode_failed)
}

pub fn decode_records<T: WireRecord>(tree: Value) -> Result<Vec<T>, ApiError> {
    serde_json::from_value(canonicalize(tree, T::FIELDS)).map_err(decode_failed)
}

fn decode_failed(err: impl std::fmt::Display) -> ApiError {
    ApiError::DecodeFailed(err.to_string())
}
