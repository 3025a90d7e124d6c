//! Contact records exchanged with the Contacts API.
//!
//! # Design
//! Records serialize with camelCase field names. On the way in, bodies are
//! first turned into a `serde_json::Value` tree whose keys are rewritten to the
//! names in `WireRecord::FIELDS` (see `codec::canonicalize`), which is what
//! makes field matching case-insensitive. Missing fields fall back to their
//! defaults, unknown fields are ignored.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record that can be decoded from a canonicalized body tree.
pub trait WireRecord: DeserializeOwned {
    /// Wire names of the fields this record binds, in camelCase.
    const FIELDS: &'static [&'static str];
}

/// A contact as returned by the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSummary {
    #[serde(deserialize_with = "integer_or_text")]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl WireRecord for ContactSummary {
    const FIELDS: &'static [&'static str] = &["id", "firstName", "lastName", "email"];
}

/// A single contact with whatever detail fields the server adds.
///
/// Detail fields are server-defined; they are kept verbatim in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDetails {
    #[serde(deserialize_with = "integer_or_text")]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WireRecord for ContactDetails {
    const FIELDS: &'static [&'static str] = &["id", "firstName", "lastName", "email"];
}

impl ContactDetails {
    pub fn summary(&self) -> ContactSummary {
        ContactSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Payload for creating a contact. The server echoes it back, possibly with
/// an assigned `id` that this type does not carry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactCreationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl WireRecord for ContactCreationRequest {
    const FIELDS: &'static [&'static str] = &["firstName", "lastName", "email"];
}

impl ContactCreationRequest {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// XML carries every scalar as text, so ids arrive either as numbers or as
/// numeric strings.
fn integer_or_text<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(i64),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => Ok(n),
        Repr::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid integer id: {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_request_serializes_camel_case() {
        let req = ContactCreationRequest::new("Jane", "Roe", "jroe@unknown.com");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "firstName": "Jane",
                "lastName": "Roe",
                "email": "jroe@unknown.com"
            })
        );
    }

    #[test]
    fn summary_accepts_numeric_string_id() {
        let summary: ContactSummary =
            serde_json::from_str(r#"{"id":"42","firstName":"A","lastName":"B","email":"c"}"#)
                .unwrap();
        assert_eq!(summary.id, 42);
    }

    #[test]
    fn summary_rejects_non_numeric_id() {
        let result: Result<ContactSummary, _> = serde_json::from_str(r#"{"id":"forty-two"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_fields_default() {
        let summary: ContactSummary = serde_json::from_str(r#"{"id":3}"#).unwrap();
        assert_eq!(summary.id, 3);
        assert!(summary.first_name.is_empty());
        assert!(summary.email.is_empty());
    }

    #[test]
    fn details_keep_unknown_fields() {
        let details: ContactDetails = serde_json::from_str(
            r#"{"id":1,"firstName":"John","lastName":"Doe","email":"jdoe@unknown.com","phoneNumber":"555-0100"}"#,
        )
        .unwrap();
        assert_eq!(details.first_name, "John");
        assert_eq!(details.extra["phoneNumber"], "555-0100");
        assert!(!details.extra.contains_key("firstName"));
        assert_eq!(details.summary().last_name, "Doe");
    }
}
