//! Stateless HTTP request builder and response parser for the contacts API.
//!
//! # Design
//! `ContactsClient` holds only the base URL and the rendered `Accept` header,
//! and carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. A `Transport` executes the round trip in
//! between, keeping status policy and body decoding free of I/O.

use tracing::warn;

use crate::codec;
use crate::config::{ClientConfig, APPLICATION_JSON};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ContactCreationRequest, ContactDetails, ContactSummary};

pub const CONTACTS_PATH: &str = "/api/contacts";

/// Synchronous, stateless client for the contacts API.
#[derive(Debug, Clone)]
pub struct ContactsClient {
    base_url: String,
    accept: Option<String>,
}

impl ContactsClient {
    /// Client for `base_url` with the default `Accept` preferences.
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            accept: config.accept_header(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_contacts(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{CONTACTS_PATH}", self.base_url),
            headers: self.accept_headers(),
            body: None,
        }
    }

    pub fn build_get_contact(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{CONTACTS_PATH}/{id}", self.base_url),
            headers: self.accept_headers(),
            body: None,
        }
    }

    pub fn build_create_contact(
        &self,
        input: &ContactCreationRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{CONTACTS_PATH}", self.base_url),
            headers: vec![
                ("accept".to_string(), APPLICATION_JSON.to_string()),
                ("content-type".to_string(), APPLICATION_JSON.to_string()),
            ],
            body: Some(body),
        })
    }

    /// Decodes a contact list according to the declared content type.
    ///
    /// Unsupported or missing content types, and bodies that carry no value,
    /// produce an empty list.
    pub fn parse_list_contacts(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<ContactSummary>, ApiError> {
        check_status(&response)?;

        let Some(decode) = codec::list_decoder_for(response.content_type()) else {
            warn!(
                content_type = response.content_type().unwrap_or("<none>"),
                "unsupported content type for contact list, treating as empty"
            );
            return Ok(Vec::new());
        };

        match decode(&response.body)? {
            Some(tree) => codec::decode_records(tree),
            None => Ok(Vec::new()),
        }
    }

    /// `Ok(None)` when the server answers 404.
    pub fn parse_get_contact(
        &self,
        response: HttpResponse,
    ) -> Result<Option<ContactDetails>, ApiError> {
        if response.status == 404 {
            return Ok(None);
        }
        check_status(&response)?;

        let tree = codec::decode_json(&response.body)?
            .ok_or_else(|| ApiError::DecodeFailed("contact body is empty".to_string()))?;
        codec::decode_record(tree).map(Some)
    }

    pub fn parse_create_contact(
        &self,
        response: HttpResponse,
    ) -> Result<ContactCreationRequest, ApiError> {
        check_status(&response)?;

        let tree = codec::decode_json(&response.body)?
            .ok_or_else(|| ApiError::DecodeFailed("created contact body is empty".to_string()))?;
        codec::decode_record(tree)
    }

    fn accept_headers(&self) -> Vec<(String, String)> {
        self.accept
            .iter()
            .map(|accept| ("accept".to_string(), accept.clone()))
            .collect()
    }
}

/// Map non-2xx status codes to `ApiError::RequestFailed`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::RequestFailed {
        status: response.status,
        body: response.body_text(),
    })
}
