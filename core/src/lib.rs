//! Client core for the Contacts REST API.
//!
//! # Overview
//! `ContactsClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. `ContactsService` runs those through
//! a `Transport` (by default the pooled `ureq` agent in `UreqTransport`) and
//! exposes the typed calls: list, get and create.
//!
//! # Design
//! - Configuration is an explicit `ClientConfig` passed to constructors.
//! - List bodies are decoded by declared content type (JSON or XML) through
//!   the dispatch table in `codec`; other content types yield an empty list.
//! - Field names are matched case-insensitively on the way in and written
//!   camelCase on the way out.
//! - A 404 on single-contact lookup is `Ok(None)`, not an error.

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::ContactsClient;
pub use config::{ClientConfig, MediaRange, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::ContactsService;
pub use transport::{Transport, UreqTransport};
pub use types::{ContactCreationRequest, ContactDetails, ContactSummary, WireRecord};
