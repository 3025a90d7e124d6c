//! Typed CRUD calls over a `Transport`.
//!
//! # Design
//! `ContactsService` pairs a `ContactsClient` with a transport and runs
//! build, execute and parse for each operation. It holds no mutable state,
//! so a single instance can be shared by reference across threads.

use tracing::{debug, info};

use crate::client::ContactsClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{ContactCreationRequest, ContactDetails, ContactSummary};

pub struct ContactsService<T = UreqTransport> {
    client: ContactsClient,
    transport: T,
}

impl ContactsService<UreqTransport> {
    /// Service talking to the network with the configured timeout.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> ContactsService<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: ContactsClient::from_config(config),
            transport,
        }
    }

    pub fn client(&self) -> &ContactsClient {
        &self.client
    }

    pub fn list_contacts(&self) -> Result<Vec<ContactSummary>, ApiError> {
        let response = self.send(self.client.build_list_contacts())?;
        let contacts = self.client.parse_list_contacts(response)?;
        info!(count = contacts.len(), "listed contacts");
        Ok(contacts)
    }

    pub fn get_contact(&self, id: i64) -> Result<Option<ContactDetails>, ApiError> {
        let response = self.send(self.client.build_get_contact(id))?;
        let contact = self.client.parse_get_contact(response)?;
        if contact.is_none() {
            info!(id, "contact not found");
        }
        Ok(contact)
    }

    pub fn create_contact(
        &self,
        input: &ContactCreationRequest,
    ) -> Result<ContactCreationRequest, ApiError> {
        let response = self.send(self.client.build_create_contact(input)?)?;
        let created = self.client.parse_create_contact(response)?;
        info!(email = %created.email, "created contact");
        Ok(created)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(
            status = response.status,
            content_type = response.content_type().unwrap_or("<none>"),
            "received response"
        );
        Ok(response)
    }
}
