//! One-line console renderings of contact records.

use contacts_core::{ContactCreationRequest, ContactDetails, ContactSummary};

pub fn summary_line(contact: &ContactSummary) -> String {
    format!(
        "{} {} {} {}",
        contact.id, contact.first_name, contact.last_name, contact.email
    )
}

pub fn details_line(contact: &ContactDetails) -> String {
    summary_line(&contact.summary())
}

pub fn not_found_line(id: i64) -> String {
    format!("Contact with id {id} not found")
}

pub fn created_line(contact: &ContactCreationRequest) -> String {
    format!(
        "{} {} {}",
        contact.first_name, contact.last_name, contact.email
    )
}
