use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// A stored contact with its detail fields.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub notes: Option<String>,
}

/// The list view of a contact.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForCreation {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename = "ArrayOfContactDto")]
struct XmlContactList<'a> {
    #[serde(rename = "ContactDto")]
    contacts: Vec<XmlContact<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct XmlContact<'a> {
    id: i64,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
}

#[derive(Debug)]
pub struct Store {
    contacts: BTreeMap<i64, Contact>,
    next_id: i64,
}

impl Store {
    /// A store holding the single well-known contact John Doe.
    pub fn seeded() -> Self {
        let john = Contact {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "jdoe@unknown.com".to_string(),
            phone_number: Some("555-0100".to_string()),
            notes: None,
        };
        Self {
            contacts: BTreeMap::from([(john.id, john)]),
            next_id: 2,
        }
    }
}

impl From<&Contact> for ContactDto {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route("/api/contacts/{id}", get(get_contact))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_contacts(State(db): State<Db>, headers: HeaderMap) -> Response {
    let store = db.read().await;
    let contacts: Vec<ContactDto> = store.contacts.values().map(ContactDto::from).collect();

    if !prefers_xml(&headers) {
        return Json(contacts).into_response();
    }

    let list = XmlContactList {
        contacts: contacts
            .iter()
            .map(|c| XmlContact {
                id: c.id,
                first_name: &c.first_name,
                last_name: &c.last_name,
                email: &c.email,
            })
            .collect(),
    };
    match quick_xml::se::to_string(&list) {
        Ok(xml) => {
            ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response()
        }
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn create_contact(
    State(db): State<Db>,
    Json(input): Json<ContactForCreation>,
) -> (StatusCode, Json<ContactDto>) {
    let mut store = db.write().await;
    let contact = Contact {
        id: store.next_id,
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        phone_number: None,
        notes: None,
    };
    store.next_id += 1;
    let dto = ContactDto::from(&contact);
    store.contacts.insert(contact.id, contact);
    (StatusCode::CREATED, Json(dto))
}

async fn get_contact(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Contact>, StatusCode> {
    let store = db.read().await;
    store.contacts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// True when the `Accept` header weighs XML above JSON.
pub fn prefers_xml(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let mut json_q = None;
    let mut xml_q = None;
    for range in accept.split(',') {
        let mut parts = range.split(';');
        let media = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        let q = parts
            .filter_map(|p| p.trim().strip_prefix("q="))
            .find_map(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);
        match media.as_str() {
            "application/json" => json_q = Some(q),
            "application/xml" => xml_q = Some(q),
            _ => {}
        }
    }

    match (json_q, xml_q) {
        (_, None) => false,
        (None, Some(xml)) => xml > 0.0,
        (Some(json), Some(xml)) => xml > json,
    }
}
