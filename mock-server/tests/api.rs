use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Contact, ContactDto};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str, accept: Option<&str>) -> Request<String> {
    let mut builder = Request::builder().uri(uri);
    if let Some(accept) = accept {
        builder = builder.header(http::header::ACCEPT, accept);
    }
    builder.body(String::new()).unwrap()
}

fn content_type(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(http::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

// --- list ---

#[tokio::test]
async fn list_contacts_returns_seeded_contact_as_json() {
    let resp = app()
        .oneshot(get_request("/api/contacts", Some("application/json")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_type(&resp).starts_with("application/json"));
    let contacts: Vec<ContactDto> = body_json(resp).await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].id, 1);
    assert_eq!(contacts[0].first_name, "John");
    assert_eq!(contacts[0].email, "jdoe@unknown.com");
}

#[tokio::test]
async fn list_contacts_defaults_to_json() {
    let resp = app().oneshot(get_request("/api/contacts", None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_type(&resp).starts_with("application/json"));
}

#[tokio::test]
async fn list_contacts_negotiates_xml() {
    let resp = app()
        .oneshot(get_request(
            "/api/contacts",
            Some("application/json;q=0.5, application/xml"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(content_type(&resp).starts_with("application/xml"));
    let body = body_bytes(resp).await;
    let xml = std::str::from_utf8(&body).unwrap();
    assert!(xml.starts_with("<ArrayOfContactDto>"));
    assert!(xml.contains("<FirstName>John</FirstName>"));
}

// --- create ---

#[tokio::test]
async fn create_contact_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/contacts",
            r#"{"firstName":"Jane","lastName":"Roe","email":"jroe@unknown.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let contact: ContactDto = body_json(resp).await;
    assert_eq!(contact.id, 2);
    assert_eq!(contact.first_name, "Jane");
    assert_eq!(contact.last_name, "Roe");
}

#[tokio::test]
async fn create_contact_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/contacts", r#"{"firstName":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_contact_returns_details() {
    let resp = app().oneshot(get_request("/api/contacts/1", None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let contact: Contact = body_json(resp).await;
    assert_eq!(contact.last_name, "Doe");
    assert_eq!(contact.phone_number.as_deref(), Some("555-0100"));
}

#[tokio::test]
async fn get_contact_not_found() {
    let resp = app().oneshot(get_request("/api/contacts/999", None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_contact_bad_id_returns_400() {
    let resp = app()
        .oneshot(get_request("/api/contacts/not-a-number", None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- create then read back ---

#[tokio::test]
async fn create_then_read_back() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/contacts",
            r#"{"firstName":"Walk","lastName":"Er","email":"walker@unknown.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ContactDto = body_json(resp).await;
    let id = created.id;

    // list — seeded contact plus the new one
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/contacts", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let contacts: Vec<ContactDto> = body_json(resp).await;
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[1], created);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/api/contacts/{id}"), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Contact = body_json(resp).await;
    assert_eq!(fetched.email, "walker@unknown.com");
    assert!(fetched.phone_number.is_none());
}
