//! The read-then-create sequence the console runs against the API.
//!
//! Output goes to the supplied writer as each step completes, so a failure
//! part-way leaves earlier sections intact.

use std::io::Write;

use anyhow::Context;
use contacts_core::{ContactCreationRequest, ContactsService, Transport};

use crate::render;

pub struct Plan {
    pub id: i64,
    pub new_contact: ContactCreationRequest,
}

pub fn run<T: Transport>(
    service: &ContactsService<T>,
    plan: &Plan,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "GetContacts:\n")?;
    let contacts = service.list_contacts().context("listing contacts")?;
    for contact in &contacts {
        writeln!(out, "{}", render::summary_line(contact))?;
    }

    writeln!(out, "\nGetContact:\n")?;
    let line = match service
        .get_contact(plan.id)
        .with_context(|| format!("fetching contact {}", plan.id))?
    {
        Some(contact) => render::details_line(&contact),
        None => render::not_found_line(plan.id),
    };
    writeln!(out, "{line}")?;

    writeln!(out, "\nCreateContact:\n")?;
    let created = service
        .create_contact(&plan.new_contact)
        .context("creating contact")?;
    writeln!(out, "{}", render::created_line(&created))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use contacts_core::{ApiError, ClientConfig, HttpRequest, HttpResponse};

    use super::*;

    struct Scripted(Mutex<VecDeque<HttpResponse>>);

    impl Transport for Scripted {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.0
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| ApiError::Transport("script exhausted".to_string()))
        }
    }

    fn json(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.as_bytes().to_vec(),
        }
    }

    fn service(responses: Vec<HttpResponse>) -> ContactsService<Scripted> {
        ContactsService::with_transport(
            &ClientConfig::new("http://contacts.test"),
            Scripted(Mutex::new(responses.into())),
        )
    }

    fn plan(id: i64) -> Plan {
        Plan {
            id,
            new_contact: ContactCreationRequest::new("Jane", "Roe", "jroe@unknown.com"),
        }
    }

    const JOHN: &str = r#"{"id":1,"firstName":"John","lastName":"Doe","email":"jdoe@unknown.com"}"#;

    #[test]
    fn renders_every_section() {
        let svc = service(vec![
            json(200, &format!("[{JOHN}]")),
            json(200, JOHN),
            json(201, r#"{"id":2,"firstName":"Jane","lastName":"Roe","email":"jroe@unknown.com"}"#),
        ]);
        let mut out = Vec::new();
        run(&svc, &plan(1), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "GetContacts:\n\n1 John Doe jdoe@unknown.com\n\
             \nGetContact:\n\n1 John Doe jdoe@unknown.com\n\
             \nCreateContact:\n\nJane Roe jroe@unknown.com\n"
        );
    }

    #[test]
    fn missing_contact_is_reported_not_failed() {
        let svc = service(vec![
            json(200, "[]"),
            json(404, ""),
            json(201, r#"{"firstName":"Jane","lastName":"Roe","email":"jroe@unknown.com"}"#),
        ]);
        let mut out = Vec::new();
        run(&svc, &plan(999), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Contact with id 999 not found\n"));
        assert!(text.contains("Jane Roe jroe@unknown.com"));
    }

    #[test]
    fn failure_stops_sequence_and_keeps_prior_output() {
        let svc = service(vec![json(200, &format!("[{JOHN}]")), json(500, "boom")]);
        let mut out = Vec::new();
        let err = run(&svc, &plan(1), &mut out).unwrap_err();

        let api = err.downcast_ref::<ApiError>().unwrap();
        assert_eq!(api.status(), Some(500));

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("GetContacts:\n\n1 John Doe jdoe@unknown.com\n"));
        assert!(text.ends_with("\nGetContact:\n\n"));
        assert!(!text.contains("CreateContact"));
    }
}
