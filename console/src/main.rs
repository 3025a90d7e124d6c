//! Console client for the Contacts API.
//!
//! Lists contacts, fetches one by id and creates a new one, printing each
//! result to stdout. Logs go to stderr, filtered by `RUST_LOG`.

mod render;
mod sequence;

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use contacts_core::{
    ClientConfig, ContactCreationRequest, ContactsService, MediaRange, DEFAULT_BASE_URL,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Console client for the Contacts API")]
struct Args {
    /// Base address of the Contacts API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Accepted media range, e.g. `application/xml;q=0.8` (repeatable)
    #[arg(long = "accept")]
    accept: Vec<MediaRange>,

    /// Id of the contact to fetch
    #[arg(long, default_value_t = 1)]
    id: i64,

    /// First name of the contact to create
    #[arg(long, default_value = "David")]
    first_name: String,

    /// Last name of the contact to create
    #[arg(long, default_value = "Dee")]
    last_name: String,

    /// Email of the contact to create
    #[arg(long, default_value = "ddee@unknown.com")]
    email: String,
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if self.accept.is_empty() {
            config
        } else {
            config.with_accept(self.accept.clone())
        }
    }

    fn plan(&self) -> sequence::Plan {
        sequence::Plan {
            id: self.id,
            new_contact: ContactCreationRequest::new(
                self.first_name.as_str(),
                self.last_name.as_str(),
                self.email.as_str(),
            ),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contacts_core=info,contacts_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = args.client_config();
    info!(base_url = %config.base_url, timeout = ?config.timeout, "starting contacts client");

    let service = ContactsService::new(&config);
    match sequence::run(&service, &args.plan(), &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("contacts sequence aborted: {e:#}");
            ExitCode::FAILURE
        }
    }
}
