use std::env;
use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dashboard::{Dashboard, PendingRequest, RecordingMap, fetch_payload};
use reqwest::Client;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod http;
mod report;

use http::HttpTransport;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Parser, Debug)]
#[command(author, version, about = "Look up current air quality by address or coordinates")]
struct Args {
    /// Lookup API origin (default: $AIRQ_API_BASE, then http://127.0.0.1:5000)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print the decoded payload as JSON instead of the dashboard
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a street address
    Address {
        /// Free-form address text
        text: String,
    },

    /// Look up a latitude/longitude pair
    Coords {
        #[arg(allow_hyphen_values = true)]
        lat: String,
        #[arg(allow_hyphen_values = true)]
        lng: String,
    },

    /// Print the category legend
    Legend,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "airq failed");
            eprintln!("{}", failure_line(&*err));
            ExitCode::FAILURE
        }
    }
}

/// What the user sees on stderr when a command fails.
fn failure_line(err: &dyn Error) -> String {
    format!("error: {err}")
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let base_url = args.base_url.unwrap_or_else(|| {
        env::var("AIRQ_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    });

    let mut dashboard = Dashboard::new(RecordingMap::new());
    let pending = match args.command {
        Command::Legend => {
            println!("{}", report::legend());
            return Ok(());
        }
        Command::Address { text } => dashboard.submit_address(&text)?,
        Command::Coords { lat, lng } => dashboard.submit_coordinates(&lat, &lng)?,
    };

    info!(url = %pending.query.url(&base_url), "looking up");
    let transport = HttpTransport::new(Client::new(), base_url);
    lookup(&mut dashboard, &transport, pending, args.json).await
}

async fn lookup(
    dashboard: &mut Dashboard<RecordingMap>,
    transport: &HttpTransport,
    pending: PendingRequest,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let outcome = fetch_payload(transport, &pending.query, &pending.ticket.token).await;
    let decoded = match &outcome {
        Ok(payload) if json => Some(serde_json::to_string_pretty(payload)?),
        _ => None,
    };
    dashboard.complete(&pending.ticket, outcome);

    if !dashboard.status().is_ok() {
        return Err(dashboard.banner().text().into());
    }

    match decoded {
        Some(text) => println!("{text}"),
        None => print!("{}", report::render(dashboard)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::failure_line;
    use dashboard::InputError;
    use std::error::Error;

    #[test]
    fn failures_print_their_message_not_debug() {
        let input: Box<dyn Error> = Box::new(InputError::EmptyAddress);
        assert_eq!(
            failure_line(&*input),
            "error: Enter an address before searching."
        );

        let server: Box<dyn Error> = "geocoding failed".into();
        assert_eq!(failure_line(&*server), "error: geocoding failed");
    }
}
