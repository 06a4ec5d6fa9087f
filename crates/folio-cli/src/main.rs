//! folio: command-line front end for the portfolio content backend
//!
//! Renders any site route as JSON, resolves media references against the
//! configured backend, and submits contact inquiries.

use clap::{Parser, Subcommand};
use tracing::info;

use folio_client::{
    load_page, ContactClient, ContactConfig, ContactForm, ContentClient, ContentConfig,
    InquirySubject, Route, SubmissionState, SubmissionTracker,
};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Query the portfolio content backend")]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "FOLIO_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "FOLIO_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log level for folio crates
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a page and print its state as JSON
    Page {
        /// Site path, e.g. `/art-archive/ethereal-descent`
        path: String,

        /// Archive category (same as `?category=` on `/art-archive`)
        #[arg(long)]
        category: Option<String>,
    },

    /// Resolve a media reference to an absolute URL
    Media {
        /// Relative upload path or absolute URL
        reference: String,
    },

    /// Submit a contact inquiry
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// exhibition, commission, press or other (labels accepted too)
        #[arg(long, default_value = "Exhibition Inquiry")]
        subject: String,

        #[arg(long)]
        message: String,

        /// Inbox endpoint
        #[arg(long, env = "FOLIO_CONTACT_ENDPOINT")]
        endpoint: Option<String>,
    },
}

/// Flags and their env fallbacks arrive through clap; blank means unset.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn content_config(
    api_url: Option<&str>,
    timeout_secs: Option<u64>,
) -> anyhow::Result<ContentConfig> {
    let config = match non_blank(api_url) {
        Some(url) => ContentConfig::new(url)?,
        None => ContentConfig::default(),
    };
    Ok(match timeout_secs {
        Some(secs) => config.with_timeout_secs(secs),
        None => config,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "folio={0},folio_client={0},folio_content={0},warn",
                    cli.log_level
                ))
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ContentConfig::init_global(content_config(
        cli.api_url.as_deref(),
        cli.timeout_secs,
    )?)?;
    info!("Content backend: {}", config.base_url());

    match cli.command {
        Commands::Page { path, category } => {
            let route = match (Route::parse(&path), category) {
                (Route::Archive { .. }, Some(category)) => Route::Archive {
                    category: Some(category),
                },
                (route, _) => route,
            };

            let client = ContentClient::from_global()?;
            let state = load_page(&client, &route).await;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::Media { reference } => match config.media().resolve(Some(&reference)) {
            Some(url) => println!("{}", url),
            None => anyhow::bail!("empty media reference"),
        },
        Commands::Contact {
            name,
            email,
            subject,
            message,
            endpoint,
        } => {
            let contact = ContactConfig {
                endpoint: non_blank(endpoint.as_deref()),
            };
            let client = ContactClient::new(&contact)?;
            let form = ContactForm {
                name,
                email,
                subject: subject.parse::<InquirySubject>()?,
                message,
            };

            let tracker = SubmissionTracker::new();
            let state = tracker.submit(&client, &form).await;
            println!("{}", serde_json::to_string_pretty(&state)?);
            if let SubmissionState::Failed(reason) = state {
                anyhow::bail!("inquiry not sent: {}", reason);
            }
        }
    }

    Ok(())
}
