mod extract;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use facip_scholar::ScholarClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "facip-cli")]
#[command(about = "Faculty IP tracking command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch scholar profile pages and print one JSON record per URL
    Extract {
        /// Profile page URLs, printed back in the same order
        #[arg(required = true)]
        urls: Vec<String>,

        /// Per-request timeout; defaults to `FACIP_SCHOLAR_TIMEOUT_SECS`
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,

        /// User-Agent header; defaults to `FACIP_SCHOLAR_USER_AGENT`
        #[arg(long)]
        user_agent: Option<String>,

        /// Maximum number of pages fetched at once
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
        concurrency: u16,

        #[arg(long)]
        pretty: bool,
    },
    /// Run the profile parser over a saved HTML page (no network)
    Parse {
        file: PathBuf,

        /// URL to record as the page's source; defaults to the file path
        #[arg(long)]
        source_url: Option<String>,

        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = std::env::var("FACIP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Extract {
            urls,
            timeout_secs,
            user_agent,
            concurrency,
            pretty,
        } => {
            let mut overrides = Vec::new();
            if let Some(secs) = timeout_secs {
                overrides.push(("FACIP_SCHOLAR_TIMEOUT_SECS", secs.to_string()));
            }
            if let Some(agent) = user_agent {
                overrides.push(("FACIP_SCHOLAR_USER_AGENT", agent));
            }
            let config = facip_core::load_app_config_with_overrides(&overrides)?;
            let client = ScholarClient::from_settings(&config.scholar)?;
            extract::run_extract(&client, &urls, usize::from(concurrency), pretty).await?;
        }
        Commands::Parse {
            file,
            source_url,
            pretty,
        } => {
            let record = extract::parse_saved_page(&file, source_url.as_deref())?;
            println!("{}", extract::render(&record, pretty)?);
        }
    }

    Ok(())
}
