use clap::{Parser, Subcommand};
use openwords::page::{PageView, QueryPage};
use openwords::utils::{init_file_logger, init_stderr_logger};
use openwords::{Config, SearchClient};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "openwords", version, about = "Search transcripts & jump to timestamps")]
struct Cli {
    /// Root URL of the search service (overrides OPENWORDS_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Maximum number of results to request (1-50)
    #[arg(long, global = true)]
    top_k: Option<u32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive search page (default)
    Tui,
    /// Run one search and print the response as JSON
    Search {
        /// Text to search for; may be empty
        query: String,
    },
    /// Check that the search service is up
    Health,
    /// Queue a media URL for transcription and indexing
    Ingest {
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::from_env()?.with_overrides(cli.api_base, cli.top_k)?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let _guard = init_file_logger(&config.logging.dir)?;
            openwords::tui::run(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Search { query } => {
            init_stderr_logger();
            let client = SearchClient::from_config(&config)?;

            let mut page = QueryPage::new();
            page.set_query(query);
            let found = matches!(page.run_cycle(&client).await, PageView::Results(_));
            if found {
                println!("{}", page.display_text());
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{}", page.display_text());
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Health => {
            init_stderr_logger();
            let client = SearchClient::from_config(&config)?;
            match client.health().await {
                Ok(status) => {
                    println!("{}", serde_json::to_string_pretty(&status)?);
                    Ok(if status.ok {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::FAILURE
                    })
                }
                Err(e) => {
                    error!("Health check failed: {}", e);
                    eprintln!("{}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Ingest { url } => {
            init_stderr_logger();
            let client = SearchClient::from_config(&config)?;
            match client.ingest_url(&url).await {
                Ok(job) => {
                    info!("Ingest job {} queued", job.job_id);
                    println!("{}", serde_json::to_string_pretty(&job)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
