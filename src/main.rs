use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flickr_search::cli::{Cli, Commands};
use flickr_search::config::Config;
use flickr_search::domain::ViewState;
use flickr_search::errors::{SearchError, SearchResult};
use flickr_search::presentation::{render_state, PhotoDetail};
use flickr_search::services::SearchController;
use flickr_search::sources::FlickrFeedSource;

/// Extra wait after the debounce delay before deciding input has settled
const SETTLE_GRACE: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flickr_search=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> SearchResult<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Search { tag, detail, json } => cmd_search(&tag, detail, json, &config).await,
        Commands::Interactive => cmd_interactive(&config).await,
    }
}

async fn cmd_search(
    tag: &str,
    detail: Option<usize>,
    json: bool,
    config: &Config,
) -> SearchResult<ExitCode> {
    let source = FlickrFeedSource::new(config);

    if !json {
        println!("Searching for \"{}\"...\n", tag);
    }

    let state = SearchController::evaluate_once(&source, tag).await;

    if let ViewState::Error(message) = &state {
        eprintln!("Error: {}", message);
        return Ok(ExitCode::FAILURE);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(state.items())?);
        return Ok(ExitCode::SUCCESS);
    }

    match detail {
        Some(index) if matches!(state, ViewState::Success(_)) => {
            let items = state.items();
            if index == 0 || index > items.len() {
                return Err(SearchError::InvalidInput(format!(
                    "Result number out of range (1-{})",
                    items.len()
                )));
            }
            println!("{}", PhotoDetail::from_item(&items[index - 1]).format());
        }
        _ => println!("{}", render_state(&state)),
    }

    Ok(ExitCode::SUCCESS)
}

async fn cmd_interactive(config: &Config) -> SearchResult<ExitCode> {
    let controller = SearchController::new(FlickrFeedSource::new(config), config.debounce);
    let mut states = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n", render_state(&controller.current_state()));

    let mut input_open = true;
    let mut settle_at: Option<Instant> = None;
    let mut settled = false;

    loop {
        let settle_deadline = settle_at;

        tokio::select! {
            line = lines.next_line(), if input_open => match line? {
                Some(line) => match line.trim() {
                    ":quit" | ":q" => return Ok(ExitCode::SUCCESS),
                    ":retry" => controller.retry(),
                    _ => controller.set_query(line.as_str()),
                },
                None => {
                    // End of input: let the last query run to completion
                    input_open = false;
                    settle_at = Some(Instant::now() + config.debounce + SETTLE_GRACE);
                }
            },
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                println!("{}\n", render_state(&state));

                let past_deadline = settled || settle_deadline.is_some_and(|d| Instant::now() >= d);
                if !input_open && past_deadline && !state.is_loading() {
                    break;
                }
            }
            _ = wait_until(settle_deadline) => {
                settle_at = None;
                settled = true;
                if !controller.current_state().is_loading() {
                    break;
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
