//! wavesearch service & CLI
//!
//! Dual-mode application:
//! - `serve`: HTTP search service over a post snapshot
//! - `search`: one-shot query against a snapshot, printed as a JSON array
//!
//! Both modes rank posts with the same weighted fuzzy search engine.

mod cli;
mod error;
mod posts;
mod search;
mod server;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use posts::SnapshotProvider;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    match cli.command {
        Some(Commands::Serve(args)) => run_serve(args).await,
        Some(Commands::Search(args)) => match run_search_cli(args).await {
            Ok(output) => {
                println!("{}", output);
                Ok(())
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(get_exit_code(&e));
            }
        },
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Run the HTTP service
async fn run_serve(args: cli::ServeArgs) -> Result<()> {
    info!("Starting wavesearch HTTP service");

    let provider = SnapshotProvider::new(args.posts);
    server::serve(provider, args.listen).await
}

/// Execute a one-shot search in CLI mode
async fn run_search_cli(args: cli::SearchArgs) -> Result<String> {
    use tokio::time::{timeout, Duration};

    let provider = SnapshotProvider::new(&args.posts);
    let params = server::SearchParams {
        q: args.q,
        tags: args.tags,
        limit: args.limit,
    };

    let result = timeout(Duration::from_secs(30), server::execute_search(&provider, &params)).await;

    match result {
        Ok(Ok(matches)) => Ok(serde_json::to_string_pretty(&matches)?),
        Ok(Err(e)) => Err(anyhow::anyhow!(e.message())),
        Err(_) => Err(anyhow::anyhow!("Request exceeded 30 second timeout")),
    }
}

/// Map error classes to exit codes
fn get_exit_code(err: &anyhow::Error) -> i32 {
    let err_str = err.to_string().to_lowercase();

    if err_str.contains("invalid query") {
        1 // Caller supplied no usable criteria
    } else if err_str.contains("malformed") {
        2 // Snapshot data is bad
    } else if err_str.contains("timeout") {
        3 // Request budget exceeded
    } else {
        4 // Other application errors
    }
}
