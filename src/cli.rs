//! CLI mode implementation
//!
//! Provides the command-line interface for the wavesearch service

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// wavesearch CLI
#[derive(Parser)]
#[command(name = "wavesearch")]
#[command(about = "Weighted fuzzy search over social audio post collections", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP search service
    Serve(ServeArgs),
    /// Run a one-shot query against a snapshot and print the JSON results
    Search(SearchArgs),
}

/// Serve command arguments
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Path to the post snapshot (a JSON array of posts)
    #[arg(short = 'p', long)]
    pub posts: PathBuf,

    /// Address to listen on
    #[arg(short = 'l', long, default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,
}

/// Search command arguments
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Path to the post snapshot (a JSON array of posts)
    #[arg(short = 'p', long)]
    pub posts: PathBuf,

    /// Free-text search term (case-insensitive)
    #[arg(short = 'q', long)]
    pub q: Option<String>,

    /// Comma-separated tag filter
    #[arg(short = 't', long)]
    pub tags: Option<String>,

    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}
