//! CLI module for ragdoc
//!
//! Provides command-line interface parsing for the ragdoc-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ragdoc - Retrieval-augmented PDF question answering
#[derive(Parser, Debug)]
#[command(
    name = "ragdoc-server",
    version,
    about = "ragdoc - Retrieval-augmented PDF question answering",
    long_about = "Upload a PDF and ask questions about it. The document is chunked, embedded\n\
                  and indexed in memory; answers are generated from the best matching chunks.\n\n\
                  Run without arguments to start the server.",
    after_help = "EXAMPLES:\n    \
                  ragdoc-server                                   # Start the server\n    \
                  ragdoc-server --config my.toml                  # Use a custom config file\n    \
                  ragdoc-server ask -d report.pdf \"Who wrote it?\" # One-shot question\n    \
                  ragdoc-server chunk report.pdf                  # Inspect chunking offline"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "ragdoc.toml", global = true)]
    pub config: PathBuf,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Ingest a PDF and answer one question about it
    Ask {
        /// PDF document to query
        #[arg(short, long)]
        document: PathBuf,

        /// Number of chunks to retrieve (overrides rag.top_k)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// The question
        question: String,
    },

    /// Show how a PDF would be chunked, without calling any provider
    Chunk {
        /// PDF document to inspect
        file: PathBuf,

        /// Print every chunk's text
        #[arg(long)]
        show_text: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
