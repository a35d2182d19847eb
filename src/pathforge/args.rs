use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pathforge")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " ", env!("GIT_HASH")))]
#[command(about = "Organize training content into pathways and edit them with plain instructions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory for the session snapshot (defaults to the user data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a generated pathway JSON as the current pathway
    #[command(alias = "i")]
    Import {
        /// Path to a pathway document or generation-run JSON
        file: PathBuf,
    },

    /// Chunk text files into pending training modules
    Ingest {
        /// Files of extracted document text
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Create a generic context-only module when nothing is extractable
        #[arg(long)]
        fallback: bool,
    },

    /// Run one chat instruction against the session
    #[command(alias = "a")]
    Apply {
        /// e.g. "update pathway 1 section 2 with the new file"
        instruction: String,
    },

    /// Rank modules of the current pathway against a query
    #[command(alias = "s")]
    Search {
        /// Query words
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Show the reference guide of addressable pathways/sections/modules
    #[command(alias = "ls")]
    List,

    /// Set the training context used when chunking documents
    Context {
        #[arg(long)]
        training_type: Option<String>,

        #[arg(long)]
        audience: Option<String>,

        #[arg(long)]
        industry: Option<String>,

        #[arg(long)]
        goals: Option<String>,
    },

    /// Drop ingested modules that were never placed
    ClearPending,
}
