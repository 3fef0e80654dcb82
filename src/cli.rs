use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photoforge")]
#[command(author, version, about = "Batch image enhancement for cloud storage folders")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enhance every image in the source folder into the target folder
    Run {
        /// Source folder id (overrides config)
        #[arg(long)]
        source_folder: Option<String>,

        /// Target folder id (overrides config)
        #[arg(long)]
        target_folder: Option<String>,

        /// Show what would be processed without fetching or uploading
        #[arg(long)]
        dry_run: bool,
    },

    /// List eligible images in the source folder
    List {
        /// Source folder id (overrides config)
        #[arg(long)]
        source_folder: Option<String>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
