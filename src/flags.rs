use std::path::PathBuf;

use clap::Parser;

/// capillary - a small line-oriented command interpreter
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "capillary", version, about)]
pub struct Flags {
    /// Run COMMAND and exit
    #[arg(short = 'c', value_name = "COMMAND")]
    pub command: Option<String>,

    /// Suppress informational output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Read startup settings from FILE instead of ~/.capillaryrc
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip the startup rc file
    #[arg(long)]
    pub norc: bool,

    /// Script to run instead of reading standard input
    pub script: Option<PathBuf>,
}
