use std::path::PathBuf;

use clap::Parser;

/// musicbox: a desktop shell for Apple Music.
#[derive(Parser, Debug)]
#[command(name = "musicbox", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. `debug`, `musicbox=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Start page override for the content surface.
    #[arg(long)]
    pub url: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
