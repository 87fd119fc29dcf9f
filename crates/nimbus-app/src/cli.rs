use clap::Parser;

/// Nimbus — a minimal split-view desktop browser shell.
#[derive(Parser, Debug)]
#[command(name = "nimbus", version, about)]
pub struct Args {
    /// Address to open at startup instead of the homepage.
    #[arg(long)]
    pub url: Option<String>,

    /// Open the startup tab in a throwaway (incognito) partition.
    #[arg(long)]
    pub incognito: bool,

    /// Restore the previous session's tabs regardless of settings.
    #[arg(long)]
    pub restore: bool,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
