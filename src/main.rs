use anyhow::Result;
use clap::Parser;

use backcountry::cli::{Cli, Commands};
use backcountry::commands::{analyze, sweep};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    match &cli.command {
        Commands::Analyze(args) => analyze::run(args),
        Commands::Sweep(args) => sweep::run(args),
    }
}
