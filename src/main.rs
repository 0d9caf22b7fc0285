//! Restriction Scan - Restriction Enzyme Site Finder
//!
//! Prints the restriction enzymes that bind a DNA strand, one per line,
//! sorted by name. The strand comes from the first argument or, when
//! absent, from an interactive prompt.

use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod cli;

use cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::run(&args)
}
