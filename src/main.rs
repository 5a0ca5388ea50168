//! Music Shelf - browse and search a music library from the command line.

use clap::Parser;
use music_shelf::cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr, so listings stay pipeable)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("music_shelf=info".parse()?))
        .init();

    cli::run_command(&args)
}
