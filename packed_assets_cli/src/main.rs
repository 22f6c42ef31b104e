//! `packed-assets`: writes Rust source files embedding compressed assets.
//!
//! ```text
//! packed-assets --out src/assets --strip web/ web/templates web/static
//! ```

mod cli;

use std::{env, iter};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    let command = iter::once("packed-assets".to_owned())
        .chain(env::args().skip(1))
        .collect::<Vec<_>>()
        .join(" ");
    cli::run(&cli, &command)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
