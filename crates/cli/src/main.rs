//! bkt - S3 bucket management CLI
//!
//! A command-line interface for creating, listing, and deleting buckets and
//! objects on AWS S3 and other S3-compatible backends.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bkt_cli::commands::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so --json output on stdout stays parseable
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
