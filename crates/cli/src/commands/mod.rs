//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.
//! Each command parses its own remote references, builds a client through
//! [`connect`], and reports through the shared [`Formatter`].

use clap::{Parser, Subcommand};

use bkt_core::ConfigManager;
use bkt_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod get;
mod ls;
mod mb;
mod put;
mod rb;
mod rm;
mod version;

/// bkt - S3 bucket management CLI
///
/// Creates and deletes buckets, uploads and downloads objects, lists
/// buckets and objects, and toggles per-bucket versioning on AWS S3 and
/// S3-compatible backends.
#[derive(Parser, Debug)]
#[command(name = "bkt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List buckets or objects
    Ls(ls::LsArgs),

    /// Create a bucket
    Mb(mb::MbArgs),

    /// Remove a bucket
    Rb(rb::RbArgs),

    /// Upload a file as an object
    Put(put::PutArgs),

    /// Download an object to a file
    Get(get::GetArgs),

    /// Remove an object
    Rm(rm::RmArgs),

    /// Manage bucket versioning
    #[command(subcommand)]
    Version(version::VersionCommands),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Ls(args) => ls::execute(args, output_config).await,
        Commands::Mb(args) => mb::execute(args, output_config).await,
        Commands::Rb(args) => rb::execute(args, output_config).await,
        Commands::Put(args) => put::execute(args, output_config).await,
        Commands::Get(args) => get::execute(args, output_config).await,
        Commands::Rm(args) => rm::execute(args, output_config).await,
        Commands::Version(cmd) => version::execute(cmd, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Load configuration and build an S3 client.
///
/// `region` overrides the configured default region. Errors are reported
/// through the formatter and returned as the exit code to use.
pub(crate) async fn connect(
    region: Option<&str>,
    formatter: &Formatter,
) -> Result<(S3Client, String), ExitCode> {
    let config = match ConfigManager::new().and_then(|m| m.load()) {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return Err(ExitCode::from_error(&e));
        }
    };

    let region = region
        .map(str::to_string)
        .unwrap_or_else(|| config.defaults.region.clone());

    match S3Client::new(&config, &region).await {
        Ok(client) => Ok((client, region)),
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            Err(ExitCode::from_error(&e))
        }
    }
}
