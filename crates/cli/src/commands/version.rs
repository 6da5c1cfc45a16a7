//! version command - Manage bucket versioning
//!
//! Enables, suspends, or reports the versioning state of a bucket. A bucket
//! that has never had versioning configured reports "Unset"; once enabled,
//! versioning can only be suspended, not removed.

use clap::{Args, Subcommand};
use bkt_core::{validate_bucket_name, ObjectStore as _, VersioningState};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Versioning subcommands
#[derive(Subcommand, Debug)]
pub enum VersionCommands {
    /// Enable versioning on a bucket
    Enable(VersionArgs),

    /// Suspend versioning on a bucket
    Suspend(VersionArgs),

    /// Show the versioning state of a bucket
    Status(VersionArgs),
}

/// Target bucket
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Bucket name
    pub bucket: String,
}

#[derive(Debug, Serialize)]
struct VersionOutput {
    bucket: String,
    state: VersioningState,
}

/// Execute a version subcommand
pub async fn execute(cmd: VersionCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (bucket, target_state) = match &cmd {
        VersionCommands::Enable(args) => (&args.bucket, Some(VersioningState::Enabled)),
        VersionCommands::Suspend(args) => (&args.bucket, Some(VersioningState::Suspended)),
        VersionCommands::Status(args) => (&args.bucket, None),
    };

    if let Err(e) = validate_bucket_name(bucket) {
        formatter.error(&e.to_string());
        return ExitCode::UsageError;
    }

    let (client, _region) = match super::connect(None, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match target_state {
        Some(state) => match client.set_versioning(bucket, state).await {
            Ok(()) => {
                if formatter.is_json() {
                    formatter.json(&VersionOutput {
                        bucket: bucket.clone(),
                        state,
                    });
                } else {
                    formatter.success(&format!("Versioning on '{bucket}' is now {state}."));
                }
                ExitCode::Success
            }
            Err(e) => {
                formatter.error(&format!("Failed to update versioning on '{bucket}': {e}"));
                ExitCode::from_error(&e)
            }
        },
        None => match client.get_versioning(bucket).await {
            Ok(state) => {
                if formatter.is_json() {
                    formatter.json(&VersionOutput {
                        bucket: bucket.clone(),
                        state,
                    });
                } else {
                    formatter.println(&format!("{bucket}: {state}"));
                }
                ExitCode::Success
            }
            Err(e) => {
                formatter.error(&format!("Failed to read versioning on '{bucket}': {e}"));
                ExitCode::from_error(&e)
            }
        },
    }
}
