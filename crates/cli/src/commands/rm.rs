//! rm command - Remove an object
//!
//! Deletes a single object from a bucket.

use clap::Args;
use bkt_core::{parse_remote, Error, ObjectStore as _};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Remove an object
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Object reference (bucket/key)
    pub path: String,

    /// Ignore missing objects
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    status: &'static str,
    removed: String,
}

/// Execute the rm command
pub async fn execute(args: RmArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let remote = match parse_remote(&args.path) {
        Ok(r) => r,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    if remote.is_bucket() {
        formatter.error("Reference must name an object: bucket/key (use rb for buckets)");
        return ExitCode::UsageError;
    }

    let (client, _region) = match super::connect(None, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.delete_object(&remote.bucket, &remote.key).await {
        Ok(()) => {
            if formatter.is_json() {
                let output = RmOutput {
                    status: "success",
                    removed: remote.to_string(),
                };
                formatter.json(&output);
            } else {
                formatter.println(&format!("Removed: {remote}"));
            }
            ExitCode::Success
        }
        Err(Error::NotFound(_)) if args.force => ExitCode::Success,
        Err(e) => {
            formatter.error(&format!("Failed to remove {remote}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
