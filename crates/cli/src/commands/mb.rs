//! mb command - Make bucket
//!
//! Creates a new bucket in the configured or requested region.

use clap::Args;
use bkt_core::{validate_bucket_name, BucketHandle, Error, ObjectStore as _};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Create a bucket
#[derive(Args, Debug)]
pub struct MbArgs {
    /// Bucket name
    pub bucket: String,

    /// Region to create the bucket in (overrides the configured default)
    #[arg(long)]
    pub region: Option<String>,

    /// Ignore error if bucket already exists
    #[arg(short = 'p', long)]
    pub ignore_existing: bool,
}

#[derive(Debug, Serialize)]
struct MbOutput {
    status: &'static str,
    bucket: String,
    region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Execute the mb command
pub async fn execute(args: MbArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if let Err(e) = validate_bucket_name(&args.bucket) {
        formatter.error(&e.to_string());
        return ExitCode::UsageError;
    }

    let (client, region) = match super::connect(args.region.as_deref(), &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let handle = BucketHandle::new(&args.bucket, Some(region));

    // Short-circuit when the caller tolerates an existing bucket
    if args.ignore_existing {
        match client.bucket_exists(handle.name()).await {
            Ok(true) => {
                report_success(&formatter, &handle, Some("Bucket already exists"));
                return ExitCode::Success;
            }
            Ok(false) => {}
            Err(e) => {
                formatter.error(&format!("Failed to check bucket existence: {e}"));
                return ExitCode::from_error(&e);
            }
        }
    }

    match client.create_bucket(&handle).await {
        Ok(()) => {
            report_success(&formatter, &handle, None);
            ExitCode::Success
        }
        Err(Error::BucketCreate { message, code })
            if code == "BucketAlreadyExists" || code == "BucketAlreadyOwnedByYou" =>
        {
            if args.ignore_existing {
                report_success(&formatter, &handle, Some("Bucket already exists"));
                ExitCode::Success
            } else {
                formatter.error(&format!(
                    "Bucket '{}' already exists [{code}]: {message}",
                    handle.name()
                ));
                ExitCode::Conflict
            }
        }
        Err(e) => {
            formatter.error(&format!("Failed to create bucket: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

fn report_success(formatter: &Formatter, handle: &BucketHandle, message: Option<&str>) {
    if formatter.is_json() {
        let output = MbOutput {
            status: "success",
            bucket: handle.name().to_string(),
            region: handle.region().to_string(),
            message: message.map(String::from),
        };
        formatter.json(&output);
    } else {
        match message {
            Some(m) => formatter.success(&format!("Bucket '{}': {m}.", handle.name())),
            None => formatter.success(&format!(
                "Bucket '{}' created in {}.",
                handle.name(),
                handle.region()
            )),
        }
    }
}
