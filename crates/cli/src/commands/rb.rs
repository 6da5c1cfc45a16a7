//! rb command - Remove bucket
//!
//! Removes a bucket. With --force the bucket is emptied first: all object
//! versions and delete markers (when versioning is or was enabled), then all
//! remaining objects, then the bucket itself.

use clap::Args;
use bkt_core::{ops, validate_bucket_name, BucketHandle, Error, ObjectStore as _};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Remove a bucket
#[derive(Args, Debug)]
pub struct RbArgs {
    /// Bucket name
    pub bucket: String,

    /// Delete all object versions and objects before removing the bucket
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct RbOutput {
    status: &'static str,
    bucket: String,
    objects_deleted: usize,
    versions_deleted: usize,
}

/// Execute the rb command
pub async fn execute(args: RbArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if let Err(e) = validate_bucket_name(&args.bucket) {
        formatter.error(&e.to_string());
        return ExitCode::UsageError;
    }

    let (client, region) = match super::connect(None, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let handle = BucketHandle::new(&args.bucket, Some(region));

    match client.bucket_exists(handle.name()).await {
        Ok(false) => {
            formatter.error(&format!("Bucket '{}' does not exist", handle.name()));
            return ExitCode::NotFound;
        }
        Ok(true) => {}
        Err(e) => {
            formatter.error(&format!("Failed to check bucket existence: {e}"));
            return ExitCode::from_error(&e);
        }
    }

    if args.force {
        return remove_with_purge(&client, &handle, &formatter).await;
    }

    match client.delete_bucket(handle.name()).await {
        Ok(()) => {
            report_removed(&formatter, &handle, ops::PurgeSummary::default());
            ExitCode::Success
        }
        Err(Error::Conflict(_)) => {
            formatter.error(&format!(
                "Bucket '{}' is not empty. Use --force to delete all objects first.",
                handle.name()
            ));
            ExitCode::Conflict
        }
        Err(e) => {
            formatter.error(&format!("Failed to remove bucket: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

async fn remove_with_purge(
    client: &bkt_s3::S3Client,
    handle: &BucketHandle,
    formatter: &Formatter,
) -> ExitCode {
    match ops::purge_bucket(client, handle).await {
        Ok(summary) => {
            report_removed(formatter, handle, summary);
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to remove bucket: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

fn report_removed(formatter: &Formatter, handle: &BucketHandle, summary: ops::PurgeSummary) {
    if formatter.is_json() {
        let output = RbOutput {
            status: "success",
            bucket: handle.name().to_string(),
            objects_deleted: summary.objects_deleted,
            versions_deleted: summary.versions_deleted,
        };
        formatter.json(&output);
    } else if summary.objects_deleted > 0 || summary.versions_deleted > 0 {
        formatter.success(&format!(
            "Bucket '{}' removed ({} objects, {} versions deleted).",
            handle.name(),
            summary.objects_deleted,
            summary.versions_deleted
        ));
    } else {
        formatter.success(&format!("Bucket '{}' removed.", handle.name()));
    }
}
