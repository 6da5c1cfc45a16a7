//! put command - Upload a file
//!
//! Uploads a local file to a bucket. The object key defaults to the local
//! file name when the target names only a bucket.

use std::path::Path;

use clap::Args;
use bkt_core::{ops, parse_remote, BucketHandle, PutOptions};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Upload a file as an object
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload
    pub file: String,

    /// Target reference (bucket[/key]; key defaults to the file name)
    pub target: String,

    /// Canned ACL to apply, forwarded to the provider (e.g. "public-read")
    #[arg(long)]
    pub acl: Option<String>,

    /// Content type (guessed from the file name when omitted)
    #[arg(long)]
    pub content_type: Option<String>,

    /// Region override for this operation
    #[arg(long)]
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    status: &'static str,
    source: String,
    target: String,
    size_bytes: u64,
    size_human: String,
}

/// Execute the put command
pub async fn execute(args: PutArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let remote = match parse_remote(&args.target) {
        Ok(r) => r,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let source = Path::new(&args.file);
    let key = if remote.key.is_empty() {
        match source.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => {
                formatter.error(&format!("Cannot derive object key from '{}'", args.file));
                return ExitCode::UsageError;
            }
        }
    } else {
        remote.key.clone()
    };

    let (client, region) = match super::connect(args.region.as_deref(), &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let handle = BucketHandle::new(&remote.bucket, Some(region));

    let guessed_type: Option<String> = mime_guess::from_path(source)
        .first()
        .map(|m| m.essence_str().to_string());
    let options = PutOptions {
        acl: args.acl.clone(),
        content_type: args.content_type.clone().or(guessed_type),
    };

    let size = std::fs::metadata(source).map(|m| m.len()).unwrap_or(0);

    if ops::upload_file(&client, &handle, source, Some(&key), options).await {
        let target = format!("{}/{key}", remote.bucket);
        if formatter.is_json() {
            let output = PutOutput {
                status: "success",
                source: args.file.clone(),
                target,
                size_bytes: size,
                size_human: humansize::format_size(size, humansize::BINARY),
            };
            formatter.json(&output);
        } else {
            formatter.println(&format!(
                "{} -> {target} ({})",
                args.file,
                humansize::format_size(size, humansize::BINARY)
            ));
        }
        ExitCode::Success
    } else {
        // the cause was already logged by the operations layer
        formatter.error(&format!("Failed to upload '{}'", args.file));
        ExitCode::GeneralError
    }
}
