//! get command - Download an object
//!
//! Downloads an object to a local path. When the path is an existing
//! directory (or ends with a separator) the object's file name is appended.

use std::path::PathBuf;

use clap::Args;
use bkt_core::{ops, parse_remote, BucketHandle};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Download an object to a file
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Source reference (bucket/key)
    pub source: String,

    /// Local path to write to
    pub path: String,
}

#[derive(Debug, Serialize)]
struct GetOutput {
    status: &'static str,
    source: String,
    target: String,
    size_bytes: u64,
    size_human: String,
}

/// Execute the get command
pub async fn execute(args: GetArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let remote = match parse_remote(&args.source) {
        Ok(r) => r,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    if remote.is_bucket() {
        formatter.error("Source must name an object: bucket/key");
        return ExitCode::UsageError;
    }

    let target = resolve_target(&args.path, &remote.key);

    let (client, region) = match super::connect(None, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let handle = BucketHandle::new(&remote.bucket, Some(region));

    match ops::download_file(&client, &handle, &remote.key, &target).await {
        Ok(size) => {
            let target_display = target.display().to_string();
            if formatter.is_json() {
                let output = GetOutput {
                    status: "success",
                    source: remote.to_string(),
                    target: target_display,
                    size_bytes: size,
                    size_human: humansize::format_size(size, humansize::BINARY),
                };
                formatter.json(&output);
            } else {
                formatter.println(&format!(
                    "{remote} -> {target_display} ({})",
                    humansize::format_size(size, humansize::BINARY)
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to download {remote}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

/// Append the object's file name when the target is a directory
fn resolve_target(path: &str, key: &str) -> PathBuf {
    let target = PathBuf::from(path);
    if target.is_dir() || path.ends_with(std::path::MAIN_SEPARATOR) {
        let file_name = key.rsplit('/').next().unwrap_or(key);
        target.join(file_name)
    } else {
        target
    }
}
