//! ls command - List buckets and objects
//!
//! Lists buckets when given no argument, or objects when given a bucket
//! (optionally with a key prefix).

use clap::Args;
use bkt_core::{ops, parse_remote, BucketInfo, ObjectInfo, ObjectStore as _};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List buckets or objects
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Remote reference (bucket[/prefix]); omit to list buckets
    pub path: Option<String>,

    /// List recursively instead of grouping by '/'
    #[arg(short, long)]
    pub recursive: bool,

    /// Summarize output (show totals)
    #[arg(long)]
    pub summarize: bool,
}

#[derive(Debug, Serialize)]
struct BucketListOutput {
    buckets: Vec<BucketInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ObjectListOutput {
    items: Vec<ObjectInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_objects: usize,
    total_size_bytes: i64,
    total_size_human: String,
}

/// Execute the ls command
pub async fn execute(args: LsArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let remote = match &args.path {
        None => None,
        Some(path) => match parse_remote(path) {
            Ok(r) => Some(r),
            Err(e) => {
                formatter.error(&e.to_string());
                return ExitCode::UsageError;
            }
        },
    };

    let (client, _region) = match super::connect(None, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match remote {
        None => list_buckets(&client, &args, &formatter).await,
        Some(remote) => list_objects(&client, &remote.bucket, &remote.key, &args, &formatter).await,
    }
}

async fn list_buckets(client: &bkt_s3::S3Client, args: &LsArgs, formatter: &Formatter) -> ExitCode {
    match client.list_buckets().await {
        Ok(buckets) => {
            if formatter.is_json() {
                let output = BucketListOutput {
                    total: args.summarize.then_some(buckets.len()),
                    buckets,
                };
                formatter.json(&output);
            } else {
                for bucket in &buckets {
                    formatter.println(&format!("[{}] {}/", format_date(bucket.created), bucket.name));
                }
                if args.summarize {
                    formatter.println(&format!("\nTotal: {} buckets", buckets.len()));
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to list buckets: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

async fn list_objects(
    client: &bkt_s3::S3Client,
    bucket: &str,
    prefix: &str,
    args: &LsArgs,
    formatter: &Formatter,
) -> ExitCode {
    let prefix = if prefix.is_empty() {
        None
    } else {
        Some(prefix.to_string())
    };
    let delimiter = (!args.recursive).then(|| "/".to_string());

    let items = match ops::list_all_objects(client, bucket, prefix, delimiter).await {
        Ok(items) => items,
        Err(e) => {
            formatter.error(&format!("Failed to list objects: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let total_objects = items.iter().filter(|i| !i.is_prefix).count();
    let total_size: i64 = items.iter().filter_map(|i| i.size_bytes).sum();

    if formatter.is_json() {
        let output = ObjectListOutput {
            items,
            summary: args.summarize.then(|| Summary {
                total_objects,
                total_size_bytes: total_size,
                total_size_human: humansize::format_size(total_size as u64, humansize::BINARY),
            }),
        };
        formatter.json(&output);
    } else {
        for item in &items {
            if item.is_prefix {
                formatter.println(&format!("[{}]     0B {}", format_date(None), item.key));
            } else {
                let size = item.size_human.clone().unwrap_or_else(|| "0 B".to_string());
                formatter.println(&format!(
                    "[{}] {:>6} {}",
                    format_date(item.last_modified),
                    size,
                    item.key
                ));
            }
        }

        if args.summarize {
            formatter.println(&format!(
                "\nTotal: {} objects, {}",
                total_objects,
                humansize::format_size(total_size as u64, humansize::BINARY)
            ));
        }
    }

    ExitCode::Success
}

fn format_date(ts: Option<jiff::Timestamp>) -> String {
    ts.map(|t| t.strftime("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| " ".repeat(19))
}
