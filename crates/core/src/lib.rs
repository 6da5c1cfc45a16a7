//! bkt-core: Core library for the bkt S3 bucket management CLI
//!
//! This crate provides the core functionality for the bkt CLI, including:
//! - Bucket handles (name + region pairs)
//! - Remote reference parsing and bucket name validation
//! - Configuration management
//! - The ObjectStore trait abstracting the storage provider
//! - Bucket-level operations (upload, download, purge) over that trait
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod config;
pub mod error;
pub mod handle;
pub mod ops;
pub mod remote;
pub mod traits;

pub use config::{Config, ConfigManager, StaticCredentials};
pub use error::{Error, Result};
pub use handle::{BucketHandle, DEFAULT_REGION};
pub use ops::{download_file, list_all_objects, purge_bucket, upload_file, PurgeSummary};
pub use remote::{parse_remote, validate_bucket_name, RemoteRef};
pub use traits::{
    BucketInfo, ListOptions, ListPage, ObjectInfo, ObjectStore, ObjectVersion, PutOptions,
    VersioningState,
};
