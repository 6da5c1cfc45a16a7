//! ObjectStore trait definition
//!
//! This trait defines the capability interface for the remote object-storage
//! provider: bucket lifecycle, object operations, and per-bucket versioning
//! state. It decouples the rest of the workspace from the concrete S3 SDK and
//! is mocked in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::handle::BucketHandle;

/// Metadata for a bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<jiff::Timestamp>,
}

/// Metadata for an object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes (None for prefix entries)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,

    /// Human-readable size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_human: Option<String>,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Whether this entry is a common prefix rather than an object
    pub is_prefix: bool,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for an object
    pub fn object(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: Some(size),
            size_human: Some(humansize::format_size(size as u64, humansize::BINARY)),
            last_modified: None,
            etag: None,
            is_prefix: false,
        }
    }

    /// Create a new ObjectInfo for a common prefix
    pub fn prefix(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size_bytes: None,
            size_human: None,
            last_modified: None,
            etag: None,
            is_prefix: true,
        }
    }
}

/// One page of a list operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage {
    /// Listed entries
    pub items: Vec<ObjectInfo>,

    /// Whether more entries are available
    pub truncated: bool,

    /// Continuation token for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

/// Options for list operations
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Prefix to filter by
    pub prefix: Option<String>,

    /// Delimiter for grouping into common prefixes (None lists flat)
    pub delimiter: Option<String>,

    /// Maximum number of keys to return per request
    pub max_keys: Option<i32>,

    /// Continuation token for pagination
    pub continuation_token: Option<String>,
}

/// Per-bucket versioning state as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersioningState {
    /// Versioning is active
    Enabled,
    /// Versioning was active and has been suspended
    Suspended,
    /// Versioning has never been configured on the bucket
    Unset,
}

impl VersioningState {
    /// Whether versioning is or was ever configured.
    ///
    /// A bucket in this state may hold noncurrent object versions and delete
    /// markers that survive a plain object delete.
    pub fn is_configured(self) -> bool {
        matches!(self, Self::Enabled | Self::Suspended)
    }
}

impl std::fmt::Display for VersioningState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Enabled => "Enabled",
            Self::Suspended => "Suspended",
            Self::Unset => "Unset",
        };
        write!(f, "{s}")
    }
}

/// A single object version or delete marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectVersion {
    /// Object key
    pub key: String,

    /// Provider-assigned version id
    pub version_id: String,

    /// Whether this version is a delete marker
    pub is_delete_marker: bool,
}

/// Pass-through options for object uploads
///
/// Recognized values are provider-defined and not validated locally.
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    /// Canned ACL to apply (e.g. "public-read")
    pub acl: Option<String>,

    /// Content type of the object
    pub content_type: Option<String>,
}

/// Capability interface of the remote object-storage provider
///
/// Implemented by the S3 adapter; mocked with mockall for the operations
/// layer tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List buckets visible to the caller's credentials
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// List one page of objects in a bucket
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListPage>;

    /// Check if a bucket exists
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Create the bucket named by the handle, in the handle's region
    async fn create_bucket(&self, handle: &BucketHandle) -> Result<()>;

    /// Delete a bucket (must already be empty)
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;

    /// Upload object content
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        options: PutOptions,
    ) -> Result<ObjectInfo>;

    /// Get object content as bytes
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Delete a single object
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// Delete a batch of objects (at most 1000), returning the deleted keys
    async fn delete_objects(&self, bucket: &str, keys: Vec<String>) -> Result<Vec<String>>;

    /// Read the bucket's versioning state
    async fn get_versioning(&self, bucket: &str) -> Result<VersioningState>;

    /// Enable or suspend versioning on the bucket
    async fn set_versioning(&self, bucket: &str, state: VersioningState) -> Result<()>;

    /// List every object version and delete marker in the bucket
    async fn list_object_versions(&self, bucket: &str) -> Result<Vec<ObjectVersion>>;

    /// Delete a specific object version
    async fn delete_object_version(&self, bucket: &str, key: &str, version_id: &str)
        -> Result<()>;
}
