//! Bucket-level operations
//!
//! Higher-level operations composed from [`ObjectStore`] calls: file upload
//! and download, full listings, and bucket purging. Everything here is
//! generic over the trait so it can be exercised against a mock store.

use std::path::Path;

use crate::error::{Error, Result};
use crate::handle::BucketHandle;
use crate::traits::{ListOptions, ObjectInfo, ObjectStore, PutOptions};

/// Page size used when listing and batch-deleting objects
const LIST_BATCH: i32 = 1000;

/// Outcome of a bucket purge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeSummary {
    /// Object versions and delete markers removed
    pub versions_deleted: usize,
    /// Current objects removed
    pub objects_deleted: usize,
}

/// Upload a local file to the bucket.
///
/// When `key` is omitted the local file name is reused as the object key.
/// Failures are reported as `false`: an unreadable local path returns
/// without contacting the provider, and a provider rejection is logged and
/// swallowed. Callers that need the cause should use
/// [`ObjectStore::put_object`] directly.
pub async fn upload_file<S: ObjectStore + ?Sized>(
    store: &S,
    handle: &BucketHandle,
    local_path: &Path,
    key: Option<&str>,
    options: PutOptions,
) -> bool {
    let key = match key {
        Some(k) => k.to_string(),
        None => match local_path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => {
                tracing::error!(path = %local_path.display(), "no file name to derive object key from");
                return false;
            }
        },
    };

    let data = match std::fs::read(local_path) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(path = %local_path.display(), error = %e, "failed to read file for upload");
            return false;
        }
    };

    match store.put_object(handle.name(), &key, data, options).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(bucket = handle.name(), key = %key, error = %e, "upload failed");
            false
        }
    }
}

/// Download an object to a local path, creating parent directories.
///
/// Returns the number of bytes written.
pub async fn download_file<S: ObjectStore + ?Sized>(
    store: &S,
    handle: &BucketHandle,
    key: &str,
    local_path: &Path,
) -> Result<u64> {
    let data = store.get_object(handle.name(), key).await?;

    if let Some(parent) = local_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(local_path, &data)?;
    Ok(data.len() as u64)
}

/// List every object in the bucket, following continuation tokens.
///
/// An empty bucket yields an empty vector, not an error.
pub async fn list_all_objects<S: ObjectStore + ?Sized>(
    store: &S,
    bucket: &str,
    prefix: Option<String>,
    delimiter: Option<String>,
) -> Result<Vec<ObjectInfo>> {
    let mut items = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let options = ListOptions {
            prefix: prefix.clone(),
            delimiter: delimiter.clone(),
            max_keys: Some(LIST_BATCH),
            continuation_token: continuation_token.clone(),
        };

        let page = store.list_objects(bucket, options).await?;
        items.extend(page.items);

        if !page.truncated {
            break;
        }
        match page.continuation_token {
            Some(token) => continuation_token = Some(token),
            // a truncated page without a token would repeat the same request
            None => break,
        }
    }

    Ok(items)
}

/// Empty and delete a bucket.
///
/// The provider refuses to delete a bucket that still holds anything, so the
/// order is fixed: when versioning is or was ever enabled, every object
/// version and delete marker goes first; then all remaining current objects,
/// in batches; the bucket delete is issued only once nothing remains. Any
/// failure along the way aborts before the bucket delete is attempted.
pub async fn purge_bucket<S: ObjectStore + ?Sized>(
    store: &S,
    handle: &BucketHandle,
) -> Result<PurgeSummary> {
    let bucket = handle.name();
    let mut summary = PurgeSummary::default();

    let versioning = store.get_versioning(bucket).await?;
    if versioning.is_configured() {
        for version in store.list_object_versions(bucket).await? {
            tracing::debug!(bucket, key = %version.key, version_id = %version.version_id, "deleting object version");
            store
                .delete_object_version(bucket, &version.key, &version.version_id)
                .await?;
            summary.versions_deleted += 1;
        }
    }

    let objects = list_all_objects(store, bucket, None, None).await?;
    let keys: Vec<String> = objects
        .into_iter()
        .filter(|o| !o.is_prefix)
        .map(|o| o.key)
        .collect();

    for chunk in keys.chunks(LIST_BATCH as usize) {
        let deleted = store.delete_objects(bucket, chunk.to_vec()).await?;
        if deleted.len() != chunk.len() {
            return Err(Error::Conflict(format!(
                "bucket '{bucket}' purge incomplete: {} of {} objects deleted",
                deleted.len(),
                chunk.len()
            )));
        }
        summary.objects_deleted += deleted.len();
    }

    store.delete_bucket(bucket).await?;

    Ok(summary)
}
