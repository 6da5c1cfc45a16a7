//! Bucket handles
//!
//! A handle pairs a bucket name with the region it lives in (or should be
//! created in). Handles are plain local state: constructing one never
//! contacts the provider, and nothing checks that the named bucket exists
//! or is owned by the caller.

/// Default region applied when none is supplied
pub const DEFAULT_REGION: &str = "us-west-2";

/// An immutable (bucket name, region) pair.
///
/// Handles are rebound rather than mutated: `with_name` and `with_region`
/// return a new handle, so a handle held across several operations cannot
/// change underneath them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketHandle {
    name: String,
    region: String,
}

impl BucketHandle {
    /// Create a handle for `name` in `region`, falling back to
    /// [`DEFAULT_REGION`] when no region is given.
    pub fn new(name: impl Into<String>, region: Option<String>) -> Self {
        Self {
            name: name.into(),
            region: region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
        }
    }

    /// The bucket name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The region
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Rebind to a different bucket, keeping the region
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: self.region.clone(),
        }
    }

    /// Rebind to a different region, keeping the bucket name
    pub fn with_region(&self, region: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            region: region.into(),
        }
    }
}

impl std::fmt::Display for BucketHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.region)
    }
}
