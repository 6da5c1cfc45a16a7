//! Remote reference parsing
//!
//! Commands address remote locations as `bucket` or `bucket/key` strings.
//! The bucket segment is validated against S3 naming rules locally; keys are
//! passed through untouched.

use crate::error::{Error, Result};

/// A parsed remote reference pointing at a bucket or an object within it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    /// Bucket name
    pub bucket: String,
    /// Object key (empty when the reference is the bucket itself)
    pub key: String,
}

impl RemoteRef {
    /// Create a new RemoteRef
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Whether this reference names a bucket rather than an object
    pub fn is_bucket(&self) -> bool {
        self.key.is_empty()
    }
}

impl std::fmt::Display for RemoteRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}", self.bucket)
        } else {
            write!(f, "{}/{}", self.bucket, self.key)
        }
    }
}

/// Parse a `bucket[/key]` reference string
pub fn parse_remote(input: &str) -> Result<RemoteRef> {
    let input = input.strip_prefix("s3://").unwrap_or(input);

    if input.is_empty() {
        return Err(Error::InvalidRef("reference cannot be empty".into()));
    }

    let (bucket, key) = match input.split_once('/') {
        Some((bucket, key)) => (bucket, key),
        None => (input, ""),
    };

    validate_bucket_name(bucket)?;

    Ok(RemoteRef::new(bucket, key))
}

/// Validate a bucket name against the S3 naming rules
///
/// 3-63 characters, lowercase letters, digits, hyphens and dots; must start
/// and end with a letter or digit. Stricter provider rules (IP-address-like
/// names, reserved prefixes) are left to the provider.
pub fn validate_bucket_name(name: &str) -> Result<()> {
    if name.len() < 3 || name.len() > 63 {
        return Err(Error::InvalidRef(format!(
            "bucket name '{name}' must be between 3 and 63 characters"
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(Error::InvalidRef(format!(
            "bucket name '{name}' may only contain lowercase letters, digits, hyphens and dots"
        )));
    }

    let first = name.chars().next().unwrap_or_default();
    let last = name.chars().last().unwrap_or_default();
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(Error::InvalidRef(format!(
            "bucket name '{name}' must start and end with a letter or digit"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bucket_only() {
        let remote = parse_remote("my-bucket").unwrap();
        assert_eq!(remote.bucket, "my-bucket");
        assert_eq!(remote.key, "");
        assert!(remote.is_bucket());
    }

    #[test]
    fn test_parse_bucket_and_key() {
        let remote = parse_remote("my-bucket/path/to/file.txt").unwrap();
        assert_eq!(remote.bucket, "my-bucket");
        assert_eq!(remote.key, "path/to/file.txt");
        assert!(!remote.is_bucket());
    }

    #[test]
    fn test_parse_s3_scheme() {
        let remote = parse_remote("s3://my-bucket/file.txt").unwrap();
        assert_eq!(remote.bucket, "my-bucket");
        assert_eq!(remote.key, "file.txt");
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_remote("").is_err());
    }

    #[test]
    fn test_validate_bucket_name_too_short() {
        assert!(validate_bucket_name("ab").is_err());
    }

    #[test]
    fn test_validate_bucket_name_too_long() {
        assert!(validate_bucket_name(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_validate_bucket_name_uppercase() {
        assert!(validate_bucket_name("MyBucket").is_err());
    }

    #[test]
    fn test_validate_bucket_name_leading_hyphen() {
        assert!(validate_bucket_name("-bucket").is_err());
        assert!(validate_bucket_name("bucket-").is_err());
    }

    #[test]
    fn test_validate_bucket_name_valid() {
        assert!(validate_bucket_name("my-bucket.backup-01").is_ok());
        assert!(validate_bucket_name("abc").is_ok());
    }

    #[test]
    fn test_remote_ref_display() {
        assert_eq!(RemoteRef::new("b-1", "k/x.txt").to_string(), "b-1/k/x.txt");
        assert_eq!(RemoteRef::new("b-1", "").to_string(), "b-1");
    }
}
