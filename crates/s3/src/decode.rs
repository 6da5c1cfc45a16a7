//! Provider error decoding
//!
//! Every SDK error is decoded exactly once, here, into a structured
//! [`Error`] variant. Call sites above this layer match on variants
//! instead of peeking at error strings.

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_smithy_types::error::display::DisplayErrorContext;

use bkt_core::Error;

/// Decode a generic SDK error by its service error code.
///
/// Dispatch failures (DNS, timeouts, connection resets) carry no service
/// code and are reported as network errors.
pub(crate) fn decode<E, R>(err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let code = err.code().map(str::to_string);
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

    classify(code.as_deref(), message)
}

/// Decode a bucket-creation failure.
///
/// Creation is the one operation with a dedicated structured error: the
/// provider's code and message are preserved unchanged so callers can show
/// exactly what the provider rejected (name collision, invalid region, ...).
pub(crate) fn decode_create<R>(err: SdkError<CreateBucketError, R>) -> Error
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    if matches!(err, SdkError::ServiceError(_)) {
        let code = err.code().unwrap_or("Unknown").to_string();
        let message = err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
        Error::BucketCreate { message, code }
    } else {
        Error::Network(DisplayErrorContext(&err).to_string())
    }
}

/// Map a provider error code to an [`Error`] variant
fn classify(code: Option<&str>, message: String) -> Error {
    match code {
        Some("NoSuchBucket" | "NoSuchKey" | "NoSuchVersion" | "NotFound") => {
            Error::NotFound(message)
        }
        Some("AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch") => {
            Error::Auth(message)
        }
        Some("BucketNotEmpty" | "BucketAlreadyExists" | "BucketAlreadyOwnedByYou") => {
            Error::Conflict(message)
        }
        Some(code) => Error::General(format!("[{code}] {message}")),
        None => Error::Network(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found_codes() {
        for code in ["NoSuchBucket", "NoSuchKey", "NoSuchVersion", "NotFound"] {
            assert!(matches!(
                classify(Some(code), "missing".into()),
                Error::NotFound(_)
            ));
        }
    }

    #[test]
    fn test_classify_auth_codes() {
        for code in ["AccessDenied", "InvalidAccessKeyId", "SignatureDoesNotMatch"] {
            assert!(matches!(
                classify(Some(code), "denied".into()),
                Error::Auth(_)
            ));
        }
    }

    #[test]
    fn test_classify_conflict_codes() {
        for code in [
            "BucketNotEmpty",
            "BucketAlreadyExists",
            "BucketAlreadyOwnedByYou",
        ] {
            assert!(matches!(
                classify(Some(code), "conflict".into()),
                Error::Conflict(_)
            ));
        }
    }

    #[test]
    fn test_classify_unrecognized_code_keeps_code_in_message() {
        let err = classify(Some("SlowDown"), "reduce request rate".into());
        assert!(matches!(&err, Error::General(m) if m.contains("SlowDown")));
    }

    #[test]
    fn test_classify_no_code_is_network() {
        assert!(matches!(
            classify(None, "connection reset".into()),
            Error::Network(_)
        ));
    }
}
