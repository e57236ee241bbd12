use thiserror::Error;

const INVALID_BODY: &str = "Invalid body. Expect { message: string, signature: string }";

/// Caller-fixable problems with a verification request.
///
/// The display strings are part of the public HTTP contract and must not change.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Payload absent or not a structured object.
    #[error("{}", INVALID_BODY)]
    MissingBody,
    /// `message` or `signature` is not text.
    #[error("{}", INVALID_BODY)]
    MalformedFields,
    /// `signature` does not match `^0x[0-9a-fA-F]+$`.
    #[error("signature must be a 0x-prefixed hex string")]
    BadSignatureEncoding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        assert_eq!(
            ValidationError::MissingBody.to_string(),
            "Invalid body. Expect { message: string, signature: string }"
        );
        assert_eq!(
            ValidationError::MalformedFields.to_string(),
            ValidationError::MissingBody.to_string()
        );
        assert_eq!(
            ValidationError::BadSignatureEncoding.to_string(),
            "signature must be a 0x-prefixed hex string"
        );
    }
}
