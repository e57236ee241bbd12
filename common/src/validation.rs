use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::{error::ValidationError, SignatureRequest};

/// Accepts any non-empty run of hex digits; byte length and digit parity are left to recovery.
static HEX_SIGNATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]+$").expect("static pattern is valid"));

/// Check the shape of an untyped `{ message, signature }` payload.
///
/// Arrays are treated as structured payloads (and then fail on their fields);
/// every other non-object value counts as an absent body. Both fields are
/// returned exactly as received.
pub fn validate(body: &Value) -> Result<SignatureRequest, ValidationError> {
    let fields = match body {
        Value::Object(map) => Some(map),
        Value::Array(_) => None,
        _ => return Err(ValidationError::MissingBody),
    };

    let field = |name: &str| fields.and_then(|map| map.get(name)).and_then(Value::as_str);
    let (Some(message), Some(signature)) = (field("message"), field("signature")) else {
        return Err(ValidationError::MalformedFields);
    };

    if !is_hex_signature(signature) {
        return Err(ValidationError::BadSignatureEncoding);
    }

    Ok(SignatureRequest {
        message: message.to_owned(),
        signature: signature.to_owned(),
    })
}

pub fn is_hex_signature(signature: &str) -> bool {
    HEX_SIGNATURE.is_match(signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_or_scalar_body_is_missing() {
        for body in [json!(null), json!(true), json!(42), json!("text")] {
            assert_eq!(validate(&body), Err(ValidationError::MissingBody), "{body}");
        }
    }

    #[test]
    fn empty_object_is_malformed() {
        assert_eq!(validate(&json!({})), Err(ValidationError::MalformedFields));
    }

    #[test]
    fn array_body_is_malformed() {
        assert_eq!(
            validate(&json!(["hello", "0xab"])),
            Err(ValidationError::MalformedFields)
        );
    }

    #[test]
    fn non_text_fields_are_malformed() {
        let bodies = [
            json!({ "message": 123, "signature": "0xab" }),
            json!({ "message": "x", "signature": 171 }),
            json!({ "message": null, "signature": "0xab" }),
            json!({ "message": "x" }),
            json!({ "signature": "0xab" }),
        ];
        for body in bodies {
            assert_eq!(validate(&body), Err(ValidationError::MalformedFields), "{body}");
        }
    }

    #[test]
    fn signature_encoding_is_checked() {
        for signature in ["abcd", "0xzz", "0x", "0X12", " 0x12", "0x12 ", "0x12\n", ""] {
            let body = json!({ "message": "x", "signature": signature });
            assert_eq!(
                validate(&body),
                Err(ValidationError::BadSignatureEncoding),
                "{signature:?}"
            );
        }
    }

    #[test]
    fn short_and_odd_hex_pass_validation() {
        for signature in ["0x1234", "0xabc", "0xABCDEF", "0x0"] {
            let body = json!({ "message": "x", "signature": signature });
            assert!(validate(&body).is_ok(), "{signature}");
        }
    }

    #[test]
    fn fields_pass_through_untouched() {
        let body = json!({
            "message": "  Sign in\r\n nonce: 7  ",
            "signature": "0xAbCd",
            "extra": { "ignored": true },
        });
        let request = validate(&body).unwrap();
        assert_eq!(request.message, "  Sign in\r\n nonce: 7  ");
        assert_eq!(request.signature, "0xAbCd");
    }

    #[test]
    fn empty_message_is_accepted() {
        let body = json!({ "message": "", "signature": "0x00" });
        assert_eq!(validate(&body).unwrap().message, "");
    }
}
