pub mod error;
pub mod signing;
pub mod validation;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

pub use error::ValidationError;
pub use signing::{personal_message_hash, recover_personal_signer, Recovery};
pub use validation::validate;

/// A `{ message, signature }` pair that passed validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignatureRequest {
    pub message: String,
    /// `0x`-prefixed hex, as received.
    pub signature: String,
}

/// Answer to a verification request. `is_valid` holds exactly when `signer` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_valid: bool,
    #[serde(serialize_with = "serialize_checksummed")]
    pub signer: Option<Address>,
    pub original_message: String,
}

impl VerificationResult {
    fn new(recovery: Recovery, original_message: String) -> Self {
        let signer = recovery.signer();
        Self {
            is_valid: signer.is_some(),
            signer,
            original_message,
        }
    }
}

/// Signers are rendered EIP-55 checksummed, the form wallets display.
fn serialize_checksummed<S: Serializer>(
    signer: &Option<Address>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match signer {
        Some(address) => serializer.serialize_some(&address.to_checksum(None)),
        None => serializer.serialize_none(),
    }
}

/// Recover the personal-message signer of a validated request.
///
/// Never fails: a signature that cannot be decoded or recovered yields
/// `is_valid == false` and no signer. No expected-address comparison is made.
pub fn verify(request: SignatureRequest) -> VerificationResult {
    let recovery = recover_personal_signer(request.message.as_bytes(), &request.signature);
    debug!(?recovery, "verified personal message signature");
    VerificationResult::new(recovery, request.message)
}

/// Validate an untyped payload and verify it. Validation failures are the only error path.
pub fn verify_signature(body: &Value) -> Result<VerificationResult, ValidationError> {
    let request = validate(body).inspect_err(|e| debug!(?e, "rejected verification request"))?;
    Ok(verify(request))
}
