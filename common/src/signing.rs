use alloy_primitives::{hex, keccak256, Address, Signature, B256, U256};
use thiserror::Error;
use tracing::debug;

/// EIP-191 version `0x45` tag, followed by the decimal byte length of the message.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// `r || s || v`
pub const SIGNATURE_LENGTH: usize = 65;

/// Outcome of asking the curve for the key behind a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    Recovered(Address),
    NotRecoverable,
}

impl Recovery {
    pub fn signer(self) -> Option<Address> {
        match self {
            Recovery::Recovered(address) => Some(address),
            Recovery::NotRecoverable => None,
        }
    }
}

#[derive(Debug, Error)]
enum SignatureDecodeError {
    #[error("invalid signature hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("expected {SIGNATURE_LENGTH} signature bytes, got {0}")]
    Length(usize),
    #[error("unsupported recovery byte {0}")]
    RecoveryByte(u8),
}

/// Digest signed by `personal_sign`:
/// keccak256("\x19Ethereum Signed Message:\n" || len(message) || message).
pub fn personal_message_hash(message: &[u8]) -> B256 {
    let prefix = format!("{PERSONAL_MESSAGE_PREFIX}{}", message.len());
    keccak256([prefix.as_bytes(), message].concat())
}

/// Split 65 raw bytes into a signature. `v` may be given as a bare parity (0/1)
/// or in the legacy 27/28 form; chain-id encoded values are rejected.
fn decode_signature(bytes: &[u8]) -> Result<Signature, SignatureDecodeError> {
    if bytes.len() != SIGNATURE_LENGTH {
        return Err(SignatureDecodeError::Length(bytes.len()));
    }
    let y_parity = match bytes[64] {
        0 | 27 => false,
        1 | 28 => true,
        v => return Err(SignatureDecodeError::RecoveryByte(v)),
    };
    let r = U256::from_be_slice(&bytes[..32]);
    let s = U256::from_be_slice(&bytes[32..64]);
    Ok(Signature::new(r, s, y_parity))
}

/// Recover the signing address for a 32-byte prehash.
pub fn recover_signer(prehash: &B256, signature: &[u8]) -> Recovery {
    let signature = match decode_signature(signature) {
        Ok(signature) => signature,
        Err(e) => {
            debug!("signature rejected before recovery: {e}");
            return Recovery::NotRecoverable;
        }
    };

    match signature.recover_address_from_prehash(prehash) {
        Ok(address) => Recovery::Recovered(address),
        Err(e) => {
            debug!("recovery failed: {e}");
            Recovery::NotRecoverable
        }
    }
}

/// Recover the signer of a personal message from a `0x`-prefixed hex signature.
pub fn recover_personal_signer(message: &[u8], signature: &str) -> Recovery {
    let digits = signature.strip_prefix("0x").unwrap_or(signature);
    let bytes = match hex::decode(digits) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("{}", SignatureDecodeError::from(e));
            return Recovery::NotRecoverable;
        }
    };
    recover_signer(&personal_message_hash(message), &bytes)
}
