use std::fs;
use std::path::PathBuf;

use alloy_primitives::{hex, Address, Signature, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use serde_json::json;

use sigverify_common::personal_message_hash;

/// CLI to sign a message (EIP-191 personal message) and print digest, signature, and signer.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(group(ArgGroup::new("input").required(true).args(["message", "file_path"])))]
struct Args {
    /// Message text to sign.
    #[clap(long)]
    message: Option<String>,

    /// Path to a UTF-8 file whose contents will be signed verbatim.
    #[clap(long, value_name = "FILE")]
    file_path: Option<PathBuf>,

    /// Optional private key to use for signing; if omitted, a random key is generated.
    #[clap(long, env = "USER_PRIVATE_KEY")]
    private_key: Option<PrivateKeySigner>,

    /// Encrypted JSON keystore; takes precedence over `--private-key`.
    #[clap(long, value_name = "FILE")]
    keystore: Option<PathBuf>,

    /// Password for `--keystore`.
    #[clap(long, env = "KEYSTORE_PASSWORD", default_value = "")]
    keystore_password: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let message = match &args.file_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => args.message.unwrap_or_default(),
    };

    // Obtain signer (keystore, existing key, or random)
    let signer = match (args.keystore, args.private_key) {
        (Some(path), _) => PrivateKeySigner::decrypt_keystore(&path, &args.keystore_password)
            .with_context(|| format!("failed to decrypt keystore {}", path.display()))?,
        (None, Some(pk)) => pk,
        (None, None) => PrivateKeySigner::random(),
    };
    let signer_address: Address = signer.address();

    let digest: B256 = personal_message_hash(message.as_bytes());
    let signature: Signature = signer.sign_message_sync(message.as_bytes())?;
    let signature_hex = format!("0x{}", hex::encode(signature.as_bytes()));

    println!("Digest (EIP-191): 0x{}", hex::encode(digest));
    println!("Signature: {signature_hex}");
    println!("Signer: {}", signer_address.to_checksum(None));
    println!(
        "Request body: {}",
        json!({ "message": message, "signature": signature_hex })
    );

    Ok(())
}
