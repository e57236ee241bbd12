use anyhow::{bail, Result};
use clap::Parser;
use serde_json::json;

use alloy_primitives::Address;
use sigverify_common::verify_signature;

/// CLI to recover the signer of a personal message, printing the verification result as JSON.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// The exact message text that was signed.
    #[clap(long)]
    message: String,

    /// 0x-prefixed hex signature (65 bytes, r || s || v).
    #[clap(long)]
    signature: String,

    /// Fail unless the recovered signer is this address.
    #[clap(long)]
    expected: Option<Address>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let body = json!({ "message": args.message, "signature": args.signature });
    let result = verify_signature(&body)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(expected) = args.expected {
        match result.signer {
            Some(signer) if signer == expected => {}
            Some(signer) => bail!(
                "Recovered address {:#x} does not match expected address {:#x}",
                signer,
                expected
            ),
            None => bail!("No signer could be recovered; expected {:#x}", expected),
        }
    }

    Ok(())
}
