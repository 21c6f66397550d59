use anyhow::anyhow;
use log::debug;
use oto_auth_engine::helpers::{constant_time_eq, SignatureCodec};
use oto_common::Secret;
use serde_json::json;

use crate::{SignParams, TransactionParams, VerifyParams};

/// Uses the explicit value if given, otherwise looks `name` up with `lookup`.
fn resolve_secret<F>(value: Option<String>, name: &str, lookup: F) -> anyhow::Result<Secret<String>>
where F: Fn(&str) -> Option<String> {
    value
        .or_else(|| {
            debug!("Reading {name} from the environment");
            lookup(name)
        })
        .map(|s| Secret::from(s.trim().to_string()))
        .ok_or_else(|| anyhow!("No value given for {name}. Pass it on the command line or set it in the environment."))
}

fn compute<F>(params: TransactionParams, lookup: F) -> anyhow::Result<(TransactionParams, String)>
where F: Fn(&str) -> Option<String> {
    let pin = resolve_secret(params.pin.clone(), "OTO_PIN", &lookup)?;
    let password = resolve_secret(params.password.clone(), "OTO_PASSWORD", &lookup)?;
    let signature = SignatureCodec::compute(
        &params.memberid,
        &params.product,
        &params.dest,
        &params.trxid,
        pin.reveal(),
        password.reveal(),
    );
    Ok((params, signature))
}

pub fn print_signature<F>(params: SignParams, lookup: F) -> anyhow::Result<bool>
where F: Fn(&str) -> Option<String> {
    let (tx, signature) = compute(params.transaction, lookup)?;
    if params.json {
        let out = json!({
            "trxid": tx.trxid.trim(),
            "memberid": tx.memberid.trim(),
            "sign": signature,
        });
        println!("{out}");
    } else {
        println!("--------------------------- Transaction Signature ---------------------------");
        println!("Member id : {}", tx.memberid.trim());
        println!("Product   : {}", tx.product.trim());
        println!("Dest      : {}", tx.dest.trim());
        println!("Trx id    : {}", tx.trxid.trim());
        println!("sign      : {signature}");
        println!("-----------------------------------------------------------------------------");
    }
    Ok(true)
}

/// Returns whether `params.signature` (trimmed) is the exact signature of the transaction.
pub fn verify_signature<F>(params: VerifyParams, lookup: F) -> anyhow::Result<bool>
where F: Fn(&str) -> Option<String> {
    let (_, expected) = compute(params.transaction, lookup)?;
    let valid = constant_time_eq(params.signature.trim(), &expected);
    if valid {
        println!("✅️ Signature is valid");
    } else {
        println!("❌️ Signature does NOT match this transaction and pin/password");
    }
    Ok(valid)
}
