//! # Transaction signature format
//!
//! OtomaX callers may authenticate a transaction without sending their pin and password, by sending a signature
//! instead. The signature can only be produced by someone who knows the shared pin and password, and it binds them to
//! this exact transaction (member, product, destination and transaction id), so it cannot be replayed against another
//! transaction.
//!
//! ## Message format
//!
//! The canonical string is the literal prefix `OtomaX` followed by six fields, all separated by `|`:
//!
//! ```text
//!    OtomaX|{MEMBERID}|{PRODUCT}|{dest}|{trxid}|{pin}|{password}
//! ```
//!
//! where every field has its surrounding whitespace trimmed, and
//!   * `MEMBERID` and `PRODUCT` are upper-cased,
//!   * `dest`, `trxid`, `pin` and `password` keep their original case.
//!
//! The UTF-8 bytes of the canonical string are hashed with SHA-1 and the 20-byte digest is Base64 encoded. Padding
//! (`=`) is removed and the result made URL-safe (`+` becomes `-` and `/` becomes `_`). The final token is always 27
//! characters long.
//!
//! SHA-1 is dictated by the legacy protocol. Swapping in another hash breaks every existing integration.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sha1::{Digest, Sha1};
use subtle::ConstantTimeEq;

pub const SIGNATURE_PREFIX: &str = "OtomaX";
/// Length of an encoded signature: 20 digest bytes in unpadded Base64.
pub const SIGNATURE_LENGTH: usize = 27;

#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureCodec;

impl SignatureCodec {
    /// Build the canonical string that gets hashed.
    pub fn canonical_string(
        memberid: &str,
        product: &str,
        dest: &str,
        trxid: &str,
        pin: &str,
        password: &str,
    ) -> String {
        format!(
            "{SIGNATURE_PREFIX}|{}|{}|{}|{}|{}|{}",
            memberid.trim().to_uppercase(),
            product.trim().to_uppercase(),
            dest.trim(),
            trxid.trim(),
            pin.trim(),
            password.trim()
        )
    }

    /// Compute the transaction signature. Pure and deterministic.
    pub fn compute(memberid: &str, product: &str, dest: &str, trxid: &str, pin: &str, password: &str) -> String {
        let canonical = Self::canonical_string(memberid, product, dest, trxid, pin, password);
        let digest = Sha1::digest(canonical.as_bytes());
        // The URL-safe alphabet without padding is exactly standard Base64 with '=' stripped, '+' -> '-', '/' -> '_'
        URL_SAFE_NO_PAD.encode(digest)
    }
}

/// Equality check whose running time does not depend on where the inputs first differ.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// As [`constant_time_eq`], after upper-casing both sides.
pub fn constant_time_eq_ignore_case(a: &str, b: &str) -> bool {
    constant_time_eq(&a.to_uppercase(), &b.to_uppercase())
}
