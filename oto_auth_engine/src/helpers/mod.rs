mod address;
mod transaction_signature;

pub use address::host_portion;
pub use transaction_signature::{
    constant_time_eq,
    constant_time_eq_ignore_case,
    SignatureCodec,
    SIGNATURE_LENGTH,
    SIGNATURE_PREFIX,
};
