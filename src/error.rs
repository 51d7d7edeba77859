use core::fmt;

/// Errors surfaced by the public KEM operations.
///
/// Decapsulation never reports a cryptographic failure: a forged ciphertext
/// yields a pseudorandom shared secret (implicit rejection), not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KyberError {
    /// The security level is not one of 512/768/1024, or an input byte
    /// string does not have the exact size required at that level.
    InvalidParameter,
    /// The random byte source failed to produce output.
    EntropyUnavailable,
}

impl fmt::Display for KyberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KyberError::InvalidParameter => {
                write!(f, "unrecognised security level or malformed input")
            }
            KyberError::EntropyUnavailable => write!(f, "random byte source failed"),
        }
    }
}

impl std::error::Error for KyberError {}
