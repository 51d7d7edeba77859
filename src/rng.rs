// Random byte plumbing. The KEM never touches an RNG directly: it asks
// for exact counts of bytes here, and failures surface as
// EntropyUnavailable with no partial output.

use rand_core::{CryptoRng, RngCore};

use crate::error::KyberError;

/// Fills `out` from a caller-provided cryptographic RNG.
pub fn randombytes<R>(out: &mut [u8], rng: &mut R) -> Result<(), KyberError>
where
    R: RngCore + CryptoRng,
{
    rng.try_fill_bytes(out)
        .map_err(|_| KyberError::EntropyUnavailable)
}

/// Fills `out` from the operating system entropy source.
pub fn os_randombytes(out: &mut [u8]) -> Result<(), KyberError> {
    getrandom::getrandom(out).map_err(|_| KyberError::EntropyUnavailable)
}
