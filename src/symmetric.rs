// SHA-3 suite entry points, FIPS-202 via the RustCrypto `sha3` crate.
// H = SHA3-256, G = SHA3-512, PRF/KDF = SHAKE-256, XOF = SHAKE-128.
// Keeping the trait plumbing here lets the rest of the crate call plain
// functions.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

use crate::params::{SSBYTES, SYMBYTES};

/// SHAKE-128 rate in bytes; the XOF stream is squeezed in these units.
pub const SHAKE128_RATE: usize = 168;

/// H: SHA3-256.
pub fn hash_h(input: &[u8]) -> [u8; SYMBYTES] {
    let mut out = [0u8; SYMBYTES];
    out.copy_from_slice(&Sha3_256::digest(input));
    out
}

/// G: SHA3-512, split by callers into two 32-byte halves.
pub fn hash_g(input: &[u8]) -> [u8; 2 * SYMBYTES] {
    let mut out = [0u8; 2 * SYMBYTES];
    out.copy_from_slice(&Sha3_512::digest(input));
    out
}

/// PRF: SHAKE-256(key || nonce), squeezed to the requested length.
pub fn prf(out: &mut [u8], key: &[u8], nonce: u8) {
    let mut xof = Shake256::default();
    xof.update(key);
    xof.update(&[nonce]);
    xof.finalize_xof().read(out);
}

/// KDF: SHAKE-256 squeezed to the shared-secret length.
pub fn kdf(input: &[u8]) -> [u8; SSBYTES] {
    let mut xof = Shake256::default();
    xof.update(input);
    let mut out = [0u8; SSBYTES];
    xof.finalize_xof().read(&mut out);
    out
}

/// XOF: SHAKE-128 absorbed over seed || x || y, ready for incremental
/// squeezing by the rejection sampler.
pub fn xof(seed: &[u8; SYMBYTES], x: u8, y: u8) -> impl XofReader {
    let mut hasher = Shake128::default();
    hasher.update(seed);
    hasher.update(&[x, y]);
    hasher.finalize_xof()
}
