// IND-CCA2 KEM: Fujisaki-Okamoto transform over the IND-CPA PKE, with
// implicit rejection. The ciphertext comparison and the key selection are
// branch-free; no secret byte ever decides a branch or an early return.

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::KyberError;
use crate::indcpa::{indcpa_decrypt, indcpa_encrypt, indcpa_keypair};
use crate::params::{
    ciphertext_bytes, indcpa_public_key_bytes, indcpa_secret_key_bytes, k_from_level,
    public_key_bytes, secret_key_bytes, SYMBYTES,
};
use crate::rng::{os_randombytes, randombytes};
use crate::symmetric::{hash_g, hash_h, kdf};

/// Constant-time comparison: 0x00 when equal, 0xFF otherwise.
fn verify(a: &[u8], b: &[u8]) -> u8 {
    let mut d = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        d |= x ^ y;
    }
    (((d as i16).wrapping_neg()) >> 8) as u8
}

/// Byte-wise conditional move: r_i <- x_i where mask is 0xFF, unchanged
/// where mask is 0x00.
fn cmov(r: &mut [u8], x: &[u8], mask: u8) {
    for (ri, xi) in r.iter_mut().zip(x.iter()) {
        *ri ^= mask & (*ri ^ xi);
    }
}

/// Deterministic KEM keypair from the seeds (d, z). Returns (sk, pk) with
/// sk = sk_indcpa || pk || H(pk) || z.
pub fn kem_keypair_deterministic(
    d: &[u8; SYMBYTES],
    z: &[u8; SYMBYTES],
    level: usize,
) -> Result<(Vec<u8>, Vec<u8>), KyberError> {
    let k = k_from_level(level)?;
    let (sk_cpa, pk) = indcpa_keypair(d, k);

    let mut sk = Vec::with_capacity(secret_key_bytes(k));
    sk.extend_from_slice(&sk_cpa);
    sk.extend_from_slice(&pk);
    sk.extend_from_slice(&hash_h(&pk));
    sk.extend_from_slice(z);

    Ok((sk, pk))
}

/// Deterministic encapsulation from the raw 32-byte randomness m_seed.
/// Returns (ct, ss).
pub fn kem_encaps_deterministic(
    pk: &[u8],
    m_seed: &[u8; SYMBYTES],
    level: usize,
) -> Result<(Vec<u8>, Vec<u8>), KyberError> {
    let k = k_from_level(level)?;
    if pk.len() != public_key_bytes(k) {
        return Err(KyberError::InvalidParameter);
    }

    // m = H(m_seed); (Kbar || coins) = G(m || H(pk)).
    let mut m = hash_h(m_seed);
    let mut g_in = [0u8; 2 * SYMBYTES];
    g_in[..SYMBYTES].copy_from_slice(&m);
    g_in[SYMBYTES..].copy_from_slice(&hash_h(pk));
    let mut kr = hash_g(&g_in);

    let mut coins = [0u8; SYMBYTES];
    coins.copy_from_slice(&kr[SYMBYTES..]);
    let ct = indcpa_encrypt(&m, pk, &coins, k);

    // ss = KDF(Kbar || H(ct)).
    let mut kdf_in = [0u8; 2 * SYMBYTES];
    kdf_in[..SYMBYTES].copy_from_slice(&kr[..SYMBYTES]);
    kdf_in[SYMBYTES..].copy_from_slice(&hash_h(&ct));
    let ss = kdf(&kdf_in).to_vec();

    m.zeroize();
    kr.zeroize();
    coins.zeroize();
    kdf_in.zeroize();
    g_in.zeroize();

    Ok((ct, ss))
}

/// Decapsulation. Always yields a 32-byte shared secret: a forged
/// ciphertext deterministically produces a pseudorandom value derived
/// from the implicit-rejection seed z.
pub fn kem_decaps(ct: &[u8], sk: &[u8], level: usize) -> Result<Vec<u8>, KyberError> {
    let k = k_from_level(level)?;
    if ct.len() != ciphertext_bytes(k) || sk.len() != secret_key_bytes(k) {
        return Err(KyberError::InvalidParameter);
    }

    let sk_cpa = &sk[..indcpa_secret_key_bytes(k)];
    let pk_off = indcpa_secret_key_bytes(k);
    let h_off = pk_off + indcpa_public_key_bytes(k);
    let z_off = h_off + SYMBYTES;
    let pk = &sk[pk_off..h_off];
    let h = &sk[h_off..z_off];
    let z = &sk[z_off..];

    let mut m = indcpa_decrypt(ct, sk_cpa, k);

    // (Kbar || coins) = G(m' || H(pk)).
    let mut g_in = [0u8; 2 * SYMBYTES];
    g_in[..SYMBYTES].copy_from_slice(&m);
    g_in[SYMBYTES..].copy_from_slice(h);
    let mut kr = hash_g(&g_in);

    let mut coins = [0u8; SYMBYTES];
    coins.copy_from_slice(&kr[SYMBYTES..]);
    let cmp = indcpa_encrypt(&m, pk, &coins, k);

    // Re-encryption check; on mismatch Kbar is replaced by z without
    // branching on the comparison result.
    let fail = verify(ct, &cmp);
    let mut kbar = [0u8; SYMBYTES];
    kbar.copy_from_slice(&kr[..SYMBYTES]);
    cmov(&mut kbar, z, fail);

    let mut kdf_in = [0u8; 2 * SYMBYTES];
    kdf_in[..SYMBYTES].copy_from_slice(&kbar);
    kdf_in[SYMBYTES..].copy_from_slice(&hash_h(ct));
    let ss = kdf(&kdf_in).to_vec();

    m.zeroize();
    kr.zeroize();
    coins.zeroize();
    kbar.zeroize();
    kdf_in.zeroize();
    g_in.zeroize();

    Ok(ss)
}

/// KEM keypair for a security level in {512, 768, 1024}, drawing seeds
/// from the given RNG. Returns (sk, pk).
pub fn kem_keypair_with_rng<R>(level: usize, rng: &mut R) -> Result<(Vec<u8>, Vec<u8>), KyberError>
where
    R: RngCore + CryptoRng,
{
    k_from_level(level)?;
    let mut d = [0u8; SYMBYTES];
    let mut z = [0u8; SYMBYTES];
    randombytes(&mut d, rng)?;
    randombytes(&mut z, rng)?;
    let out = kem_keypair_deterministic(&d, &z, level);
    d.zeroize();
    z.zeroize();
    out
}

/// KEM keypair using operating-system entropy.
pub fn kem_keypair(level: usize) -> Result<(Vec<u8>, Vec<u8>), KyberError> {
    k_from_level(level)?;
    let mut d = [0u8; SYMBYTES];
    let mut z = [0u8; SYMBYTES];
    os_randombytes(&mut d)?;
    os_randombytes(&mut z)?;
    let out = kem_keypair_deterministic(&d, &z, level);
    d.zeroize();
    z.zeroize();
    out
}

/// Encapsulation against pk, drawing randomness from the given RNG.
/// Returns (ct, ss).
pub fn kem_encaps_with_rng<R>(
    pk: &[u8],
    level: usize,
    rng: &mut R,
) -> Result<(Vec<u8>, Vec<u8>), KyberError>
where
    R: RngCore + CryptoRng,
{
    k_from_level(level)?;
    let mut m_seed = [0u8; SYMBYTES];
    randombytes(&mut m_seed, rng)?;
    let out = kem_encaps_deterministic(pk, &m_seed, level);
    m_seed.zeroize();
    out
}

/// Encapsulation using operating-system entropy. Returns (ct, ss).
pub fn kem_encaps(pk: &[u8], level: usize) -> Result<(Vec<u8>, Vec<u8>), KyberError> {
    k_from_level(level)?;
    let mut m_seed = [0u8; SYMBYTES];
    os_randombytes(&mut m_seed)?;
    let out = kem_encaps_deterministic(pk, &m_seed, level);
    m_seed.zeroize();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_flags_any_difference() {
        assert_eq!(verify(&[1, 2, 3], &[1, 2, 3]), 0x00);
        assert_eq!(verify(&[1, 2, 3], &[1, 2, 4]), 0xFF);
        assert_eq!(verify(&[0x80, 0, 0], &[0, 0, 0]), 0xFF);
        assert_eq!(verify(&[], &[]), 0x00);
    }

    #[test]
    fn cmov_obeys_mask() {
        let mut r = [1u8, 2, 3];
        cmov(&mut r, &[9, 9, 9], 0x00);
        assert_eq!(r, [1, 2, 3]);
        cmov(&mut r, &[9, 9, 9], 0xFF);
        assert_eq!(r, [9, 9, 9]);
    }

    #[test]
    fn deterministic_flow_roundtrips() {
        for level in [512usize, 768, 1024] {
            let d = [0x11u8; SYMBYTES];
            let z = [0x22u8; SYMBYTES];
            let (sk, pk) = kem_keypair_deterministic(&d, &z, level).unwrap();
            let (ct, ss1) = kem_encaps_deterministic(&pk, &[0x33u8; SYMBYTES], level).unwrap();
            let ss2 = kem_decaps(&ct, &sk, level).unwrap();
            assert_eq!(ss1, ss2, "level {level}");
            assert_eq!(ss1.len(), SYMBYTES);
        }
    }

    #[test]
    fn rejects_bad_level_and_sizes() {
        assert_eq!(kem_keypair(640).unwrap_err(), KyberError::InvalidParameter);
        let (sk, pk) = kem_keypair_deterministic(&[0u8; 32], &[0u8; 32], 512).unwrap();
        assert!(kem_encaps_deterministic(&pk, &[0u8; 32], 768).is_err());
        assert!(kem_decaps(&[0u8; 10], &sk, 512).is_err());
        assert!(kem_decaps(&vec![0u8; ciphertext_bytes(2)], &pk, 512).is_err());
    }
}
