// IND-CPA public-key encryption over a module of rank k. Key generation,
// encryption and decryption are deterministic given their seeds; the KEM
// layer on top supplies randomness and the FO transform.

use zeroize::Zeroize;

use crate::codec::{
    pack_ciphertext, pack_pk, polyvec_from_bytes, polyvec_to_bytes, unpack_ciphertext, unpack_pk,
};
use crate::params::{eta1, ETA2, SYMBYTES};
use crate::poly::{
    poly_add, poly_from_msg, poly_inv_ntt, poly_reduce, poly_sub, poly_to_mont, poly_to_msg,
    polyvec_add, polyvec_inv_ntt, polyvec_new, polyvec_ntt, polyvec_pointwise_acc, polyvec_reduce,
};
use crate::sampling::{gen_matrix, poly_get_noise};
use crate::symmetric::hash_g;

/// Deterministic keypair from a 32-byte seed d. Returns (sk, pk) where
/// sk serializes the secret vector s (NTT domain) and pk serializes
/// t = A*s + e followed by the public seed.
pub fn indcpa_keypair(d: &[u8; SYMBYTES], k: usize) -> (Vec<u8>, Vec<u8>) {
    let mut g = hash_g(d);
    let mut rho = [0u8; SYMBYTES];
    let mut sigma = [0u8; SYMBYTES];
    rho.copy_from_slice(&g[..SYMBYTES]);
    sigma.copy_from_slice(&g[SYMBYTES..]);

    let a = gen_matrix(&rho, false, k);

    let mut s = polyvec_new(k);
    let mut e = polyvec_new(k);
    let mut nonce = 0u8;
    for p in s.iter_mut() {
        *p = poly_get_noise(&sigma, nonce, eta1(k));
        nonce = nonce.wrapping_add(1);
    }
    for p in e.iter_mut() {
        *p = poly_get_noise(&sigma, nonce, eta1(k));
        nonce = nonce.wrapping_add(1);
    }

    polyvec_ntt(&mut s);
    polyvec_reduce(&mut s);
    polyvec_ntt(&mut e);

    // t = A*s + e; the Montgomery lift compensates the R^-1 picked up in
    // the pointwise accumulation.
    let mut t = polyvec_new(k);
    for i in 0..k {
        t[i] = polyvec_pointwise_acc(&a[i], &s);
        poly_to_mont(&mut t[i]);
    }
    polyvec_add(&mut t, &e);
    polyvec_reduce(&mut t);

    let sk = polyvec_to_bytes(&s);
    let pk = pack_pk(&t, &rho);

    s.zeroize();
    e.zeroize();
    sigma.zeroize();
    g.zeroize();

    (sk, pk)
}

/// Encrypts a 32-byte message under pk with the given coins.
pub fn indcpa_encrypt(msg: &[u8; SYMBYTES], pk: &[u8], coins: &[u8; SYMBYTES], k: usize) -> Vec<u8> {
    let (t, rho) = unpack_pk(pk, k);
    let at = gen_matrix(&rho, true, k);

    let mut sp = polyvec_new(k);
    let mut ep = polyvec_new(k);
    for (i, p) in sp.iter_mut().enumerate() {
        *p = poly_get_noise(coins, i as u8, eta1(k));
    }
    for (i, p) in ep.iter_mut().enumerate() {
        *p = poly_get_noise(coins, (k + i) as u8, ETA2);
    }
    let mut epp = poly_get_noise(coins, (2 * k) as u8, ETA2);

    polyvec_ntt(&mut sp);
    polyvec_reduce(&mut sp);

    // b = A^T * s', v = t . s', both pulled back out of the NTT domain.
    let mut b = polyvec_new(k);
    for i in 0..k {
        b[i] = polyvec_pointwise_acc(&at[i], &sp);
    }
    let mut v = polyvec_pointwise_acc(&t, &sp);

    polyvec_inv_ntt(&mut b);
    poly_inv_ntt(&mut v);

    polyvec_add(&mut b, &ep);
    poly_add(&mut v, &epp);
    let mut m = poly_from_msg(msg);
    poly_add(&mut v, &m);

    polyvec_reduce(&mut b);
    poly_reduce(&mut v);

    let ct = pack_ciphertext(&b, &v, k);

    sp.zeroize();
    ep.zeroize();
    epp.zeroize();
    m.zeroize();

    ct
}

/// Decrypts a ciphertext with the serialized secret vector.
pub fn indcpa_decrypt(ct: &[u8], sk: &[u8], k: usize) -> [u8; SYMBYTES] {
    let (mut b, v) = unpack_ciphertext(ct, k);
    let mut s = polyvec_from_bytes(sk, k);

    polyvec_ntt(&mut b);
    let mut mp = polyvec_pointwise_acc(&s, &b);
    poly_inv_ntt(&mut mp);

    let mut w = v;
    poly_sub(&mut w, &mp);
    poly_reduce(&mut w);
    let msg = poly_to_msg(&w);

    s.zeroize();
    w.zeroize();
    mp.zeroize();

    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ciphertext_bytes, indcpa_secret_key_bytes, public_key_bytes};

    #[test]
    fn encrypt_decrypt_roundtrip_all_ranks() {
        for k in [2usize, 3, 4] {
            let d = [k as u8; SYMBYTES];
            let (sk, pk) = indcpa_keypair(&d, k);
            assert_eq!(sk.len(), indcpa_secret_key_bytes(k));
            assert_eq!(pk.len(), public_key_bytes(k));

            let mut msg = [0u8; SYMBYTES];
            for (i, b) in msg.iter_mut().enumerate() {
                *b = (i as u8) ^ 0x37;
            }
            let coins = [0x42u8; SYMBYTES];
            let ct = indcpa_encrypt(&msg, &pk, &coins, k);
            assert_eq!(ct.len(), ciphertext_bytes(k));
            assert_eq!(indcpa_decrypt(&ct, &sk, k), msg);
        }
    }

    #[test]
    fn encryption_is_deterministic_in_coins() {
        let k = 3;
        let (_, pk) = indcpa_keypair(&[1u8; SYMBYTES], k);
        let msg = [9u8; SYMBYTES];
        let c1 = indcpa_encrypt(&msg, &pk, &[2u8; SYMBYTES], k);
        let c2 = indcpa_encrypt(&msg, &pk, &[2u8; SYMBYTES], k);
        let c3 = indcpa_encrypt(&msg, &pk, &[3u8; SYMBYTES], k);
        assert_eq!(c1, c2);
        assert_ne!(c1, c3);
    }
}
