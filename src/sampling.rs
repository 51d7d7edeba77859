// Samplers: rejection sampling of uniform polynomials from a SHAKE-128
// stream, and centered-binomial noise from a SHAKE-256 PRF.

use sha3::digest::XofReader;
use zeroize::Zeroize;

use crate::arith::{load24_le, load32_le};
use crate::params::{KYBER_N, KYBER_Q, SYMBYTES};
use crate::poly::{poly_new, polyvec_new, Poly, PolyVec};
use crate::symmetric::{prf, xof, SHAKE128_RATE};

pub type PolyMat = Vec<PolyVec>;

/// Runs rejection sampling over `buf`, writing accepted coefficients into
/// `r` starting at `ctr`. Three bytes yield two 12-bit candidates; each is
/// kept when below q. Returns the updated count.
pub fn rej_uniform(r: &mut Poly, mut ctr: usize, buf: &[u8]) -> usize {
    let mut j = 0usize;
    while ctr < KYBER_N && j + 3 <= buf.len() {
        let d1 = ((buf[j] as u16) | ((buf[j + 1] as u16) << 8)) & 0xFFF;
        let d2 = ((buf[j + 1] as u16) >> 4) | ((buf[j + 2] as u16) << 4);
        j += 3;

        if d1 < KYBER_Q as u16 {
            r[ctr] = d1 as i16;
            ctr += 1;
        }
        if ctr < KYBER_N && d2 < KYBER_Q as u16 {
            r[ctr] = d2 as i16;
            ctr += 1;
        }
    }
    ctr
}

/// Deterministically expands the public seed into the k x k matrix A
/// (or its transpose). Entries are sampled directly in the NTT domain:
/// SHAKE-128 over seed || column || row is squeezed three rate blocks up
/// front, then one block at a time until 256 coefficients are accepted.
pub fn gen_matrix(seed: &[u8; SYMBYTES], transposed: bool, k: usize) -> PolyMat {
    let mut a: PolyMat = Vec::with_capacity(k);
    for i in 0..k {
        let mut row = polyvec_new(k);
        for (j, entry) in row.iter_mut().enumerate() {
            let (x, y) = if transposed {
                (i as u8, j as u8)
            } else {
                (j as u8, i as u8)
            };
            let mut reader = xof(seed, x, y);

            let mut buf = [0u8; 3 * SHAKE128_RATE];
            reader.read(&mut buf);
            let mut ctr = rej_uniform(entry, 0, &buf);

            let mut block = [0u8; SHAKE128_RATE];
            while ctr < KYBER_N {
                reader.read(&mut block);
                ctr = rej_uniform(entry, ctr, &block);
            }
        }
        a.push(row);
    }
    a
}

/// CBD_2: each coefficient is a difference of two 2-bit popcounts.
fn cbd_eta2(buf: &[u8]) -> Poly {
    let mut r = poly_new();
    for i in 0..KYBER_N / 8 {
        let t = load32_le(&buf[4 * i..]);
        let d = (t & 0x5555_5555) + ((t >> 1) & 0x5555_5555);
        for j in 0..8 {
            let a = ((d >> (4 * j)) & 0x3) as i16;
            let b = ((d >> (4 * j + 2)) & 0x3) as i16;
            r[8 * i + j] = a - b;
        }
    }
    r
}

/// CBD_3: each coefficient is a difference of two 3-bit popcounts.
fn cbd_eta3(buf: &[u8]) -> Poly {
    let mut r = poly_new();
    for i in 0..KYBER_N / 4 {
        let t = load24_le(&buf[3 * i..]);
        let d = (t & 0x0024_9249) + ((t >> 1) & 0x0024_9249) + ((t >> 2) & 0x0024_9249);
        for j in 0..4 {
            let a = ((d >> (6 * j)) & 0x7) as i16;
            let b = ((d >> (6 * j + 3)) & 0x7) as i16;
            r[4 * i + j] = a - b;
        }
    }
    r
}

/// Samples a noise polynomial from SHAKE-256(seed || nonce) with the
/// centered binomial distribution B_eta, eta in {2, 3}.
pub fn poly_get_noise(seed: &[u8; SYMBYTES], nonce: u8, eta: usize) -> Poly {
    let mut buf = [0u8; 3 * KYBER_N / 4];
    let len = eta * KYBER_N / 4;
    prf(&mut buf[..len], seed, nonce);
    let r = match eta {
        3 => cbd_eta3(&buf[..len]),
        _ => cbd_eta2(&buf[..len]),
    };
    buf.zeroize();
    r
}
