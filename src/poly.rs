// Polynomial layer: coefficient vectors of length 256 and the small-vector
// algebra the PKE is built from. Coefficients are not kept canonically
// reduced between steps; the codec entry points restore canonical form.

use crate::arith::{barrett_reduce, csubq, montgomery_reduce};
use crate::ntt::{self, base_mul, ZETAS};
use crate::params::{KYBER_N, KYBER_Q, MONT_R2, SYMBYTES};

pub type Poly = [i16; KYBER_N];
pub type PolyVec = Vec<Poly>;

#[inline]
pub fn poly_new() -> Poly {
    [0i16; KYBER_N]
}

pub fn polyvec_new(k: usize) -> PolyVec {
    vec![poly_new(); k]
}

/// r += b, coefficient-wise.
pub fn poly_add(r: &mut Poly, b: &Poly) {
    for i in 0..KYBER_N {
        r[i] += b[i];
    }
}

/// r -= b, coefficient-wise.
pub fn poly_sub(r: &mut Poly, b: &Poly) {
    for i in 0..KYBER_N {
        r[i] -= b[i];
    }
}

/// Barrett-reduces every coefficient.
pub fn poly_reduce(r: &mut Poly) {
    for c in r.iter_mut() {
        *c = barrett_reduce(*c);
    }
}

/// Conditional subtraction of q on every coefficient.
pub fn poly_csubq(r: &mut Poly) {
    for c in r.iter_mut() {
        *c = csubq(*c);
    }
}

/// Lifts every coefficient into the Montgomery domain (multiplies by R).
pub fn poly_to_mont(r: &mut Poly) {
    for c in r.iter_mut() {
        *c = montgomery_reduce((*c as i32) * (MONT_R2 as i32));
    }
}

pub fn poly_ntt(r: &mut Poly) {
    ntt::ntt(r);
}

pub fn poly_inv_ntt(r: &mut Poly) {
    ntt::inv_ntt(r);
}

/// Pointwise multiplication in the NTT domain: 128 products of degree-1
/// polynomials, twiddles alternating in sign.
pub fn poly_base_mul(r: &mut Poly, a: &Poly, b: &Poly) {
    for i in 0..KYBER_N / 4 {
        let zeta = ZETAS[64 + i];
        let (r0, r1) = base_mul(a[4 * i], a[4 * i + 1], b[4 * i], b[4 * i + 1], zeta);
        let (r2, r3) = base_mul(a[4 * i + 2], a[4 * i + 3], b[4 * i + 2], b[4 * i + 3], -zeta);
        r[4 * i] = r0;
        r[4 * i + 1] = r1;
        r[4 * i + 2] = r2;
        r[4 * i + 3] = r3;
    }
}

/// Expands a 32-byte message into a polynomial: bit 1 maps to round(q/2),
/// bit 0 to zero, via a branch-free mask.
pub fn poly_from_msg(msg: &[u8; SYMBYTES]) -> Poly {
    let half_q = (KYBER_Q + 1) / 2;
    let mut r = poly_new();
    for i in 0..KYBER_N {
        let mask = -(((msg[i >> 3] >> (i & 7)) & 1) as i16);
        r[i] = mask & half_q;
    }
    r
}

/// Rounds each coefficient against q/2 and collects the resulting bits
/// into a 32-byte message.
pub fn poly_to_msg(a: &Poly) -> [u8; SYMBYTES] {
    let mut p = *a;
    poly_csubq(&mut p);
    let mut msg = [0u8; SYMBYTES];
    for i in 0..SYMBYTES {
        for j in 0..8 {
            let t = ((p[8 * i + j] as u32) << 1) + (KYBER_Q as u32 + 1) / 2;
            let bit = ((t as u64 * 80635) >> 28) & 1;
            msg[i] |= (bit as u8) << j;
        }
    }
    msg
}

pub fn polyvec_ntt(v: &mut PolyVec) {
    for p in v.iter_mut() {
        poly_ntt(p);
    }
}

pub fn polyvec_inv_ntt(v: &mut PolyVec) {
    for p in v.iter_mut() {
        poly_inv_ntt(p);
    }
}

pub fn polyvec_reduce(v: &mut PolyVec) {
    for p in v.iter_mut() {
        poly_reduce(p);
    }
}

pub fn polyvec_csubq(v: &mut PolyVec) {
    for p in v.iter_mut() {
        poly_csubq(p);
    }
}

pub fn polyvec_add(r: &mut PolyVec, b: &PolyVec) {
    for (rp, bp) in r.iter_mut().zip(b.iter()) {
        poly_add(rp, bp);
    }
}

/// Dot product of two vectors in the NTT domain, Barrett-reduced.
/// The accumulated value carries the usual R^-1 Montgomery factor.
pub fn polyvec_pointwise_acc(a: &PolyVec, b: &PolyVec) -> Poly {
    let mut r = poly_new();
    poly_base_mul(&mut r, &a[0], &b[0]);
    let mut t = poly_new();
    for i in 1..a.len() {
        poly_base_mul(&mut t, &a[i], &b[i]);
        poly_add(&mut r, &t);
    }
    poly_reduce(&mut r);
    r
}
