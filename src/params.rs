// Kyber parameters, shared constants and per-level byte sizes.
//
// The module rank k (2, 3 or 4) selects Kyber-512/768/1024 and is carried
// as a run-time value; everything derivable from k is a const fn of it.

use crate::error::KyberError;

pub const KYBER_N: usize = 256;
pub const KYBER_Q: i16 = 3329;

/// q^-1 mod 2^16 (0xC801 as a 16-bit two's-complement value).
pub const QINV: i32 = 62209;

/// Barrett constant ((1 << 26) + q/2) / q.
pub const BARRETT_V: i32 = 20159;

/// R^2 mod q where R = 2^16; lifts a coefficient into Montgomery form.
pub const MONT_R2: i16 = 1353;

pub const SYMBYTES: usize = 32;
pub const SSBYTES: usize = 32;

/// 256 coefficients at 12 bits each.
pub const POLYBYTES: usize = 384;

/// CBD parameter for e' and e'' during encryption, every level.
pub const ETA2: usize = 2;

/// CBD parameter for the secret and error vectors at key generation
/// (and for s' at encryption).
pub const fn eta1(k: usize) -> usize {
    if k == 2 {
        3
    } else {
        2
    }
}

/// Compression bit width for the ciphertext vector part.
pub const fn du(k: usize) -> usize {
    if k == 4 {
        11
    } else {
        10
    }
}

/// Compression bit width for the ciphertext polynomial part.
pub const fn dv(k: usize) -> usize {
    if k == 4 {
        5
    } else {
        4
    }
}

pub const fn polyvec_bytes(k: usize) -> usize {
    k * POLYBYTES
}

pub const fn poly_compressed_bytes(k: usize) -> usize {
    KYBER_N * dv(k) / 8
}

pub const fn polyvec_compressed_bytes(k: usize) -> usize {
    k * KYBER_N * du(k) / 8
}

pub const fn indcpa_secret_key_bytes(k: usize) -> usize {
    polyvec_bytes(k)
}

pub const fn indcpa_public_key_bytes(k: usize) -> usize {
    polyvec_bytes(k) + SYMBYTES
}

pub const fn public_key_bytes(k: usize) -> usize {
    indcpa_public_key_bytes(k)
}

pub const fn ciphertext_bytes(k: usize) -> usize {
    polyvec_compressed_bytes(k) + poly_compressed_bytes(k)
}

/// sk = sk_indcpa || pk || H(pk) || z
pub const fn secret_key_bytes(k: usize) -> usize {
    indcpa_secret_key_bytes(k) + indcpa_public_key_bytes(k) + 2 * SYMBYTES
}

/// Maps a public security level (512/768/1024) to the module rank k.
pub fn k_from_level(level: usize) -> Result<usize, KyberError> {
    match level {
        512 => Ok(2),
        768 => Ok(3),
        1024 => Ok(4),
        _ => Err(KyberError::InvalidParameter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_sizes_per_level() {
        // (k, pk, ct, sk)
        for (k, pk, ct, sk) in [(2, 800, 768, 1632), (3, 1184, 1088, 2400), (4, 1568, 1568, 3168)] {
            assert_eq!(public_key_bytes(k), pk);
            assert_eq!(ciphertext_bytes(k), ct);
            assert_eq!(secret_key_bytes(k), sk);
        }
        assert_eq!(indcpa_secret_key_bytes(2), 768);
        assert_eq!(polyvec_compressed_bytes(4), 1408);
        assert_eq!(poly_compressed_bytes(4), 160);
    }

    #[test]
    fn level_lookup() {
        assert_eq!(k_from_level(512).unwrap(), 2);
        assert_eq!(k_from_level(768).unwrap(), 3);
        assert_eq!(k_from_level(1024).unwrap(), 4);
        assert!(k_from_level(0).is_err());
        assert!(k_from_level(640).is_err());
    }
}
