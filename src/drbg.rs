// AES-256 CTR-DRBG in the PQCgenKAT style: 48-byte seed, Key/V state,
// update after every generate call. Used by the known-answer tests to
// reproduce a fixed byte stream; not an entropy source.

use aes::Aes256;
use cipher::generic_array::GenericArray;
use cipher::{BlockEncrypt, KeyInit};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

pub const DRBG_SEED_BYTES: usize = 48;

pub struct CtrDrbg {
    key: [u8; 32],
    v: [u8; 16],
}

impl CtrDrbg {
    pub fn from_seed(seed: &[u8; DRBG_SEED_BYTES]) -> Self {
        let mut drbg = CtrDrbg {
            key: [0u8; 32],
            v: [0u8; 16],
        };
        drbg.update(Some(seed));
        drbg
    }

    /// Increments V and returns AES-256_Key(V).
    fn next_block(&mut self) -> [u8; 16] {
        for byte in self.v.iter_mut().rev() {
            let (incremented, carry) = byte.overflowing_add(1);
            *byte = incremented;
            if !carry {
                break;
            }
        }
        let cipher = Aes256::new(GenericArray::from_slice(&self.key));
        let mut block = GenericArray::clone_from_slice(&self.v);
        cipher.encrypt_block(&mut block);
        let mut out = [0u8; 16];
        out.copy_from_slice(&block);
        out
    }

    fn update(&mut self, provided: Option<&[u8; DRBG_SEED_BYTES]>) {
        let mut temp = [0u8; DRBG_SEED_BYTES];
        for chunk in temp.chunks_mut(16) {
            chunk.copy_from_slice(&self.next_block());
        }
        if let Some(data) = provided {
            for (t, d) in temp.iter_mut().zip(data.iter()) {
                *t ^= d;
            }
        }
        self.key.copy_from_slice(&temp[..32]);
        self.v.copy_from_slice(&temp[32..]);
        temp.zeroize();
    }

    pub fn fill(&mut self, out: &mut [u8]) {
        for chunk in out.chunks_mut(16) {
            let block = self.next_block();
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        self.update(None);
    }
}

impl RngCore for CtrDrbg {
    fn next_u32(&mut self) -> u32 {
        let mut b = [0u8; 4];
        self.fill(&mut b);
        u32::from_le_bytes(b)
    }

    fn next_u64(&mut self) -> u64 {
        let mut b = [0u8; 8];
        self.fill(&mut b);
        u64::from_le_bytes(b)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill(dest);
        Ok(())
    }
}

// Deterministic by design; the marker only states it is suitable where a
// cryptographic generator is expected, as in KAT harnesses.
impl CryptoRng for CtrDrbg {}

impl Drop for CtrDrbg {
    fn drop(&mut self) {
        self.key.zeroize();
        self.v.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let seed = {
            let mut s = [0u8; DRBG_SEED_BYTES];
            for (i, b) in s.iter_mut().enumerate() {
                *b = i as u8;
            }
            s
        };
        let mut a = CtrDrbg::from_seed(&seed);
        let mut b = CtrDrbg::from_seed(&seed);
        let mut x = [0u8; 96];
        let mut y = [0u8; 96];
        a.fill(&mut x);
        b.fill(&mut y);
        assert_eq!(x, y);

        // Streams advance: a second draw must differ from the first.
        a.fill(&mut y);
        assert_ne!(x, y);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = CtrDrbg::from_seed(&[0u8; DRBG_SEED_BYTES]);
        let mut b = CtrDrbg::from_seed(&[1u8; DRBG_SEED_BYTES]);
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        a.fill(&mut x);
        b.fill(&mut y);
        assert_ne!(x, y);
    }
}
