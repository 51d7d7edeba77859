//! CRYSTALS-Kyber key encapsulation mechanism (Kyber-512/768/1024).
//!
//! Lattice-based IND-CCA2 KEM over R_q = Z_3329[X]/(X^256 + 1): negacyclic
//! NTT arithmetic, centered-binomial noise, rejection-sampled public
//! matrices and the canonical bit-packed wire formats, wrapped by the
//! Fujisaki-Okamoto transform with implicit rejection.
//!
//! ```
//! use kyber_kem::{kem_keypair, kem_encaps, kem_decaps};
//!
//! let (sk, pk) = kem_keypair(768)?;
//! let (ct, ss_sender) = kem_encaps(&pk, 768)?;
//! let ss_receiver = kem_decaps(&ct, &sk, 768)?;
//! assert_eq!(ss_sender, ss_receiver);
//! # Ok::<(), kyber_kem::KyberError>(())
//! ```

pub mod arith;
pub mod codec;
pub mod drbg;
pub mod error;
pub mod indcpa;
pub mod kem;
pub mod ntt;
pub mod params;
pub mod poly;
pub mod rng;
pub mod sampling;
pub mod symmetric;

pub use error::KyberError;
pub use kem::{
    kem_decaps, kem_encaps, kem_encaps_deterministic, kem_encaps_with_rng, kem_keypair,
    kem_keypair_deterministic, kem_keypair_with_rng,
};
