// Known-answer-style determinism: the PQCgenKAT CTR-DRBG drives the KEM
// through the generic RNG interface, and every byte of every artifact must
// reproduce run over run. The zero seed anchors a minimal fixed corpus.

use kyber_kem::drbg::{CtrDrbg, DRBG_SEED_BYTES};
use kyber_kem::params::SSBYTES;
use kyber_kem::{kem_decaps, kem_encaps_with_rng, kem_keypair_with_rng};

const LEVELS: [usize; 3] = [512, 768, 1024];
const VECTORS_PER_LEVEL: usize = 3;

struct KatRecord {
    pk: Vec<u8>,
    sk: Vec<u8>,
    ct: Vec<u8>,
    ss: Vec<u8>,
}

/// Generates the vector corpus for one level: a master DRBG seeded with
/// zeros hands each case its own 48-byte seed, PQCgenKAT style.
fn generate_corpus(level: usize) -> Vec<KatRecord> {
    let mut master = CtrDrbg::from_seed(&[0u8; DRBG_SEED_BYTES]);
    let mut corpus = Vec::new();
    for _ in 0..VECTORS_PER_LEVEL {
        let mut case_seed = [0u8; DRBG_SEED_BYTES];
        master.fill(&mut case_seed);

        let mut drbg = CtrDrbg::from_seed(&case_seed);
        let (sk, pk) = kem_keypair_with_rng(level, &mut drbg).unwrap();
        let (ct, ss) = kem_encaps_with_rng(&pk, level, &mut drbg).unwrap();
        corpus.push(KatRecord { pk, sk, ct, ss });
    }
    corpus
}

#[test]
fn corpus_reproduces_byte_for_byte() {
    for level in LEVELS {
        let a = generate_corpus(level);
        let b = generate_corpus(level);
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            assert_eq!(hex::encode(&x.pk), hex::encode(&y.pk), "pk {level}/{i}");
            assert_eq!(hex::encode(&x.sk), hex::encode(&y.sk), "sk {level}/{i}");
            assert_eq!(hex::encode(&x.ct), hex::encode(&y.ct), "ct {level}/{i}");
            assert_eq!(hex::encode(&x.ss), hex::encode(&y.ss), "ss {level}/{i}");
        }
    }
}

#[test]
fn corpus_decapsulates_to_recorded_secret() {
    for level in LEVELS {
        for (i, case) in generate_corpus(level).iter().enumerate() {
            let ss = kem_decaps(&case.ct, &case.sk, level).unwrap();
            assert_eq!(ss, case.ss, "level {level} case {i}");
            assert_eq!(ss.len(), SSBYTES);
        }
    }
}

#[test]
fn cases_within_a_corpus_are_distinct() {
    for level in LEVELS {
        let corpus = generate_corpus(level);
        for i in 0..corpus.len() {
            for j in i + 1..corpus.len() {
                assert_ne!(corpus[i].pk, corpus[j].pk);
                assert_ne!(corpus[i].ss, corpus[j].ss);
            }
        }
    }
}
