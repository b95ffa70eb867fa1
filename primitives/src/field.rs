//! Canonical codecs for the two modular contexts.
//!
//! `Fr` is the scalar field (mod n, the BN254 group order) and `Fq` the base
//! field (mod p, coordinates). Decoding is strict: a 32-byte value at or
//! above the modulus is rejected, never silently reduced. Reduction happens
//! only where the protocol says it does, inside the transcript squeeze.

use ark_bn254::{Fq, Fr};
use ark_ff::{BigInteger, BigInteger256, PrimeField, Zero};
use rand::{CryptoRng, RngCore};

use crate::error::ProofError;

fn bigint_from_be(bytes: &[u8; 32]) -> BigInteger256 {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let start = 32 - 8 * (i + 1);
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&bytes[start..start + 8]);
        *limb = u64::from_be_bytes(chunk);
    }
    BigInteger256::new(limbs)
}

/// Decode a canonical scalar mod n.
pub fn fr_from_be_bytes(bytes: &[u8; 32]) -> Result<Fr, ProofError> {
    Fr::from_bigint(bigint_from_be(bytes)).ok_or(ProofError::ScalarTooBig)
}

/// Decode a canonical coordinate mod p.
pub fn fq_from_be_bytes(bytes: &[u8; 32]) -> Result<Fq, ProofError> {
    Fq::from_bigint(bigint_from_be(bytes)).ok_or(ProofError::NotOnCurve)
}

pub fn fr_to_be_bytes(scalar: Fr) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&scalar.into_bigint().to_bytes_be());
    out
}

pub fn fq_to_be_bytes(element: Fq) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&element.into_bigint().to_bytes_be());
    out
}

pub fn fr_to_hex(scalar: Fr) -> String {
    format!("0x{}", hex::encode(fr_to_be_bytes(scalar)))
}

pub fn fq_to_hex(element: Fq) -> String {
    format!("0x{}", hex::encode(fq_to_be_bytes(element)))
}

/// Parse a 0x-prefixed (or bare) hex scalar of at most 32 bytes.
pub fn fr_from_hex(hex_str: &str) -> Result<Fr, ProofError> {
    fr_from_be_bytes(&word_from_hex(hex_str)?)
}

pub fn fq_from_hex(hex_str: &str) -> Result<Fq, ProofError> {
    fq_from_be_bytes(&word_from_hex(hex_str)?)
}

/// Left-pad a hex string into a 32-byte word.
pub fn word_from_hex(hex_str: &str) -> Result<[u8; 32], ProofError> {
    let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let padded = if stripped.len() % 2 == 1 {
        format!("0{stripped}")
    } else {
        stripped.to_owned()
    };
    let bytes = hex::decode(&padded).map_err(|_| ProofError::EncodingInvalidLength)?;
    if bytes.len() > 32 {
        return Err(ProofError::EncodingInvalidLength);
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

/// Rejection-sample a uniform non-zero scalar from 32-byte draws.
///
/// Draws are discarded (not reduced) when they land at or above n, so the
/// output distribution is exactly uniform over (0, n).
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Fr {
    loop {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        if let Ok(scalar) = fr_from_be_bytes(&bytes) {
            if !scalar.is_zero() {
                return scalar;
            }
        }
    }
}
