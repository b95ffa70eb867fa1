//! Affine G1 validation, encoding and hashing onto the curve.
//!
//! Inputs are validated, never repaired: a coordinate at or above p or a
//! point off y² = x³ + 3 is rejected at the boundary so that nothing
//! malformed ever reaches a transcript.

use ark_bn254::{Fq, Fr, G1Affine, G1Projective};
use ark_ec::AffineRepr;
use ark_ff::{BigInteger, Field, PrimeField, Zero};
use rand::{CryptoRng, RngCore};
use tiny_keccak::{Hasher, Keccak};

use crate::error::ProofError;
use crate::field::{fq_from_be_bytes, fq_to_be_bytes};

/// Scalar multiplication through the bigint path, so the operand is always
/// a mod-n scalar and never a raw coordinate.
pub fn mul(point: &G1Affine, scalar: &Fr) -> G1Projective {
    point.mul_bigint(scalar.into_bigint())
}

/// Reject the identity and anything off the curve.
pub fn validate_point(point: &G1Affine) -> Result<(), ProofError> {
    if point.infinity || (point.x.is_zero() && point.y.is_zero()) {
        return Err(ProofError::PointAtInfinity);
    }
    if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(ProofError::NotOnCurve);
    }
    Ok(())
}

/// Decode an affine point from two canonical big-endian coordinates.
pub fn point_from_be_bytes(x: &[u8; 32], y: &[u8; 32]) -> Result<G1Affine, ProofError> {
    let x = fq_from_be_bytes(x)?;
    let y = fq_from_be_bytes(y)?;
    let point = G1Affine::new_unchecked(x, y);
    validate_point(&point)?;
    Ok(point)
}

/// Encode an affine point as (x, y) big-endian words.
pub fn point_to_be_bytes(point: &G1Affine) -> ([u8; 32], [u8; 32]) {
    (fq_to_be_bytes(point.x), fq_to_be_bytes(point.y))
}

/// Compress to 32 bytes: the x coordinate with the parity of y folded into
/// the top bit (p is 254 bits wide, so the bit is always free).
pub fn compress_point(point: &G1Affine) -> Result<[u8; 32], ProofError> {
    validate_point(point)?;
    let mut out = fq_to_be_bytes(point.x);
    if point.y.into_bigint().is_odd() {
        out[0] |= 0x80;
    }
    Ok(out)
}

/// Recover a point from its compressed form.
pub fn decompress_point(bytes: &[u8; 32]) -> Result<G1Affine, ProofError> {
    let mut x_bytes = *bytes;
    let y_is_odd = x_bytes[0] & 0x80 != 0;
    x_bytes[0] &= 0x7f;
    let x = fq_from_be_bytes(&x_bytes)?;
    let y_squared = x.square() * x + Fq::from(3u64);
    let y = y_squared.sqrt().ok_or(ProofError::NotOnCurve)?;
    let y = if y.into_bigint().is_odd() == y_is_odd { y } else { -y };
    let point = G1Affine::new_unchecked(x, y);
    validate_point(&point)?;
    Ok(point)
}

/// Keccak try-and-increment map onto the curve. Deterministic in `seed`.
///
/// Candidate x-coordinates are squeezed from keccak256(seed ‖ counter); the
/// first x with a square y² = x³ + 3 yields the point, taking the smaller
/// root so the output is canonical. BN254's G1 cofactor is one, so every
/// curve point is in the prime-order group.
pub fn map_to_point(seed: &[u8]) -> G1Affine {
    let mut counter = 0u32;
    loop {
        let mut hasher = Keccak::v256();
        let mut digest = [0u8; 32];
        hasher.update(seed);
        hasher.update(&counter.to_be_bytes());
        hasher.finalize(&mut digest);

        let x = Fq::from_be_bytes_mod_order(&digest);
        let y_squared = x.square() * x + Fq::from(3u64);
        if let Some(y) = y_squared.sqrt() {
            let y_neg = -y;
            let y = if y.into_bigint() <= y_neg.into_bigint() {
                y
            } else {
                y_neg
            };
            let point = G1Affine::new_unchecked(x, y);
            if !point.infinity && point.is_on_curve() {
                return point;
            }
        }
        counter += 1;
    }
}

/// A fresh curve point with no discrete log known to any party.
pub fn random_point<R: RngCore + CryptoRng>(rng: &mut R) -> G1Affine {
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);
    map_to_point(&seed)
}
