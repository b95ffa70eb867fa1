//! # aztec-verifier: off-chain reference verification
//!
//! Mirrors, bit for bit, the checks the on-chain validator performs: decode
//! the blob, re-validate every point and scalar, rebuild the rolling hash,
//! reconstruct the derived response slots, recompute each blinding point
//! B = kBar·h + aBar·γ − c·σ, and compare the recomputed Fiat–Shamir
//! challenge against the transmitted one. Any mismatch is
//! `CHALLENGE_RESPONSE_FAIL`.
//!
//! Used by the test suite for round-trip coverage and by relayers that want
//! to reject bad proofs before paying gas.

use ark_bn254::{Fr, G1Affine};
use ark_ec::CurveGroup;
use ark_ff::Zero;

use aztec_primitives::field::fr_to_be_bytes;
use aztec_primitives::{crs, keccak256, mul, Address, ProofError, Transcript, K_MAX};

use aztec_prover::abi::{decode_proof, DecodedProof};
use aztec_prover::proofs::ProofRecord;
use aztec_prover::ChallengeBuilder;

#[cfg(test)]
mod tests;

fn record_note_hash(record: &ProofRecord) -> [u8; 32] {
    use aztec_primitives::point_to_be_bytes;
    let (gx, gy) = point_to_be_bytes(&record.gamma);
    let (sx, sy) = point_to_be_bytes(&record.sigma);
    let mut buffer = Vec::with_capacity(128);
    buffer.extend_from_slice(&gx);
    buffer.extend_from_slice(&gy);
    buffer.extend_from_slice(&sx);
    buffer.extend_from_slice(&sy);
    keccak256(&buffer)
}

fn seeded_rolling(records: &[ProofRecord]) -> Transcript {
    let mut rolling = Transcript::new();
    for record in records {
        rolling.append_point(&record.gamma);
        rolling.append_point(&record.sigma);
    }
    rolling
}

/// B = kBar·h + aBar·γ − c·σ.
fn recombine(record: &ProofRecord, k_bar: Fr, challenge: Fr) -> G1Affine {
    let h = crs::crs().h;
    (mul(&h, &k_bar) + mul(&record.gamma, &record.a_bar) - mul(&record.sigma, &challenge))
        .into_affine()
}

fn accept(recomputed: Fr, transmitted: Fr) -> Result<(), ProofError> {
    if recomputed == transmitted {
        Ok(())
    } else {
        Err(ProofError::ChallengeResponseFail)
    }
}

// --------------------------- join-split ---------------------------

/// Verify a join-split proof. The final record's kBar slot carries kPublic;
/// the displaced response is reconstructed from the balance relation
/// Σ kBar_in − Σ kBar_out = kPublic·c + kPublic·x.
pub fn verify_join_split(blob: &[u8], sender: &Address) -> Result<(), ProofError> {
    let proof = decode_proof(blob)?;
    let k_public = final_slot(&proof)?;
    if proof.aux != fr_to_be_bytes(k_public) {
        return Err(ProofError::ChallengeResponseFail);
    }
    verify_balance_family(&proof, sender, k_public, true)
}

/// Verify a mint proof: m = 1, kPublic = 0 and the header aux word bound to
/// the new-total note (the first record).
pub fn verify_mint(blob: &[u8], sender: &Address) -> Result<(), ProofError> {
    verify_supply_adjustment(blob, sender)
}

/// Verify a burn proof; structurally identical to mint.
pub fn verify_burn(blob: &[u8], sender: &Address) -> Result<(), ProofError> {
    verify_supply_adjustment(blob, sender)
}

fn verify_supply_adjustment(blob: &[u8], sender: &Address) -> Result<(), ProofError> {
    let proof = decode_proof(blob)?;
    if proof.records.len() < 3 {
        return Err(ProofError::IncorrectNoteNumber);
    }
    if proof.m != 1 {
        return Err(ProofError::MTooBig);
    }
    let k_public = final_slot(&proof)?;
    if !k_public.is_zero() {
        return Err(ProofError::ChallengeResponseFail);
    }
    if proof.aux != record_note_hash(&proof.records[0]) {
        return Err(ProofError::ChallengeResponseFail);
    }
    verify_balance_family(&proof, sender, k_public, false)
}

fn final_slot(proof: &DecodedProof) -> Result<Fr, ProofError> {
    proof
        .records
        .last()
        .map(|record| record.k_bar)
        .ok_or(ProofError::IncorrectNoteNumber)
}

fn verify_balance_family(
    proof: &DecodedProof,
    sender: &Address,
    k_public: Fr,
    with_public_owner: bool,
) -> Result<(), ProofError> {
    let records = &proof.records;
    let n = records.len();
    if n == 0 {
        return Err(ProofError::IncorrectNoteNumber);
    }
    let m = proof.m;
    if m > n {
        return Err(ProofError::MTooBig);
    }
    let challenge = proof.challenge;

    let mut rolling = seeded_rolling(records);
    let x = rolling.squeeze_fr();

    // Reconstruct the response displaced by the kPublic slot.
    let mut sum = Fr::zero();
    for (i, record) in records.iter().enumerate().take(n - 1) {
        if i < m {
            sum += record.k_bar;
        } else {
            sum -= record.k_bar;
        }
    }
    let public_term = k_public * challenge + k_public * x;
    let k_bar_final = if m == n { public_term - sum } else { sum - public_term };

    let blinding_points: Vec<G1Affine> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let k_bar = if i == n - 1 { k_bar_final } else { record.k_bar };
            recombine(record, k_bar, challenge)
        })
        .collect();

    let mut builder = ChallengeBuilder::new(sender)
        .public_value(k_public)
        .num_input_notes(m);
    if with_public_owner {
        builder = builder.public_owner(&proof.public_owner);
    }
    let recomputed = builder
        .note_points(records.iter().map(|r| (r.gamma, r.sigma)))
        .points(blinding_points)
        .finish();
    accept(recomputed, challenge)
}

// ------------------------------ swap ------------------------------

/// Verify a bilateral swap: the verifier substitutes the first pair's
/// responses for the second pair's, so the challenge only closes when the
/// paired notes commit to equal values.
pub fn verify_bilateral_swap(blob: &[u8], sender: &Address) -> Result<(), ProofError> {
    let proof = decode_proof(blob)?;
    let records = &proof.records;
    if records.len() != 4 {
        return Err(ProofError::IncorrectNoteNumber);
    }
    let challenge = proof.challenge;

    let blinding_points: Vec<G1Affine> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let k_bar = if i >= 2 { records[i - 2].k_bar } else { record.k_bar };
            recombine(record, k_bar, challenge)
        })
        .collect();

    let recomputed = ChallengeBuilder::new(sender)
        .note_points(records.iter().map(|r| (r.gamma, r.sigma)))
        .points(blinding_points)
        .finish();
    accept(recomputed, challenge)
}

// ---------------------------- dividend ----------------------------

/// Verify a dividend proof of zb·k₀ = za·k₁ + k₂.
pub fn verify_dividend(
    blob: &[u8],
    sender: &Address,
    za: u64,
    zb: u64,
) -> Result<(), ProofError> {
    if za > K_MAX || zb > K_MAX {
        return Err(ProofError::ScalarTooBig);
    }
    let proof = decode_proof(blob)?;
    let records = &proof.records;
    if records.len() != 3 {
        return Err(ProofError::IncorrectNoteNumber);
    }
    let challenge = proof.challenge;
    let (za, zb) = (Fr::from(za), Fr::from(zb));

    let derived = zb * records[0].k_bar - za * records[1].k_bar;
    let blinding_points: Vec<G1Affine> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let k_bar = if i == 2 { derived } else { record.k_bar };
            recombine(record, k_bar, challenge)
        })
        .collect();

    let recomputed = ChallengeBuilder::new(sender)
        .scalar(za)
        .scalar(zb)
        .note_points(records.iter().map(|r| (r.gamma, r.sigma)))
        .points(blinding_points)
        .finish();
    accept(recomputed, challenge)
}

// ------------------------------ range ------------------------------

/// Verify a private-range proof of k₀ = k₁ + k₂. The third kBar slot is
/// never read; a canonical zero and the legacy random filler both verify.
pub fn verify_private_range(blob: &[u8], sender: &Address) -> Result<(), ProofError> {
    let proof = decode_proof(blob)?;
    let records = &proof.records;
    if records.len() != 3 {
        return Err(ProofError::IncorrectNoteNumber);
    }
    let challenge = proof.challenge;

    let mut rolling = seeded_rolling(records);
    let derived = records[0].k_bar - records[1].k_bar;

    let blinding_points: Vec<G1Affine> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let k_bar = if i == 2 { derived } else { record.k_bar };
            let b = recombine(record, k_bar, challenge);
            if i == 0 {
                b
            } else {
                let x = rolling.squeeze_fr();
                mul(&b, &x).into_affine()
            }
        })
        .collect();

    let recomputed = ChallengeBuilder::new(sender)
        .note_points(records.iter().map(|r| (r.gamma, r.sigma)))
        .points(blinding_points)
        .finish();
    accept(recomputed, challenge)
}
