//! Private range: proves original ≥ comparison via a utility note with
//! k₀ = k₁ + k₂.

use ark_bn254::Fr;
use ark_ff::Zero;
use rand::{CryptoRng, RngCore};

use aztec_primitives::{Address, Note, ProofError, Transcript};

use crate::abi::{self, EncodeRequest, ProofKind};
use crate::challenge::ChallengeBuilder;
use crate::inputs::parse_inputs;
use crate::proofs::{respond, ConstructedProof};
use crate::schema::{construct_blinding_factors, BlindingSchema};

pub struct PrivateRangeInput {
    pub original_note: Note,
    pub comparison_note: Note,
    /// Must commit to original − comparison for the proof to verify.
    pub utility_note: Note,
    pub sender: Address,
}

pub fn prove<R: RngCore + CryptoRng>(
    input: &PrivateRangeInput,
    rng: &mut R,
) -> Result<ConstructedProof, ProofError> {
    let notes = [
        input.original_note.clone(),
        input.comparison_note.clone(),
        input.utility_note.clone(),
    ];
    parse_inputs(&notes, 0, &[0u8; 32])?;

    let mut rolling = Transcript::new();
    for note in &notes {
        rolling.append_point(&note.gamma);
        rolling.append_point(&note.sigma);
    }

    let schema = BlindingSchema::private_range();
    let factors = construct_blinding_factors(&notes, &schema, &mut rolling, Fr::zero(), 0, rng)?;

    let challenge = ChallengeBuilder::new(&input.sender)
        .notes(&notes)
        .blinding_factors(&factors)
        .finish();

    // The validator reconstructs kBar₂ = kBar₀ − kBar₁ and never reads the
    // third slot, so it carries a canonical zero.
    let records = respond(&notes, &factors, challenge, Some((2, Fr::zero())));

    let inputs = [input.original_note.clone(), input.comparison_note.clone()];
    let outputs = [input.utility_note.clone()];
    let (encoded, expected_output) = abi::encode_proof(&EncodeRequest {
        kind: ProofKind::PrivateRange,
        m: 0,
        public_owner: [0u8; 20],
        aux: [0u8; 32],
        input_notes: &inputs,
        output_notes: &outputs,
        records: &records,
        challenge,
    })?;

    Ok(ConstructedProof {
        kind: ProofKind::PrivateRange,
        records,
        challenge,
        encoded,
        expected_output,
    })
}
