//! Bilateral swap: four notes in two value-equal pairs.

use ark_bn254::Fr;
use ark_ff::Zero;
use rand::{CryptoRng, RngCore};

use aztec_primitives::{Address, Note, ProofError, Transcript};

use crate::abi::{self, EncodeRequest, ProofKind};
use crate::challenge::ChallengeBuilder;
use crate::inputs::parse_inputs;
use crate::proofs::{respond, ConstructedProof};
use crate::schema::{construct_blinding_factors, BlindingSchema};

pub struct BilateralSwapInput {
    /// Exactly four notes; (0, 2) and (1, 3) must commit to equal values.
    /// Notes 0 and 1 are the created (output) side, 2 and 3 the spent side.
    pub notes: Vec<Note>,
    pub sender: Address,
}

pub fn prove<R: RngCore + CryptoRng>(
    input: &BilateralSwapInput,
    rng: &mut R,
) -> Result<ConstructedProof, ProofError> {
    if input.notes.len() != 4 {
        return Err(ProofError::IncorrectNoteNumber);
    }
    parse_inputs(&input.notes, 0, &[0u8; 32])?;

    let mut rolling = Transcript::new();
    for note in &input.notes {
        rolling.append_point(&note.gamma);
        rolling.append_point(&note.sigma);
    }

    // The shared scalars are the proof: the challenge only closes when the
    // paired notes commit to equal values.
    let schema = BlindingSchema::bilateral_swap();
    let factors =
        construct_blinding_factors(&input.notes, &schema, &mut rolling, Fr::zero(), 0, rng)?;

    let challenge = ChallengeBuilder::new(&input.sender)
        .notes(&input.notes)
        .blinding_factors(&factors)
        .finish();

    let records = respond(&input.notes, &factors, challenge, None);

    let spent = [input.notes[2].clone(), input.notes[3].clone()];
    let created = [input.notes[0].clone(), input.notes[1].clone()];
    let (encoded, expected_output) = abi::encode_proof(&EncodeRequest {
        kind: ProofKind::BilateralSwap,
        m: 0,
        public_owner: [0u8; 20],
        aux: [0u8; 32],
        input_notes: &spent,
        output_notes: &created,
        records: &records,
        challenge,
    })?;

    Ok(ConstructedProof {
        kind: ProofKind::BilateralSwap,
        records,
        challenge,
        encoded,
        expected_output,
    })
}
