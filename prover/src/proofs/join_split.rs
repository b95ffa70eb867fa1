//! Join-split: the canonical value-balance proof.
//!
//! Proves Σ input values − Σ output values = kPublic without revealing any
//! individual value. Every other proof in the family is a restriction of
//! this skeleton.

use rand::{CryptoRng, RngCore};

use aztec_primitives::{Address, Note, ProofError, Transcript};

use crate::abi::{self, EncodeRequest, ProofKind};
use crate::challenge::ChallengeBuilder;
use crate::inputs::parse_inputs;
use crate::proofs::{respond, ConstructedProof};
use crate::schema::{construct_blinding_factors, BlindingSchema};

pub struct JoinSplitInput {
    pub input_notes: Vec<Note>,
    pub output_notes: Vec<Note>,
    pub sender: Address,
    /// Canonical scalar mod n: positive = withdrawal, n − v = deposit of v.
    pub public_value: [u8; 32],
    pub public_owner: Address,
}

pub fn prove<R: RngCore + CryptoRng>(
    input: &JoinSplitInput,
    rng: &mut R,
) -> Result<ConstructedProof, ProofError> {
    let m = input.input_notes.len();
    let notes: Vec<Note> = input
        .input_notes
        .iter()
        .chain(&input.output_notes)
        .cloned()
        .collect();
    let k_public = parse_inputs(&notes, m, &input.public_value)?;

    let mut rolling = Transcript::new();
    for note in &notes {
        rolling.append_point(&note.gamma);
        rolling.append_point(&note.sigma);
    }
    let x = rolling.squeeze_fr();
    let bk_public = k_public * x;

    let schema = BlindingSchema::join_split(notes.len(), m);
    let factors = construct_blinding_factors(&notes, &schema, &mut rolling, bk_public, m, rng)?;

    let challenge = ChallengeBuilder::new(&input.sender)
        .public_value(k_public)
        .num_input_notes(m)
        .public_owner(&input.public_owner)
        .notes(&notes)
        .blinding_factors(&factors)
        .finish();

    // The final kBar slot carries kPublic; the validator reconstructs the
    // response it displaces from the balance relation.
    let records = respond(&notes, &factors, challenge, Some((notes.len() - 1, k_public)));

    let (encoded, expected_output) = abi::encode_proof(&EncodeRequest {
        kind: ProofKind::JoinSplit,
        m,
        public_owner: input.public_owner,
        aux: input.public_value,
        input_notes: &input.input_notes,
        output_notes: &input.output_notes,
        records: &records,
        challenge,
    })?;

    Ok(ConstructedProof {
        kind: ProofKind::JoinSplit,
        records,
        challenge,
        encoded,
        expected_output,
    })
}
