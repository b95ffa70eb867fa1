//! Mint: join-split restricted to a total-supply increase.
//!
//! The note array is [new total, current total, ...minted] with the new
//! total as the single input, so the balance relation reads
//! new = current + Σ minted with kPublic = 0. The ABI kPublic header word
//! carries the new-total note hash instead.

use ark_bn254::Fr;
use rand::{CryptoRng, RngCore};

use aztec_primitives::{Address, Note, ProofError, Transcript};

use crate::abi::{self, EncodeRequest, ProofKind};
use crate::challenge::ChallengeBuilder;
use crate::inputs::parse_inputs;
use crate::proofs::{respond, ConstructedProof};
use crate::schema::{construct_blinding_factors, BlindingSchema};

pub struct MintInput {
    pub current_total_note: Note,
    pub new_total_note: Note,
    pub minted_notes: Vec<Note>,
    pub sender: Address,
}

pub fn prove<R: RngCore + CryptoRng>(
    input: &MintInput,
    rng: &mut R,
) -> Result<ConstructedProof, ProofError> {
    prove_adjustment(
        ProofKind::Mint,
        &input.new_total_note,
        &input.current_total_note,
        &input.minted_notes,
        &input.sender,
        rng,
    )
}

/// Shared by mint and burn; the two differ only in which registry total the
/// validator updates.
pub(crate) fn prove_adjustment<R: RngCore + CryptoRng>(
    kind: ProofKind,
    new_total_note: &Note,
    current_total_note: &Note,
    adjusted_notes: &[Note],
    sender: &Address,
    rng: &mut R,
) -> Result<ConstructedProof, ProofError> {
    if adjusted_notes.is_empty() {
        return Err(ProofError::IncorrectNoteNumber);
    }
    let mut notes = Vec::with_capacity(2 + adjusted_notes.len());
    notes.push(new_total_note.clone());
    notes.push(current_total_note.clone());
    notes.extend_from_slice(adjusted_notes);

    let m = 1;
    let k_public = parse_inputs(&notes, m, &[0u8; 32])?;

    let mut rolling = Transcript::new();
    for note in &notes {
        rolling.append_point(&note.gamma);
        rolling.append_point(&note.sigma);
    }
    let x = rolling.squeeze_fr();
    let bk_public = k_public * x;

    let schema = BlindingSchema::join_split(notes.len(), m);
    let factors = construct_blinding_factors(&notes, &schema, &mut rolling, bk_public, m, rng)?;

    let challenge = ChallengeBuilder::new(sender)
        .public_value(k_public)
        .num_input_notes(m)
        .notes(&notes)
        .blinding_factors(&factors)
        .finish();

    let records = respond(&notes, &factors, challenge, Some((notes.len() - 1, Fr::from(0u64))));

    let outputs: Vec<Note> = notes[1..].to_vec();
    let inputs = [new_total_note.clone()];
    let (encoded, expected_output) = abi::encode_proof(&EncodeRequest {
        kind,
        m,
        public_owner: [0u8; 20],
        aux: new_total_note.hash(),
        input_notes: &inputs,
        output_notes: &outputs,
        records: &records,
        challenge,
    })?;

    Ok(ConstructedProof {
        kind,
        records,
        challenge,
        encoded,
        expected_output,
    })
}
