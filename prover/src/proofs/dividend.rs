//! Dividend computation: proves zb·k₀ = za·k₁ + k₂ for public integers
//! (za, zb), the residual note absorbing rounding slack.

use ark_bn254::Fr;
use rand::{CryptoRng, RngCore};

use aztec_primitives::{Address, Note, ProofError, Transcript, K_MAX};

use crate::abi::{self, EncodeRequest, ProofKind};
use crate::challenge::ChallengeBuilder;
use crate::inputs::parse_inputs;
use crate::proofs::{respond, ConstructedProof};
use crate::schema::{construct_blinding_factors, BlindingSchema};

pub struct DividendInput {
    /// k₀, the note the ratio is taken of.
    pub source_note: Note,
    /// k₁, the computed dividend.
    pub target_note: Note,
    /// k₂, the rounding residual.
    pub residual_note: Note,
    pub za: u64,
    pub zb: u64,
    pub sender: Address,
}

pub fn prove<R: RngCore + CryptoRng>(
    input: &DividendInput,
    rng: &mut R,
) -> Result<ConstructedProof, ProofError> {
    if input.za > K_MAX || input.zb > K_MAX {
        return Err(ProofError::ScalarTooBig);
    }
    let za = Fr::from(input.za);
    let zb = Fr::from(input.zb);

    let notes = [
        input.source_note.clone(),
        input.target_note.clone(),
        input.residual_note.clone(),
    ];
    parse_inputs(&notes, 0, &[0u8; 32])?;

    let mut rolling = Transcript::new();
    for note in &notes {
        rolling.append_point(&note.gamma);
        rolling.append_point(&note.sigma);
    }

    let schema = BlindingSchema::dividend(za, zb);
    let factors = construct_blinding_factors(&notes, &schema, &mut rolling, Fr::from(0u64), 0, rng)?;

    let challenge = ChallengeBuilder::new(&input.sender)
        .scalar(za)
        .scalar(zb)
        .notes(&notes)
        .blinding_factors(&factors)
        .finish();

    let records = respond(&notes, &factors, challenge, None);

    let inputs = [input.source_note.clone()];
    let outputs = [input.target_note.clone(), input.residual_note.clone()];
    let (encoded, expected_output) = abi::encode_proof(&EncodeRequest {
        kind: ProofKind::Dividend,
        m: 0,
        public_owner: [0u8; 20],
        aux: [0u8; 32],
        input_notes: &inputs,
        output_notes: &outputs,
        records: &records,
        challenge,
    })?;

    Ok(ConstructedProof {
        kind: ProofKind::Dividend,
        records,
        challenge,
        encoded,
        expected_output,
    })
}
