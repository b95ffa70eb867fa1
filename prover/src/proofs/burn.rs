//! Burn: join-split restricted to a total-burned increase.
//!
//! Structurally identical to mint: the burned-total registry accumulates,
//! so the new burned total is the single input and
//! new = current + Σ burned.

use rand::{CryptoRng, RngCore};

use aztec_primitives::{Address, Note, ProofError};

use crate::abi::ProofKind;
use crate::proofs::mint::prove_adjustment;
use crate::proofs::ConstructedProof;

pub struct BurnInput {
    pub current_total_note: Note,
    pub new_total_note: Note,
    pub burned_notes: Vec<Note>,
    pub sender: Address,
}

pub fn prove<R: RngCore + CryptoRng>(
    input: &BurnInput,
    rng: &mut R,
) -> Result<ConstructedProof, ProofError> {
    prove_adjustment(
        ProofKind::Burn,
        &input.new_total_note,
        &input.current_total_note,
        &input.burned_notes,
        &input.sender,
        rng,
    )
}
