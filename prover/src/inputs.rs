//! Shared input validation.
//!
//! Every constructor funnels its notes through here before anything touches
//! a transcript. Checks run in a fixed order so a given malformation always
//! surfaces as the same error kind.

use ark_bn254::Fr;
use ark_ff::Zero;

use aztec_primitives::field::{fr_from_be_bytes, fr_to_be_bytes};
use aztec_primitives::{Note, ProofError};

/// Validate the shared proof inputs and decode the public value.
///
/// - `notes` must be non-empty (`INCORRECT_NOTE_NUMBER`),
/// - `m` must not exceed the note count (`M_TOO_BIG`),
/// - `public_value` must be a canonical scalar mod n (`KPUBLIC_MALFORMED`),
/// - every note's gamma and sigma must be on-curve, non-identity points and
///   the note value and viewing key in range.
pub fn parse_inputs(notes: &[Note], m: usize, public_value: &[u8; 32]) -> Result<Fr, ProofError> {
    if notes.is_empty() {
        return Err(ProofError::IncorrectNoteNumber);
    }
    if m > notes.len() {
        return Err(ProofError::MTooBig);
    }
    let k_public =
        fr_from_be_bytes(public_value).map_err(|_| ProofError::KPublicMalformed)?;
    for note in notes {
        note.validate()?;
    }
    Ok(k_public)
}

/// Encode a public value as the 32-byte word the constructors accept.
///
/// Positive values are withdrawals; a deposit of `v` is the negated scalar
/// n − v.
pub fn public_value_word(value: u64, deposit: bool) -> [u8; 32] {
    let scalar = Fr::from(value);
    let scalar = if deposit && !scalar.is_zero() {
        -scalar
    } else {
        scalar
    };
    fr_to_be_bytes(scalar)
}
