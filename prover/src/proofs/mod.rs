//! The proof constructors.
//!
//! Each follows the same skeleton (validate, seed the rolling hash, derive
//! blinding factors from the kind's schema, squeeze the challenge, compute
//! responses, encode) and differs only in its schema and in which public
//! scalars enter the challenge.

pub mod burn;
pub mod dividend;
pub mod join_split;
pub mod mint;
pub mod range;
pub mod swap;

use ark_bn254::{Fr, G1Affine};

use aztec_primitives::field::{fq_to_hex, fr_to_hex};
use aztec_primitives::Note;

use crate::abi::ProofKind;
use crate::schema::BlindingFactor;

/// One emitted transcript record per note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofRecord {
    pub k_bar: Fr,
    pub a_bar: Fr,
    pub gamma: G1Affine,
    pub sigma: G1Affine,
}

impl ProofRecord {
    /// [kBar, aBar, γ.x, γ.y, σ.x, σ.y] as 0x-prefixed 32-byte words.
    pub fn to_hex(&self) -> [String; 6] {
        [
            fr_to_hex(self.k_bar),
            fr_to_hex(self.a_bar),
            fq_to_hex(self.gamma.x),
            fq_to_hex(self.gamma.y),
            fq_to_hex(self.sigma.x),
            fq_to_hex(self.sigma.y),
        ]
    }
}

/// A constructed proof: the raw records, the Fiat–Shamir challenge, the
/// ABI-encoded blob and the hash the validator returns on acceptance.
#[derive(Clone, Debug)]
pub struct ConstructedProof {
    pub kind: ProofKind,
    pub records: Vec<ProofRecord>,
    pub challenge: Fr,
    pub encoded: Vec<u8>,
    pub expected_output: [u8; 32],
}

impl ConstructedProof {
    pub fn challenge_hex(&self) -> String {
        fr_to_hex(self.challenge)
    }

    pub fn proof_data_hex(&self) -> Vec<[String; 6]> {
        self.records.iter().map(ProofRecord::to_hex).collect()
    }

    pub fn encoded_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.encoded))
    }

    pub fn expected_output_hex(&self) -> String {
        format!("0x{}", hex::encode(self.expected_output))
    }
}

/// Shared response computation: kBar = k·c + bk, aBar = a·c + ba, with one
/// optional repurposed kBar slot (the join-split family stores kPublic in
/// the final record; private range stores a canonical zero).
pub(crate) fn respond(
    notes: &[Note],
    factors: &[BlindingFactor],
    challenge: Fr,
    repurposed: Option<(usize, Fr)>,
) -> Vec<ProofRecord> {
    notes
        .iter()
        .zip(factors)
        .enumerate()
        .map(|(i, (note, factor))| {
            let k_bar = match repurposed {
                Some((index, value)) if index == i => value,
                _ => note.k() * challenge + factor.bk,
            };
            ProofRecord {
                k_bar,
                a_bar: note.a * challenge + factor.ba,
                gamma: note.gamma,
                sigma: note.sigma,
            }
        })
        .collect()
}
