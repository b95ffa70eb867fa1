//! Fiat–Shamir challenge derivation.
//!
//! The append order is part of the protocol: sender, then the proof's
//! public scalars, then every note's (gamma, sigma), then every blinding B
//! point. A validator that hashes the same bytes in any other order will
//! never reproduce the challenge.

use ark_bn254::{Fr, G1Affine};

use aztec_primitives::{Address, Note, Transcript};

use crate::schema::BlindingFactor;

/// Builder over a fresh transcript; the caller chains appends in its proof
/// kind's canonical order and finishes to a scalar mod n.
pub struct ChallengeBuilder {
    transcript: Transcript,
}

impl ChallengeBuilder {
    pub fn new(sender: &Address) -> Self {
        let mut transcript = Transcript::new();
        transcript.append_address(sender);
        Self { transcript }
    }

    pub fn public_value(mut self, k_public: Fr) -> Self {
        self.transcript.append_fr(k_public);
        self
    }

    pub fn num_input_notes(mut self, m: usize) -> Self {
        self.transcript.append_u64(m as u64);
        self
    }

    pub fn public_owner(mut self, owner: &Address) -> Self {
        self.transcript.append_address(owner);
        self
    }

    /// Proof-specific public scalar (za, zb for the dividend proof).
    pub fn scalar(mut self, value: Fr) -> Self {
        self.transcript.append_fr(value);
        self
    }

    pub fn notes(self, notes: &[Note]) -> Self {
        self.note_points(notes.iter().map(|note| (note.gamma, note.sigma)))
    }

    /// Raw (gamma, sigma) pairs, for callers that only hold decoded records.
    pub fn note_points(
        mut self,
        pairs: impl IntoIterator<Item = (G1Affine, G1Affine)>,
    ) -> Self {
        for (gamma, sigma) in pairs {
            self.transcript.append_point(&gamma);
            self.transcript.append_point(&sigma);
        }
        self
    }

    pub fn blinding_factors(self, factors: &[BlindingFactor]) -> Self {
        self.points(factors.iter().map(|factor| factor.b))
    }

    pub fn points(mut self, points: impl IntoIterator<Item = G1Affine>) -> Self {
        for point in points {
            self.transcript.append_point(&point);
        }
        self
    }

    pub fn finish(mut self) -> Fr {
        self.transcript.squeeze_fr()
    }
}
