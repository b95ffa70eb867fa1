//! # aztec-prover: sigma-protocol proof construction
//!
//! Client-side construction of the AZTEC proof family. Each constructor
//! takes input and output notes plus proof-specific scalars, derives
//! blinding factors, computes the Fiat–Shamir challenge over the exact byte
//! sequence the validator recomputes, and emits the response transcript
//! together with the ABI-encoded blob and the expected validator output
//! hash.
//!
//! ## Proof kinds
//!
//! - [`proofs::join_split`]: m input notes, N−m output notes and a public
//!   value; proves value balance. The canonical form every other proof is a
//!   restriction of.
//! - [`proofs::swap`]: four notes in two value-equal pairs.
//! - [`proofs::dividend`]: three notes and public integers (za, zb) with
//!   zb·k₀ = za·k₁ + k₂.
//! - [`proofs::range`]: three notes with k₀ = k₁ + k₂, proving k₀ ≥ k₁.
//! - [`proofs::mint`] / [`proofs::burn`]: join-split restricted to total
//!   supply adjustments.
//!
//! ## Blob layout
//!
//! Words are 32 bytes, big-endian:
//!
//! ```text
//! word 0        total byte length
//! word 1        challenge
//! word 2        m
//! word 3        publicOwner (left-padded address)
//! word 4        kPublic, or the new-total note hash for mint/burn
//! word 5        note record count
//! per record    0xC0 length word, then kBar ‖ aBar ‖ γ.x ‖ γ.y ‖ σ.x ‖ σ.y
//! tail          inputOwners[], outputOwners[], output-note metadata
//!               (noteHash ‖ ephemeral key bytes)
//! ```
//!
//! Every record response is a scalar mod n; every coordinate a canonical
//! mod-p element. Decoding re-validates all of it.
//!
//! Constructors take `&mut (impl RngCore + CryptoRng)`. Tests inject
//! `ChaCha20Rng::from_seed`; production callers pass the OS generator.

pub mod abi;
pub mod challenge;
pub mod inputs;
pub mod proofs;
pub mod schema;

#[cfg(test)]
mod tests;

pub use abi::{decode_proof, DecodedProof, ProofKind};
pub use challenge::ChallengeBuilder;
pub use inputs::{parse_inputs, public_value_word};
pub use proofs::{
    burn::{self, BurnInput},
    dividend::{self, DividendInput},
    join_split::{self, JoinSplitInput},
    mint::{self, MintInput},
    range::{self, PrivateRangeInput},
    swap::{self, BilateralSwapInput},
    ConstructedProof, ProofRecord,
};
pub use schema::{construct_blinding_factors, BkRule, BlindingFactor, BlindingSchema};
