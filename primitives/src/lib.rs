//! # aztec-primitives: BN254 arithmetic, transcripts and notes
//!
//! Building blocks shared by the AZTEC sigma-protocol provers:
//!
//! - [`field`]: canonical big-endian codecs for the two modular contexts
//!   (`Fr`, scalars mod the group order n; `Fq`, coordinates mod the base
//!   field p) and rejection-sampled random scalars. The contexts are distinct
//!   types on purpose: a scalar can never be used as a coordinate.
//! - [`group`]: affine G1 validation and encoding, plus the keccak
//!   try-and-increment map onto the curve.
//! - [`transcript`]: the rolling Keccak-256 transcript. Squeezing reduces
//!   the digest into the requested context and reseeds the buffer, so the
//!   same object serves both one-shot challenges and chained rolling hashes.
//! - [`crs`]: the common reference string, i.e. the second Pedersen
//!   generator h (derived from a fixed seed) and the opaque G2 trusted-setup
//!   point t2, with the 160-byte blob codec the validator consumes.
//! - [`note`]: the confidential note, a commitment pair (gamma, sigma) to a
//!   value `k` under viewing key `a`, with sigma = k·h + a·gamma.
//! - [`eip712`]: typed-data digests for note spend authorizations; the
//!   engine consumes signatures as opaque (v, r, s) triples.
//!
//! Everything here is synchronous and stateless; the CRS is the only shared
//! (read-only) state.

pub mod crs;
pub mod eip712;
pub mod error;
pub mod field;
pub mod group;
pub mod note;
pub mod transcript;


pub use crs::{crs, Crs, SetupPoint};
pub use error::ProofError;
pub use field::{
    fq_from_be_bytes, fq_to_be_bytes, fr_from_be_bytes, fr_from_hex, fr_to_be_bytes, fr_to_hex,
    random_scalar,
};
pub use group::{
    compress_point, decompress_point, map_to_point, mul, point_from_be_bytes, point_to_be_bytes,
    random_point, validate_point,
};
pub use note::{Address, Note, K_MAX};
pub use transcript::{keccak256, Transcript};
