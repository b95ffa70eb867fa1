//! The confidential note primitive.

use ark_bn254::{Fr, G1Affine};
use ark_ec::CurveGroup;
use ark_ff::Zero;
use rand::{CryptoRng, RngCore};
use tiny_keccak::{Hasher, Keccak};

use crate::crs;
use crate::error::ProofError;
use crate::field::fr_from_be_bytes;
use crate::group::{mul, point_to_be_bytes, random_point, validate_point};
use crate::transcript::keccak256;

/// Largest value a note may commit to.
pub const K_MAX: u64 = 0xffff_ffff;

/// 20-byte Ethereum address.
pub type Address = [u8; 20];

const VIEWING_KEY_TAG: &[u8] = b"AZTEC_NOTE_VIEWING_KEY";
const EPHEMERAL_TAG: &[u8] = b"AZTEC_NOTE_EPHEMERAL";

/// Pedersen-style commitment (gamma, sigma) to `value` under viewing key
/// `a`, with sigma = value·h + a·gamma. Gamma is mapped onto the curve from
/// fresh randomness, so no party knows its discrete log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub value: u64,
    pub a: Fr,
    pub gamma: G1Affine,
    pub sigma: G1Affine,
    pub owner: Address,
    /// Ephemeral key material letting the owner re-derive the viewing key;
    /// rides in the ABI metadata tail. Empty for direct viewing-key notes.
    pub ephemeral: Vec<u8>,
}

impl Note {
    /// Build a note from an explicit viewing key.
    pub fn from_viewing_key<R: RngCore + CryptoRng>(
        rng: &mut R,
        value: u64,
        a: Fr,
        owner: Address,
    ) -> Result<Self, ProofError> {
        if value > K_MAX {
            return Err(ProofError::NoteValueTooBig);
        }
        if a.is_zero() {
            return Err(ProofError::ViewingKeyMalformed);
        }
        let gamma = random_point(rng);
        let sigma = (mul(&crs::h(), &Fr::from(value)) + mul(&gamma, &a)).into_affine();
        Ok(Note {
            value,
            a,
            gamma,
            sigma,
            owner,
            ephemeral: Vec::new(),
        })
    }

    /// Build a note from an owner public key and a per-note nonce.
    ///
    /// The viewing key is squeezed from a keccak chain over the public key
    /// and nonce, rejection-sampled into (0, n); the key-agreement scheme
    /// itself lives in the wallet layer, this path only has to be
    /// deterministic in (public_key, nonce).
    pub fn from_public_key<R: RngCore + CryptoRng>(
        rng: &mut R,
        value: u64,
        public_key: &[u8],
        nonce: u32,
        owner: Address,
    ) -> Result<Self, ProofError> {
        if public_key.is_empty() {
            return Err(ProofError::ViewingKeyMalformed);
        }
        let a = derive_viewing_key(public_key, nonce);
        let mut note = Self::from_viewing_key(rng, value, a, owner)?;
        note.ephemeral = ephemeral_bytes(public_key, nonce);
        Ok(note)
    }

    /// The scalar committed to, in the mod-n context.
    pub fn k(&self) -> Fr {
        Fr::from(self.value)
    }

    /// keccak256(gamma.x ‖ gamma.y ‖ sigma.x ‖ sigma.y).
    pub fn hash(&self) -> [u8; 32] {
        let (gx, gy) = point_to_be_bytes(&self.gamma);
        let (sx, sy) = point_to_be_bytes(&self.sigma);
        let mut buffer = Vec::with_capacity(128);
        buffer.extend_from_slice(&gx);
        buffer.extend_from_slice(&gy);
        buffer.extend_from_slice(&sx);
        buffer.extend_from_slice(&sy);
        keccak256(&buffer)
    }

    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash()))
    }

    /// Boundary validation, re-run on every proof input even for notes this
    /// library built itself: a malformed point reaching a transcript would
    /// surface as a silent verifier failure rather than a clean error.
    pub fn validate(&self) -> Result<(), ProofError> {
        if self.value > K_MAX {
            return Err(ProofError::NoteValueTooBig);
        }
        if self.a.is_zero() {
            return Err(ProofError::ViewingKeyMalformed);
        }
        validate_point(&self.gamma)?;
        validate_point(&self.sigma)?;
        Ok(())
    }
}

fn derive_viewing_key(public_key: &[u8], nonce: u32) -> Fr {
    let mut counter = 0u32;
    loop {
        let mut hasher = Keccak::v256();
        let mut digest = [0u8; 32];
        hasher.update(VIEWING_KEY_TAG);
        hasher.update(public_key);
        hasher.update(&nonce.to_be_bytes());
        hasher.update(&counter.to_be_bytes());
        hasher.finalize(&mut digest);
        if let Ok(a) = fr_from_be_bytes(&digest) {
            if !a.is_zero() {
                return a;
            }
        }
        counter += 1;
    }
}

/// 33-byte compressed-key-shaped blob for the metadata tail.
fn ephemeral_bytes(public_key: &[u8], nonce: u32) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(EPHEMERAL_TAG.len() + public_key.len() + 4);
    buffer.extend_from_slice(EPHEMERAL_TAG);
    buffer.extend_from_slice(public_key);
    buffer.extend_from_slice(&nonce.to_be_bytes());
    let digest = keccak256(&buffer);
    let mut out = Vec::with_capacity(33);
    out.push(0x02);
    out.extend_from_slice(&digest);
    out
}
