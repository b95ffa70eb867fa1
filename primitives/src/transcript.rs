//! Rolling Keccak-256 transcript.

use ark_bn254::{Fq, Fr, G1Affine};
use ark_ff::PrimeField;
use tiny_keccak::{Hasher, Keccak};

use crate::field::{fq_to_be_bytes, fr_to_be_bytes};

/// Keccak-256 of a byte slice.
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(input);
    hasher.finalize(&mut output);
    output
}

/// Append-only buffer of 32-byte big-endian chunks, hashed with Keccak-256.
///
/// [`Transcript::squeeze_fr`] and [`Transcript::squeeze_fq`] finalize the
/// buffer, reduce the digest into the requested context and then replace the
/// buffer with the digest, so further appends chain off the previous state.
/// The same object therefore serves as a one-shot challenge hash and as the
/// rolling hash the validators recompute word for word. It is deliberately
/// stateful; the append order is part of the protocol.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    data: Vec<u8>,
}

impl Transcript {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn append_bytes32(&mut self, chunk: &[u8; 32]) {
        self.data.extend_from_slice(chunk);
    }

    /// Append a 20-byte address, left-padded to a word.
    pub fn append_address(&mut self, address: &[u8; 20]) {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(address);
        self.append_bytes32(&word);
    }

    /// Append an integer, left-padded to a word.
    pub fn append_u64(&mut self, value: u64) {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&value.to_be_bytes());
        self.append_bytes32(&word);
    }

    pub fn append_fr(&mut self, scalar: Fr) {
        self.append_bytes32(&fr_to_be_bytes(scalar));
    }

    pub fn append_fq(&mut self, element: Fq) {
        self.append_bytes32(&fq_to_be_bytes(element));
    }

    /// Append a group point as x then y.
    pub fn append_point(&mut self, point: &G1Affine) {
        self.append_fq(point.x);
        self.append_fq(point.y);
    }

    fn digest(&self) -> [u8; 32] {
        keccak256(&self.data)
    }

    fn reseed(&mut self, digest: [u8; 32]) {
        self.data.clear();
        self.data.extend_from_slice(&digest);
    }

    /// Finalize into a scalar mod n and reseed the buffer with the digest.
    pub fn squeeze_fr(&mut self) -> Fr {
        let digest = self.digest();
        self.reseed(digest);
        Fr::from_be_bytes_mod_order(&digest)
    }

    /// Finalize into a coordinate mod p and reseed the buffer with the digest.
    pub fn squeeze_fq(&mut self) -> Fq {
        let digest = self.digest();
        self.reseed(digest);
        Fq::from_be_bytes_mod_order(&digest)
    }
}
