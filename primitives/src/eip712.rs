//! EIP-712 typed-data digests for note spend authorizations.
//!
//! The proof engine consumes spend signatures as opaque (v, r, s) triples
//! produced by the wallet layer; this module computes the digest those
//! signatures commit to and screens out triples that could only recover the
//! zero address.

use thiserror::Error;

use crate::note::Address;
use crate::transcript::keccak256;

pub const DOMAIN_NAME: &str = "AZTEC_MAIN";
pub const DOMAIN_VERSION: &str = "1";

const DOMAIN_TYPE: &[u8] =
    b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
const NOTE_SIGNATURE_TYPE: &[u8] = b"NoteSignature(bytes32 noteHash,address spender,bool status)";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signer address cannot be 0")]
    ZeroSigner,
}

/// Signing domain of the AZTEC validator contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    pub chain_id: u64,
    pub verifying_contract: Address,
}

/// The signed message: authorize (or revoke) `spender` for one note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteSignatureMessage {
    pub note_hash: [u8; 32],
    pub spender: Address,
    pub status: bool,
}

/// Opaque ECDSA triple as recovered on-chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcdsaSignature {
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl EcdsaSignature {
    /// A triple with v outside {27, 28} or a zero r or s makes `ecrecover`
    /// return the zero address; reject it before it reaches a contract.
    pub fn validate(&self) -> Result<(), SignatureError> {
        if self.v != 27 && self.v != 28 {
            return Err(SignatureError::ZeroSigner);
        }
        if self.r == [0u8; 32] || self.s == [0u8; 32] {
            return Err(SignatureError::ZeroSigner);
        }
        Ok(())
    }
}

fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

pub fn domain_separator(domain: &Domain) -> [u8; 32] {
    let mut buffer = Vec::with_capacity(5 * 32);
    buffer.extend_from_slice(&keccak256(DOMAIN_TYPE));
    buffer.extend_from_slice(&keccak256(DOMAIN_NAME.as_bytes()));
    buffer.extend_from_slice(&keccak256(DOMAIN_VERSION.as_bytes()));
    buffer.extend_from_slice(&u64_word(domain.chain_id));
    buffer.extend_from_slice(&address_word(&domain.verifying_contract));
    keccak256(&buffer)
}

pub fn struct_hash(message: &NoteSignatureMessage) -> [u8; 32] {
    let mut buffer = Vec::with_capacity(4 * 32);
    buffer.extend_from_slice(&keccak256(NOTE_SIGNATURE_TYPE));
    buffer.extend_from_slice(&message.note_hash);
    buffer.extend_from_slice(&address_word(&message.spender));
    buffer.extend_from_slice(&u64_word(message.status as u64));
    keccak256(&buffer)
}

/// The 0x1901-prefixed digest wallets sign.
pub fn signing_digest(domain: &Domain, message: &NoteSignatureMessage) -> [u8; 32] {
    let mut buffer = Vec::with_capacity(2 + 64);
    buffer.extend_from_slice(&[0x19, 0x01]);
    buffer.extend_from_slice(&domain_separator(domain));
    buffer.extend_from_slice(&struct_hash(message));
    keccak256(&buffer)
}
