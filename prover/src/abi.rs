//! Byte-precise serialization of proofs for the validator contract, plus
//! the proof-outputs encoding whose keccak hash the validator returns on
//! acceptance.
//!
//! The blob is word-aligned (32-byte big-endian words) and fully
//! re-validated on decode: responses must be canonical scalars, coordinates
//! canonical field elements on the curve, padding bytes zero, and every
//! length prefix consistent. Re-encoding a decoded blob reproduces it
//! byte for byte.

use ark_bn254::Fr;

use aztec_primitives::field::{fr_from_be_bytes, fr_to_be_bytes};
use aztec_primitives::group::{point_from_be_bytes, point_to_be_bytes};
use aztec_primitives::{keccak256, Address, Note, ProofError};

use crate::proofs::ProofRecord;

pub const WORD: usize = 32;
/// kBar ‖ aBar ‖ γ.x ‖ γ.y ‖ σ.x ‖ σ.y.
pub const RECORD_BYTES: usize = 6 * WORD;
/// Tail metadata entries are a note hash plus at most two words of
/// ephemeral key material.
pub const MAX_EPHEMERAL_BYTES: usize = 2 * WORD;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProofKind {
    JoinSplit,
    BilateralSwap,
    Dividend,
    PrivateRange,
    Mint,
    Burn,
}

/// Everything the encoder needs beyond the records.
pub(crate) struct EncodeRequest<'a> {
    pub kind: ProofKind,
    pub m: usize,
    pub public_owner: Address,
    /// Word 4: kPublic, or the new-total note hash for mint/burn.
    pub aux: [u8; 32],
    pub input_notes: &'a [Note],
    pub output_notes: &'a [Note],
    pub records: &'a [ProofRecord],
    pub challenge: Fr,
}

/// Output-note tail entry: note hash plus ephemeral key bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteMetadata {
    pub note_hash: [u8; 32],
    pub ephemeral: Vec<u8>,
}

/// A decoded proof blob; the inverse of the encoder, used by the reference
/// verifier and by relayers.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedProof {
    pub challenge: Fr,
    pub m: usize,
    pub public_owner: Address,
    pub aux: [u8; 32],
    pub records: Vec<ProofRecord>,
    pub input_owners: Vec<Address>,
    pub output_owners: Vec<Address>,
    pub metadata: Vec<NoteMetadata>,
}

// ----------------------------- writing -----------------------------

fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

fn write_blob(
    challenge: Fr,
    m: usize,
    public_owner: &Address,
    aux: &[u8; 32],
    records: &[ProofRecord],
    input_owners: &[Address],
    output_owners: &[Address],
    metadata: &[NoteMetadata],
) -> Result<Vec<u8>, ProofError> {
    let mut out = vec![0u8; WORD]; // total length, patched below
    out.extend_from_slice(&fr_to_be_bytes(challenge));
    out.extend_from_slice(&u64_word(m as u64));
    out.extend_from_slice(&address_word(public_owner));
    out.extend_from_slice(aux);

    out.extend_from_slice(&u64_word(records.len() as u64));
    for record in records {
        out.extend_from_slice(&u64_word(RECORD_BYTES as u64));
        out.extend_from_slice(&fr_to_be_bytes(record.k_bar));
        out.extend_from_slice(&fr_to_be_bytes(record.a_bar));
        let (gx, gy) = point_to_be_bytes(&record.gamma);
        let (sx, sy) = point_to_be_bytes(&record.sigma);
        out.extend_from_slice(&gx);
        out.extend_from_slice(&gy);
        out.extend_from_slice(&sx);
        out.extend_from_slice(&sy);
    }

    for owners in [input_owners, output_owners] {
        out.extend_from_slice(&u64_word(owners.len() as u64));
        for owner in owners {
            out.extend_from_slice(&address_word(owner));
        }
    }

    out.extend_from_slice(&u64_word(metadata.len() as u64));
    for entry in metadata {
        if entry.ephemeral.len() > MAX_EPHEMERAL_BYTES {
            return Err(ProofError::EncodingInvalidLength);
        }
        out.extend_from_slice(&u64_word((WORD + entry.ephemeral.len()) as u64));
        out.extend_from_slice(&entry.note_hash);
        out.extend_from_slice(&entry.ephemeral);
        let padding = (WORD - entry.ephemeral.len() % WORD) % WORD;
        out.extend_from_slice(&vec![0u8; padding]);
    }

    let total = u64_word(out.len() as u64);
    out[..WORD].copy_from_slice(&total);
    Ok(out)
}

pub(crate) fn encode_proof(request: &EncodeRequest<'_>) -> Result<(Vec<u8>, [u8; 32]), ProofError> {
    let input_owners: Vec<Address> = request.input_notes.iter().map(|n| n.owner).collect();
    let output_owners: Vec<Address> = request.output_notes.iter().map(|n| n.owner).collect();
    let metadata: Vec<NoteMetadata> = request
        .output_notes
        .iter()
        .map(|note| NoteMetadata {
            note_hash: note.hash(),
            ephemeral: note.ephemeral.clone(),
        })
        .collect();

    let blob = write_blob(
        request.challenge,
        request.m,
        &request.public_owner,
        &request.aux,
        request.records,
        &input_owners,
        &output_owners,
        &metadata,
    )?;
    let outputs = group_outputs(request);
    Ok((blob, proof_outputs_hash(&outputs)))
}

/// Re-encode a decoded proof; round-trips byte for byte.
pub fn encode_decoded(proof: &DecodedProof) -> Result<Vec<u8>, ProofError> {
    write_blob(
        proof.challenge,
        proof.m,
        &proof.public_owner,
        &proof.aux,
        &proof.records,
        &proof.input_owners,
        &proof.output_owners,
        &proof.metadata,
    )
}

// ----------------------------- reading -----------------------------

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn word(&mut self) -> Result<[u8; 32], ProofError> {
        if self.offset + WORD > self.bytes.len() {
            return Err(ProofError::EncodingInvalidLength);
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.bytes[self.offset..self.offset + WORD]);
        self.offset += WORD;
        Ok(out)
    }

    fn length(&mut self) -> Result<usize, ProofError> {
        let word = self.word()?;
        if word[..24].iter().any(|byte| *byte != 0) {
            return Err(ProofError::EncodingInvalidLength);
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&word[24..]);
        Ok(u64::from_be_bytes(bytes) as usize)
    }

    fn address(&mut self) -> Result<Address, ProofError> {
        let word = self.word()?;
        if word[..12].iter().any(|byte| *byte != 0) {
            return Err(ProofError::EncodingInvalidLength);
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&word[12..]);
        Ok(out)
    }

    fn scalar(&mut self) -> Result<Fr, ProofError> {
        fr_from_be_bytes(&self.word()?)
    }

    fn raw(&mut self, len: usize) -> Result<&'a [u8], ProofError> {
        if self.offset + len > self.bytes.len() {
            return Err(ProofError::EncodingInvalidLength);
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn done(&self) -> Result<(), ProofError> {
        if self.offset == self.bytes.len() {
            Ok(())
        } else {
            Err(ProofError::EncodingInvalidLength)
        }
    }
}

/// Decode and fully re-validate a proof blob.
pub fn decode_proof(bytes: &[u8]) -> Result<DecodedProof, ProofError> {
    let mut reader = Reader::new(bytes);
    if reader.length()? != bytes.len() {
        return Err(ProofError::EncodingInvalidLength);
    }
    let challenge = reader.scalar()?;
    let m = reader.length()?;
    let public_owner = reader.address()?;
    let aux = reader.word()?;

    let record_count = reader.length()?;
    let mut records = Vec::with_capacity(record_count);
    for _ in 0..record_count {
        if reader.length()? != RECORD_BYTES {
            return Err(ProofError::EncodingInvalidLength);
        }
        let k_bar = reader.scalar()?;
        let a_bar = reader.scalar()?;
        let gamma = point_from_be_bytes(&reader.word()?, &reader.word()?)?;
        let sigma = point_from_be_bytes(&reader.word()?, &reader.word()?)?;
        records.push(ProofRecord {
            k_bar,
            a_bar,
            gamma,
            sigma,
        });
    }

    let mut owner_groups: [Vec<Address>; 2] = [Vec::new(), Vec::new()];
    for group in owner_groups.iter_mut() {
        let count = reader.length()?;
        for _ in 0..count {
            group.push(reader.address()?);
        }
    }
    let [input_owners, output_owners] = owner_groups;

    let metadata_count = reader.length()?;
    let mut metadata = Vec::with_capacity(metadata_count);
    for _ in 0..metadata_count {
        let entry_len = reader.length()?;
        if entry_len < WORD || entry_len > WORD + MAX_EPHEMERAL_BYTES {
            return Err(ProofError::EncodingInvalidLength);
        }
        let mut note_hash = [0u8; 32];
        note_hash.copy_from_slice(reader.raw(WORD)?);
        let ephemeral_len = entry_len - WORD;
        let ephemeral = reader.raw(ephemeral_len)?.to_vec();
        let padding = (WORD - ephemeral_len % WORD) % WORD;
        if reader.raw(padding)?.iter().any(|byte| *byte != 0) {
            return Err(ProofError::EncodingInvalidLength);
        }
        metadata.push(NoteMetadata {
            note_hash,
            ephemeral,
        });
    }

    reader.done()?;
    Ok(DecodedProof {
        challenge,
        m,
        public_owner,
        aux,
        records,
        input_owners,
        output_owners,
        metadata,
    })
}

/// Decode a 0x-prefixed hex blob.
pub fn decode_proof_hex(hex_blob: &str) -> Result<DecodedProof, ProofError> {
    let stripped = hex_blob.strip_prefix("0x").unwrap_or(hex_blob);
    let bytes = hex::decode(stripped).map_err(|_| ProofError::EncodingInvalidLength)?;
    decode_proof(&bytes)
}

// -------------------------- proof outputs --------------------------

/// A note as the validator reports it: hash and owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteRef {
    pub note_hash: [u8; 32],
    pub owner: Address,
}

impl NoteRef {
    fn of(note: &Note) -> Self {
        Self {
            note_hash: note.hash(),
            owner: note.owner,
        }
    }
}

/// One ledger-effect group: notes destroyed, notes created, and any public
/// value transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofOutputEntry {
    pub input_notes: Vec<NoteRef>,
    pub output_notes: Vec<NoteRef>,
    pub public_owner: Address,
    pub public_value: [u8; 32],
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProofOutputs {
    pub entries: Vec<ProofOutputEntry>,
    pub challenge: Fr,
}

fn group_outputs(request: &EncodeRequest<'_>) -> ProofOutputs {
    let refs = |notes: &[Note]| notes.iter().map(NoteRef::of).collect::<Vec<_>>();
    let entries = match request.kind {
        ProofKind::JoinSplit => vec![ProofOutputEntry {
            input_notes: refs(request.input_notes),
            output_notes: refs(request.output_notes),
            public_owner: request.public_owner,
            public_value: request.aux,
        }],
        // One entry per swapped pair.
        ProofKind::BilateralSwap => (0..2)
            .map(|i| ProofOutputEntry {
                input_notes: vec![NoteRef::of(&request.input_notes[i])],
                output_notes: vec![NoteRef::of(&request.output_notes[i])],
                public_owner: [0u8; 20],
                public_value: [0u8; 32],
            })
            .collect(),
        ProofKind::Dividend | ProofKind::PrivateRange => vec![ProofOutputEntry {
            input_notes: refs(request.input_notes),
            output_notes: refs(request.output_notes),
            public_owner: [0u8; 20],
            public_value: [0u8; 32],
        }],
        // The adjusted notes; the totals ride in the header word.
        ProofKind::Mint => vec![ProofOutputEntry {
            input_notes: Vec::new(),
            output_notes: refs(request.output_notes.get(1..).unwrap_or(&[])),
            public_owner: [0u8; 20],
            public_value: [0u8; 32],
        }],
        ProofKind::Burn => vec![ProofOutputEntry {
            input_notes: refs(request.output_notes.get(1..).unwrap_or(&[])),
            output_notes: Vec::new(),
            public_owner: [0u8; 20],
            public_value: [0u8; 32],
        }],
    };
    ProofOutputs {
        entries,
        challenge: request.challenge,
    }
}

pub fn encode_proof_outputs(outputs: &ProofOutputs) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&fr_to_be_bytes(outputs.challenge));
    out.extend_from_slice(&u64_word(outputs.entries.len() as u64));
    for entry in &outputs.entries {
        for notes in [&entry.input_notes, &entry.output_notes] {
            out.extend_from_slice(&u64_word(notes.len() as u64));
            for note in notes.iter() {
                out.extend_from_slice(&note.note_hash);
                out.extend_from_slice(&address_word(&note.owner));
            }
        }
        out.extend_from_slice(&address_word(&entry.public_owner));
        out.extend_from_slice(&entry.public_value);
    }
    out
}

pub fn decode_proof_outputs(bytes: &[u8]) -> Result<ProofOutputs, ProofError> {
    let mut reader = Reader::new(bytes);
    let challenge = reader.scalar()?;
    let entry_count = reader.length()?;
    let mut entries = Vec::with_capacity(entry_count);
    for _ in 0..entry_count {
        let mut groups: [Vec<NoteRef>; 2] = [Vec::new(), Vec::new()];
        for group in groups.iter_mut() {
            let count = reader.length()?;
            for _ in 0..count {
                group.push(NoteRef {
                    note_hash: reader.word()?,
                    owner: reader.address()?,
                });
            }
        }
        let [input_notes, output_notes] = groups;
        entries.push(ProofOutputEntry {
            input_notes,
            output_notes,
            public_owner: reader.address()?,
            public_value: reader.word()?,
        });
    }
    reader.done()?;
    Ok(ProofOutputs { entries, challenge })
}

/// The 32-byte value the validator returns when it accepts the proof.
pub fn proof_outputs_hash(outputs: &ProofOutputs) -> [u8; 32] {
    keccak256(&encode_proof_outputs(outputs))
}
