use thiserror::Error;

/// Closed set of failure kinds surfaced by the proof engine.
///
/// The `Display` output is the stable protocol code consumed by wallets and
/// relayers; callers present it verbatim. Every public entry point fails
/// with exactly one of these kinds and errors are terminal to the call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProofError {
    #[error("KPUBLIC_MALFORMED")]
    KPublicMalformed,
    #[error("M_TOO_BIG")]
    MTooBig,
    #[error("NOT_ON_CURVE")]
    NotOnCurve,
    #[error("POINT_AT_INFINITY")]
    PointAtInfinity,
    #[error("VIEWING_KEY_MALFORMED")]
    ViewingKeyMalformed,
    #[error("NOTE_VALUE_TOO_BIG")]
    NoteValueTooBig,
    #[error("BAD_BLINDING_FACTOR")]
    BadBlindingFactor,
    #[error("INCORRECT_NOTE_NUMBER")]
    IncorrectNoteNumber,
    #[error("CHALLENGE_RESPONSE_FAIL")]
    ChallengeResponseFail,
    #[error("ENCODING_INVALID_LENGTH")]
    EncodingInvalidLength,
    #[error("SCALAR_TOO_BIG")]
    ScalarTooBig,
}

impl ProofError {
    /// Stable protocol code, identical to the `Display` rendering.
    pub fn code(&self) -> &'static str {
        match self {
            ProofError::KPublicMalformed => "KPUBLIC_MALFORMED",
            ProofError::MTooBig => "M_TOO_BIG",
            ProofError::NotOnCurve => "NOT_ON_CURVE",
            ProofError::PointAtInfinity => "POINT_AT_INFINITY",
            ProofError::ViewingKeyMalformed => "VIEWING_KEY_MALFORMED",
            ProofError::NoteValueTooBig => "NOTE_VALUE_TOO_BIG",
            ProofError::BadBlindingFactor => "BAD_BLINDING_FACTOR",
            ProofError::IncorrectNoteNumber => "INCORRECT_NOTE_NUMBER",
            ProofError::ChallengeResponseFail => "CHALLENGE_RESPONSE_FAIL",
            ProofError::EncodingInvalidLength => "ENCODING_INVALID_LENGTH",
            ProofError::ScalarTooBig => "SCALAR_TOO_BIG",
        }
    }
}
