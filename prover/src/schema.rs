//! Blinding-factor schemas.
//!
//! Every proof kind shares one skeleton and differs only in the algebraic
//! relations among its value-blinding scalars {bk_i}. Those relations are
//! data (a per-note rule table), so a new proof kind is a new table, not
//! new control flow.

use ark_bn254::{Fr, G1Affine};
use ark_ec::{CurveGroup, Group};
use ark_ff::{PrimeField, Zero};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use aztec_primitives::{crs, mul, random_scalar, Note, ProofError, Transcript};

/// How a note's value-blinding scalar is derived.
#[derive(Clone, Debug)]
pub enum BkRule {
    /// Fresh uniform scalar.
    Fresh,
    /// Reuse an earlier note's bk (value-equal pairing).
    Reuse(usize),
    /// Signed linear combination of earlier bks.
    Combination(Vec<(Fr, usize)>),
    /// Solved from the join-split balance relation
    /// Σ_{i<m} bk_i − Σ_{i≥m} bk_i = bk_public.
    Balance,
}

#[derive(Clone, Debug)]
pub struct NoteRule {
    pub bk: BkRule,
    /// Scale this note's B by the next rolling-hash scalar.
    pub hash_scaled: bool,
}

impl NoteRule {
    fn plain(bk: BkRule) -> Self {
        Self {
            bk,
            hash_scaled: false,
        }
    }

    fn scaled(bk: BkRule) -> Self {
        Self {
            bk,
            hash_scaled: true,
        }
    }
}

/// Per-proof rule table.
#[derive(Clone, Debug)]
pub struct BlindingSchema {
    rules: Vec<NoteRule>,
}

impl BlindingSchema {
    pub fn rules(&self) -> &[NoteRule] {
        &self.rules
    }

    /// Join-split over `note_count` notes, the first `m` being inputs: all
    /// scalars fresh except the balance slot: the last input note, or the
    /// last note outright when there are no inputs.
    pub fn join_split(note_count: usize, m: usize) -> Self {
        let balance_index = if m == 0 { note_count - 1 } else { m - 1 };
        let rules = (0..note_count)
            .map(|i| {
                if i == balance_index {
                    NoteRule::plain(BkRule::Balance)
                } else {
                    NoteRule::plain(BkRule::Fresh)
                }
            })
            .collect();
        Self { rules }
    }

    /// Bilateral swap: notes (0, 2) and (1, 3) share blinding scalars, so
    /// the challenge only closes when the pairs are equal in value.
    pub fn bilateral_swap() -> Self {
        Self {
            rules: vec![
                NoteRule::plain(BkRule::Fresh),
                NoteRule::plain(BkRule::Fresh),
                NoteRule::plain(BkRule::Reuse(0)),
                NoteRule::plain(BkRule::Reuse(1)),
            ],
        }
    }

    /// Dividend: bk₂ = zb·bk₀ − za·bk₁, mirroring zb·k₀ = za·k₁ + k₂.
    pub fn dividend(za: Fr, zb: Fr) -> Self {
        Self {
            rules: vec![
                NoteRule::plain(BkRule::Fresh),
                NoteRule::plain(BkRule::Fresh),
                NoteRule::plain(BkRule::Combination(vec![(zb, 0), (-za, 1)])),
            ],
        }
    }

    /// Private range: the second and third B points are scaled by successive
    /// rolling-hash scalars and bk₂ = bk₀ − bk₁, mirroring k₀ = k₁ + k₂.
    pub fn private_range() -> Self {
        Self {
            rules: vec![
                NoteRule::plain(BkRule::Fresh),
                NoteRule::scaled(BkRule::Fresh),
                NoteRule::scaled(BkRule::Combination(vec![(Fr::from(1u64), 0), (-Fr::from(1u64), 1)])),
            ],
        }
    }
}

/// Transient per-note blinding record. The scalar halves are wiped on drop;
/// they share entropy with the viewing keys through the responses.
#[derive(Clone, Debug)]
pub struct BlindingFactor {
    pub bk: Fr,
    pub ba: Fr,
    pub b: G1Affine,
}

impl Zeroize for BlindingFactor {
    fn zeroize(&mut self) {
        self.bk = Fr::zero();
        self.ba = Fr::zero();
    }
}

impl Drop for BlindingFactor {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Derive the blinding records for one proof.
///
/// `rolling` must already hold every note's (gamma, sigma) and, for the
/// join-split family, have been squeezed once to produce the bk_public
/// factor, so that hash-scaled notes draw the same chain the verifier
/// recomputes. At most one rule may be [`BkRule::Balance`]; references must
/// point at already-resolved fresh scalars.
pub fn construct_blinding_factors<R: RngCore + CryptoRng>(
    notes: &[Note],
    schema: &BlindingSchema,
    rolling: &mut Transcript,
    bk_public: Fr,
    m: usize,
    rng: &mut R,
) -> Result<Vec<BlindingFactor>, ProofError> {
    let rules = schema.rules();
    if rules.len() != notes.len() {
        return Err(ProofError::BadBlindingFactor);
    }

    let mut bks: Vec<Option<Fr>> = vec![None; rules.len()];
    let mut balance_index = None;

    for (i, rule) in rules.iter().enumerate() {
        match rule.bk {
            BkRule::Fresh => bks[i] = Some(random_scalar(rng)),
            BkRule::Balance => {
                if balance_index.is_some() {
                    return Err(ProofError::BadBlindingFactor);
                }
                balance_index = Some(i);
            }
            _ => {}
        }
    }

    for (i, rule) in rules.iter().enumerate() {
        match &rule.bk {
            BkRule::Reuse(source) => {
                let source = bks
                    .get(*source)
                    .and_then(|bk| *bk)
                    .ok_or(ProofError::BadBlindingFactor)?;
                bks[i] = Some(source);
            }
            BkRule::Combination(terms) => {
                let mut acc = Fr::zero();
                for (coefficient, index) in terms {
                    let term = bks
                        .get(*index)
                        .and_then(|bk| *bk)
                        .ok_or(ProofError::BadBlindingFactor)?;
                    acc += *coefficient * term;
                }
                bks[i] = Some(acc);
            }
            _ => {}
        }
    }

    if let Some(index) = balance_index {
        let mut sum = Fr::zero();
        for (i, bk) in bks.iter().enumerate() {
            if i == index {
                continue;
            }
            let bk = bk.ok_or(ProofError::BadBlindingFactor)?;
            if i < m {
                sum += bk;
            } else {
                sum -= bk;
            }
        }
        // Solve sum ± bk_index = bk_public for the marked slot.
        let solved = if index < m {
            bk_public - sum
        } else {
            sum - bk_public
        };
        bks[index] = Some(solved);
    }

    let mut factors = Vec::with_capacity(notes.len());
    for ((note, rule), bk) in notes.iter().zip(rules).zip(bks) {
        let bk = bk.ok_or(ProofError::BadBlindingFactor)?;
        let ba = random_scalar(rng);
        let mut b = mul(&crs::h(), &bk) + mul(&note.gamma, &ba);
        if rule.hash_scaled {
            let x = rolling.squeeze_fr();
            b = b.mul_bigint(x.into_bigint());
        }
        factors.push(BlindingFactor {
            bk,
            ba,
            b: b.into_affine(),
        });
    }
    Ok(factors)
}
