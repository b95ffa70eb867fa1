use ark_bn254::{Fr, G1Affine};
use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField, Zero};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use aztec_primitives::{random_scalar, Note, ProofError, Transcript, K_MAX};

use crate::abi::{
    decode_proof, decode_proof_outputs, encode_decoded, encode_proof_outputs, NoteRef,
    ProofOutputEntry, ProofOutputs, RECORD_BYTES,
};
use crate::inputs::{parse_inputs, public_value_word};
use crate::proofs::{dividend, join_split, mint, range, swap};
use crate::schema::{construct_blinding_factors, BlindingSchema};

const SENDER: [u8; 20] = [0xaau8; 20];
const OWNER: [u8; 20] = [0x11u8; 20];

fn rng(tag: u8) -> ChaCha20Rng {
    let mut seed = [0u8; 32];
    seed[0] = tag;
    ChaCha20Rng::from_seed(seed)
}

fn notes(rng: &mut ChaCha20Rng, values: &[u64]) -> Vec<Note> {
    values
        .iter()
        .map(|value| {
            let a = random_scalar(rng);
            Note::from_viewing_key(rng, *value, a, OWNER).unwrap()
        })
        .collect()
}

fn join_split_input(
    rng: &mut ChaCha20Rng,
    k_in: &[u64],
    k_out: &[u64],
    public_value: [u8; 32],
) -> join_split::JoinSplitInput {
    join_split::JoinSplitInput {
        input_notes: notes(rng, k_in),
        output_notes: notes(rng, k_out),
        sender: SENDER,
        public_value,
        public_owner: [0x22u8; 20],
    }
}

fn seeded_rolling(notes: &[Note]) -> Transcript {
    let mut rolling = Transcript::new();
    for note in notes {
        rolling.append_point(&note.gamma);
        rolling.append_point(&note.sigma);
    }
    rolling
}

// --------------------------- join-split ---------------------------

#[test]
fn join_split_emits_five_records_and_a_zero_final_slot() {
    let mut rng = rng(10);
    let input = join_split_input(&mut rng, &[10, 20], &[5, 15, 10], [0u8; 32]);
    let proof = join_split::prove(&input, &mut rng).unwrap();

    assert_eq!(proof.records.len(), 5);
    let data = proof.proof_data_hex();
    assert_eq!(data.len(), 5);
    assert!(data.iter().all(|record| record.len() == 6));
    assert_eq!(proof.challenge_hex().len(), 66);
    // kPublic = 0 rides in the final kBar slot.
    assert!(proof.records[4].k_bar.is_zero());
}

#[test]
fn join_split_blinding_factors_satisfy_the_balance_relation() {
    let mut rng = rng(11);
    let all = notes(&mut rng, &[10, 20, 15]);
    let m = 2;
    let k_public = Fr::from(15u64); // 10 + 20 − 15 = 15 withdrawn

    let mut rolling = seeded_rolling(&all);
    let x = rolling.squeeze_fr();
    let bk_public = k_public * x;

    let schema = BlindingSchema::join_split(all.len(), m);
    let factors =
        construct_blinding_factors(&all, &schema, &mut rolling, bk_public, m, &mut rng).unwrap();

    let mut sum = Fr::zero();
    for (i, factor) in factors.iter().enumerate() {
        if i < m {
            sum += factor.bk;
        } else {
            sum -= factor.bk;
        }
    }
    assert_eq!(sum, bk_public);

    // Response-level form of the same relation: with balanced values,
    // Σ input kBar − Σ output kBar = kPublic·c + bk_public for any c.
    let c = random_scalar(&mut rng);
    let mut response_sum = Fr::zero();
    for (i, (note, factor)) in all.iter().zip(&factors).enumerate() {
        let k_bar = note.k() * c + factor.bk;
        if i < m {
            response_sum += k_bar;
        } else {
            response_sum -= k_bar;
        }
    }
    assert_eq!(response_sum, k_public * c + bk_public);
}

#[test]
fn join_split_blob_round_trips_through_the_decoder() {
    let mut rng = rng(12);
    let input = join_split_input(&mut rng, &[7, 8], &[6, 9], [0u8; 32]);
    let proof = join_split::prove(&input, &mut rng).unwrap();

    let decoded = decode_proof(&proof.encoded).unwrap();
    assert_eq!(decoded.challenge, proof.challenge);
    assert_eq!(decoded.m, 2);
    assert_eq!(decoded.public_owner, input.public_owner);
    assert_eq!(decoded.records, proof.records);
    assert_eq!(decoded.input_owners, vec![OWNER; 2]);
    assert_eq!(decoded.output_owners, vec![OWNER; 2]);
    assert_eq!(decoded.metadata.len(), 2);
    for (entry, note) in decoded.metadata.iter().zip(&input.output_notes) {
        assert_eq!(entry.note_hash, note.hash());
        assert_eq!(entry.ephemeral, note.ephemeral);
    }

    assert_eq!(encode_decoded(&decoded).unwrap(), proof.encoded);
}

#[test]
fn deposits_ride_as_negated_scalars() {
    let word = public_value_word(15, true);
    let scalar = aztec_primitives::fr_from_be_bytes(&word).unwrap();
    assert_eq!(scalar, -Fr::from(15u64));

    let mut rng = rng(13);
    // Deposit of 15: outputs exceed inputs by 15.
    let input = join_split_input(&mut rng, &[10], &[20, 5], word);
    let proof = join_split::prove(&input, &mut rng).unwrap();
    assert_eq!(proof.records[2].k_bar, scalar);
}

// ------------------------------ swap ------------------------------

#[test]
fn swap_reuses_blinding_scalars_across_pairs() {
    let mut rng = rng(14);
    let all = notes(&mut rng, &[10, 20, 10, 20]);
    let mut rolling = seeded_rolling(&all);
    let schema = BlindingSchema::bilateral_swap();
    let factors =
        construct_blinding_factors(&all, &schema, &mut rolling, Fr::zero(), 0, &mut rng).unwrap();

    assert_eq!(factors[0].bk, factors[2].bk);
    assert_eq!(factors[1].bk, factors[3].bk);
    assert_ne!(factors[0].bk, factors[1].bk);
    assert_ne!(factors[0].ba, factors[2].ba);
}

#[test]
fn swap_with_paired_values_emits_matching_responses() {
    let mut rng = rng(15);
    let input = swap::BilateralSwapInput {
        notes: notes(&mut rng, &[10, 20, 10, 20]),
        sender: SENDER,
    };
    let proof = swap::prove(&input, &mut rng).unwrap();
    assert_eq!(proof.records.len(), 4);
    // Equal values and shared bk make the paired responses collide.
    assert_eq!(proof.records[0].k_bar, proof.records[2].k_bar);
    assert_eq!(proof.records[1].k_bar, proof.records[3].k_bar);
}

#[test]
fn swap_requires_exactly_four_notes() {
    let mut rng = rng(16);
    let input = swap::BilateralSwapInput {
        notes: notes(&mut rng, &[10, 20, 10]),
        sender: SENDER,
    };
    assert_eq!(
        swap::prove(&input, &mut rng).unwrap_err(),
        ProofError::IncorrectNoteNumber
    );
}

// ---------------------------- dividend ----------------------------

#[test]
fn dividend_emits_eighteen_elements() {
    let mut rng = rng(17);
    let all = notes(&mut rng, &[90, 4, 50]);
    let input = dividend::DividendInput {
        source_note: all[0].clone(),
        target_note: all[1].clone(),
        residual_note: all[2].clone(),
        za: 100,
        zb: 5,
        sender: SENDER,
    };
    let proof = dividend::prove(&input, &mut rng).unwrap();
    let flattened: Vec<String> = proof.proof_data_hex().into_iter().flatten().collect();
    assert_eq!(flattened.len(), 18);
}

#[test]
fn dividend_blinding_follows_the_ratio_relation() {
    let mut rng = rng(18);
    let all = notes(&mut rng, &[90, 4, 50]);
    let (za, zb) = (Fr::from(100u64), Fr::from(5u64));
    let mut rolling = seeded_rolling(&all);
    let schema = BlindingSchema::dividend(za, zb);
    let factors =
        construct_blinding_factors(&all, &schema, &mut rolling, Fr::zero(), 0, &mut rng).unwrap();
    assert_eq!(factors[2].bk, zb * factors[0].bk - za * factors[1].bk);
}

#[test]
fn dividend_rejects_oversized_ratios() {
    let mut rng = rng(19);
    let all = notes(&mut rng, &[90, 4, 50]);
    let input = dividend::DividendInput {
        source_note: all[0].clone(),
        target_note: all[1].clone(),
        residual_note: all[2].clone(),
        za: K_MAX + 1,
        zb: 5,
        sender: SENDER,
    };
    assert_eq!(
        dividend::prove(&input, &mut rng).unwrap_err(),
        ProofError::ScalarTooBig
    );
}

// ------------------------------ range ------------------------------

#[test]
fn range_emits_a_canonical_zero_third_slot() {
    let mut rng = rng(20);
    let all = notes(&mut rng, &[10, 4, 6]);
    let input = range::PrivateRangeInput {
        original_note: all[0].clone(),
        comparison_note: all[1].clone(),
        utility_note: all[2].clone(),
        sender: SENDER,
    };
    let proof = range::prove(&input, &mut rng).unwrap();
    assert_eq!(proof.records.len(), 3);
    assert!(proof.records[2].k_bar.is_zero());
    assert!(!proof.records[0].k_bar.is_zero());
}

// --------------------------- mint / burn ---------------------------

#[test]
fn mint_orders_notes_and_carries_the_new_total_hash() {
    let mut rng = rng(21);
    let all = notes(&mut rng, &[0, 30, 10, 20]);
    let input = mint::MintInput {
        current_total_note: all[0].clone(),
        new_total_note: all[1].clone(),
        minted_notes: vec![all[2].clone(), all[3].clone()],
        sender: SENDER,
    };
    let proof = mint::prove(&input, &mut rng).unwrap();

    assert_eq!(proof.records.len(), 4);
    // Note order is [new total, current total, minted...].
    assert_eq!(proof.records[0].gamma, all[1].gamma);
    assert_eq!(proof.records[1].gamma, all[0].gamma);

    let decoded = decode_proof(&proof.encoded).unwrap();
    assert_eq!(decoded.m, 1);
    assert_eq!(decoded.aux, all[1].hash());
    assert!(decoded.records.last().unwrap().k_bar.is_zero());
}

#[test]
fn mint_requires_minted_notes() {
    let mut rng = rng(22);
    let all = notes(&mut rng, &[0, 30]);
    let input = mint::MintInput {
        current_total_note: all[0].clone(),
        new_total_note: all[1].clone(),
        minted_notes: Vec::new(),
        sender: SENDER,
    };
    assert_eq!(
        mint::prove(&input, &mut rng).unwrap_err(),
        ProofError::IncorrectNoteNumber
    );
}

// ------------------------- input validation -------------------------

#[test]
fn parse_inputs_rejects_each_malformation_with_its_own_code() {
    let mut rng = rng(23);
    let all = notes(&mut rng, &[10, 20]);

    assert_eq!(
        parse_inputs(&[], 0, &[0u8; 32]).unwrap_err(),
        ProofError::IncorrectNoteNumber
    );
    assert_eq!(
        parse_inputs(&all, 3, &[0u8; 32]).unwrap_err(),
        ProofError::MTooBig
    );

    let mut order = [0u8; 32];
    order.copy_from_slice(&Fr::MODULUS.to_bytes_be());
    assert_eq!(
        parse_inputs(&all, 1, &order).unwrap_err(),
        ProofError::KPublicMalformed
    );

    let mut off_curve = all.clone();
    off_curve[0].gamma = G1Affine::new_unchecked(all[0].gamma.x, all[0].gamma.x);
    assert_eq!(
        parse_inputs(&off_curve, 1, &[0u8; 32]).unwrap_err(),
        ProofError::NotOnCurve
    );

    let mut infinity = all.clone();
    infinity[1].sigma = G1Affine::zero();
    assert_eq!(
        parse_inputs(&infinity, 1, &[0u8; 32]).unwrap_err(),
        ProofError::PointAtInfinity
    );

    let mut zero_key = all.clone();
    zero_key[0].a = Fr::zero();
    assert_eq!(
        parse_inputs(&zero_key, 1, &[0u8; 32]).unwrap_err(),
        ProofError::ViewingKeyMalformed
    );

    let mut oversized = all.clone();
    oversized[0].value = K_MAX + 1;
    assert_eq!(
        parse_inputs(&oversized, 1, &[0u8; 32]).unwrap_err(),
        ProofError::NoteValueTooBig
    );
}

#[test]
fn schema_and_note_counts_must_agree() {
    let mut rng = rng(24);
    let all = notes(&mut rng, &[10, 20, 30]);
    let mut rolling = seeded_rolling(&all);
    let schema = BlindingSchema::bilateral_swap(); // four rules, three notes
    assert_eq!(
        construct_blinding_factors(&all, &schema, &mut rolling, Fr::zero(), 0, &mut rng)
            .unwrap_err(),
        ProofError::BadBlindingFactor
    );
}

// ------------------------------- abi -------------------------------

#[test]
fn truncated_blobs_are_rejected() {
    let mut rng = rng(25);
    let input = join_split_input(&mut rng, &[10], &[10], [0u8; 32]);
    let proof = join_split::prove(&input, &mut rng).unwrap();

    assert_eq!(
        decode_proof(&proof.encoded[..proof.encoded.len() - 1]).unwrap_err(),
        ProofError::EncodingInvalidLength
    );
    assert_eq!(
        decode_proof(&proof.encoded[..64]).unwrap_err(),
        ProofError::EncodingInvalidLength
    );
}

#[test]
fn record_length_prefix_is_checked() {
    let mut rng = rng(26);
    let input = join_split_input(&mut rng, &[10], &[10], [0u8; 32]);
    let proof = join_split::prove(&input, &mut rng).unwrap();

    // Word 6 is the first record's length prefix.
    let mut tampered = proof.encoded.clone();
    tampered[6 * 32 + 31] = (RECORD_BYTES - 32) as u8;
    assert_eq!(
        decode_proof(&tampered).unwrap_err(),
        ProofError::EncodingInvalidLength
    );
}

#[test]
fn proof_outputs_round_trip() {
    let mut rng = rng(27);
    let all = notes(&mut rng, &[1, 2]);
    let outputs = ProofOutputs {
        entries: vec![ProofOutputEntry {
            input_notes: vec![NoteRef {
                note_hash: all[0].hash(),
                owner: all[0].owner,
            }],
            output_notes: vec![NoteRef {
                note_hash: all[1].hash(),
                owner: all[1].owner,
            }],
            public_owner: [0x33u8; 20],
            public_value: public_value_word(4, false),
        }],
        challenge: random_scalar(&mut rng),
    };
    let bytes = encode_proof_outputs(&outputs);
    assert_eq!(decode_proof_outputs(&bytes).unwrap(), outputs);
}
