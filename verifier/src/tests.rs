//! Round-trip tests: every constructor's output must pass the reference
//! verification, and targeted malformations must fail it.

use ark_bn254::Fr;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use aztec_primitives::{random_scalar, Note, ProofError};
use aztec_prover::abi::{decode_proof, encode_decoded};
use aztec_prover::inputs::public_value_word;
use aztec_prover::proofs::{burn, dividend, join_split, mint, range, swap};

use crate::{
    verify_bilateral_swap, verify_burn, verify_dividend, verify_join_split, verify_mint,
    verify_private_range,
};

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

// --------------------------- join-split ---------------------------

#[test]
fn join_split_round_trips() {
    let mut rng = rng(1);
    let input = join_split::JoinSplitInput {
        input_notes: notes(&mut rng, &[10, 20]),
        output_notes: notes(&mut rng, &[5, 15, 10]),
        sender: SENDER,
        public_value: [0u8; 32],
        public_owner: [0x22u8; 20],
    };
    let proof = join_split::prove(&input, &mut rng).unwrap();
    verify_join_split(&proof.encoded, &SENDER).unwrap();
}

#[test]
fn join_split_withdrawal_and_deposit_round_trip() {
    let mut rng = rng(2);
    let withdrawal = join_split::JoinSplitInput {
        input_notes: notes(&mut rng, &[10, 20]),
        output_notes: notes(&mut rng, &[15]),
        sender: SENDER,
        public_value: public_value_word(15, false),
        public_owner: [0x22u8; 20],
    };
    let proof = join_split::prove(&withdrawal, &mut rng).unwrap();
    verify_join_split(&proof.encoded, &SENDER).unwrap();

    let deposit = join_split::JoinSplitInput {
        input_notes: notes(&mut rng, &[10]),
        output_notes: notes(&mut rng, &[20, 5]),
        sender: SENDER,
        public_value: public_value_word(15, true),
        public_owner: [0x22u8; 20],
    };
    let proof = join_split::prove(&deposit, &mut rng).unwrap();
    verify_join_split(&proof.encoded, &SENDER).unwrap();
}

#[test]
fn join_split_handles_all_input_and_all_output_shapes() {
    let mut rng = rng(20);
    // Pure withdrawal: every note is an input, kPublic = 10 + 5.
    let all_inputs = join_split::JoinSplitInput {
        input_notes: notes(&mut rng, &[10, 5]),
        output_notes: Vec::new(),
        sender: SENDER,
        public_value: public_value_word(15, false),
        public_owner: [0x22u8; 20],
    };
    let proof = join_split::prove(&all_inputs, &mut rng).unwrap();
    verify_join_split(&proof.encoded, &SENDER).unwrap();

    // Pure deposit: every note is an output, kPublic = −15.
    let all_outputs = join_split::JoinSplitInput {
        input_notes: Vec::new(),
        output_notes: notes(&mut rng, &[10, 5]),
        sender: SENDER,
        public_value: public_value_word(15, true),
        public_owner: [0x22u8; 20],
    };
    let proof = join_split::prove(&all_outputs, &mut rng).unwrap();
    verify_join_split(&proof.encoded, &SENDER).unwrap();
}

#[test]
fn join_split_rejects_an_unbalanced_ledger() {
    let mut rng = rng(3);
    // 10 + 20 ≠ 5 + 15 + 11 with kPublic = 0.
    let input = join_split::JoinSplitInput {
        input_notes: notes(&mut rng, &[10, 20]),
        output_notes: notes(&mut rng, &[5, 15, 11]),
        sender: SENDER,
        public_value: [0u8; 32],
        public_owner: [0x22u8; 20],
    };
    let proof = join_split::prove(&input, &mut rng).unwrap();
    assert_eq!(
        verify_join_split(&proof.encoded, &SENDER).unwrap_err(),
        ProofError::ChallengeResponseFail
    );
}

#[test]
fn join_split_rejects_tampering_and_a_wrong_sender() {
    let mut rng = rng(4);
    let input = join_split::JoinSplitInput {
        input_notes: notes(&mut rng, &[7, 3]),
        output_notes: notes(&mut rng, &[10]),
        sender: SENDER,
        public_value: [0u8; 32],
        public_owner: [0x22u8; 20],
    };
    let proof = join_split::prove(&input, &mut rng).unwrap();

    // Flip one bit of the challenge word.
    let mut tampered = proof.encoded.clone();
    tampered[32 + 31] ^= 0x01;
    assert!(verify_join_split(&tampered, &SENDER).is_err());

    // Swap in a response from thin air.
    let mut decoded = decode_proof(&proof.encoded).unwrap();
    decoded.records[0].k_bar += Fr::from(1u64);
    let reencoded = encode_decoded(&decoded).unwrap();
    assert_eq!(
        verify_join_split(&reencoded, &SENDER).unwrap_err(),
        ProofError::ChallengeResponseFail
    );

    let wrong_sender = [0xbbu8; 20];
    assert_eq!(
        verify_join_split(&proof.encoded, &wrong_sender).unwrap_err(),
        ProofError::ChallengeResponseFail
    );
}

#[test]
fn expected_output_matches_a_relayer_recomputation() {
    let mut rng = rng(5);
    let input = join_split::JoinSplitInput {
        input_notes: notes(&mut rng, &[4, 6]),
        output_notes: notes(&mut rng, &[10]),
        sender: SENDER,
        public_value: [0u8; 32],
        public_owner: [0x22u8; 20],
    };
    let proof = join_split::prove(&input, &mut rng).unwrap();
    assert_eq!(proof.expected_output.len(), 32);
    assert_eq!(proof.expected_output_hex().len(), 66);
    // The hash binds the challenge, so fresh blinding randomness moves it.
    let again = join_split::prove(&input, &mut rng).unwrap();
    assert_ne!(proof.expected_output, again.expected_output);
}

// ------------------------------ swap ------------------------------

#[test]
fn swap_round_trips_and_rejects_unpaired_values() {
    let mut rng = rng(6);
    let paired = swap::BilateralSwapInput {
        notes: notes(&mut rng, &[10, 20, 10, 20]),
        sender: SENDER,
    };
    let proof = swap::prove(&paired, &mut rng).unwrap();
    verify_bilateral_swap(&proof.encoded, &SENDER).unwrap();

    let unpaired = swap::BilateralSwapInput {
        notes: notes(&mut rng, &[10, 20, 10, 21]),
        sender: SENDER,
    };
    let proof = swap::prove(&unpaired, &mut rng).unwrap();
    assert_eq!(
        verify_bilateral_swap(&proof.encoded, &SENDER).unwrap_err(),
        ProofError::ChallengeResponseFail
    );
}

// ---------------------------- dividend ----------------------------

#[test]
fn dividend_round_trips_and_binds_the_ratio() {
    let mut rng = rng(7);
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
    verify_dividend(&proof.encoded, &SENDER, 100, 5).unwrap();

    // Same blob, different public ratio: the challenge no longer closes.
    assert_eq!(
        verify_dividend(&proof.encoded, &SENDER, 101, 5).unwrap_err(),
        ProofError::ChallengeResponseFail
    );
}

#[test]
fn dividend_rejects_a_broken_relation() {
    let mut rng = rng(8);
    // 5·90 ≠ 100·5 + 50
    let all = notes(&mut rng, &[90, 5, 50]);
    let input = dividend::DividendInput {
        source_note: all[0].clone(),
        target_note: all[1].clone(),
        residual_note: all[2].clone(),
        za: 100,
        zb: 5,
        sender: SENDER,
    };
    let proof = dividend::prove(&input, &mut rng).unwrap();
    assert_eq!(
        verify_dividend(&proof.encoded, &SENDER, 100, 5).unwrap_err(),
        ProofError::ChallengeResponseFail
    );
}

// ------------------------------ range ------------------------------

#[test]
fn range_proves_ten_at_least_four() {
    let mut rng = rng(9);
    let all = notes(&mut rng, &[10, 4, 6]);
    let input = range::PrivateRangeInput {
        original_note: all[0].clone(),
        comparison_note: all[1].clone(),
        utility_note: all[2].clone(),
        sender: SENDER,
    };
    let proof = range::prove(&input, &mut rng).unwrap();
    verify_private_range(&proof.encoded, &SENDER).unwrap();
}

#[test]
fn range_rejects_four_at_least_ten() {
    let mut rng = rng(10);
    let all = notes(&mut rng, &[4, 10, 6]);
    let input = range::PrivateRangeInput {
        original_note: all[0].clone(),
        comparison_note: all[1].clone(),
        utility_note: all[2].clone(),
        sender: SENDER,
    };
    let proof = range::prove(&input, &mut rng).unwrap();
    assert_eq!(
        verify_private_range(&proof.encoded, &SENDER).unwrap_err(),
        ProofError::ChallengeResponseFail
    );
}

#[test]
fn range_third_slot_is_ignored_by_verification() {
    let mut rng = rng(11);
    let all = notes(&mut rng, &[10, 4, 6]);
    let input = range::PrivateRangeInput {
        original_note: all[0].clone(),
        comparison_note: all[1].clone(),
        utility_note: all[2].clone(),
        sender: SENDER,
    };
    let proof = range::prove(&input, &mut rng).unwrap();

    // Legacy provers emitted a random filler; both encodings must verify.
    let mut decoded = decode_proof(&proof.encoded).unwrap();
    decoded.records[2].k_bar = random_scalar(&mut rng);
    let legacy = encode_decoded(&decoded).unwrap();
    verify_private_range(&legacy, &SENDER).unwrap();
}

// --------------------------- mint / burn ---------------------------

#[test]
fn mint_round_trips_and_rejects_a_supply_mismatch() {
    let mut rng = rng(12);
    let all = notes(&mut rng, &[0, 30, 10, 20]);
    let input = mint::MintInput {
        current_total_note: all[0].clone(),
        new_total_note: all[1].clone(),
        minted_notes: vec![all[2].clone(), all[3].clone()],
        sender: SENDER,
    };
    let proof = mint::prove(&input, &mut rng).unwrap();
    verify_mint(&proof.encoded, &SENDER).unwrap();

    let bad = notes(&mut rng, &[0, 30, 10, 21]);
    let input = mint::MintInput {
        current_total_note: bad[0].clone(),
        new_total_note: bad[1].clone(),
        minted_notes: vec![bad[2].clone(), bad[3].clone()],
        sender: SENDER,
    };
    let proof = mint::prove(&input, &mut rng).unwrap();
    assert_eq!(
        verify_mint(&proof.encoded, &SENDER).unwrap_err(),
        ProofError::ChallengeResponseFail
    );
}

#[test]
fn burn_round_trips() {
    let mut rng = rng(13);
    let all = notes(&mut rng, &[5, 35, 10, 20]);
    let input = burn::BurnInput {
        current_total_note: all[0].clone(),
        new_total_note: all[1].clone(),
        burned_notes: vec![all[2].clone(), all[3].clone()],
        sender: SENDER,
    };
    let proof = burn::prove(&input, &mut rng).unwrap();
    verify_burn(&proof.encoded, &SENDER).unwrap();
}

#[test]
fn mint_binds_the_new_total_hash() {
    let mut rng = rng(14);
    let all = notes(&mut rng, &[0, 30, 30]);
    let input = mint::MintInput {
        current_total_note: all[0].clone(),
        new_total_note: all[1].clone(),
        minted_notes: vec![all[2].clone()],
        sender: SENDER,
    };
    let proof = mint::prove(&input, &mut rng).unwrap();

    let mut decoded = decode_proof(&proof.encoded).unwrap();
    decoded.aux[0] ^= 0x01;
    let forged = encode_decoded(&decoded).unwrap();
    assert_eq!(
        verify_mint(&forged, &SENDER).unwrap_err(),
        ProofError::ChallengeResponseFail
    );
}
