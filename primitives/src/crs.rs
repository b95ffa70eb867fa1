//! Common reference string shared by every proof.
//!
//! The second Pedersen generator h is derived once from a fixed seed, so it
//! is on-curve by construction and carries no known discrete log. The G2
//! trusted-setup point t2 is a frozen output of the setup ceremony, carried
//! as four opaque coordinates; this library never pairs with it, it only
//! reproduces the byte layout the validator expects.

use ark_bn254::{Fq, G1Affine};
use once_cell::sync::Lazy;

use crate::error::ProofError;
use crate::field::{fq_from_hex, fq_to_be_bytes};
use crate::group::{map_to_point, point_from_be_bytes};

/// Seed for the second Pedersen generator.
const H_SEED: &[u8] = b"AZTEC_PEDERSEN_H";

const T2_X_IMAGINARY: &str = "0x01cf7cc93bfbf7b2c5f04a3bc9cb8b72bbcf2defcabdceb09860c493bdf1588d";
const T2_X_REAL: &str = "0x08d554bf59102bbb961ba81107ec71785ef9ce6638e5332b6c1a58b87447d181";
const T2_Y_IMAGINARY: &str = "0x204e5d81d86c561f9344ad5f122a625f259996b065b80cbbe74a9ad97b6d7cc2";
const T2_Y_REAL: &str = "0x02cb2a424885c9e412b94c40905b359e3043275cd29f5b557f008cd0a3e0c0dc";

/// G2 trusted-setup point, coordinate order (xi, xr, yi, yr).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupPoint {
    pub x_imaginary: Fq,
    pub x_real: Fq,
    pub y_imaginary: Fq,
    pub y_real: Fq,
}

/// The fixed generators {h, t2}.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crs {
    pub h: G1Affine,
    pub t2: SetupPoint,
}

static CRS: Lazy<Crs> = Lazy::new(|| Crs {
    h: map_to_point(H_SEED),
    t2: SetupPoint {
        x_imaginary: fq_from_hex(T2_X_IMAGINARY).expect("setup constant in range"),
        x_real: fq_from_hex(T2_X_REAL).expect("setup constant in range"),
        y_imaginary: fq_from_hex(T2_Y_IMAGINARY).expect("setup constant in range"),
        y_real: fq_from_hex(T2_Y_REAL).expect("setup constant in range"),
    },
});

/// The process-wide reference string. Immutable after first use and safe to
/// share across threads.
pub fn crs() -> &'static Crs {
    &CRS
}

/// Shorthand for the second generator.
pub fn h() -> G1Affine {
    CRS.h
}

impl Crs {
    /// h.x ‖ h.y ‖ t2.xi ‖ t2.xr ‖ t2.yi ‖ t2.yr, 32 bytes each.
    pub const ENCODED_LEN: usize = 160;

    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        let words = [
            fq_to_be_bytes(self.h.x),
            fq_to_be_bytes(self.h.y),
            fq_to_be_bytes(self.t2.x_imaginary),
            fq_to_be_bytes(self.t2.x_real),
            fq_to_be_bytes(self.t2.y_imaginary),
            fq_to_be_bytes(self.t2.y_real),
        ];
        for (i, word) in words.iter().enumerate() {
            out[i * 32..(i + 1) * 32].copy_from_slice(word);
        }
        out
    }

    /// Load and validate a 160-byte blob. h must be a real curve point; the
    /// t2 coordinates must be canonical field elements.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProofError> {
        if bytes.len() != Self::ENCODED_LEN {
            return Err(ProofError::EncodingInvalidLength);
        }
        let word = |i: usize| -> [u8; 32] {
            let mut out = [0u8; 32];
            out.copy_from_slice(&bytes[i * 32..(i + 1) * 32]);
            out
        };
        let h = point_from_be_bytes(&word(0), &word(1))?;
        let coordinate = |i: usize| crate::field::fq_from_be_bytes(&word(i));
        Ok(Crs {
            h,
            t2: SetupPoint {
                x_imaginary: coordinate(2)?,
                x_real: coordinate(3)?,
                y_imaginary: coordinate(4)?,
                y_real: coordinate(5)?,
            },
        })
    }
}
