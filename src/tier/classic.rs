//! Filepath: src/tier/classic.rs
//!
//! The classic tier: the first-generation pipeline, superseded by
//! [`Standard`](crate::tier::Standard).
//!
//! Kept behind the [`Tier`] trait for callers that recorded shuffles with it.
//! It mixes less than the current tiers (one multiplicative turn, one bit
//! shuffle of a binary field, one reversal, one closing turn) and its
//! continuation pages only step the identifier by one.
//!
//! Pipeline:
//!
//! 1. `s = (s * 16183 + id mod 1009) mod N`
//! 2. inside the low binary field `[0, field]`: swap bits {1,2} with {5,6}
//!    (when `N >= 128`), then XOR the lower half of the field with `0x5555`
//! 3. odd values are reflected against the largest even value `<= N`
//! 4. `s = (s * 6197 + id mod N) mod N`

use crate::continuation;
use crate::domain::DomainError;
use crate::stage;
use crate::tier::Tier;

const FIRST_GEAR: u64 = 16_183;
const LAST_GEAR: u64 = 6_197;
const FALLBACK_GEAR: u64 = 12_289;

/// Modulus for the first turn's offset.
const R1_MODULUS: u32 = 1_009;

/// Pattern of bits flipped in the lower half of the binary field.
const FLIP_PATTERN: u32 = 0x5555;

/// Clears bits 1, 2, 5, 6 of a 16-bit value.
const BIT_SWAP_KEEP: u32 = 0xFF99;

/// The classic tier marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Classic;

/// Randomizing factors of the classic tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassicFactors {
    r1: u32,
    r2: u32,
    /// Largest `2^k - 1` with `2 * field + 1 < N`.
    field: u32,
    xor_flip: u32,
    even_top: u32,
    first_gear: u32,
    last_gear: u32,
}

/// Largest `2^k - 1` with `2 * field + 1 < n`, or 1 for tiny `n`.
const fn binary_field(n: u32) -> u32 {
    let mut field: u32 = 1;

    while 2 * field + 1 < n {
        field = 2 * field + 1;
    }

    field
}

impl Tier for Classic {
    type Id = u32;
    type Factors = ClassicFactors;

    const NAME: &'static str = "classic";
    const MAX_DOMAIN: u64 = 16_384;

    #[inline]
    fn continue_id(id: u32, page: u64) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let page: u32 = page as u32;
        id.wrapping_add(page)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn derive_factors(id: u32, n: u64) -> ClassicFactors {
        let field: u32 = binary_field(n as u32);
        let half_field: u32 = field / 2;

        // Both gears and the fallback are below 2^32.
        let first_gear: u32 = stage::coprime_gear(n, FIRST_GEAR, FALLBACK_GEAR) as u32;
        let last_gear: u32 = stage::coprime_gear(n, LAST_GEAR, FALLBACK_GEAR) as u32;
        let n: u32 = n as u32;

        ClassicFactors {
            r1: id % R1_MODULUS,
            r2: id % n,
            field,
            xor_flip: FLIP_PATTERN & half_field,
            even_top: n - (n & 1),
            first_gear,
            last_gear,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn mix(offset: u64, f: &ClassicFactors, n: u64) -> u64 {
        let n: u32 = n as u32;
        let mut s: u32 = stage::turn(offset as u32, f.first_gear, f.r1, n);

        if s <= f.field {
            if n >= 128 {
                s = (s & BIT_SWAP_KEEP) | ((s & 0x60) >> 4) | ((s & 0x06) << 4);
            }
            if s <= f.field / 2 {
                s ^= f.xor_flip;
            }
        }

        if s & 1 == 1 {
            s = f.even_top - s;
        }

        u64::from(stage::turn(s, f.last_gear, f.r2, n))
    }
}

/// Shuffle `index` over a domain of `size` items (classic tier).
///
/// Returns 0 when `size` is 0 or above 16 384.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn shuffle(index: u32, shuffle_id: u32, size: u32) -> u32 {
    continuation::shuffle_with::<Classic>(u64::from(index), shuffle_id, u64::from(size)) as u32
}

/// Checked variant of [`shuffle`].
///
/// # Errors
///
/// [`DomainError::Empty`] or [`DomainError::TooLarge`] when `size` is outside
/// `1..=16 384`.
#[allow(clippy::cast_possible_truncation)]
pub fn try_shuffle(index: u32, shuffle_id: u32, size: u32) -> Result<u32, DomainError> {
    continuation::try_shuffle_with::<Classic>(u64::from(index), shuffle_id, u64::from(size))
        .map(|out| out as u32)
}
