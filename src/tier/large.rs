//! Filepath: src/tier/large.rs
//!
//! The large tier: domains up to the full 2^32 range.
//!
//! Same stages as the standard tier, run in 64-bit arithmetic with wider
//! factor moduli and gears, followed by one extra closing stage that negates
//! and turns the whole domain again:
//!
//! ```text
//! s = ((N - s) * gear + r5) mod N
//! ```
//!
//! # Overflow
//!
//! All gears and factors are below 2^32 and every multiplied position is at
//! most 2^32, so `s * gear + r <= 2^32 * (2^32 - 1) + 2^32 - 1 = 2^64 - 1`.
//!
//! # Full Range
//!
//! A requested size of 0 selects `N = 2^32`, covering every `u32` value.

use crate::continuation;
use crate::domain::DomainError;
use crate::stage;
use crate::tier::Tier;
use crate::tracing_helpers::debug_log;

/// Moduli for `r1..r5`: the five largest primes below 2^32.
const FACTOR_MODULI: [u64; 5] = [
    4_294_967_291,
    4_294_967_279,
    4_294_967_231,
    4_294_967_197,
    4_294_967_189,
];

const SPIN3_GEAR: u64 = 3_000_000_019;
const SPIN2_GEAR: u64 = 2_400_000_011;
const FOLD_GEAR: u64 = 3_600_000_011;
const TURN_GEAR: u64 = 2_147_483_647;
const CLOSE_GEAR: u64 = 3_221_225_473;

/// Replacement for any gear that divides its modulus. Every gear here is
/// above 2^16, so a gear and the fallback can never both divide `N <= 2^32`.
const FALLBACK_GEAR: u64 = 2_000_000_011;

/// 64-bit golden-ratio stride for continuation pages.
const PAGE_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// The large tier marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Large;

/// Randomizing factors of the large tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LargeFactors {
    cut: u64,
    r: [u64; 5],
    rx: u64,
    rx2: u64,
    spin3_gear: u64,
    spin2_gear: u64,
    fold_gear: u64,
    turn_gear: u64,
    close_gear: u64,
}

impl LargeFactors {
    /// The initial cut, `id mod N`.
    #[must_use]
    #[inline(always)]
    pub const fn cut(&self) -> u64 {
        self.cut
    }
}

fn pick_gear(modulus: u64, gear: u64) -> u64 {
    let chosen: u64 = stage::coprime_gear(modulus, gear, FALLBACK_GEAR);

    if chosen != gear {
        debug_log!(
            tier = Large::NAME,
            modulus,
            gear,
            "gear divides its modulus, using fallback"
        );
    }

    chosen
}

impl Tier for Large {
    type Id = u64;
    type Factors = LargeFactors;

    const NAME: &'static str = "large";
    const MAX_DOMAIN: u64 = 1 << 32;
    const ZERO_MEANS_FULL: bool = true;

    #[inline]
    fn continue_id(id: u64, page: u64) -> u64 {
        id ^ page.wrapping_mul(PAGE_STRIDE)
    }

    fn derive_factors(id: u64, n: u64) -> LargeFactors {
        LargeFactors {
            cut: id % n,
            r: FACTOR_MODULI.map(|k| id % k),
            rx: (id / n) % n,
            rx2: id.rotate_left(32) % n,
            spin3_gear: pick_gear(stage::spin_range(n, 3), SPIN3_GEAR),
            spin2_gear: pick_gear(stage::spin_range(n, 2), SPIN2_GEAR),
            fold_gear: pick_gear(stage::fold_half(n) + 1, FOLD_GEAR),
            turn_gear: pick_gear(n, TURN_GEAR),
            close_gear: pick_gear(n, CLOSE_GEAR),
        }
    }

    fn mix(offset: u64, f: &LargeFactors, n: u64) -> u64 {
        let [r1, r2, r3, r4, r5] = f.r;
        let mut s: u64 = offset;

        s = stage::cut(s, f.cut, n);
        s = stage::spin(s, 3, f.spin3_gear, r1, n);
        s = stage::spin(s, 2, f.spin2_gear, r2, n);
        s = stage::fold(s, f.fold_gear, r3, n);
        s = stage::flip(s, f.rx, n);
        s = stage::turn(s, f.turn_gear, r4, n);
        s = stage::flip(s, f.rx2, n);

        // Negation mod N keeps the turn a bijection: N - s lies in [1, N].
        stage::turn(n - s, f.close_gear, r5, n)
    }
}

/// Shuffle `index` over a domain of `size` items (large tier).
///
/// `size == 0` shuffles the full 2^32 range. Indexes beyond the domain
/// continue into further pages.
///
/// # Example
///
/// ```rust
/// use gearshuffle::tier::large;
///
/// // Sample positions of a four-billion item shuffle without storing it.
/// let a = large::shuffle(0, 42, 0);
/// let b = large::shuffle(1, 42, 0);
/// assert_ne!(a, b);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn shuffle(index: u64, shuffle_id: u64, size: u32) -> u32 {
    // Output is below N <= 2^32.
    continuation::shuffle_with::<Large>(index, shuffle_id, u64::from(size)) as u32
}

/// Checked variant of [`shuffle`], for call sites generic over the tiers.
///
/// # Errors
///
/// Never fails: every `u32` size maps to a domain in `1..=2^32`.
#[allow(clippy::cast_possible_truncation)]
pub fn try_shuffle(index: u64, shuffle_id: u64, size: u32) -> Result<u32, DomainError> {
    continuation::try_shuffle_with::<Large>(index, shuffle_id, u64::from(size)).map(|out| out as u32)
}
