//! Filepath: src/tier/lite.rs
//!
//! The lite tier: domains up to 32 768 for constrained targets.
//!
//! Six stages instead of seven: cut, spins of the multiples of 3 and of 2,
//! the half fold, one guarded XOR flip and the closing gear turn. The spin of
//! 3 and the fold are what reach the odd residues before the final affine
//! turn; without them runs of outputs step by a constant stride.
//!
//! Positions fit in 16 bits; products are formed in 32 bits, the largest
//! being the closing turn (`32 767 * 30 011 + 32 718 < 2^30`).

use crate::continuation;
use crate::domain::DomainError;
use crate::stage;
use crate::tier::Tier;
use crate::tracing_helpers::debug_log;

/// Moduli for `r1..r4`: distinct primes just below 2^15.
const FACTOR_MODULI: [u32; 4] = [32_749, 32_719, 32_717, 32_713];

/// Gear for the multiples-of-3 spin. Exceeds `ceil(32 768 / 3)`.
const SPIN3_GEAR: u32 = 11_113;

/// Gear for the multiples-of-2 spin. Exceeds `32 768 / 2`.
const SPIN2_GEAR: u32 = 20_011;

/// Gear for the half fold. Exceeds `32 768 / 2 + 1`.
const FOLD_GEAR: u32 = 16_411;

/// Gear for the closing turn.
const TURN_GEAR: u32 = 30_011;

/// Replacement for any gear that divides its modulus.
const FALLBACK_GEAR: u32 = 12_289;

/// Golden-ratio stride for continuation pages.
const PAGE_STRIDE: u32 = 0x9E37_79B9;

/// The lite tier marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lite;

/// Randomizing factors of the lite tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiteFactors {
    cut: u32,
    r1: u32,
    r2: u32,
    r3: u32,
    r4: u32,
    rx: u32,
    spin3_gear: u32,
    spin2_gear: u32,
    fold_gear: u32,
    turn_gear: u32,
}

impl LiteFactors {
    /// The initial cut, `id mod N`.
    #[must_use]
    #[inline(always)]
    pub const fn cut(&self) -> u32 {
        self.cut
    }
}

impl Tier for Lite {
    type Id = u32;
    type Factors = LiteFactors;

    const NAME: &'static str = "lite";
    const MAX_DOMAIN: u64 = 32_768;

    #[inline]
    fn continue_id(id: u32, page: u64) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let page: u32 = page as u32;
        id ^ page.wrapping_mul(PAGE_STRIDE)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn derive_factors(id: u32, n: u64) -> LiteFactors {
        let n: u32 = n as u32;
        let [k1, k2, k3, k4] = FACTOR_MODULI;

        let turn_gear: u32 = stage::coprime_gear(n, TURN_GEAR, FALLBACK_GEAR);
        if turn_gear != TURN_GEAR {
            debug_log!(tier = Lite::NAME, n, "turn gear divides N, using fallback");
        }

        LiteFactors {
            cut: id % n,
            r1: id % k1,
            r2: id % k2,
            r3: id % k3,
            r4: id % k4,
            rx: (id / n) % n,
            spin3_gear: stage::coprime_gear(stage::spin_range(n, 3), SPIN3_GEAR, FALLBACK_GEAR),
            spin2_gear: stage::coprime_gear(stage::spin_range(n, 2), SPIN2_GEAR, FALLBACK_GEAR),
            fold_gear: stage::coprime_gear(stage::fold_half(n) + 1, FOLD_GEAR, FALLBACK_GEAR),
            turn_gear,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn mix(offset: u64, f: &LiteFactors, n: u64) -> u64 {
        let n: u32 = n as u32;
        let mut s: u32 = offset as u32;

        s = stage::cut(s, f.cut, n);
        s = stage::spin(s, 3, f.spin3_gear, f.r3, n);
        s = stage::spin(s, 2, f.spin2_gear, f.r1, n);
        s = stage::fold(s, f.fold_gear, f.r4, n);
        s = stage::flip(s, f.rx, n);
        s = stage::turn(s, f.turn_gear, f.r2, n);

        u64::from(s)
    }
}

/// Shuffle `index` over a domain of `size` items (lite tier).
///
/// Returns 0 when `size` is 0 or above 32 768.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn shuffle(index: u32, shuffle_id: u32, size: u32) -> u32 {
    continuation::shuffle_with::<Lite>(u64::from(index), shuffle_id, u64::from(size)) as u32
}

/// Checked variant of [`shuffle`].
///
/// # Errors
///
/// [`DomainError::Empty`] or [`DomainError::TooLarge`] when `size` is outside
/// `1..=32 768`.
#[allow(clippy::cast_possible_truncation)]
pub fn try_shuffle(index: u32, shuffle_id: u32, size: u32) -> Result<u32, DomainError> {
    continuation::try_shuffle_with::<Lite>(u64::from(index), shuffle_id, u64::from(size))
        .map(|out| out as u32)
}
