//! Filepath: src/tier/standard.rs
//!
//! The standard tier: domains up to 65 536 with 32-bit arithmetic.
//!
//! Pipeline (every stage a bijection on `[0, N)`):
//!
//! 1. cut the deck by `id mod N`
//! 2. spin the multiples of 3
//! 3. spin the multiples of 2
//! 4. fold the lower half
//! 5. guarded XOR flip by `rx`
//! 6. relatively prime gear turn
//! 7. guarded XOR flip by `rx2`
//!
//! # Overflow
//!
//! With `N <= 65 536` every intermediate stays below 2^32: the largest product
//! is the closing turn, `65 535 * 62 141 + 65 478 < 4.08e9`.

use crate::continuation;
use crate::domain::DomainError;
use crate::stage;
use crate::tier::Tier;
use crate::tracing_helpers::debug_log;

/// Moduli for `r1..r4`. Distinct primes, so the residues of an identifier
/// reconstruct it uniquely (CRT).
const FACTOR_MODULI: [u32; 4] = [65_521, 65_519, 65_497, 65_479];

/// Gear for the multiples-of-3 spin. Exceeds `ceil(65 536 / 3)`.
const SPIN3_GEAR: u32 = 24_317;

/// Gear for the multiples-of-2 spin. Exceeds `65 536 / 2`.
const SPIN2_GEAR: u32 = 32_141;

/// Gear for the half fold. Exceeds `65 536 / 2 + 1`.
const FOLD_GEAR: u32 = 63_629;

/// Gear for the closing turn over the full domain.
const TURN_GEAR: u32 = 62_141;

/// Replacement for any gear that divides its modulus.
const FALLBACK_GEAR: u32 = 49_157;

/// Golden-ratio stride for continuation pages.
const PAGE_STRIDE: u32 = 0x9E37_79B9;

/// The standard tier marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Standard;

/// Randomizing factors of the standard tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardFactors {
    cut: u32,
    r1: u32,
    r2: u32,
    r3: u32,
    r4: u32,
    rx: u32,
    rx2: u32,
    spin3_gear: u32,
    spin2_gear: u32,
    fold_gear: u32,
    turn_gear: u32,
}

impl StandardFactors {
    /// The initial cut, `id mod N`.
    #[must_use]
    #[inline(always)]
    pub const fn cut(&self) -> u32 {
        self.cut
    }

    /// Multiplier of the closing gear turn (the fallback when the preferred
    /// gear divides `N`).
    #[must_use]
    #[inline(always)]
    pub const fn turn_gear(&self) -> u32 {
        self.turn_gear
    }
}

fn pick_gear(modulus: u32, gear: u32) -> u32 {
    let chosen: u32 = stage::coprime_gear(modulus, gear, FALLBACK_GEAR);

    if chosen != gear {
        debug_log!(
            tier = Standard::NAME,
            modulus,
            gear,
            fallback = FALLBACK_GEAR,
            "gear divides its modulus, using fallback"
        );
    }

    chosen
}

impl Tier for Standard {
    type Id = u32;
    type Factors = StandardFactors;

    const NAME: &'static str = "standard";
    const MAX_DOMAIN: u64 = 65_536;

    #[inline]
    fn continue_id(id: u32, page: u64) -> u32 {
        // The product is taken mod 2^32, so only the low 32 bits of the page count.
        #[allow(clippy::cast_possible_truncation)]
        let page: u32 = page as u32;
        id ^ page.wrapping_mul(PAGE_STRIDE)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn derive_factors(id: u32, n: u64) -> StandardFactors {
        let n: u32 = n as u32;
        let [k1, k2, k3, k4] = FACTOR_MODULI;

        StandardFactors {
            cut: id % n,
            r1: id % k1,
            r2: id % k2,
            r3: id % k3,
            r4: id % k4,
            rx: (id / n) % n,
            rx2: id.rotate_left(16) % n,
            spin3_gear: pick_gear(stage::spin_range(n, 3), SPIN3_GEAR),
            spin2_gear: pick_gear(stage::spin_range(n, 2), SPIN2_GEAR),
            fold_gear: pick_gear(stage::fold_half(n) + 1, FOLD_GEAR),
            turn_gear: pick_gear(n, TURN_GEAR),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn mix(offset: u64, f: &StandardFactors, n: u64) -> u64 {
        let n: u32 = n as u32;
        let mut s: u32 = offset as u32;

        s = stage::cut(s, f.cut, n);
        s = stage::spin(s, 3, f.spin3_gear, f.r1, n);
        s = stage::spin(s, 2, f.spin2_gear, f.r2, n);
        s = stage::fold(s, f.fold_gear, f.r3, n);
        s = stage::flip(s, f.rx, n);
        s = stage::turn(s, f.turn_gear, f.r4, n);
        s = stage::flip(s, f.rx2, n);

        u64::from(s)
    }
}

/// Shuffle `index` over a domain of `size` items (standard tier).
///
/// Indexes at or beyond `size` continue into further pages, each a fresh
/// permutation. Returns 0 when `size` is 0 or above 65 536.
///
/// # Example
///
/// ```rust
/// use gearshuffle::tier::standard;
///
/// let mut seen = [false; 52];
/// for i in 0..52 {
///     let card = standard::shuffle(i, 0xC0FFEE, 52) as usize;
///     assert!(!seen[card]);
///     seen[card] = true;
/// }
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn shuffle(index: u32, shuffle_id: u32, size: u32) -> u32 {
    continuation::shuffle_with::<Standard>(u64::from(index), shuffle_id, u64::from(size)) as u32
}

/// Checked variant of [`shuffle`].
///
/// # Errors
///
/// [`DomainError::Empty`] or [`DomainError::TooLarge`] when `size` is outside
/// `1..=65 536`.
#[allow(clippy::cast_possible_truncation)]
pub fn try_shuffle(index: u32, shuffle_id: u32, size: u32) -> Result<u32, DomainError> {
    continuation::try_shuffle_with::<Standard>(u64::from(index), shuffle_id, u64::from(size))
        .map(|out| out as u32)
}

// ============================================================================
//  Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_permutation(id: u32, n: u32) {
        let mut seen = vec![false; n as usize];
        for i in 0..n {
            let out = shuffle(i, id, n);
            assert!(out < n, "id={id} n={n} i={i} out={out}");
            assert!(!seen[out as usize], "duplicate {out} for id={id} n={n}");
            seen[out as usize] = true;
        }
    }

    #[test]
    fn test_small_domains_are_permutations() {
        for n in 1..=300 {
            for id in [0, 1, 7, 12_345, 0xDEAD_BEEF, u32::MAX] {
                assert_permutation(id, n);
            }
        }
    }

    #[test]
    fn test_gear_prime_domains_are_permutations() {
        // 62 141 trips the closing turn gear, 64 281/64 282 the 2-spin gear.
        for n in [62_141, 63_629, 64_281, 64_282] {
            assert_permutation(0x2545_F491, n);
        }
    }

    #[test]
    fn test_full_domain_is_permutation() {
        assert_permutation(99, 65_536);
    }

    #[test]
    fn test_turn_gear_fallback() {
        let f = Standard::derive_factors(5, 62_141);
        assert_eq!(f.turn_gear(), FALLBACK_GEAR);

        let f = Standard::derive_factors(5, 62_142);
        assert_eq!(f.turn_gear(), TURN_GEAR);
    }

    #[test]
    fn test_factors() {
        let f = Standard::derive_factors(1_000_000, 52);
        assert_eq!(f.cut(), 1_000_000 % 52);
        assert_eq!(f.r1, 1_000_000 % 65_521);
        assert_eq!(f.rx, (1_000_000 / 52) % 52);
        assert_eq!(f.rx2, 1_000_000u32.rotate_left(16) % 52);
    }

    #[test]
    fn test_known_sequence() {
        let out: Vec<u32> = (0..10).map(|i| shuffle(i, 1, 10)).collect();
        assert_eq!(out, vec![0, 5, 9, 1, 2, 6, 8, 3, 7, 4]);
    }

    #[test]
    fn test_continue_id_page_zero() {
        assert_eq!(Standard::continue_id(42, 0), 42);
        assert_ne!(Standard::continue_id(42, 1), 42);
    }

    #[test]
    fn test_out_of_range_size() {
        assert_eq!(shuffle(3, 1, 0), 0);
        assert_eq!(shuffle(3, 1, 65_537), 0);
        assert!(try_shuffle(3, 1, 65_537).is_err());
        assert!(try_shuffle(3, 1, 65_536).is_ok());
    }
}
