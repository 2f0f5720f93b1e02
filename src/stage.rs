//! Filepath: src/stage.rs
//!
//! Bijective stage primitives shared by every tier pipeline.
//!
//! Each function here is a bijection on `[0, n)` once its parameters are
//! fixed, so any composition of them is a bijection too. The tiers differ
//! only in which stages they chain, the constants they feed in, and the
//! integer width ([`Word`]) they run at.
//!
//! # Overflow
//!
//! None of these functions widen. Callers pick a [`Word`] wide enough that
//! every `s * gear + r` they can produce fits; each tier documents its bound.

use std::fmt::Debug;
use std::ops::{Add, BitXor, Div, Mul, Rem, Sub};

/// Unsigned integer width a pipeline runs at.
pub trait Word:
    Copy
    + Debug
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
    + BitXor<Output = Self>
{
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
}

impl Word for u32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
}

impl Word for u64 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
}

/// Pick the multiplier for an affine map modulo `modulus`.
///
/// Returns `gear` unless it divides `modulus`, in which case `fallback` is
/// returned. `gear` and `fallback` must be distinct primes whose product
/// exceeds every `modulus` the caller passes: then at most one of them can
/// divide `modulus`, and the returned prime is coprime with it.
#[must_use]
#[inline(always)]
pub fn coprime_gear<W: Word>(modulus: W, gear: W, fallback: W) -> W {
    if modulus % gear == W::ZERO {
        fallback
    } else {
        gear
    }
}

/// Cut the deck: `(s + cut) mod n`.
///
/// Requires `s < n` and `cut < n`.
#[must_use]
#[inline(always)]
pub fn cut<W: Word>(s: W, cut: W, n: W) -> W {
    (s + cut) % n
}

/// Spin the multiples of `p`.
///
/// A multiple `s = k * p` is re-indexed to `((k * gear + r) mod m) * p` with
/// `m = ceil(n / p)`; every other value is left alone. Since `gear` is coprime
/// with `m`, the map permutes the residue class `0 mod p` inside `[0, n)`.
#[must_use]
#[inline(always)]
pub fn spin<W: Word>(s: W, p: W, gear: W, r: W, n: W) -> W {
    if s % p != W::ZERO {
        return s;
    }

    let m: W = spin_range(n, p);
    (((s / p) * gear + r) % m) * p
}

/// Number of multiples of `p` in `[0, n)`, i.e. `ceil(n / p)`.
#[must_use]
#[inline(always)]
pub fn spin_range<W: Word>(n: W, p: W) -> W {
    (n + p - W::ONE) / p
}

/// Fold the lower half: for `s <= n / 2`,
/// `s = n/2 - ((s * gear + r) mod (n/2 + 1))`.
///
/// An affine bijection of `[0, n/2]` followed by a reversal of the same
/// range; the upper half is untouched. `gear` must be coprime with `n/2 + 1`.
#[must_use]
#[inline(always)]
pub fn fold<W: Word>(s: W, gear: W, r: W, n: W) -> W {
    let half: W = fold_half(n);

    if s > half {
        return s;
    }

    half - ((s * gear + r) % (half + W::ONE))
}

/// The upper end `n / 2` of the range [`fold`] acts on.
#[must_use]
#[inline(always)]
pub fn fold_half<W: Word>(n: W) -> W {
    n / (W::ONE + W::ONE)
}

/// Guarded XOR flip: `s ^ mask` when that stays below `n`, else `s`.
///
/// The flip is an involution on the set `{s : s ^ mask < n}` and the identity
/// elsewhere.
#[must_use]
#[inline(always)]
pub fn flip<W: Word>(s: W, mask: W, n: W) -> W {
    let flipped: W = s ^ mask;

    if flipped < n { flipped } else { s }
}

/// Relatively prime gear turn: `(s * gear + r) mod n`.
///
/// `gear` must be coprime with `n`.
#[must_use]
#[inline(always)]
pub fn turn<W: Word>(s: W, gear: W, r: W, n: W) -> W {
    (s * gear + r) % n
}

// ============================================================================
//  Tests
// ============================================================================
