//! Filepath: src/holdback.rs
//!
//! The hold-back dealer: a retired, stateful dealing strategy.
//!
//! At the start of every page the dealer sets aside the position the base
//! shuffle would produce last. At each later position it flips a three-sided
//! coin: one time in three it deals the held position and keeps the current
//! one back instead. The final position of the page deals whatever is held.
//! Each page is still a complete permutation; the swaps only reorder it.
//!
//! The mix of this strategy was tuned by eye. No statistical property beyond
//! "every page is a permutation" is claimed for it; prefer the plain tiers.
//!
//! # Sequential Use Only
//!
//! The held position is only meaningful when positions are dealt strictly in
//! order from the start of a page, with no other deal interleaved. The dealer
//! therefore owns its cursor and is driven through `&mut self`, so a single
//! dealer can neither be shared between threads nor re-entered.

use rand::Rng;

use crate::domain::DomainError;
use crate::shuffler::Shuffler;
use crate::tier::Tier;
use crate::tracing_helpers::trace_log;

/// Deals positions with random hold-back swaps on top of a [`Shuffler`].
///
/// # Example
///
/// ```rust
/// use gearshuffle::{HoldbackDealer, Standard};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let rng = StdRng::seed_from_u64(7);
/// let dealer: HoldbackDealer<Standard, _> = HoldbackDealer::new(99, 52, rng).unwrap();
///
/// let mut hand: Vec<u64> = dealer.take(52).collect();
/// hand.sort_unstable();
/// assert!(hand.into_iter().eq(0..52));
/// ```
#[derive(Debug)]
pub struct HoldbackDealer<T: Tier, R> {
    shuffler: Shuffler<T>,
    rng: R,
    next: u64,
    held: u64,
}

impl<T: Tier, R: Rng> HoldbackDealer<T, R> {
    /// Create a dealer for `size` items, starting at index 0.
    ///
    /// # Errors
    ///
    /// Any error of [`Domain::new`](crate::Domain::new).
    pub fn new(id: T::Id, size: u64, rng: R) -> Result<Self, DomainError> {
        Ok(Self {
            shuffler: Shuffler::new(id, size)?,
            rng,
            next: 0,
            held: 0,
        })
    }

    /// The next index to be dealt.
    #[must_use]
    #[inline]
    pub const fn position(&self) -> u64 {
        self.next
    }

    /// The underlying shuffle.
    #[must_use]
    #[inline]
    pub const fn shuffler(&self) -> &Shuffler<T> {
        &self.shuffler
    }

    /// Deal the next position, or `None` once the index space is exhausted.
    pub fn deal(&mut self) -> Option<u64> {
        let n: u64 = self.shuffler.len();
        let index: u64 = self.next;
        let offset: u64 = index % n;
        let last: u64 = index.checked_add(n - 1 - offset)?;

        self.next = index.checked_add(1)?;

        if offset == 0 {
            self.held = self.shuffler.get(last);
        }

        if index == last {
            return Some(self.held);
        }

        let base: u64 = self.shuffler.get(index);
        if self.rng.random_range(0..3u8) == 1 {
            trace_log!(index, held = self.held, base, "hold-back swap");
            return Some(std::mem::replace(&mut self.held, base));
        }

        Some(base)
    }

    /// Restart dealing from index 0.
    pub const fn reset(&mut self) {
        self.next = 0;
    }
}

impl<T: Tier, R: Rng> Iterator for HoldbackDealer<T, R> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        self.deal()
    }
}
