//! Filepath: src/context.rs
//!
//! Caller-owned factor cache.
//!
//! Deriving factors costs a handful of divisions per call. A loop that walks
//! one permutation calls with the same `(identifier, N)` every time, so a
//! [`ShuffleContext`] remembers the last derivation and reuses it.
//!
//! # Thread Safety
//!
//! Every method takes `&mut self`. A context is therefore owned by one thread
//! at a time; sharing one across threads requires the caller's own lock, and
//! independent threads should simply hold independent contexts. The free
//! functions never cache anything.

use std::fmt as StdFmt;
use std::marker::PhantomData;

use crate::continuation;
use crate::domain::{Domain, DomainError};
use crate::tier::Tier;
use crate::tracing_helpers::{trace_log, warn_log};

/// Hit and miss counters of a [`ShuffleContext`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls served from the cached factors.
    pub hits: u64,
    /// Calls that derived factors.
    pub misses: u64,
}

struct CacheEntry<T: Tier> {
    id: T::Id,
    n: u64,
    factors: T::Factors,
}

impl<T: Tier> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Tier> Copy for CacheEntry<T> {}

/// Remembers the factors of the last `(identifier, N)` pair seen.
///
/// Results are identical to [`continuation::shuffle_with`]; only the amount of
/// arithmetic differs.
///
/// # Example
///
/// ```rust
/// use gearshuffle::{ShuffleContext, Standard};
///
/// let mut ctx: ShuffleContext<Standard> = ShuffleContext::new();
/// let playlist: Vec<u64> = (0..500).map(|i| ctx.shuffle(i, 0xBEEF, 500)).collect();
///
/// assert_eq!(ctx.stats().misses, 1);
/// assert_eq!(ctx.stats().hits, 499);
/// # let mut sorted = playlist.clone();
/// # sorted.sort_unstable();
/// # assert!(sorted.into_iter().eq(0..500));
/// ```
pub struct ShuffleContext<T: Tier> {
    entry: Option<CacheEntry<T>>,
    stats: CacheStats,
    _tier: PhantomData<T>,
}

impl<T: Tier> ShuffleContext<T> {
    /// Create an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entry: None,
            stats: CacheStats { hits: 0, misses: 0 },
            _tier: PhantomData,
        }
    }

    /// Checked shuffle of `index` over `size` items, reusing cached factors.
    ///
    /// # Errors
    ///
    /// Any error of [`Domain::new`].
    pub fn try_shuffle(&mut self, index: u64, id: T::Id, size: u64) -> Result<u64, DomainError> {
        let domain: Domain = Domain::new::<T>(size)?;
        Ok(continuation::shuffle_in_using::<T, _>(index, id, domain, |id, n| {
            self.factors(id, n)
        }))
    }

    /// Shuffle of `index` over `size` items, falling back to 0 on a domain
    /// error.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn shuffle(&mut self, index: u64, id: T::Id, size: u64) -> u64 {
        self.try_shuffle(index, id, size).unwrap_or_else(|err| {
            warn_log!(tier = T::NAME, size, error = %err, "invalid domain, returning 0");
            0
        })
    }

    /// Cache counters since creation or the last [`ShuffleContext::clear`].
    #[must_use]
    #[inline]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Forget the cached factors and reset the counters.
    pub fn clear(&mut self) {
        self.entry = None;
        self.stats = CacheStats::default();
    }

    fn factors(&mut self, id: T::Id, n: u64) -> T::Factors {
        if let Some(entry) = self.entry.filter(|entry| entry.id == id && entry.n == n) {
            self.stats.hits += 1;
            return entry.factors;
        }

        trace_log!(tier = T::NAME, ?id, n, "factor cache miss");
        self.stats.misses += 1;

        let factors: T::Factors = T::derive_factors(id, n);
        self.entry = Some(CacheEntry { id, n, factors });
        factors
    }
}

impl<T: Tier> Default for ShuffleContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tier> StdFmt::Debug for ShuffleContext<T> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        let cached = self.entry.as_ref().map(|entry| (entry.id, entry.n));

        f.debug_struct("ShuffleContext")
            .field("tier", &T::NAME)
            .field("cached", &cached)
            .field("stats", &self.stats)
            .finish()
    }
}
