//! Filepath: src/continuation.rs
//!
//! Overflow/continuation adapter and the generic entry points.
//!
//! An index `i >= N` is read as page `i / N`, offset `i % N`. The page number
//! perturbs the shuffle identifier ([`Tier::continue_id`]) before the factors
//! are derived, so one identifier yields an unbounded chain of different
//! permutations of the same `N` items. Page 0 is the plain, unadapted shuffle.
//!
//! # Data Flow
//!
//! ```text
//! index ──► Page::split ──► continue_id ──► edge::resolve ──► derive_factors ──► mix
//! ```

use crate::domain::{Domain, DomainError};
use crate::edge;
use crate::tier::Tier;
use crate::tracing_helpers::warn_log;

/// An index split into its continuation page and the offset inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    /// `index / N`.
    pub number: u64,
    /// `index % N`.
    pub offset: u64,
}

impl Page {
    /// Split `index` for a domain of `n` positions.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`; a [`Domain`] is never 0.
    #[must_use]
    #[inline(always)]
    pub const fn split(index: u64, n: u64) -> Self {
        Self {
            number: index / n,
            offset: index % n,
        }
    }
}

/// Shuffle `index` in a validated domain, deriving factors fresh.
#[must_use]
#[inline]
pub fn shuffle_in<T: Tier>(index: u64, id: T::Id, domain: Domain) -> u64 {
    shuffle_in_using::<T, _>(index, id, domain, T::derive_factors)
}

/// Shuffle `index` in a validated domain, obtaining factors from `factors`.
///
/// `factors` receives the page-adjusted identifier and `N` and must return
/// what [`Tier::derive_factors`] would; callers use this to serve the factors
/// from a cache. It is not called for `N <= 2`.
#[inline]
pub fn shuffle_in_using<T, F>(index: u64, id: T::Id, domain: Domain, factors: F) -> u64
where
    T: Tier,
    F: FnOnce(T::Id, u64) -> T::Factors,
{
    let n: u64 = domain.get();
    let page: Page = Page::split(index, n);
    let id: T::Id = T::continue_id(id, page.number);

    if let Some(out) = edge::resolve(page.offset, id.into(), n) {
        return out;
    }

    T::mix(page.offset, &factors(id, n), n)
}

/// Checked shuffle of `index` over `size` items with tier `T`.
///
/// # Errors
///
/// Any error of [`Domain::new`].
///
/// # Example
///
/// ```rust
/// use gearshuffle::continuation::try_shuffle_with;
/// use gearshuffle::{DomainError, Lite};
///
/// assert!(try_shuffle_with::<Lite>(3, 77, 10).is_ok_and(|out| out < 10));
/// assert_eq!(try_shuffle_with::<Lite>(3, 77, 0), Err(DomainError::Empty));
/// ```
pub fn try_shuffle_with<T: Tier>(index: u64, id: T::Id, size: u64) -> Result<u64, DomainError> {
    let domain: Domain = Domain::new::<T>(size)?;
    Ok(shuffle_in::<T>(index, id, domain))
}

/// Shuffle of `index` over `size` items with tier `T`, falling back to 0 when
/// `size` is not a valid domain for `T`.
#[must_use]
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn shuffle_with<T: Tier>(index: u64, id: T::Id, size: u64) -> u64 {
    try_shuffle_with::<T>(index, id, size).unwrap_or_else(|err| {
        warn_log!(tier = T::NAME, size, error = %err, "invalid domain, returning 0");
        0
    })
}

// ============================================================================
//  Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::{Large, Lite, Standard};

    #[test]
    fn test_split() {
        assert_eq!(Page::split(0, 52), Page { number: 0, offset: 0 });
        assert_eq!(Page::split(51, 52), Page { number: 0, offset: 51 });
        assert_eq!(Page::split(52, 52), Page { number: 1, offset: 0 });
        assert_eq!(Page::split(u64::MAX, 1 << 32), Page {
            number: (1 << 32) - 1,
            offset: (1 << 32) - 1
        });
    }

    #[test]
    fn test_page_zero_is_plain_mix() {
        let n: u64 = 513;
        let domain = Domain::new::<Standard>(n).unwrap();
        let factors = Standard::derive_factors(0x2545_F491, n);

        for i in 0..n {
            assert_eq!(
                shuffle_in::<Standard>(i, 0x2545_F491, domain),
                Standard::mix(i, &factors, n)
            );
        }
    }

    #[test]
    fn test_second_page_is_new_permutation() {
        let n: u64 = 100;
        let first: Vec<u64> = (0..n).map(|i| shuffle_with::<Lite>(i, 3, n)).collect();
        let second: Vec<u64> = (n..2 * n).map(|i| shuffle_with::<Lite>(i, 3, n)).collect();

        let mut sorted = second.clone();
        sorted.sort_unstable();
        assert!(sorted.into_iter().eq(0..n));
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_domain_falls_back_to_zero() {
        assert_eq!(shuffle_with::<Standard>(5, 5, 0), 0);
        assert_eq!(shuffle_with::<Standard>(5, 5, 1 << 20), 0);
        assert_eq!(shuffle_with::<Lite>(5, 5, 40_000), 0);
    }

    #[test]
    fn test_using_sees_page_adjusted_id() {
        let domain = Domain::new::<Large>(10).unwrap();
        let mut seen: Option<u64> = None;

        let _ = shuffle_in_using::<Large, _>(25, 7, domain, |id, n| {
            seen = Some(id);
            Large::derive_factors(id, n)
        });

        assert_eq!(seen, Some(Large::continue_id(7, 2)));
    }

    #[test]
    fn test_edge_domains_skip_factors() {
        let domain = Domain::new::<Standard>(2).unwrap();
        let out = shuffle_in_using::<Standard, _>(1, 5, domain, |_, _| {
            panic!("factors requested for a two-item domain")
        });
        assert_eq!(out, 0);
    }
}
