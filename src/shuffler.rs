//! Filepath: src/shuffler.rs
//!
//! A fixed-domain shuffle handle.
//!
//! [`Shuffler`] validates the domain once and keeps the factors of page 0, so
//! random access and iteration over the first permutation cost only the mix.
//! Later pages are served too, deriving their factors per call.

use std::fmt as StdFmt;

use crate::continuation;
use crate::domain::{Domain, DomainError};
use crate::tier::Tier;
use crate::tracing_helpers::debug_log;

/// One shuffle identifier applied to one domain.
///
/// # Example
///
/// ```rust
/// use gearshuffle::{Shuffler, Standard};
///
/// let songs = ["intro", "verse", "chorus", "bridge", "outro"];
/// let shuffler: Shuffler<Standard> = Shuffler::new(0x5EED, songs.len() as u64).unwrap();
///
/// let order: Vec<&str> = shuffler.deal(&songs).unwrap().copied().collect();
/// assert_eq!(order.len(), 5);
/// for song in songs {
///     assert!(order.contains(&song));
/// }
/// ```
pub struct Shuffler<T: Tier> {
    id: T::Id,
    domain: Domain,
    first_page: T::Factors,
}

impl<T: Tier> Clone for Shuffler<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Tier> Copy for Shuffler<T> {}

impl<T: Tier> Shuffler<T> {
    /// Create a shuffler for `size` items.
    ///
    /// # Errors
    ///
    /// Any error of [`Domain::new`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(tier = T::NAME, size = size))
    )]
    pub fn new(id: T::Id, size: u64) -> Result<Self, DomainError> {
        let domain: Domain = Domain::new::<T>(size)?;
        let first_page: T::Factors = T::derive_factors(id, domain.get());

        debug_log!(n = domain.get(), "shuffler ready");

        Ok(Self {
            id,
            domain,
            first_page,
        })
    }

    /// The shuffle identifier.
    #[must_use]
    #[inline]
    pub const fn id(&self) -> T::Id {
        self.id
    }

    /// Number of positions `N`.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> u64 {
        self.domain.get()
    }

    /// Always false: a domain holds at least one position.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The shuffled position for `index`.
    ///
    /// Indexes of `N` and beyond continue into further pages.
    #[must_use]
    #[inline]
    pub fn get(&self, index: u64) -> u64 {
        continuation::shuffle_in_using::<T, _>(index, self.id, self.domain, |id, n| {
            if index < n { self.first_page } else { T::derive_factors(id, n) }
        })
    }

    /// Iterate over the first permutation.
    #[must_use]
    pub const fn iter(&self) -> ShuffleIter<'_, T> {
        self.page(0)
    }

    /// Iterate over continuation page `page`, i.e. indexes
    /// `page * N .. (page + 1) * N`.
    ///
    /// Iteration stops early if the indexes would pass `u64::MAX`.
    #[must_use]
    pub const fn page(&self, page: u64) -> ShuffleIter<'_, T> {
        let n: u64 = self.domain.get();
        let start: u64 = page.saturating_mul(n);
        let end: u64 = start.saturating_add(n);

        ShuffleIter {
            shuffler: self,
            next: start,
            end,
        }
    }

    /// Deal the items of `items` in shuffled order, without copying them.
    ///
    /// Returns `None` when `items.len()` differs from `N`.
    #[must_use]
    pub fn deal<'a, U>(&'a self, items: &'a [U]) -> Option<impl Iterator<Item = &'a U> + 'a> {
        if u64::try_from(items.len()).ok()? != self.len() {
            return None;
        }

        Some(self.iter().filter_map(move |position| {
            usize::try_from(position).ok().and_then(|position| items.get(position))
        }))
    }
}

impl<T: Tier> StdFmt::Debug for Shuffler<T> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("Shuffler")
            .field("tier", &T::NAME)
            .field("id", &self.id)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T: Tier> IntoIterator for &'a Shuffler<T> {
    type Item = u64;
    type IntoIter = ShuffleIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over one page of a [`Shuffler`].
pub struct ShuffleIter<'a, T: Tier> {
    shuffler: &'a Shuffler<T>,
    next: u64,
    end: u64,
}

impl<T: Tier> Iterator for ShuffleIter<'_, T> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        if self.next >= self.end {
            return None;
        }

        let out: u64 = self.shuffler.get(self.next);
        self.next += 1;
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining: u64 = self.end - self.next;
        usize::try_from(remaining).map_or((usize::MAX, None), |r| (r, Some(r)))
    }
}

impl<T: Tier> ExactSizeIterator for ShuffleIter<'_, T> {}

impl<T: Tier> DoubleEndedIterator for ShuffleIter<'_, T> {
    fn next_back(&mut self) -> Option<u64> {
        if self.next >= self.end {
            return None;
        }

        self.end -= 1;
        Some(self.shuffler.get(self.end))
    }
}

impl<T: Tier> StdFmt::Debug for ShuffleIter<'_, T> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("ShuffleIter")
            .field("next", &self.next)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continuation::shuffle_with;
    use crate::tier::{Large, Lite, Standard};

    #[test]
    fn test_get_matches_free_function() {
        let shuffler: Shuffler<Standard> = Shuffler::new(77, 300).unwrap();
        for i in 0..900 {
            assert_eq!(shuffler.get(i), shuffle_with::<Standard>(i, 77, 300));
        }
    }

    #[test]
    fn test_iter_is_permutation() {
        let shuffler: Shuffler<Lite> = Shuffler::new(5, 1_000).unwrap();
        assert_eq!(shuffler.iter().len(), 1_000);

        let mut out: Vec<u64> = shuffler.iter().collect();
        out.sort_unstable();
        assert!(out.into_iter().eq(0..1_000));
    }

    #[test]
    fn test_pages_differ() {
        let shuffler: Shuffler<Large> = Shuffler::new(1, 64).unwrap();
        let first: Vec<u64> = shuffler.page(0).collect();
        let second: Vec<u64> = shuffler.page(1).collect();
        assert_ne!(first, second);

        let expected: Vec<u64> = (64..128).map(|i| shuffler.get(i)).collect();
        assert_eq!(second, expected);
    }

    #[test]
    fn test_reverse_iteration() {
        let shuffler: Shuffler<Standard> = Shuffler::new(3, 20).unwrap();
        let forward: Vec<u64> = shuffler.iter().collect();
        let mut backward: Vec<u64> = shuffler.iter().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_last_page_saturates() {
        let shuffler: Shuffler<Large> = Shuffler::new(1, 0).unwrap();
        assert_eq!(shuffler.len(), 1 << 32);
        assert_eq!(shuffler.page(u64::MAX).count(), 0);
    }

    #[test]
    fn test_deal() {
        let items: Vec<char> = ('a'..='z').collect();
        let shuffler: Shuffler<Standard> = Shuffler::new(2_024, 26).unwrap();

        let mut dealt: Vec<char> = shuffler.deal(&items).unwrap().copied().collect();
        assert_ne!(dealt, items);
        dealt.sort_unstable();
        assert_eq!(dealt, items);

        assert!(shuffler.deal(&items[..25]).is_none());
    }

    #[test]
    fn test_invalid_domain() {
        assert_eq!(
            Shuffler::<Standard>::new(1, 0).unwrap_err(),
            DomainError::Empty
        );
    }
}
