//! Filepath: src/deck.rs
//!
//! Multi-deck dealing.
//!
//! Shuffling a domain of `N * decks` positions and dividing the result by
//! `decks` gives each of the `N` items exactly `decks` times per
//! `N * decks` consecutive indexes, the way a shoe of several card decks
//! would. Within a cycle the copies of an item are spread by the underlying
//! tier's mixing; keeping them apart is a statistical property of the mix,
//! not a guarantee.

use crate::continuation;
use crate::domain::{Domain, DomainError};
use crate::tier::{Standard, Tier};
use crate::tracing_helpers::warn_log;

/// Checked deal of `index` from `decks` decks of `size` items with tier `T`.
///
/// # Errors
///
/// Any error of [`Domain::scaled`]: an invalid `size`, `decks == 0`, or
/// `size * decks` above the tier maximum.
pub fn try_deal_with<T: Tier>(
    index: u64,
    id: T::Id,
    size: u64,
    decks: u32,
) -> Result<u64, DomainError> {
    let shoe: Domain = Domain::scaled::<T>(size, decks)?;
    Ok(continuation::shuffle_in::<T>(index, id, shoe) / u64::from(decks))
}

/// Deal of `index` from `decks` decks of `size` items with tier `T`, falling
/// back to 0 on a domain error.
#[must_use]
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn deal_with<T: Tier>(index: u64, id: T::Id, size: u64, decks: u32) -> u64 {
    try_deal_with::<T>(index, id, size, decks).unwrap_or_else(|err| {
        warn_log!(tier = T::NAME, size, decks, error = %err, "invalid shoe, returning 0");
        0
    })
}

/// Deal `index` from `decks` decks of `size` items (standard tier).
///
/// # Example
///
/// ```rust
/// use gearshuffle::deal_index;
///
/// // Two decks of 52: every card shows up exactly twice in 104 deals.
/// let mut count = [0u8; 52];
/// for i in 0..104 {
///     count[deal_index(i, 2024, 52, 2) as usize] += 1;
/// }
/// assert!(count.iter().all(|&c| c == 2));
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn deal_index(index: u32, shuffle_id: u32, size: u32, decks: u32) -> u32 {
    deal_with::<Standard>(u64::from(index), shuffle_id, u64::from(size), decks) as u32
}

/// Checked variant of [`deal_index`].
///
/// # Errors
///
/// See [`try_deal_with`].
#[allow(clippy::cast_possible_truncation)]
pub fn try_deal_index(
    index: u32,
    shuffle_id: u32,
    size: u32,
    decks: u32,
) -> Result<u32, DomainError> {
    try_deal_with::<Standard>(u64::from(index), shuffle_id, u64::from(size), decks)
        .map(|out| out as u32)
}
