//! Closed-form answers for domains too small for the mixing pipelines.
//!
//! The spins and folds divide the domain into sub-ranges that collapse for
//! `N <= 2`, so those sizes never reach [`Tier::mix`](crate::Tier::mix).

/// Resolve the degenerate domains.
///
/// * `N == 0` (only reachable for tiers without a full-range meaning) and
///   `N == 1` have the single answer 0.
/// * `N == 2` swaps the two positions when the identifier is odd:
///   `(offset ^ id) & 1`.
///
/// Returns `None` for `N >= 3`.
#[must_use]
#[inline]
pub fn resolve(offset: u64, id: u64, n: u64) -> Option<u64> {
    match n {
        0 | 1 => Some(0),
        2 => Some((offset ^ id) & 1),
        _ => None,
    }
}
