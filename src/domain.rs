//! Filepath: src/domain.rs
//!
//! Domain sizes and the single error category of the crate.
//!
//! A [`Domain`] is the validated number of positions `N` being permuted.
//! Validation is tier-specific: each [`Tier`] has its own upper bound, and only
//! tiers with [`Tier::ZERO_MEANS_FULL`] accept a size of 0 (meaning the whole
//! 2^32 range).

use std::fmt as StdFmt;

use crate::tier::Tier;

// ============================================================================
//  DomainError
// ============================================================================

/// Errors reported by the checked (`try_*`) entry points.
///
/// The infallible entry points map every one of these to an output of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// Domain size 0 on a tier where it has no meaning.
    Empty,

    /// Domain size beyond the tier's maximum.
    TooLarge {
        /// Requested size.
        size: u64,
        /// Largest size the tier supports.
        max: u64,
    },

    /// Deck adapter asked for zero decks.
    NoDecks,

    /// `size * decks` does not fit the tier.
    DeckOverflow {
        /// Requested single-deck size.
        size: u64,
        /// Requested deck count.
        decks: u32,
        /// Largest scaled size the tier supports.
        max: u64,
    },
}

impl StdFmt::Display for DomainError {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::Empty => write!(f, "domain size is 0"),

            Self::TooLarge { size, max } => {
                write!(f, "domain size {size} exceeds tier maximum {max}")
            }

            Self::NoDecks => write!(f, "deck count is 0"),

            Self::DeckOverflow { size, decks, max } => {
                write!(
                    f,
                    "{decks} decks of {size} items exceed tier maximum {max}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}

// ============================================================================
//  Domain
// ============================================================================

/// A validated domain size `N`, always in `1..=T::MAX_DOMAIN` for the tier
/// that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Domain {
    n: u64,
}

impl Domain {
    /// Validate `size` against tier `T`.
    ///
    /// # Errors
    ///
    /// * [`DomainError::Empty`] - `size == 0` and `T` has no full-range meaning for 0.
    /// * [`DomainError::TooLarge`] - `size > T::MAX_DOMAIN`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gearshuffle::{Domain, DomainError, Large, Standard};
    ///
    /// assert_eq!(Domain::new::<Standard>(52).map(Domain::get), Ok(52));
    /// assert_eq!(Domain::new::<Standard>(0), Err(DomainError::Empty));
    /// assert_eq!(Domain::new::<Large>(0).map(Domain::get), Ok(1 << 32));
    /// ```
    #[inline]
    pub const fn new<T: Tier>(size: u64) -> Result<Self, DomainError> {
        if size == 0 {
            if T::ZERO_MEANS_FULL {
                return Ok(Self { n: T::MAX_DOMAIN });
            }
            return Err(DomainError::Empty);
        }

        if size > T::MAX_DOMAIN {
            return Err(DomainError::TooLarge {
                size,
                max: T::MAX_DOMAIN,
            });
        }

        Ok(Self { n: size })
    }

    /// Validate a `decks`-fold scaled domain for tier `T`.
    ///
    /// `size` follows the same rules as [`Domain::new`]; the scaled size
    /// `size * decks` must then also fit the tier.
    ///
    /// # Errors
    ///
    /// Any error of [`Domain::new`], plus [`DomainError::NoDecks`] and
    /// [`DomainError::DeckOverflow`].
    pub fn scaled<T: Tier>(size: u64, decks: u32) -> Result<Self, DomainError> {
        if decks == 0 {
            return Err(DomainError::NoDecks);
        }

        let base: Self = Self::new::<T>(size)?;

        match base.n.checked_mul(u64::from(decks)) {
            Some(n) if n <= T::MAX_DOMAIN => Ok(Self { n }),
            _ => Err(DomainError::DeckOverflow {
                size: base.n,
                decks,
                max: T::MAX_DOMAIN,
            }),
        }
    }

    /// The number of positions `N`.
    #[must_use]
    #[inline(always)]
    pub const fn get(self) -> u64 {
        self.n
    }
}

// ============================================================================
//  Tests
// ============================================================================
