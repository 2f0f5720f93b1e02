//! Filepath: src/tier.rs
//!
//! The [`Tier`] trait and its implementations.
//!
//! A tier bundles three things: how a shuffle identifier is perturbed for
//! continuation pages, how the randomizing factors are derived from
//! `(identifier, N)`, and the mixing pipeline those factors drive. Everything
//! else in the crate (continuation, decks, caching, dealers) is written once,
//! generically over this trait.
//!
//! | Tier | Max `N` | Id | Arithmetic | Stages |
//! |------|---------|----|------------|--------|
//! | [`Lite`] | 32 768 | `u32` | `u32` | 6 |
//! | [`Standard`] | 65 536 | `u32` | `u32` | 7 |
//! | [`Large`] | 2^32 (size 0 = 2^32) | `u64` | `u64` | 8 |
//! | [`Classic`] | 16 384 | `u32` | `u32` | 4 (superseded) |

use std::fmt::Debug;

pub mod classic;
pub mod large;
pub mod lite;
pub mod standard;

pub use classic::{Classic, ClassicFactors};
pub use large::{Large, LargeFactors};
pub use lite::{Lite, LiteFactors};
pub use standard::{Standard, StandardFactors};

/// A family of index-permutation pipelines sharing one size bound and width.
///
/// Implementors are zero-sized markers; all methods are associated functions.
///
/// # Contract
///
/// For every identifier and every `n` in `3..=MAX_DOMAIN`, the map
/// `offset -> mix(offset, &derive_factors(id, n), n)` must be a bijection on
/// `[0, n)`. Domains of 1 and 2 never reach [`Tier::mix`]; see
/// [`crate::edge`].
pub trait Tier {
    /// Shuffle identifier type.
    type Id: Copy + Eq + Debug + Into<u64>;

    /// Randomizing factors derived from `(identifier, N)`.
    type Factors: Copy + Debug + PartialEq;

    /// Human-readable tier name, used in logs.
    const NAME: &'static str;

    /// Largest supported domain size.
    const MAX_DOMAIN: u64;

    /// Whether a requested size of 0 means a domain of `MAX_DOMAIN`.
    const ZERO_MEANS_FULL: bool = false;

    /// Perturb `id` for continuation page `page`.
    ///
    /// Must return `id` unchanged for `page == 0`.
    fn continue_id(id: Self::Id, page: u64) -> Self::Id;

    /// Derive the randomizing factors for `(id, n)`.
    ///
    /// Requires `1 <= n <= MAX_DOMAIN`.
    fn derive_factors(id: Self::Id, n: u64) -> Self::Factors;

    /// Map `offset` through the pipeline.
    ///
    /// Requires `offset < n`, `3 <= n <= MAX_DOMAIN`, and `factors` derived for
    /// the same `n`. Returns a value in `[0, n)`.
    fn mix(offset: u64, factors: &Self::Factors, n: u64) -> u64;
}
