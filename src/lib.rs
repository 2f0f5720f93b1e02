//! # `GearShuffle`
//!
//! Stateless index shuffling: `shuffle(index, id, N)` returns the position
//! that item `index` takes in a pseudo-random permutation of `N` items, in
//! constant time, with no shuffled array ever built.
//!
//! The same `(id, N)` always yields the same permutation, different
//! identifiers yield different ones, and indexes past `N` continue into a
//! fresh permutation per page, so a playlist can loop forever without
//! repeating its order.
//!
//! ```rust
//! use gearshuffle::shuffle;
//!
//! let order: Vec<u32> = (0..10).map(|i| shuffle(i, 1, 10)).collect();
//! assert_eq!(order, [0, 5, 9, 1, 2, 6, 8, 3, 7, 4]);
//! ```
//!
//! ## Tiers
//!
//! | Tier | Max `N` | Entry point |
//! |------|---------|-------------|
//! | [`Lite`] | 32 768 | [`tier::lite::shuffle`] |
//! | [`Standard`] | 65 536 | [`shuffle`] |
//! | [`Large`] | 2^32 | [`tier::large::shuffle`] |
//! | [`Classic`] | 16 384 | [`tier::classic::shuffle`] |
//!
//! All tiers share the continuation, deck, caching and dealing layers through
//! the [`Tier`] trait: see [`continuation::shuffle_with`],
//! [`deck::deal_with`], [`ShuffleContext`] and [`Shuffler`].
//!
//! ## Not Cryptographic
//!
//! The permutations look random to a listener. They are trivially
//! predictable to anyone who knows the algorithm and must not be used where
//! an adversary should not guess the order.
//!
//! ## Errors
//!
//! `try_*` functions return [`DomainError`] for an empty or oversized
//! domain. The plain functions return 0 in that case, logging a warning when
//! the `tracing` feature is on.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::inline_always)]

pub mod context;
pub mod continuation;
pub mod deck;
pub mod domain;
pub mod edge;
pub mod holdback;
pub mod shuffler;
pub mod stage;
pub mod tier;

mod tracing_helpers;

pub use context::{CacheStats, ShuffleContext};
pub use deck::{deal_index, try_deal_index};
pub use domain::{Domain, DomainError};
pub use holdback::HoldbackDealer;
pub use shuffler::{ShuffleIter, Shuffler};
pub use tier::standard::{shuffle, try_shuffle};
pub use tier::{
    Classic, ClassicFactors, Large, LargeFactors, Lite, LiteFactors, Standard, StandardFactors,
    Tier,
};
