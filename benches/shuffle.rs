//! Per-call cost of the shuffle entry points using Divan.
//!
//! Run with: `cargo bench --bench shuffle`

#![expect(clippy::unwrap_used)]

use divan::{Bencher, black_box};
use gearshuffle::continuation::shuffle_with;
use gearshuffle::tier::{classic, large, lite};
use gearshuffle::{Large, ShuffleContext, Shuffler, Standard};

fn main() {
    divan::main();
}

// =============================================================================
// Single Calls
// =============================================================================

#[divan::bench_group]
mod single {
    use super::{black_box, classic, large, lite};

    #[divan::bench(args = [52, 513, 32_768])]
    fn lite(n: u32) -> u32 {
        lite::shuffle(black_box(17), black_box(0x2545_F491), n)
    }

    #[divan::bench(args = [52, 513, 65_536])]
    fn standard(n: u32) -> u32 {
        gearshuffle::shuffle(black_box(17), black_box(0x2545_F491), n)
    }

    #[divan::bench(args = [52, 1_000_003, 0])]
    fn large(n: u32) -> u32 {
        large::shuffle(black_box(17), black_box(0x9E37_79B9_7F4A_7C15), n)
    }

    #[divan::bench(args = [52, 16_384])]
    fn classic(n: u32) -> u32 {
        classic::shuffle(black_box(17), black_box(0x2545_F491), n)
    }

    #[divan::bench]
    fn deck_of_two() -> u32 {
        gearshuffle::deal_index(black_box(17), black_box(0x2545_F491), 52, 2)
    }
}

// =============================================================================
// Full Walks
// =============================================================================

#[divan::bench_group]
mod walk {
    use super::{Bencher, Large, ShuffleContext, Shuffler, Standard, black_box, shuffle_with};

    const N: u64 = 4_096;

    #[divan::bench]
    fn uncached(bencher: Bencher) {
        bencher.bench_local(|| {
            (0..N)
                .map(|i| shuffle_with::<Standard>(i, black_box(99), N))
                .fold(0u64, u64::wrapping_add)
        });
    }

    #[divan::bench]
    fn context(bencher: Bencher) {
        let mut ctx: ShuffleContext<Standard> = ShuffleContext::new();
        bencher.bench_local(|| {
            (0..N)
                .map(|i| ctx.shuffle(i, black_box(99), N))
                .fold(0u64, u64::wrapping_add)
        });
    }

    #[divan::bench]
    fn shuffler_iter(bencher: Bencher) {
        let shuffler: Shuffler<Large> = Shuffler::new(99, N).unwrap();
        bencher.bench_local(|| black_box(&shuffler).iter().fold(0u64, u64::wrapping_add));
    }
}
