use crate::optimizer::Chromosome;

/// With probability `rate`, applies between one and `max_swaps` random
/// position swaps. A swap of a position with itself is allowed and is a
/// no-op, the permutation property is preserved either way.
pub fn swap_mutation(
    chromosome: &mut Chromosome,
    rate: f32,
    max_swaps: usize,
    rng: &mut fastrand::Rng,
) {
    if max_swaps == 0 || rng.f32() >= rate {
        return;
    }
    let n = chromosome.placement().len();
    let swaps = rng.usize(1..=max_swaps);
    for _ in 0..swaps {
        let i = rng.usize(0..n);
        let j = rng.usize(0..n);
        chromosome.swap(i, j);
    }
}
