mod common;

use proptest::prelude::*;
use rejig::compat::{BestBuddyIndex, CompatibilityTable, SquaredDifference};
use rejig::optimizer::crossover::best_buddy_crossover;
use rejig::optimizer::initialization::{greedy_chromosome, random_chromosome, seed_population};
use rejig::optimizer::mutation::swap_mutation;
use rejig::optimizer::Chromosome;
use rejig::pieces::{PieceId, PieceSet};

fn is_permutation(chromosome: &Chromosome) -> bool {
    let mut ids: Vec<PieceId> = chromosome.placement().to_vec();
    ids.sort_unstable();
    ids == (0..chromosome.placement().len() as PieceId).collect::<Vec<_>>()
}

fn puzzle(rows: usize, cols: usize) -> (PieceSet, CompatibilityTable, BestBuddyIndex) {
    let raster = common::gradient(cols * 4, rows * 4);
    let set = PieceSet::extract(&raster, 4).expect("extract");
    let table = CompatibilityTable::build(&set, &SquaredDifference);
    let buddies = BestBuddyIndex::build(&table);
    (set, table, buddies)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_random_init_is_permutation(
        rows in 2usize..6,
        cols in 2usize..6,
        seed in any::<u64>()
    ) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let chrom = random_chromosome(rows, cols, &mut rng);
        prop_assert!(is_permutation(&chrom));
    }

    #[test]
    fn test_greedy_init_is_permutation(
        rows in 2usize..6,
        cols in 2usize..6,
        start_raw in any::<u16>()
    ) {
        let (set, table, buddies) = puzzle(rows, cols);
        let start = start_raw % set.len() as u16;
        let chrom = greedy_chromosome(rows, cols, &table, &buddies, start);
        prop_assert!(is_permutation(&chrom));
        prop_assert_eq!(chrom.placement()[0], start);
    }

    #[test]
    fn test_crossover_preserves_permutation(
        rows in 2usize..6,
        cols in 2usize..6,
        seed in any::<u64>()
    ) {
        let (_, table, buddies) = puzzle(rows, cols);
        let mut rng = fastrand::Rng::with_seed(seed);
        let a = random_chromosome(rows, cols, &mut rng);
        let b = random_chromosome(rows, cols, &mut rng);
        let child = best_buddy_crossover(&a, &b, &table, &buddies, &mut rng);
        prop_assert!(is_permutation(&child));
    }

    #[test]
    fn test_mutation_preserves_permutation(
        rows in 2usize..6,
        cols in 2usize..6,
        seed in any::<u64>(),
        rate in 0.0f32..=1.0,
        swaps in 1usize..5
    ) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut chrom = random_chromosome(rows, cols, &mut rng);
        swap_mutation(&mut chrom, rate, swaps, &mut rng);
        prop_assert!(is_permutation(&chrom));
    }

    #[test]
    fn test_seeded_population_members_are_permutations(
        rows in 2usize..5,
        cols in 2usize..5,
        seed in any::<u64>(),
        size in 2usize..20
    ) {
        let (_, table, buddies) = puzzle(rows, cols);
        let mut rng = fastrand::Rng::with_seed(seed);
        let pop = seed_population(rows, cols, size, &table, &buddies, &mut rng);
        prop_assert_eq!(pop.len(), size);
        for member in pop.members() {
            prop_assert!(is_permutation(member));
        }
    }
}
