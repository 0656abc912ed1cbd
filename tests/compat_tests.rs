mod common;

use rejig::compat::{CompatibilityTable, EdgeScorer, SquaredDifference};
use rejig::pieces::{Direction, PieceId, PieceSet};
use strum::IntoEnumIterator;

#[test]
fn test_cost_symmetry_under_direction_inversion() {
    let set = PieceSet::extract(&common::gradient(16, 16), 4).expect("extract");
    let table = CompatibilityTable::build(&set, &SquaredDifference);

    for a in 0..set.len() as PieceId {
        for b in 0..set.len() as PieceId {
            assert_eq!(
                table.cost(a, Direction::Right, b),
                table.cost(b, Direction::Left, a)
            );
            assert_eq!(
                table.cost(a, Direction::Down, b),
                table.cost(b, Direction::Up, a)
            );
        }
    }
}

#[test]
fn test_costs_are_finite_and_non_negative() {
    let set = PieceSet::extract(&common::gradient(16, 16), 4).expect("extract");
    let table = CompatibilityTable::build(&set, &SquaredDifference);

    for a in 0..set.len() as PieceId {
        for b in 0..set.len() as PieceId {
            for dir in Direction::iter() {
                let cost = table.cost(a, dir, b);
                assert!(cost.is_finite());
                assert!(cost >= 0.0);
            }
        }
    }
}

#[test]
fn test_uniform_image_has_zero_cost_everywhere() {
    let set = PieceSet::extract(&common::solid(16, 16, [90, 90, 90]), 4).expect("extract");
    let table = CompatibilityTable::build(&set, &SquaredDifference);

    for a in 0..set.len() as PieceId {
        for b in 0..set.len() as PieceId {
            if a != b {
                assert_eq!(table.cost(a, Direction::Right, b), 0.0);
            }
        }
    }
}

#[test]
fn test_known_cost_of_two_solid_pieces() {
    // Left half [10,10,10], right half [13,10,10]: the facing edge differs
    // by 3 in one channel across 4 border pixels, so the cost is 4 * 9.
    let mut bytes = Vec::with_capacity(8 * 8 * 3);
    for _y in 0..8 {
        for x in 0..8 {
            let color = if x < 4 { [10, 10, 10] } else { [13, 10, 10] };
            bytes.extend_from_slice(&color);
        }
    }
    let raster = rejig::raster::Raster::from_rgb(8, 8, &bytes).expect("buffer");
    let set = PieceSet::extract(&raster, 4).expect("extract");

    let cost = SquaredDifference.score(set.get(0), Direction::Right, set.get(1));
    assert_eq!(cost, 36.0);
    // Same-color pairs are free.
    assert_eq!(
        SquaredDifference.score(set.get(0), Direction::Down, set.get(2)),
        0.0
    );
}
