use crate::compat::{BestBuddyIndex, CompatibilityTable};
use crate::optimizer::{Chromosome, Population};
use crate::pieces::{Direction, PieceId};

/// Uniformly random permutation of all piece ids.
pub fn random_chromosome(rows: usize, cols: usize, rng: &mut fastrand::Rng) -> Chromosome {
    let mut placement: Vec<PieceId> = (0..(rows * cols) as PieceId).collect();
    rng.shuffle(&mut placement);
    Chromosome::new(rows, cols, placement)
}

/// Greedy row-major construction: each position takes the mutual best buddy
/// of an already placed neighbor when available, otherwise the cheapest
/// unused piece against all placed neighbors.
pub fn greedy_chromosome(
    rows: usize,
    cols: usize,
    table: &CompatibilityTable,
    buddies: &BestBuddyIndex,
    start: PieceId,
) -> Chromosome {
    let n = rows * cols;
    let mut placement: Vec<PieceId> = Vec::with_capacity(n);
    let mut used = vec![false; n];
    placement.push(start);
    used[start as usize] = true;

    for pos in 1..n {
        let (r, c) = (pos / cols, pos % cols);
        let left = (c > 0).then(|| placement[pos - 1]);
        let up = (r > 0).then(|| placement[pos - cols]);

        let mut choice: Option<PieceId> = None;
        for (anchor, dir) in [(left, Direction::Right), (up, Direction::Down)] {
            if let Some(anchor) = anchor {
                let bb = buddies.get(anchor, dir);
                if bb.mutual && !used[bb.neighbor as usize] {
                    choice = Some(bb.neighbor);
                    break;
                }
            }
        }

        let piece = choice.unwrap_or_else(|| {
            cheapest_unused(&used, table, &[(left, Direction::Right), (up, Direction::Down)])
        });
        placement.push(piece);
        used[piece as usize] = true;
    }

    Chromosome::new(rows, cols, placement)
}

/// Lowest-cost unused piece summed over the given anchors, ascending-id
/// ties.
fn cheapest_unused(
    used: &[bool],
    table: &CompatibilityTable,
    anchors: &[(Option<PieceId>, Direction)],
) -> PieceId {
    let mut best: Option<(PieceId, f32)> = None;
    for candidate in 0..used.len() as PieceId {
        if used[candidate as usize] {
            continue;
        }
        let cost: f32 = anchors
            .iter()
            .filter_map(|&(anchor, dir)| anchor.map(|a| table.cost(a, dir, candidate)))
            .sum();
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((candidate, cost)),
        }
    }
    best.map(|(id, _)| id).unwrap_or(0)
}

/// Initial generation: a quarter greedy builds from random starting pieces,
/// the rest uniform permutations. Greedy members give the crossover
/// operator coherent material from generation zero.
pub fn seed_population(
    rows: usize,
    cols: usize,
    size: usize,
    table: &CompatibilityTable,
    buddies: &BestBuddyIndex,
    rng: &mut fastrand::Rng,
) -> Population {
    let n = rows * cols;
    let greedy_count = (size / 4).max(1);
    let mut members = Vec::with_capacity(size);
    for _ in 0..greedy_count.min(size) {
        let start = rng.u16(0..n as u16);
        members.push(greedy_chromosome(rows, cols, table, buddies, start));
    }
    while members.len() < size {
        members.push(random_chromosome(rows, cols, rng));
    }
    Population::new(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::SquaredDifference;
    use crate::pieces::PieceSet;
    use crate::raster::Raster;

    fn gradient(width: usize, height: usize) -> Raster {
        let mut bytes = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                bytes.extend_from_slice(&[x as u8, y as u8, ((x + y) / 2) as u8]);
            }
        }
        Raster::from_rgb(width, height, &bytes).expect("gradient buffer")
    }

    #[test]
    fn test_random_chromosome_is_permutation() {
        let mut rng = fastrand::Rng::with_seed(11);
        let chrom = random_chromosome(3, 4, &mut rng);
        let mut ids: Vec<PieceId> = chrom.placement().to_vec();
        ids.sort_unstable();
        assert_eq!(ids, (0..12).collect::<Vec<PieceId>>());
    }

    #[test]
    fn test_greedy_from_origin_reconstructs_gradient() {
        let set = PieceSet::extract(&gradient(16, 16), 4).expect("extract");
        let table = CompatibilityTable::build(&set, &SquaredDifference);
        let buddies = BestBuddyIndex::build(&table);

        // Starting from the true top-left piece, mutual buddies chain
        // through the whole smooth gradient.
        let chrom = greedy_chromosome(set.rows(), set.cols(), &table, &buddies, 0);
        let identity: Vec<PieceId> = (0..set.len() as PieceId).collect();
        assert_eq!(chrom.placement(), identity.as_slice());
    }

    #[test]
    fn test_seed_population_size_and_validity() {
        let set = PieceSet::extract(&gradient(16, 16), 4).expect("extract");
        let table = CompatibilityTable::build(&set, &SquaredDifference);
        let buddies = BestBuddyIndex::build(&table);
        let mut rng = fastrand::Rng::with_seed(3);

        let pop = seed_population(set.rows(), set.cols(), 10, &table, &buddies, &mut rng);
        assert_eq!(pop.len(), 10);
        for member in pop.members() {
            let mut ids: Vec<PieceId> = member.placement().to_vec();
            ids.sort_unstable();
            assert_eq!(ids, (0..16).collect::<Vec<PieceId>>());
        }
    }
}
