//! Seeded mechanism layouts
//!
//! Grows a connected blob of grid cells from the origin. Same seed, same
//! shape, so demo arenas are reproducible.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Block offsets for a connected layout of `count` cells (at least one).
///
/// The first offset is always the origin, which `Mechanism::from_layout`
/// uses as the core.
pub fn grow_layout(seed: u64, count: usize, spacing: f32) -> Vec<Vec2> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let count = count.max(1);

    let mut cells = vec![(0i32, 0i32)];
    let mut taken: BTreeSet<(i32, i32)> = cells.iter().copied().collect();

    while cells.len() < count {
        // Sorted frontier keeps the pick independent of insertion history
        let frontier: Vec<(i32, i32)> = cells
            .iter()
            .flat_map(|&(x, y)| NEIGHBORS.iter().map(move |&(dx, dy)| (x + dx, y + dy)))
            .filter(|cell| !taken.contains(cell))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let pick = frontier[rng.random_range(0..frontier.len())];
        taken.insert(pick);
        cells.push(pick);
    }

    log::debug!("Grew layout of {} cells from seed {}", cells.len(), seed);

    cells
        .into_iter()
        .map(|(x, y)| Vec2::new(x as f32, y as f32) * spacing)
        .collect()
}
