// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Shared helpers for integration tests.

use polycube_search::Grid;
use rand::Rng;

/// Build a grid whose bounding box tightly fits the given voxels.
pub fn grid_from_coords(coords: &[(usize, usize, usize)]) -> Grid {
    assert!(!coords.is_empty());
    let w = coords.iter().map(|c| c.0).max().unwrap() + 1;
    let h = coords.iter().map(|c| c.1).max().unwrap() + 1;
    let d = coords.iter().map(|c| c.2).max().unwrap() + 1;
    let mut grid = Grid::new(w, h, d).unwrap();
    for &(x, y, z) in coords {
        grid.set(x, y, z, true);
    }
    grid
}

/// A chiral pentacube: a straight arm along z with a two-step hook
/// turning through y then x. No rotation maps it to its mirror image.
pub fn chiral_pentacube() -> Grid {
    grid_from_coords(&[(0, 0, 0), (0, 0, 1), (0, 0, 2), (0, 1, 0), (1, 1, 0)])
}

/// The L-shaped tetromino, flat in one plane.
pub fn l_tetromino() -> Grid {
    grid_from_coords(&[(0, 0, 0), (0, 0, 1), (0, 0, 2), (0, 1, 0)])
}

/// Grow a random polycube of `n` voxels by repeatedly filling a random
/// empty cell adjacent to the current solid (padding when it hits the
/// bounding box).
pub fn random_polycube(rng: &mut impl Rng, n: usize) -> Grid {
    use polycube_search::pipeline::expansions;

    let mut grid = Grid::unit();
    for _ in 1..n {
        let candidates = expansions(&grid).unwrap();
        grid = candidates[rng.gen_range(0..candidates.len())].clone();
    }
    grid
}
