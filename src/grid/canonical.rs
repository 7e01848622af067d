// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Canonical-form resolution.
//!
//! Two grids describe the same polycube iff their minimal encodings agree.
//! This module enumerates the 24 rotational orientations of a grid (and,
//! for chiral reduction, the 8 reflections of each) and selects the
//! lexicographically smallest encoding under the total order of
//! [`Grid::cmp`].
//!
//! Rotation enumeration is allocation-per-orientation: every yielded grid
//! is an independent value, so candidates can be retained across iteration
//! with no aliasing concerns. The mirror walk inside chiral resolution is
//! the one place that mutates a buffer in place, and it owns that buffer.

use crate::grid::constants::ROTATIONS;
use crate::grid::{Axis, Grid};

/// Mirror walk visiting the 8 reflections of a grid.
///
/// Applied cumulatively after the identity state, this sequence steps
/// through id, X, XY, Y, YZ, XYZ, XZ, Z with exactly one axis flipping
/// between successive states, keeping the inner loop of chiral resolution
/// on small in-place swaps.
const MIRROR_WALK: [Axis; 7] = [
    Axis::X,
    Axis::Y,
    Axis::X,
    Axis::Z,
    Axis::X,
    Axis::Y,
    Axis::X,
];

/// All 24 rotational orientations of a grid, the original first.
///
/// Built from six base orientations (each pointing a different face of the
/// bounding box along the X axis) crossed with the four spins about X.
pub fn all_rotations(grid: &Grid) -> Vec<Grid> {
    let mut out = Vec::with_capacity(ROTATIONS);

    let y1 = grid.rotate_y();
    let mut y2 = grid.clone();
    y2.rotate_y2();
    let y3 = y2.rotate_y();
    let z1 = grid.rotate_z();
    let mut z3 = z1.clone();
    z3.rotate_z2();

    for base in [grid.clone(), y1, y2, y3, z1, z3] {
        let x1 = base.rotate_x();
        let mut x2 = base.clone();
        x2.rotate_x2();
        let x3 = x2.rotate_x();
        out.push(base);
        out.push(x1);
        out.push(x2);
        out.push(x3);
    }
    out
}

/// The lexicographically minimal grid among the 24 rotations.
///
/// Invariant: `min_rotation(r) == min_rotation(grid)` for every rotation
/// `r` of `grid`.
pub fn min_rotation(grid: &Grid) -> Grid {
    all_rotations(grid)
        .into_iter()
        .min()
        .expect("rotation enumeration is never empty")
}

/// The minimal grid among all 192 rotation-and-mirror images.
///
/// Rotations form the outer loop and the mirror walk the inner loop, so the
/// cache-disruptive mirror mutation stays on one small owned buffer.
pub fn min_chiral_rotation(grid: &Grid) -> Grid {
    let mut best: Option<Grid> = None;
    for mut view in all_rotations(grid) {
        consider(&mut best, &view);
        for axis in MIRROR_WALK {
            view.mirror(axis);
            consider(&mut best, &view);
        }
    }
    best.expect("rotation enumeration is never empty")
}

fn consider(best: &mut Option<Grid>, candidate: &Grid) {
    match best {
        Some(current) if *current <= *candidate => {}
        _ => *best = Some(candidate.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::constants::MIRRORS;
    use std::collections::HashSet;

    /// An asymmetric pentacube: no rotation or mirror maps it to itself.
    fn chiral_sample() -> Grid {
        let mut grid = Grid::new(2, 2, 3).unwrap();
        grid.set(0, 0, 0, true);
        grid.set(0, 0, 1, true);
        grid.set(0, 0, 2, true);
        grid.set(0, 1, 0, true);
        grid.set(1, 1, 0, true);
        grid
    }

    #[test]
    fn test_all_rotations_yields_24_distinct_orientations() {
        let grid = chiral_sample();
        let rotations = all_rotations(&grid);
        assert_eq!(rotations.len(), 24);
        let distinct: HashSet<Vec<u8>> = rotations
            .iter()
            .map(|r| {
                let mut key = r.as_bytes().to_vec();
                key.push(r.d() as u8);
                key
            })
            .collect();
        assert_eq!(distinct.len(), 24);
    }

    #[test]
    fn test_all_rotations_starts_with_original() {
        let grid = chiral_sample();
        assert_eq!(all_rotations(&grid)[0], grid);
    }

    #[test]
    fn test_rotations_preserve_count_and_volume() {
        let grid = chiral_sample();
        for rotation in all_rotations(&grid) {
            assert_eq!(rotation.count(), grid.count());
            assert_eq!(rotation.volume(), grid.volume());
        }
    }

    #[test]
    fn test_min_rotation_is_rotation_invariant() {
        let grid = chiral_sample();
        let canonical = min_rotation(&grid);
        for rotation in all_rotations(&grid) {
            assert_eq!(min_rotation(&rotation), canonical);
        }
    }

    #[test]
    fn test_min_chiral_rotation_is_invariant_over_all_192_views() {
        let grid = chiral_sample();
        let canonical = min_chiral_rotation(&grid);
        for mut view in all_rotations(&grid) {
            assert_eq!(min_chiral_rotation(&view), canonical);
            for axis in MIRROR_WALK {
                view.mirror(axis);
                assert_eq!(min_chiral_rotation(&view), canonical);
            }
        }
    }

    #[test]
    fn test_mirror_walk_visits_all_reflections() {
        let grid = chiral_sample();
        let mut seen = HashSet::new();
        let mut view = grid.clone();
        seen.insert(view.as_bytes().to_vec());
        for axis in MIRROR_WALK {
            view.mirror(axis);
            seen.insert(view.as_bytes().to_vec());
        }
        assert_eq!(seen.len(), MIRRORS);
    }

    #[test]
    fn test_chiral_pair_shares_chiral_minimum_but_not_rotational() {
        let grid = chiral_sample();
        let mut mirrored = grid.clone();
        mirrored.mirror(Axis::X);
        assert_ne!(min_rotation(&grid), min_rotation(&mirrored));
        assert_eq!(min_chiral_rotation(&grid), min_chiral_rotation(&mirrored));
    }

    #[test]
    fn test_min_rotation_of_unit_is_unit() {
        let unit = Grid::unit();
        assert_eq!(min_rotation(&unit), unit);
        assert_eq!(min_chiral_rotation(&unit), unit);
    }
}
