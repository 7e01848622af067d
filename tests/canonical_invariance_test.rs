// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Canonicalization closure properties.
//!
//! The canonical key must be invariant over every rotational view of a
//! shape (24-way) and, for chiral reduction, over every rotation-or-mirror
//! view (192-way), for arbitrary shapes, not just the hand-picked ones in
//! the unit tests.

mod common;

use common::{chiral_pentacube, grid_from_coords, l_tetromino, random_polycube};
use polycube_search::grid::{all_rotations, Axis};
use polycube_search::{min_chiral_rotation, min_rotation, Grid};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sample_shapes() -> Vec<Grid> {
    let mut shapes = vec![
        Grid::unit(),
        l_tetromino(),
        chiral_pentacube(),
        // A plus sign, highly symmetric.
        grid_from_coords(&[(1, 0, 0), (0, 1, 0), (1, 1, 0), (2, 1, 0), (1, 2, 0)]),
        // A full 2x2x2 cube, maximally symmetric.
        grid_from_coords(&[
            (0, 0, 0),
            (0, 0, 1),
            (0, 1, 0),
            (0, 1, 1),
            (1, 0, 0),
            (1, 0, 1),
            (1, 1, 0),
            (1, 1, 1),
        ]),
    ];
    let mut rng = StdRng::seed_from_u64(0x706f6c79);
    for n in [6, 9, 12] {
        for _ in 0..8 {
            shapes.push(random_polycube(&mut rng, n));
        }
    }
    shapes
}

#[test]
fn test_rotation_closure() {
    for shape in sample_shapes() {
        let canonical = min_rotation(&shape);
        assert!(canonical <= shape);
        for rotation in all_rotations(&shape) {
            assert_eq!(
                min_rotation(&rotation),
                canonical,
                "rotation broke canonical form of {shape}"
            );
        }
    }
}

#[test]
fn test_chiral_closure() {
    for shape in sample_shapes() {
        let canonical = min_chiral_rotation(&shape);
        for rotation in all_rotations(&shape) {
            for flip in [None, Some(Axis::X), Some(Axis::Y), Some(Axis::Z)] {
                let mut view = rotation.clone();
                if let Some(axis) = flip {
                    view.mirror(axis);
                }
                assert_eq!(
                    min_chiral_rotation(&view),
                    canonical,
                    "mirror view broke chiral canonical form of {shape}"
                );
            }
        }
    }
}

#[test]
fn test_chiral_minimum_never_exceeds_rotational_minimum() {
    for shape in sample_shapes() {
        assert!(min_chiral_rotation(&shape) <= min_rotation(&shape));
    }
}

#[test]
fn test_canonical_key_identifies_equivalence() {
    // Two encodings of the same polycube in different orientations.
    let a = grid_from_coords(&[(0, 0, 0), (0, 0, 1), (0, 1, 1)]);
    let b = grid_from_coords(&[(0, 0, 0), (1, 0, 0), (1, 1, 0)]);
    assert_ne!(a.as_bytes(), b.as_bytes());
    assert_eq!(
        min_rotation(&a).as_bytes(),
        min_rotation(&b).as_bytes()
    );

    // A straight tromino is not equivalent to the bent one.
    let straight = grid_from_coords(&[(0, 0, 0), (0, 0, 1), (0, 0, 2)]);
    assert_ne!(
        min_rotation(&a).as_bytes(),
        min_rotation(&straight).as_bytes()
    );
}
