// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Encoding constants shared across the grid module.

/// Largest encodable axis length. Width and height each occupy 4 bits of the
/// header byte, and depth must survive a rotation into either slot.
pub const MAX_AXIS: usize = 15;

/// Number of header bits preceding the payload in the binary encoding.
pub const HEADER_BITS: usize = 8;

/// Number of rotational orientations of a rectangular solid.
pub const ROTATIONS: usize = 24;

/// Number of mirror reflections of each orientation (including identity).
pub const MIRRORS: usize = 8;
