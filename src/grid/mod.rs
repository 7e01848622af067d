// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bit-packed voxel grids and canonical-form resolution.
//!
//! This module contains the geometric half of the enumerator:
//! - Grid: bit-packed 3-D boolean grid with an embedded dimension header
//! - Axis, Face: names for rotation/mirror axes and bounding-box faces
//! - canonical: rotation/mirror enumeration and minimal-form selection

pub mod bitgrid;
pub mod canonical;
pub mod constants;
pub mod error;

// Re-export for convenience
pub use bitgrid::{Axis, Face, Grid};
pub use canonical::{all_rotations, min_chiral_rotation, min_rotation};
pub use constants::*;
pub use error::GridError;
