// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Polycube enumeration with canonical-form deduplication at scale.
//!
//! Enumerates all distinct polycubes (connected solids of unit cubes) of
//! increasing voxel count, up to rotational and optionally mirror
//! symmetry, persisting each generation so the next is computable.
//!
//! # Architecture
//!
//! Four subsystems, leaves first:
//!
//! - [`grid::Grid`]: bit-packed 3-D boolean grid with an embedded
//!   dimension header, geometric transforms and a total order.
//! - [`grid::canonical`]: enumerates the 24 rotational orientations of a
//!   shape (192 with mirrors) and selects the lexicographically minimal
//!   encoding, the shape's canonical key.
//! - [`store`]: append-only concurrent byte-key sets, size-tiered (direct
//!   bitmaps for tiny keys, bucketed paged scan structures for large
//!   ones) to keep memory and per-insert cost bounded into the billions
//!   of entries.
//! - [`pipeline`]: drives one voxel-count step over a rayon worker pool,
//!   expanding every size-(n-1) shape, canonicalizing each candidate and
//!   inserting it into the shared store; a second pass reduces a
//!   generation to its chiral-minimal forms.
//!
//! The [`cache`] module is the file collaborator: per-dimension-class
//! shape files written with atomic renames and a completion marker that
//! makes re-runs skippable.
//!
//! # Scale
//!
//! At voxel counts in the hundreds of millions the hard problem is not
//! geometry but deduplication: deciding, under many parallel writers,
//! without lost or duplicated inserts and without unbounded memory,
//! whether each bit-packed encoding has been seen before. That contract
//! lives in [`store::ByteKeySet`].

pub mod cache;
pub mod grid;
pub mod pipeline;
pub mod store;

// Re-export commonly used types
pub use grid::{min_chiral_rotation, min_rotation, Axis, Face, Grid, GridError};
pub use pipeline::{GenerationPipeline, GenerationStore, PipelineError};
pub use store::{new_key_set, ByteKeySet, StoreError, StorePreference};
