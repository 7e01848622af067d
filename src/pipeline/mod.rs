// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Generation pipeline.
//!
//! One generation step takes every canonical shape of size n-1, produces
//! all size-n extensions, reduces each to its minimal rotation and inserts
//! the result into a shared deduplicating store. A second pass reduces a
//! finished generation to its chiral-minimal forms the same way.
//!
//! Per-shape work (deserialize, pad, rotate, compare) touches only private
//! buffers and is embarrassingly parallel; the store is the only shared
//! mutable resource. Generations are strictly sequential: generation n is
//! computed only from the finalized generation n-1.
//!
//! Canonical keys are fixed-width only within one bounding-box dimension
//! class, so the generation store routes every shape to a per-(w,h,d)
//! [`ByteKeySet`], mirroring the per-dimension-class files the cache
//! layer reads and writes.

pub mod progress;

pub use progress::{CountingProgress, LogProgress, NullProgress, ProgressSink};

use crate::grid::{min_chiral_rotation, min_rotation, Face, Grid, GridError};
use crate::store::{new_key_set, ByteKeySet, StoreError, StorePreference};
use parking_lot::RwLock;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::debug;

/// Errors raised while driving a generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The deduplicated shape set of one generation, partitioned by
/// bounding-box dimension class.
///
/// Stores are created lazily, one per class, each configured with that
/// class's fixed key length. Safe under concurrent insertion; enumeration
/// is only valid once the generation is frozen.
pub struct GenerationStore {
    preference: StorePreference,
    classes: RwLock<HashMap<(u8, u8, u8), Arc<dyn ByteKeySet>>>,
}

impl GenerationStore {
    pub fn new(preference: StorePreference) -> Self {
        Self {
            preference,
            classes: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a canonical shape; `true` iff it was not seen before.
    pub fn insert(&self, canonical: &Grid) -> Result<bool, StoreError> {
        let dims = canonical.dims();
        let store = self.class_store(dims, canonical.as_bytes().len())?;
        store.add(canonical.as_bytes())
    }

    fn class_store(
        &self,
        dims: (u8, u8, u8),
        key_len: usize,
    ) -> Result<Arc<dyn ByteKeySet>, StoreError> {
        if let Some(store) = self.classes.read().get(&dims) {
            return Ok(Arc::clone(store));
        }
        let mut classes = self.classes.write();
        // Double-checked: another worker may have created the class while
        // we waited for the write lock.
        if let Some(store) = classes.get(&dims) {
            return Ok(Arc::clone(store));
        }
        debug!(?dims, key_len, "opening dimension class");
        // Under `Auto`, a 4-byte class would commit a 512 MB bitmap per
        // dimension class; generations open many classes, and each holds
        // far fewer keys than that space. Route those to the striped set.
        let preference = match (self.preference, key_len) {
            (StorePreference::Auto, 4) => StorePreference::Striped,
            (preference, _) => preference,
        };
        let store: Arc<dyn ByteKeySet> = new_key_set(key_len, preference)?.into();
        classes.insert(dims, Arc::clone(&store));
        Ok(store)
    }

    /// Total number of distinct shapes across all classes.
    pub fn distinct(&self) -> usize {
        self.classes.read().values().map(|s| s.len()).sum()
    }

    /// Dimension classes and their stores, ordered by dimensions for
    /// deterministic output.
    pub fn classes(&self) -> Vec<((u8, u8, u8), Arc<dyn ByteKeySet>)> {
        let mut out: Vec<_> = self
            .classes
            .read()
            .iter()
            .map(|(dims, store)| (*dims, Arc::clone(store)))
            .collect();
        out.sort_by_key(|(dims, _)| *dims);
        out
    }

    /// Decode every stored shape. Only valid once the generation is
    /// frozen.
    pub fn grids(&self) -> Result<Vec<Grid>, GridError> {
        let mut out = Vec::with_capacity(self.distinct());
        for ((_, _, d), store) in self.classes() {
            let mut failed = None;
            store.for_each_key(&mut |key| {
                if failed.is_some() {
                    return;
                }
                match Grid::from_bytes(key, d as usize) {
                    Ok(grid) => out.push(grid),
                    Err(err) => failed = Some(err),
                }
            });
            if let Some(err) = failed {
                return Err(err);
            }
        }
        Ok(out)
    }

    /// Drop every stored key, all classes included.
    pub fn clear(&self) {
        for (_, store) in self.classes().iter() {
            store.clear();
        }
    }
}

/// All size-(n+1) candidate extensions of a shape.
///
/// Candidates come from (a) every empty in-box cell sharing a face with a
/// filled voxel and (b) each of the six one-layer pads, filling only cells
/// of the new layer that touch the old solid. Pads that would push an axis
/// past the encodable maximum contribute nothing: such extensions are
/// rejected.
pub fn expansions(grid: &Grid) -> Result<Vec<Grid>, GridError> {
    let mut out = Vec::new();
    for x in 0..grid.w() {
        for y in 0..grid.h() {
            for z in 0..grid.d() {
                if !grid.get(x, y, z) && grid.adjacent_filled(x, y, z) {
                    let mut candidate = grid.clone();
                    candidate.set(x, y, z, true);
                    out.push(candidate);
                }
            }
        }
    }
    for face in Face::iter() {
        let padded = match grid.pad(face) {
            Ok(padded) => padded,
            Err(GridError::AxisLimit { .. }) => continue,
            Err(err) => return Err(err),
        };
        let (w, h, d) = (padded.w(), padded.h(), padded.d());
        let layer = |x: usize, y: usize, z: usize, out: &mut Vec<Grid>, padded: &Grid| {
            if padded.adjacent_filled(x, y, z) {
                let mut candidate = padded.clone();
                candidate.set(x, y, z, true);
                out.push(candidate);
            }
        };
        match face {
            Face::XNeg | Face::XPos => {
                let x = if face == Face::XNeg { 0 } else { w - 1 };
                for y in 0..h {
                    for z in 0..d {
                        layer(x, y, z, &mut out, &padded);
                    }
                }
            }
            Face::YNeg | Face::YPos => {
                let y = if face == Face::YNeg { 0 } else { h - 1 };
                for x in 0..w {
                    for z in 0..d {
                        layer(x, y, z, &mut out, &padded);
                    }
                }
            }
            Face::ZNeg | Face::ZPos => {
                let z = if face == Face::ZNeg { 0 } else { d - 1 };
                for x in 0..w {
                    for y in 0..h {
                        layer(x, y, z, &mut out, &padded);
                    }
                }
            }
        }
    }
    Ok(out)
}

/// Drives one voxel-count step over a rayon worker pool.
pub struct GenerationPipeline {
    preference: StorePreference,
    progress: Arc<dyn ProgressSink>,
}

impl GenerationPipeline {
    pub fn new(preference: StorePreference) -> Self {
        Self {
            preference,
            progress: Arc::new(NullProgress),
        }
    }

    /// Replace the progress sink.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Expand every size-(n-1) canonical shape into the size-n store.
    pub fn extend(&self, shapes: &[Grid]) -> Result<GenerationStore, PipelineError> {
        let store = GenerationStore::new(self.preference);
        shapes.par_iter().try_for_each(|shape| {
            for candidate in expansions(shape)? {
                let canonical = min_rotation(&candidate);
                store.insert(&canonical)?;
            }
            self.progress.shapes_processed(1);
            Ok::<(), PipelineError>(())
        })?;
        debug!(
            input = shapes.len(),
            output = store.distinct(),
            "extension pass complete"
        );
        Ok(store)
    }

    /// Reduce a generation to its chiral-minimal forms.
    pub fn chiral_reduce(&self, shapes: &[Grid]) -> Result<GenerationStore, PipelineError> {
        let store = GenerationStore::new(self.preference);
        shapes.par_iter().try_for_each(|shape| {
            let canonical = min_chiral_rotation(shape);
            store.insert(&canonical)?;
            self.progress.shapes_processed(1);
            Ok::<(), PipelineError>(())
        })?;
        debug!(
            input = shapes.len(),
            output = store.distinct(),
            "chiral reduction complete"
        );
        Ok(store)
    }
}
