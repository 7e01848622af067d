// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Generation checkpoint files.
//!
//! Each finished generation is persisted so the next one can be computed:
//! one binary file per bounding-box dimension class holding fixed-width
//! shape encodings, plus a JSON completion marker recording the distinct
//! count and elapsed time. The marker is what makes re-runs idempotent: a
//! generation with a readable marker is skipped unless recomputation is
//! forced.
//!
//! Writers buffer into a temporary file in the target directory and
//! atomically rename on completion, so a crash never leaves a partial
//! file behind under the final name.

use crate::grid::{Grid, GridError};
use crate::pipeline::GenerationStore;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised by the cache layer.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Marker(#[from] serde_json::Error),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("shape file {name:?} has a malformed name")]
    BadFileName { name: String },

    #[error("shape file {name:?} is not a whole number of records")]
    TruncatedFile { name: String },
}

/// Completion record for one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMarker {
    /// Voxel count of the generation.
    pub n: usize,
    /// Number of distinct shapes persisted.
    pub shapes: u64,
    /// Wall-clock time the generation took to compute.
    pub elapsed_ms: u64,
}

fn shape_file_name(n: usize, dims: (u8, u8, u8)) -> String {
    format!("shapes_n{:02}_{}x{}x{}.bin", n, dims.0, dims.1, dims.2)
}

fn marker_name(n: usize) -> String {
    format!("complete_n{n:02}.json")
}

/// Parse `(w, h, d)` back out of a shape file name for generation `n`.
fn parse_dims(name: &str, n: usize) -> Option<(u8, u8, u8)> {
    let dims = name
        .strip_prefix(&format!("shapes_n{n:02}_"))?
        .strip_suffix(".bin")?;
    let mut parts = dims.splitn(3, 'x');
    let w = parts.next()?.parse().ok()?;
    let h = parts.next()?.parse().ok()?;
    let d = parts.next()?.parse().ok()?;
    Some((w, h, d))
}

/// Write a finalized generation to `dir` and return its marker.
///
/// One file per dimension class, written temp-then-rename; the marker is
/// written last, so its presence implies every shape file landed.
pub fn write_generation(
    dir: &Path,
    n: usize,
    store: &GenerationStore,
    elapsed: Duration,
) -> Result<GenerationMarker, CacheError> {
    fs::create_dir_all(dir)?;
    for (dims, class) in store.classes() {
        let path = dir.join(shape_file_name(n, dims));
        let temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            let mut failed = None;
            class.for_each_key(&mut |key| {
                if failed.is_none() {
                    failed = writer.write_all(key).err();
                }
            });
            if let Some(err) = failed {
                return Err(err.into());
            }
            writer.flush()?;
        }
        temp.persist(&path).map_err(|err| err.error)?;
        debug!(path = %path.display(), shapes = class.len(), "wrote shape file");
    }

    let marker = GenerationMarker {
        n,
        shapes: store.distinct() as u64,
        elapsed_ms: elapsed.as_millis() as u64,
    };
    let temp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(temp.as_file(), &marker)?;
    temp.persist(dir.join(marker_name(n))).map_err(|err| err.error)?;
    info!(n, shapes = marker.shapes, "generation persisted");
    Ok(marker)
}

/// Read the completion marker for generation `n`, if present.
pub fn read_marker(dir: &Path, n: usize) -> Result<Option<GenerationMarker>, CacheError> {
    let path = dir.join(marker_name(n));
    if !path.exists() {
        return Ok(None);
    }
    let marker = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    Ok(Some(marker))
}

/// Load a persisted generation, or `None` if its marker is absent.
///
/// Scans `dir` for the generation's shape files, recovering each file's
/// dimension class from its name and splitting it into fixed-width
/// records.
pub fn read_generation(dir: &Path, n: usize) -> Result<Option<Vec<Grid>>, CacheError> {
    if read_marker(dir, n)?.is_none() {
        return Ok(None);
    }
    let mut files: Vec<PathBuf> = Vec::new();
    let prefix = format!("shapes_n{n:02}_");
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(&prefix) && name.ends_with(".bin") {
            files.push(entry.path());
        }
    }
    files.sort();

    let mut shapes = Vec::new();
    for path in files {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (w, h, d) =
            parse_dims(&name, n).ok_or_else(|| CacheError::BadFileName { name: name.clone() })?;
        let record_len = Grid::encoded_len(w as usize, h as usize, d as usize);
        let mut bytes = Vec::new();
        BufReader::new(File::open(&path)?).read_to_end(&mut bytes)?;
        if bytes.len() % record_len != 0 {
            return Err(CacheError::TruncatedFile { name });
        }
        for record in bytes.chunks_exact(record_len) {
            shapes.push(Grid::from_bytes(record, d as usize)?);
        }
    }
    debug!(n, shapes = shapes.len(), "generation loaded");
    Ok(Some(shapes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_file_name_round_trip() {
        let name = shape_file_name(7, (2, 3, 4));
        assert_eq!(name, "shapes_n07_2x3x4.bin");
        assert_eq!(parse_dims(&name, 7), Some((2, 3, 4)));
        assert_eq!(parse_dims(&name, 8), None);
        assert_eq!(parse_dims("shapes_n07_2x3.bin", 7), None);
    }

    #[test]
    fn test_marker_name_is_zero_padded() {
        assert_eq!(marker_name(4), "complete_n04.json");
        assert_eq!(marker_name(12), "complete_n12.json");
    }

    #[test]
    fn test_read_marker_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_marker(dir.path(), 3).unwrap().is_none());
        assert!(read_generation(dir.path(), 3).unwrap().is_none());
    }
}
