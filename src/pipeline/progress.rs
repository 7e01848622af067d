// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Progress reporting collaborator.
//!
//! The pipeline reports work through an explicit sink handed in at
//! construction; there is no global counter. Sinks must be cheap and
//! thread-safe, since every worker calls them.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Receives progress updates from the worker pool.
pub trait ProgressSink: Send + Sync {
    /// Called after a batch of input shapes has been fully expanded.
    fn shapes_processed(&self, count: u64);
}

/// Sink that discards all updates.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn shapes_processed(&self, _count: u64) {}
}

/// Sink that accumulates a total in an atomic counter.
#[derive(Debug, Default)]
pub struct CountingProgress {
    processed: AtomicU64,
}

impl CountingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }
}

impl ProgressSink for CountingProgress {
    fn shapes_processed(&self, count: u64) {
        self.processed.fetch_add(count, Ordering::Relaxed);
    }
}

/// Sink that logs a line every `interval` processed shapes.
#[derive(Debug)]
pub struct LogProgress {
    processed: AtomicU64,
    interval: u64,
}

impl LogProgress {
    pub fn new(interval: u64) -> Self {
        Self {
            processed: AtomicU64::new(0),
            interval: interval.max(1),
        }
    }
}

impl ProgressSink for LogProgress {
    fn shapes_processed(&self, count: u64) {
        let before = self.processed.fetch_add(count, Ordering::Relaxed);
        let after = before + count;
        if before / self.interval != after / self.interval {
            info!(shapes = after, "expanded");
        }
    }
}
