// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for grid construction and serialization.
//!
//! All of these are format errors or contract violations: upstream
//! generation is trusted, so none of them is retried. They propagate
//! synchronously to the caller.

use crate::grid::constants::MAX_AXIS;
use thiserror::Error;

/// Errors raised by [`Grid`](crate::grid::Grid) constructors and transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// An axis would exceed the 4-bit encodable maximum of 15.
    #[error("axis length {len} exceeds the encodable maximum of {MAX_AXIS}")]
    AxisLimit { len: usize },

    /// A dimension field is zero or above 15.
    #[error("dimensions {w}x{h}x{d} are outside 1..={MAX_AXIS}")]
    BadDimensions { w: usize, h: usize, d: usize },

    /// A binary encoding has the wrong length for its header dimensions.
    #[error("encoding is {actual} bytes but {w}x{h}x{d} requires {expected}")]
    LengthMismatch {
        w: usize,
        h: usize,
        d: usize,
        expected: usize,
        actual: usize,
    },

    /// Unused bits after the payload must be zero so that encodings are
    /// unique and bytewise comparison agrees with bitwise comparison.
    #[error("non-zero padding bits after {bits}-bit payload")]
    DirtyPadding { bits: usize },

    /// A text encoding could not be parsed.
    #[error("malformed text encoding: {reason}")]
    MalformedText { reason: String },
}

impl GridError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        GridError::MalformedText {
            reason: reason.into(),
        }
    }
}
