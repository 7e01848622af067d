// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bit-packed 3-D boolean voxel grid.
//!
//! A [`Grid`] owns one contiguous byte buffer holding the canonical binary
//! encoding of a shape: an 8-bit header (4 bits width, 4 bits height)
//! followed by `w*h*d` payload bits, one per voxel, with x varying slowest
//! and z fastest. Depth is never stored; it is supplied by the reader, whose
//! records are fixed-width per dimension class.
//!
//! Payload bits are packed MSB-first so that comparing the encoded bytes
//! lexicographically is the same as comparing the bit sequence, which is
//! what the total order over shapes requires.
//!
//! Transforms come in two flavours:
//! - 90° rotations and pads are pure: they return a freshly allocated grid
//!   (dimensions may change, so the buffer cannot be reused).
//! - 180° rotations and mirrors mutate in place: they are pairwise voxel
//!   swaps that never change dimensions or allocate.

use crate::grid::constants::{HEADER_BITS, MAX_AXIS};
use crate::grid::GridError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use strum_macros::EnumIter;

/// Axis of rotation or reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One of the six faces of the bounding box, named by axis and direction.
///
/// `XNeg` is the face at `x == 0`, `XPos` the face at `x == w - 1`, and so
/// on for the other axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Face {
    XNeg,
    XPos,
    YNeg,
    YPos,
    ZNeg,
    ZPos,
}

/// Bit-packed 3-D boolean grid with an embedded dimension header.
///
/// A `Grid` is a value type. Cloning copies the buffer; equality and
/// ordering are over the encoded form (see [`Grid::cmp`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    w: u8,
    h: u8,
    d: u8,
    /// Header byte followed by the packed payload, trailing bits zero.
    data: Vec<u8>,
}

impl Grid {
    /// Number of bytes in the binary encoding of a `w`x`h`x`d` grid.
    pub fn encoded_len(w: usize, h: usize, d: usize) -> usize {
        1 + (w * h * d).div_ceil(8)
    }

    /// Create an all-empty grid of the given dimensions.
    pub fn new(w: usize, h: usize, d: usize) -> Result<Self, GridError> {
        if w == 0 || h == 0 || d == 0 || w > MAX_AXIS || h > MAX_AXIS || d > MAX_AXIS {
            return Err(GridError::BadDimensions { w, h, d });
        }
        let mut data = vec![0u8; Self::encoded_len(w, h, d)];
        data[0] = ((w as u8) << 4) | h as u8;
        Ok(Self {
            w: w as u8,
            h: h as u8,
            d: d as u8,
            data,
        })
    }

    /// Create a 1x1x1 grid holding a single voxel, the seed of every
    /// enumeration.
    pub fn unit() -> Self {
        let mut grid = Self::new(1, 1, 1).expect("1x1x1 is always encodable");
        grid.set(0, 0, 0, true);
        grid
    }

    /// Decode a binary encoding.
    ///
    /// Depth is not part of the encoding and must be supplied by the caller;
    /// file readers know it because records within one file share a
    /// dimension class. Fails if the header is out of range, the byte length
    /// does not match the dimensions, or any trailing padding bit is set.
    pub fn from_bytes(bytes: &[u8], d: usize) -> Result<Self, GridError> {
        let Some(&header) = bytes.first() else {
            return Err(GridError::malformed("empty encoding"));
        };
        let w = (header >> 4) as usize;
        let h = (header & 0x0f) as usize;
        if w == 0 || h == 0 || d == 0 || d > MAX_AXIS {
            return Err(GridError::BadDimensions { w, h, d });
        }
        let expected = Self::encoded_len(w, h, d);
        if bytes.len() != expected {
            return Err(GridError::LengthMismatch {
                w,
                h,
                d,
                expected,
                actual: bytes.len(),
            });
        }
        let grid = Self {
            w: w as u8,
            h: h as u8,
            d: d as u8,
            data: bytes.to_vec(),
        };
        grid.check_padding()?;
        Ok(grid)
    }

    /// Reject encodings whose bits past the payload are non-zero, so that
    /// every shape has exactly one encoding.
    fn check_padding(&self) -> Result<(), GridError> {
        let bits = self.volume();
        let spare = self.data.len() * 8 - HEADER_BITS - bits;
        if spare > 0 {
            let last = *self.data.last().expect("encoding has a header byte");
            let mask = (1u8 << spare) - 1;
            if last & mask != 0 {
                return Err(GridError::DirtyPadding { bits });
            }
        }
        Ok(())
    }

    /// The encoded form: header byte plus packed payload. This is the
    /// canonical key once the grid has been reduced to its minimal rotation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn w(&self) -> usize {
        self.w as usize
    }

    pub fn h(&self) -> usize {
        self.h as usize
    }

    pub fn d(&self) -> usize {
        self.d as usize
    }

    /// Dimension triple `(w, h, d)`.
    pub fn dims(&self) -> (u8, u8, u8) {
        (self.w, self.h, self.d)
    }

    /// Number of cells in the bounding box.
    pub fn volume(&self) -> usize {
        self.w() * self.h() * self.d()
    }

    /// Total encoded bit length, header included. The primary sort key of
    /// the total order: shapes of different bit length are never equal.
    pub fn total_bits(&self) -> usize {
        HEADER_BITS + self.volume()
    }

    /// Number of filled voxels.
    pub fn count(&self) -> usize {
        // Padding bits are zero by invariant, so a straight popcount of the
        // payload bytes is exact.
        self.data[1..].iter().map(|b| b.count_ones() as usize).sum()
    }

    #[inline]
    fn bit_index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.w() && y < self.h() && z < self.d());
        (x * self.h() + y) * self.d() + z
    }

    /// Read the voxel at `(x, y, z)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        let bit = self.bit_index(x, y, z);
        self.data[1 + bit / 8] & (0x80 >> (bit % 8)) != 0
    }

    /// Write the voxel at `(x, y, z)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: bool) {
        let bit = self.bit_index(x, y, z);
        let mask = 0x80 >> (bit % 8);
        if value {
            self.data[1 + bit / 8] |= mask;
        } else {
            self.data[1 + bit / 8] &= !mask;
        }
    }

    #[inline]
    fn swap_cells(&mut self, a: (usize, usize, usize), b: (usize, usize, usize)) {
        let va = self.get(a.0, a.1, a.2);
        let vb = self.get(b.0, b.1, b.2);
        if va != vb {
            self.set(a.0, a.1, a.2, vb);
            self.set(b.0, b.1, b.2, va);
        }
    }

    /// Whether the cell at `(x, y, z)` shares a face with a filled voxel.
    pub fn adjacent_filled(&self, x: usize, y: usize, z: usize) -> bool {
        (x > 0 && self.get(x - 1, y, z))
            || (x + 1 < self.w() && self.get(x + 1, y, z))
            || (y > 0 && self.get(x, y - 1, z))
            || (y + 1 < self.h() && self.get(x, y + 1, z))
            || (z > 0 && self.get(x, y, z - 1))
            || (z + 1 < self.d() && self.get(x, y, z + 1))
    }

    /// Grow the bounding box by one layer on the given face.
    ///
    /// Always allocates: the contents are copied at an offset of one along
    /// the padded axis for the negative faces, zero for the positive faces,
    /// and the new layer is left empty. Fails with
    /// [`GridError::AxisLimit`] if the axis is already at 15.
    pub fn pad(&self, face: Face) -> Result<Grid, GridError> {
        let (dw, dh, dd, ox, oy, oz) = match face {
            Face::XNeg => (1, 0, 0, 1, 0, 0),
            Face::XPos => (1, 0, 0, 0, 0, 0),
            Face::YNeg => (0, 1, 0, 0, 1, 0),
            Face::YPos => (0, 1, 0, 0, 0, 0),
            Face::ZNeg => (0, 0, 1, 0, 0, 1),
            Face::ZPos => (0, 0, 1, 0, 0, 0),
        };
        let (w, h, d) = (self.w() + dw, self.h() + dh, self.d() + dd);
        let grown = w.max(h).max(d);
        if grown > MAX_AXIS {
            return Err(GridError::AxisLimit { len: grown });
        }
        let mut out = Grid::new(w, h, d)?;
        for x in 0..self.w() {
            for y in 0..self.h() {
                for z in 0..self.d() {
                    if self.get(x, y, z) {
                        out.set(x + ox, y + oy, z + oz, true);
                    }
                }
            }
        }
        Ok(out)
    }

    /// 90° clockwise rotation about the X axis; swaps height and depth.
    ///
    /// Pure: always returns a new grid. Four successive applications
    /// reproduce the original.
    pub fn rotate_x(&self) -> Grid {
        let (w, h, d) = (self.w(), self.h(), self.d());
        let mut out = Grid::new(w, d, h).expect("axes within range");
        for x in 0..w {
            for y in 0..d {
                for z in 0..h {
                    if self.get(x, h - 1 - z, y) {
                        out.set(x, y, z, true);
                    }
                }
            }
        }
        out
    }

    /// 90° clockwise rotation about the Y axis; swaps width and depth.
    pub fn rotate_y(&self) -> Grid {
        let (w, h, d) = (self.w(), self.h(), self.d());
        let mut out = Grid::new(d, h, w).expect("axes within range");
        for x in 0..d {
            for y in 0..h {
                for z in 0..w {
                    if self.get(w - 1 - z, y, x) {
                        out.set(x, y, z, true);
                    }
                }
            }
        }
        out
    }

    /// 90° clockwise rotation about the Z axis; swaps width and height.
    pub fn rotate_z(&self) -> Grid {
        let (w, h, d) = (self.w(), self.h(), self.d());
        let mut out = Grid::new(h, w, d).expect("axes within range");
        for x in 0..h {
            for y in 0..w {
                for z in 0..d {
                    if self.get(y, h - 1 - x, z) {
                        out.set(x, y, z, true);
                    }
                }
            }
        }
        out
    }

    /// In-place 180° rotation about the X axis. No allocation; applying it
    /// twice restores the original.
    pub fn rotate_x2(&mut self) {
        let (w, h, d) = (self.w(), self.h(), self.d());
        let slice = h * d;
        // The linear index i = y*d + z pairs with slice-1-i under the
        // (y, z) -> (h-1-y, d-1-z) map, so walking half the slice visits
        // each pair once. An odd slice leaves the centre cell fixed.
        for x in 0..w {
            for i in 0..slice / 2 {
                let j = slice - 1 - i;
                self.swap_cells((x, i / d, i % d), (x, j / d, j % d));
            }
        }
    }

    /// In-place 180° rotation about the Y axis.
    pub fn rotate_y2(&mut self) {
        let (w, h, d) = (self.w(), self.h(), self.d());
        let slice = w * d;
        for y in 0..h {
            for i in 0..slice / 2 {
                let j = slice - 1 - i;
                self.swap_cells((i / d, y, i % d), (j / d, y, j % d));
            }
        }
    }

    /// In-place 180° rotation about the Z axis.
    pub fn rotate_z2(&mut self) {
        let (w, h, d) = (self.w(), self.h(), self.d());
        let slice = w * h;
        for z in 0..d {
            for i in 0..slice / 2 {
                let j = slice - 1 - i;
                self.swap_cells((i / h, i % h, z), (j / h, j % h, z));
            }
        }
    }

    /// In-place reflection along the given axis. No allocation; an
    /// involution.
    pub fn mirror(&mut self, axis: Axis) {
        let (w, h, d) = (self.w(), self.h(), self.d());
        match axis {
            Axis::X => {
                for x in 0..w / 2 {
                    for y in 0..h {
                        for z in 0..d {
                            self.swap_cells((x, y, z), (w - 1 - x, y, z));
                        }
                    }
                }
            }
            Axis::Y => {
                for x in 0..w {
                    for y in 0..h / 2 {
                        for z in 0..d {
                            self.swap_cells((x, y, z), (x, h - 1 - y, z));
                        }
                    }
                }
            }
            Axis::Z => {
                for x in 0..w {
                    for y in 0..h {
                        for z in 0..d / 2 {
                            self.swap_cells((x, y, z), (x, y, d - 1 - z));
                        }
                    }
                }
            }
        }
    }

    /// Rotate until `w <= h <= d`, using at most two 90° rotations.
    ///
    /// Used only to predict a target generation's dimension class cheaply;
    /// canonicalization goes through all 24 rotations instead.
    pub fn min_dimension(&self) -> Grid {
        let mut grid = self.clone();
        // Bring the shortest axis to the width slot, then order the rest.
        if grid.h < grid.w && grid.h <= grid.d {
            grid = grid.rotate_z();
        } else if grid.d < grid.w && grid.d <= grid.h {
            grid = grid.rotate_y();
        }
        if grid.d < grid.h {
            grid = grid.rotate_x();
        }
        grid
    }
}

impl PartialOrd for Grid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Grid {
    /// Total order over shapes: first by encoded bit length (shorter sorts
    /// first), then by the first differing bit, a 0 bit before a 1 bit.
    ///
    /// Payload bits are packed MSB-first with zero padding, so the bit
    /// comparison reduces to a bytewise comparison of the encodings.
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_bits()
            .cmp(&other.total_bits())
            .then_with(|| self.data.cmp(&other.data))
    }
}

impl fmt::Display for Grid {
    /// Text encoding: `"w,h,d,"` followed by one `'*'` or `'.'` per voxel
    /// in payload order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},", self.w, self.h, self.d)?;
        for x in 0..self.w() {
            for y in 0..self.h() {
                for z in 0..self.d() {
                    f.write_str(if self.get(x, y, z) { "*" } else { "." })?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.splitn(4, ',');
        let mut dim = |name: &str| -> Result<usize, GridError> {
            fields
                .next()
                .ok_or_else(|| GridError::malformed(format!("missing {name} field")))?
                .parse::<usize>()
                .map_err(|_| GridError::malformed(format!("{name} is not a number")))
        };
        let w = dim("width")?;
        let h = dim("height")?;
        let d = dim("depth")?;
        let cells = fields
            .next()
            .ok_or_else(|| GridError::malformed("missing cell field"))?;
        let mut grid = Grid::new(w, h, d)?;
        if cells.chars().count() != grid.volume() {
            return Err(GridError::malformed(format!(
                "expected {} cells, found {}",
                grid.volume(),
                cells.chars().count()
            )));
        }
        for (i, c) in cells.chars().enumerate() {
            let filled = match c {
                '*' => true,
                '.' => false,
                other => {
                    return Err(GridError::malformed(format!("invalid cell char {other:?}")))
                }
            };
            if filled {
                let z = i % d;
                let y = (i / d) % h;
                let x = i / (d * h);
                grid.set(x, y, z, true);
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn sample() -> Grid {
        // A 2x3x4 grid with an asymmetric fill.
        let mut grid = Grid::new(2, 3, 4).unwrap();
        grid.set(0, 0, 0, true);
        grid.set(0, 0, 1, true);
        grid.set(0, 1, 1, true);
        grid.set(1, 1, 1, true);
        grid.set(1, 2, 3, true);
        grid
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(Grid::new(0, 1, 1).is_err());
        assert!(Grid::new(1, 16, 1).is_err());
        assert!(Grid::new(15, 15, 15).is_ok());
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(Grid::encoded_len(1, 1, 1), 2);
        assert_eq!(Grid::encoded_len(2, 2, 2), 2);
        assert_eq!(Grid::encoded_len(2, 2, 3), 3);
        assert_eq!(Grid::encoded_len(15, 15, 15), 1 + 422);
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(3, 3, 3).unwrap();
        assert!(!grid.get(1, 2, 0));
        grid.set(1, 2, 0, true);
        assert!(grid.get(1, 2, 0));
        assert_eq!(grid.count(), 1);
        grid.set(1, 2, 0, false);
        assert!(!grid.get(1, 2, 0));
        assert_eq!(grid.count(), 0);
    }

    #[test]
    fn test_binary_round_trip() {
        let grid = sample();
        let bytes = grid.as_bytes().to_vec();
        let back = Grid::from_bytes(&bytes, grid.d()).unwrap();
        assert_eq!(grid, back);
        assert_eq!(bytes, back.as_bytes());
    }

    #[test]
    fn test_from_bytes_rejects_length_mismatch() {
        let grid = sample();
        let mut bytes = grid.as_bytes().to_vec();
        bytes.push(0);
        assert!(matches!(
            Grid::from_bytes(&bytes, grid.d()),
            Err(GridError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_from_bytes_rejects_dirty_padding() {
        // 1x1x1: header plus one payload bit, seven padding bits.
        let bytes = [0x11, 0x81];
        assert!(matches!(
            Grid::from_bytes(&bytes, 1),
            Err(GridError::DirtyPadding { .. })
        ));
    }

    #[test]
    fn test_from_bytes_rejects_zero_header_field() {
        let bytes = [0x01, 0x00];
        assert!(matches!(
            Grid::from_bytes(&bytes, 1),
            Err(GridError::BadDimensions { .. })
        ));
    }

    #[test]
    fn test_text_round_trip() {
        let grid = sample();
        let text = grid.to_string();
        let back: Grid = text.parse().unwrap();
        assert_eq!(grid, back);
        assert_eq!(text, back.to_string());
    }

    #[test]
    fn test_text_form_of_unit() {
        assert_eq!(Grid::unit().to_string(), "1,1,1,*");
        assert_eq!("1,1,1,*".parse::<Grid>().unwrap(), Grid::unit());
    }

    #[test]
    fn test_text_rejects_malformed() {
        assert!("1,1,*".parse::<Grid>().is_err());
        assert!("1,1,1,x".parse::<Grid>().is_err());
        assert!("1,1,2,*".parse::<Grid>().is_err());
        assert!("a,1,1,*".parse::<Grid>().is_err());
    }

    #[test]
    fn test_pad_offsets() {
        let mut grid = Grid::new(1, 1, 1).unwrap();
        grid.set(0, 0, 0, true);

        let low = grid.pad(Face::XNeg).unwrap();
        assert_eq!(low.dims(), (2, 1, 1));
        assert!(!low.get(0, 0, 0));
        assert!(low.get(1, 0, 0));

        let high = grid.pad(Face::XPos).unwrap();
        assert_eq!(high.dims(), (2, 1, 1));
        assert!(high.get(0, 0, 0));
        assert!(!high.get(1, 0, 0));
    }

    #[test]
    fn test_pad_every_face_preserves_count() {
        let grid = sample();
        for face in Face::iter() {
            let padded = grid.pad(face).unwrap();
            assert_eq!(padded.count(), grid.count());
            let layer = match face {
                Face::XNeg | Face::XPos => grid.h() * grid.d(),
                Face::YNeg | Face::YPos => grid.w() * grid.d(),
                Face::ZNeg | Face::ZPos => grid.w() * grid.h(),
            };
            assert_eq!(padded.volume(), grid.volume() + layer);
        }
    }

    #[test]
    fn test_pad_rejects_axis_sixteen() {
        let grid = Grid::new(15, 1, 1).unwrap();
        assert!(matches!(
            grid.pad(Face::XPos),
            Err(GridError::AxisLimit { len: 16 })
        ));
        assert!(grid.pad(Face::YNeg).is_ok());
    }

    #[test]
    fn test_rotations_have_period_four() {
        let grid = sample();
        let x4 = grid.rotate_x().rotate_x().rotate_x().rotate_x();
        assert_eq!(grid, x4);
        let y4 = grid.rotate_y().rotate_y().rotate_y().rotate_y();
        assert_eq!(grid, y4);
        let z4 = grid.rotate_z().rotate_z().rotate_z().rotate_z();
        assert_eq!(grid, z4);
    }

    #[test]
    fn test_quarter_rotations_of_uneven_boxes() {
        // Every axis pair unequal, so each rotation must track the
        // dimension swap when mapping cells.
        let mut grid = Grid::new(1, 3, 2).unwrap();
        grid.set(0, 0, 0, true);
        grid.set(0, 2, 1, true);

        let z = grid.rotate_z();
        assert_eq!(z.dims(), (3, 1, 2));
        assert_eq!(z.count(), grid.count());
        assert!(z.get(2, 0, 0));
        assert!(z.get(0, 0, 1));

        let x = grid.rotate_x();
        assert_eq!(x.dims(), (1, 2, 3));
        assert_eq!(x.count(), grid.count());

        let y = grid.rotate_y();
        assert_eq!(y.dims(), (2, 3, 1));
        assert_eq!(y.count(), grid.count());
    }

    #[test]
    fn test_quarter_twice_is_half() {
        let grid = sample();
        let via_quarters = grid.rotate_x().rotate_x();
        let mut via_half = grid.clone();
        via_half.rotate_x2();
        assert_eq!(via_quarters, via_half);

        let via_quarters = grid.rotate_y().rotate_y();
        let mut via_half = grid.clone();
        via_half.rotate_y2();
        assert_eq!(via_quarters, via_half);

        let via_quarters = grid.rotate_z().rotate_z();
        let mut via_half = grid.clone();
        via_half.rotate_z2();
        assert_eq!(via_quarters, via_half);
    }

    #[test]
    fn test_half_rotations_are_involutions() {
        let grid = sample();
        let mut spun = grid.clone();
        spun.rotate_x2();
        spun.rotate_x2();
        assert_eq!(grid, spun);
        spun.rotate_y2();
        spun.rotate_y2();
        assert_eq!(grid, spun);
        spun.rotate_z2();
        spun.rotate_z2();
        assert_eq!(grid, spun);
    }

    #[test]
    fn test_mirrors_are_involutions() {
        let grid = sample();
        for axis in Axis::iter() {
            let mut mirrored = grid.clone();
            mirrored.mirror(axis);
            assert_eq!(mirrored.count(), grid.count());
            mirrored.mirror(axis);
            assert_eq!(grid, mirrored);
        }
    }

    #[test]
    fn test_mirror_moves_voxels() {
        let mut grid = Grid::new(3, 1, 1).unwrap();
        grid.set(0, 0, 0, true);
        grid.mirror(Axis::X);
        assert!(!grid.get(0, 0, 0));
        assert!(grid.get(2, 0, 0));
    }

    #[test]
    fn test_min_dimension_sorts_axes() {
        for (w, h, d) in [
            (1, 2, 3),
            (1, 3, 2),
            (2, 1, 3),
            (2, 3, 1),
            (3, 1, 2),
            (3, 2, 1),
        ] {
            let mut grid = Grid::new(w, h, d).unwrap();
            grid.set(0, 0, 0, true);
            let sorted = grid.min_dimension();
            assert_eq!(sorted.dims(), (1, 2, 3), "from {w}x{h}x{d}");
            assert_eq!(sorted.count(), 1);
        }
    }

    #[test]
    fn test_order_by_bit_length_first() {
        let small = Grid::new(1, 1, 2).unwrap();
        let mut big = Grid::new(3, 3, 3).unwrap();
        big.set(0, 0, 0, true);
        assert!(small < big);
    }

    #[test]
    fn test_order_zero_bit_before_one_bit() {
        let empty = Grid::new(2, 2, 2).unwrap();
        let mut filled = Grid::new(2, 2, 2).unwrap();
        filled.set(0, 0, 0, true);
        assert!(empty < filled);

        let mut late = Grid::new(2, 2, 2).unwrap();
        late.set(1, 1, 1, true);
        assert!(filled > late);
    }

    #[test]
    fn test_order_is_antisymmetric_and_transitive() {
        let mut grids = vec![Grid::new(2, 2, 2).unwrap()];
        for i in 0..8 {
            let mut grid = Grid::new(2, 2, 2).unwrap();
            grid.set(i / 4, (i / 2) % 2, i % 2, true);
            grids.push(grid);
        }
        for a in &grids {
            for b in &grids {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                for c in &grids {
                    if a <= b && b <= c {
                        assert!(a <= c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_adjacent_filled() {
        let mut grid = Grid::new(3, 3, 3).unwrap();
        grid.set(1, 1, 1, true);
        assert!(grid.adjacent_filled(0, 1, 1));
        assert!(grid.adjacent_filled(1, 2, 1));
        assert!(grid.adjacent_filled(1, 1, 0));
        assert!(!grid.adjacent_filled(0, 0, 0));
        assert!(!grid.adjacent_filled(2, 2, 2));
    }
}
