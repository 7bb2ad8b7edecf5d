//! Grid coordinates and the bounds/clamping utility.
//!
//! The world is an `N × N` grid.  `x` is the column and `y` the row, so "up"
//! decreases `y`.  Moves never wrap and never fail: a step that would leave
//! the grid is truncated to the boundary.

use std::fmt;

use crate::SimRng;

/// A cell on the grid.  Always `0 <= x, y < grid_size` once produced by
/// [`GridGeometry`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    pub x: u32,
    pub y: u32,
}

impl GridCoord {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance in cells.
    #[inline]
    pub fn manhattan(self, other: GridCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Pure geometry of a square grid.  Cheap to copy; holds no heap data.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GridGeometry {
    size: u32,
}

impl GridGeometry {
    /// `size` must be non-zero; callers validate this through
    /// [`FleetConfig::validate`][crate::FleetConfig::validate].
    #[inline]
    pub fn new(size: u32) -> Self {
        debug_assert!(size > 0, "grid size must be positive");
        Self { size }
    }

    #[inline]
    pub fn size(self) -> u32 {
        self.size
    }

    /// Number of cells (`size²`).
    #[inline]
    pub fn cell_count(self) -> usize {
        self.size as usize * self.size as usize
    }

    #[inline]
    pub fn contains(self, c: GridCoord) -> bool {
        c.x < self.size && c.y < self.size
    }

    /// Apply `(dx, dy)` to `c`, clamping each axis to `[0, size - 1]`.
    pub fn clamp_step(self, c: GridCoord, dx: i32, dy: i32) -> GridCoord {
        let max = (self.size - 1) as i64;
        let x = (c.x as i64 + dx as i64).clamp(0, max);
        let y = (c.y as i64 + dy as i64).clamp(0, max);
        GridCoord::new(x as u32, y as u32)
    }

    /// Row-major flat index (`y * size + x`).
    #[inline]
    pub fn cell_index(self, c: GridCoord) -> usize {
        c.y as usize * self.size as usize + c.x as usize
    }

    /// A cell drawn uniformly at random (independent draws per axis).
    pub fn random_cell(self, rng: &mut SimRng) -> GridCoord {
        let x = rng.gen_range(0..self.size);
        let y = rng.gen_range(0..self.size);
        GridCoord::new(x, y)
    }
}
