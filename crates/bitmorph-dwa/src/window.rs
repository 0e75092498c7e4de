//! Window model for linear structuring elements
//!
//! A linear run of length `L` is turned into the inclusive offset window
//! `[lo, hi]` whose taps are combined for every output pixel. With
//! `N = L - 2`:
//!
//! ```text
//! lo = -ceil(N / 2)
//! hi = floor(N / 2) + 1
//! ```
//!
//! The window is anchored one tap toward the positive side: for even `L`
//! it extends one further right (or down) than left (or up). This places
//! the run's origin at index `L / 2`, the same origin a brick element of
//! width `L` uses. For `L = 1` the formula yields the identity `[0, 0]`.

use crate::error::{DwaError, DwaResult};
use std::ops::RangeInclusive;

/// Longest run the generic compositor accepts.
///
/// Taps up to 32 pixels (one full word, or 32 rows) from the origin are
/// served by a 32-pixel margin.
pub const MAX_RUN_LENGTH: u32 = 64;

/// Axis along which a linear run extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Along a row; taps are bit shifts with carry from neighbor words
    Horizontal,
    /// Along a column; taps are whole-row word offsets
    Vertical,
}

/// Morphological operation applied over the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphOp {
    /// OR of all taps
    Dilate,
    /// AND of all taps
    Erode,
}

impl MorphOp {
    /// The other operation of the dual pair.
    pub fn dual(self) -> Self {
        match self {
            MorphOp::Dilate => MorphOp::Erode,
            MorphOp::Erode => MorphOp::Dilate,
        }
    }
}

/// Inclusive offset window `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    lo: i32,
    hi: i32,
}

impl Window {
    /// Window of a linear run of `length` taps.
    ///
    /// `length` must be at least 1; [`LinearRun::new`] enforces this.
    pub const fn for_length(length: u32) -> Self {
        let n = length as i32 - 2;
        Window {
            lo: -(n + 1).div_euclid(2),
            hi: n.div_euclid(2) + 1,
        }
    }

    /// Build a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DwaError::InvalidParameters`] if `lo > hi`.
    pub fn new(lo: i32, hi: i32) -> DwaResult<Self> {
        if lo > hi {
            return Err(DwaError::InvalidParameters(format!(
                "window lower bound {lo} exceeds upper bound {hi}"
            )));
        }
        Ok(Window { lo, hi })
    }

    /// Most negative offset.
    #[inline]
    pub const fn lo(self) -> i32 {
        self.lo
    }

    /// Most positive offset.
    #[inline]
    pub const fn hi(self) -> i32 {
        self.hi
    }

    /// Number of taps.
    #[inline]
    pub const fn len(self) -> u32 {
        (self.hi - self.lo + 1) as u32
    }

    /// A window always holds at least one tap.
    #[inline]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Largest distance of any tap from the origin.
    #[inline]
    pub const fn radius(self) -> u32 {
        let neg = self.lo.unsigned_abs();
        let pos = self.hi.unsigned_abs();
        if neg > pos { neg } else { pos }
    }

    /// Offsets from `lo` to `hi`.
    #[inline]
    pub fn offsets(self) -> RangeInclusive<i32> {
        self.lo..=self.hi
    }

    /// Point reflection through the origin: `[-hi, -lo]`.
    #[inline]
    pub const fn reflect(self) -> Self {
        Window {
            lo: -self.hi,
            hi: -self.lo,
        }
    }

    /// Window of two runs applied one after the other (Minkowski sum).
    #[inline]
    pub const fn compose(self, other: Window) -> Self {
        Window {
            lo: self.lo + other.lo,
            hi: self.hi + other.hi,
        }
    }
}

/// A one-dimensional run-shaped structuring element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinearRun {
    direction: Direction,
    length: u32,
}

impl LinearRun {
    /// Create a run of `length` taps along `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`DwaError::InvalidRunLength`] unless `1 <= length <= 64`.
    pub fn new(direction: Direction, length: u32) -> DwaResult<Self> {
        if length == 0 || length > MAX_RUN_LENGTH {
            return Err(DwaError::InvalidRunLength {
                length,
                max: MAX_RUN_LENGTH,
            });
        }
        Ok(LinearRun { direction, length })
    }

    /// Axis of the run.
    #[inline]
    pub fn direction(self) -> Direction {
        self.direction
    }

    /// Number of taps.
    #[inline]
    pub fn length(self) -> u32 {
        self.length
    }

    /// Offset window of the run.
    #[inline]
    pub fn window(self) -> Window {
        Window::for_length(self.length)
    }

    /// Kernel that applies `op` over this run's window.
    pub fn kernel(self, op: MorphOp) -> LinearKernel {
        LinearKernel {
            direction: self.direction,
            op,
            window: self.window(),
        }
    }
}

/// Descriptor consumed by the generic compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinearKernel {
    /// Axis of the window
    pub direction: Direction,
    /// Combine with OR (dilate) or AND (erode)
    pub op: MorphOp,
    /// Offsets to combine
    pub window: Window,
}

impl LinearKernel {
    /// Create a kernel descriptor.
    pub const fn new(direction: Direction, op: MorphOp, window: Window) -> Self {
        LinearKernel {
            direction,
            op,
            window,
        }
    }
}
