//! Kernel table and dispatcher
//!
//! Every linear kernel is addressed by a single integer so that callers
//! which compile structuring elements into kernel sequences do not need
//! to know the direction or operation types.
//!
//! # Index layout
//!
//! ```text
//! index = 2 * n + op          op: 0 = dilate, 1 = erode
//! n in [0, 62)                horizontal, length n + 2
//! n in [62, 124)              vertical,   length n - 62 + 2
//! ```
//!
//! Lengths 2 through 63 are tabulated, giving 248 kernels. Length 1 is the
//! identity and length 64 is reached through [`apply_kernel`] with a
//! [`LinearRun`](crate::LinearRun) kernel.

use crate::composite::{
    Combine, Intersection, ShiftTap, Union, horizontal_row, horizontal_taps, vertical_row,
    vertical_taps,
};
use crate::error::{DwaError, DwaResult};
use crate::window::{Direction, LinearKernel, MorphOp, Window};
use bitmorph_core::{PaddedView, PaddedViewMut};

/// Shortest tabulated run.
pub const MIN_TABLE_LENGTH: u32 = 2;

/// Longest tabulated run.
pub const MAX_TABLE_LENGTH: u32 = 63;

/// Number of tabulated run lengths per direction.
pub const RUN_COUNT: u32 = MAX_TABLE_LENGTH - MIN_TABLE_LENGTH + 1;

/// Total number of kernels in the table.
pub const KERNEL_COUNT: u32 = 2 * 2 * RUN_COUNT;

/// All tabulated kernels, in index order.
pub static LINEAR_KERNELS: [LinearKernel; KERNEL_COUNT as usize] = build_table();

const fn build_table() -> [LinearKernel; KERNEL_COUNT as usize] {
    let placeholder = LinearKernel::new(Direction::Horizontal, MorphOp::Dilate, Window::for_length(1));
    let mut table = [placeholder; KERNEL_COUNT as usize];
    let mut i = 0;
    while i < KERNEL_COUNT {
        table[i as usize] = decode(i);
        i += 1;
    }
    table
}

const fn decode(index: u32) -> LinearKernel {
    let op = if index % 2 == 0 {
        MorphOp::Dilate
    } else {
        MorphOp::Erode
    };
    let n = index / 2;
    let (direction, run) = if n < RUN_COUNT {
        (Direction::Horizontal, n)
    } else {
        (Direction::Vertical, n - RUN_COUNT)
    };
    LinearKernel::new(direction, op, Window::for_length(run + MIN_TABLE_LENGTH))
}

/// A validated position in [`LINEAR_KERNELS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KernelIndex(u32);

impl KernelIndex {
    /// Index of the kernel for a run of `length` along `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`DwaError::InvalidRunLength`] unless `2 <= length <= 63`.
    pub fn new(direction: Direction, op: MorphOp, length: u32) -> DwaResult<Self> {
        if !(MIN_TABLE_LENGTH..=MAX_TABLE_LENGTH).contains(&length) {
            return Err(DwaError::InvalidRunLength {
                length,
                max: MAX_TABLE_LENGTH,
            });
        }
        let run = length - MIN_TABLE_LENGTH;
        let n = match direction {
            Direction::Horizontal => run,
            Direction::Vertical => RUN_COUNT + run,
        };
        let op_bit = match op {
            MorphOp::Dilate => 0,
            MorphOp::Erode => 1,
        };
        Ok(KernelIndex(2 * n + op_bit))
    }

    /// Validate a raw table index.
    ///
    /// # Errors
    ///
    /// Returns [`DwaError::InvalidKernelIndex`] if `index >= KERNEL_COUNT`.
    pub fn from_raw(index: u32) -> DwaResult<Self> {
        if index >= KERNEL_COUNT {
            log::warn!("rejecting kernel index {index}; table holds {KERNEL_COUNT}");
            return Err(DwaError::InvalidKernelIndex {
                index,
                count: KERNEL_COUNT,
            });
        }
        Ok(KernelIndex(index))
    }

    /// The raw table index.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// The kernel this index selects.
    #[inline]
    pub fn kernel(self) -> &'static LinearKernel {
        &LINEAR_KERNELS[self.0 as usize]
    }

    /// Run length of the selected kernel.
    pub fn length(self) -> u32 {
        self.kernel().window.len()
    }
}

/// Apply the tabulated kernel `index` from `src` into `dst`.
///
/// `src` and `dst` may have different strides but must cover the same
/// interior size. An invalid index leaves `dst` untouched.
///
/// # Errors
///
/// - [`DwaError::InvalidKernelIndex`] if `index >= KERNEL_COUNT`
/// - [`DwaError::DimensionMismatch`] if the interiors differ in size
/// - [`DwaError::MarginViolation`] if the source margin is narrower than
///   the kernel's reach
pub fn apply_linear_kernel(
    dst: &mut PaddedViewMut<'_>,
    src: &PaddedView<'_>,
    index: u32,
) -> DwaResult<()> {
    let index = KernelIndex::from_raw(index)?;
    apply_kernel(dst, src, index.kernel())
}

/// Apply an arbitrary linear kernel from `src` into `dst`.
///
/// Output pixel `(x, y)` becomes the OR (dilate) or AND (erode) of source
/// pixels `(x + o, y)` or `(x, y + o)` for every `o` in the kernel window.
/// Whole interior words are written, so bits past the interior width in
/// the last word of each row are overwritten as well.
pub fn apply_kernel(
    dst: &mut PaddedViewMut<'_>,
    src: &PaddedView<'_>,
    kernel: &LinearKernel,
) -> DwaResult<()> {
    check_geometry(dst, src, kernel)?;
    log::trace!(
        "{:?} {:?} window [{}, {}] on {}x{}",
        kernel.direction,
        kernel.op,
        kernel.window.lo(),
        kernel.window.hi(),
        src.width(),
        src.height()
    );
    let row_op = RowOp::new(src, kernel);
    for y in 0..dst.height() {
        row_op.run(dst.row_mut(y), src.row_start(y));
    }
    Ok(())
}

/// Verify sizes and margins once, before any word is written.
pub(crate) fn check_geometry(
    dst: &PaddedViewMut<'_>,
    src: &PaddedView<'_>,
    kernel: &LinearKernel,
) -> DwaResult<()> {
    if dst.width() != src.width() || dst.height() != src.height() {
        return Err(DwaError::DimensionMismatch {
            src: (src.width(), src.height()),
            dst: (dst.width(), dst.height()),
        });
    }
    let margin = match kernel.direction {
        Direction::Horizontal => src.horizontal_reach(),
        Direction::Vertical => src.vertical_reach(),
    };
    let reach = kernel.window.radius();
    if reach > margin {
        return Err(DwaError::MarginViolation {
            direction: kernel.direction,
            reach,
            margin,
        });
    }
    Ok(())
}

/// Per-row work for one kernel, with taps precomputed.
pub(crate) struct RowOp<'a> {
    src: &'a [u32],
    op: MorphOp,
    taps: Taps,
}

enum Taps {
    Horizontal(Vec<ShiftTap>),
    Vertical(Vec<isize>),
}

impl<'a> RowOp<'a> {
    pub(crate) fn new(src: &PaddedView<'a>, kernel: &LinearKernel) -> Self {
        let taps = match kernel.direction {
            Direction::Horizontal => Taps::Horizontal(horizontal_taps(kernel.window)),
            Direction::Vertical => Taps::Vertical(vertical_taps(kernel.window, src.wpl())),
        };
        RowOp {
            src: src.data(),
            op: kernel.op,
            taps,
        }
    }

    /// Fill `dst_row` from the source row whose first interior word is at
    /// `src_start`.
    #[inline]
    pub(crate) fn run(&self, dst_row: &mut [u32], src_start: usize) {
        match self.op {
            MorphOp::Dilate => self.run_with::<Union>(dst_row, src_start),
            MorphOp::Erode => self.run_with::<Intersection>(dst_row, src_start),
        }
    }

    fn run_with<C: Combine>(&self, dst_row: &mut [u32], src_start: usize) {
        match &self.taps {
            Taps::Horizontal(taps) => horizontal_row::<C>(dst_row, self.src, src_start, taps),
            Taps::Vertical(taps) => vertical_row::<C>(dst_row, self.src, src_start, taps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_layout() {
        assert_eq!(KERNEL_COUNT, 248);
        let first = LINEAR_KERNELS[0];
        assert_eq!(first.direction, Direction::Horizontal);
        assert_eq!(first.op, MorphOp::Dilate);
        assert_eq!(first.window, Window::for_length(2));

        let last_h = LINEAR_KERNELS[2 * 61 + 1];
        assert_eq!(last_h.direction, Direction::Horizontal);
        assert_eq!(last_h.op, MorphOp::Erode);
        assert_eq!(last_h.window.len(), 63);

        let first_v = LINEAR_KERNELS[2 * 62];
        assert_eq!(first_v.direction, Direction::Vertical);
        assert_eq!(first_v.window.len(), 2);
    }

    #[test]
    fn test_index_encoding_matches_table() {
        for raw in 0..KERNEL_COUNT {
            let index = KernelIndex::from_raw(raw).unwrap();
            let k = index.kernel();
            let again = KernelIndex::new(k.direction, k.op, index.length()).unwrap();
            assert_eq!(again.raw(), raw);
        }
    }

    #[test]
    fn test_invalid_index() {
        assert!(matches!(
            KernelIndex::from_raw(KERNEL_COUNT),
            Err(DwaError::InvalidKernelIndex { index: 248, count: 248 })
        ));
        assert!(KernelIndex::new(Direction::Vertical, MorphOp::Dilate, 1).is_err());
        assert!(KernelIndex::new(Direction::Vertical, MorphOp::Dilate, 64).is_err());
    }
}
