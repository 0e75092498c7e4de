//! Row-parallel dispatch
//!
//! Output rows are independent, so the destination is split into disjoint
//! row chunks and filled concurrently from the shared read-only source.

use crate::dispatch::{KernelIndex, RowOp, check_geometry};
use crate::error::DwaResult;
use crate::window::LinearKernel;
use bitmorph_core::{PaddedView, PaddedViewMut};
use rayon::prelude::*;

/// Parallel form of [`apply_kernel`](crate::apply_kernel).
pub fn apply_kernel_par(
    dst: &mut PaddedViewMut<'_>,
    src: &PaddedView<'_>,
    kernel: &LinearKernel,
) -> DwaResult<()> {
    check_geometry(dst, src, kernel)?;
    log::trace!(
        "{:?} {:?} window [{}, {}] on {}x{} (parallel)",
        kernel.direction,
        kernel.op,
        kernel.window.lo(),
        kernel.window.hi(),
        src.width(),
        src.height()
    );
    let row_op = RowOp::new(src, kernel);
    let wpl = dst.wpl();
    let proper = dst.proper_wpl();
    dst.interior_rows_mut()
        .par_chunks_mut(wpl)
        .enumerate()
        .for_each(|(y, row)| row_op.run(&mut row[..proper], src.row_start(y as u32)));
    Ok(())
}

/// Parallel form of [`apply_linear_kernel`](crate::apply_linear_kernel).
pub fn apply_linear_kernel_par(
    dst: &mut PaddedViewMut<'_>,
    src: &PaddedView<'_>,
    index: u32,
) -> DwaResult<()> {
    let index = KernelIndex::from_raw(index)?;
    apply_kernel_par(dst, src, index.kernel())
}
