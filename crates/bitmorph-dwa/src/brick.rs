//! Brick (rectangular) DWA operations
//!
//! A brick of `hsize x vsize` is separable: it is applied as a sequence of
//! horizontal linear passes followed by vertical ones. Runs longer than the
//! table maximum are split into runs of 63 plus one remainder run, whose
//! windows sum exactly to the window of the full length.
//!
//! Every pass works on a copy of the image surrounded by a 32-pixel border.
//! The border is refilled before each pass according to the
//! [`BoundaryCondition`], so results match a single application of the
//! whole brick.
//!
//! The brick origin is at `(hsize / 2, vsize / 2)`. Dilation uses the run
//! window and erosion its reflection, so that opening is anti-extensive
//! and closing is extensive for every size.

use crate::dispatch::MAX_TABLE_LENGTH;
use crate::error::{DwaError, DwaResult};
use crate::window::{Direction, LinearKernel, MorphOp, Window};
use bitmorph_core::{Bitmap, BitmapMut};

/// Border added around the image for every pass, in pixels.
pub const BORDER: u32 = 32;

/// Value assumed for pixels outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryCondition {
    /// Outside pixels are OFF for both dilation and erosion
    #[default]
    Asymmetric,
    /// Outside pixels are OFF for dilation and ON for erosion
    Symmetric,
}

impl BoundaryCondition {
    /// Border value to use for `op`.
    pub fn border_value(self, op: MorphOp) -> u32 {
        match (self, op) {
            (BoundaryCondition::Symmetric, MorphOp::Erode) => 1,
            _ => 0,
        }
    }
}

/// Runtime options for the brick operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DwaConfig {
    /// Treatment of pixels outside the image
    pub boundary: BoundaryCondition,
    /// Split rows across threads (requires the `rayon` feature)
    pub parallel: bool,
}

impl DwaConfig {
    /// Set the boundary condition.
    pub fn with_boundary(mut self, boundary: BoundaryCondition) -> Self {
        self.boundary = boundary;
        self
    }

    /// Enable or disable row-parallel passes.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Split a run longer than 63 into composable pieces.
///
/// Returns `(n, extra)`: `n` runs of length 63 followed by one run of
/// length `extra`, where `extra == 1` means no remainder pass. Chained,
/// they cover exactly `size` pixels: `62 * n + extra == size`.
///
/// # Errors
///
/// Returns [`DwaError::InvalidParameters`] if `size <= 63`.
pub fn get_extended_composite_parameters(size: u32) -> DwaResult<(u32, u32)> {
    if size <= MAX_TABLE_LENGTH {
        return Err(DwaError::InvalidParameters(format!(
            "size {size} does not need extension"
        )));
    }
    let step = MAX_TABLE_LENGTH - 1;
    let n = 1 + (size - MAX_TABLE_LENGTH) / step;
    let extra = size - MAX_TABLE_LENGTH - (n - 1) * step + 1;
    Ok((n, extra))
}

/// Run lengths whose chained windows equal the window of `size`.
fn run_lengths(size: u32) -> DwaResult<Vec<u32>> {
    if size == 1 {
        return Ok(Vec::new());
    }
    if size <= MAX_TABLE_LENGTH {
        return Ok(vec![size]);
    }
    let (n, extra) = get_extended_composite_parameters(size)?;
    let mut lengths = vec![MAX_TABLE_LENGTH; n as usize];
    if extra > 1 {
        lengths.push(extra);
    }
    Ok(lengths)
}

/// Build the pass list for one operation.
fn brick_passes(op: MorphOp, hsize: u32, vsize: u32) -> DwaResult<Vec<LinearKernel>> {
    let mut passes = Vec::new();
    for (direction, size) in [(Direction::Horizontal, hsize), (Direction::Vertical, vsize)] {
        for length in run_lengths(size)? {
            let window = Window::for_length(length);
            let window = match op {
                MorphOp::Dilate => window,
                MorphOp::Erode => window.reflect(),
            };
            passes.push(LinearKernel::new(direction, op, window));
        }
    }
    Ok(passes)
}

fn check_sizes(hsize: u32, vsize: u32) -> DwaResult<()> {
    if hsize == 0 || vsize == 0 {
        return Err(DwaError::InvalidParameters(format!(
            "brick size must be at least 1x1, got {hsize}x{vsize}"
        )));
    }
    Ok(())
}

/// Run `passes` over a bordered copy of `pix`.
fn run_passes(pix: &Bitmap, passes: &[LinearKernel], config: &DwaConfig) -> DwaResult<Bitmap> {
    let mut src: BitmapMut = pix.add_border(BORDER, 0)?.into_mut();
    let mut dst = BitmapMut::new(src.width(), src.height())?;
    for kernel in passes {
        let val = config.boundary.border_value(kernel.op);
        src.set_border_val(BORDER, BORDER, BORDER, BORDER, val);
        {
            let src_view = src.as_padded(BORDER)?;
            let mut dst_view = dst.as_padded_mut(BORDER)?;
            apply(&mut dst_view, &src_view, kernel, config.parallel)?;
        }
        std::mem::swap(&mut src, &mut dst);
    }
    let out: Bitmap = src.into();
    Ok(out.remove_border(BORDER)?)
}

#[cfg(feature = "rayon")]
fn apply(
    dst: &mut bitmorph_core::PaddedViewMut<'_>,
    src: &bitmorph_core::PaddedView<'_>,
    kernel: &LinearKernel,
    parallel: bool,
) -> DwaResult<()> {
    if parallel {
        crate::parallel::apply_kernel_par(dst, src, kernel)
    } else {
        crate::dispatch::apply_kernel(dst, src, kernel)
    }
}

#[cfg(not(feature = "rayon"))]
fn apply(
    dst: &mut bitmorph_core::PaddedViewMut<'_>,
    src: &bitmorph_core::PaddedView<'_>,
    kernel: &LinearKernel,
    _parallel: bool,
) -> DwaResult<()> {
    crate::dispatch::apply_kernel(dst, src, kernel)
}

/// Apply one linear kernel to a whole bitmap.
///
/// The kernel window is used as given (no reflection for erosion), and
/// pixels outside the image take the value selected by
/// `config.boundary`. The window radius must not exceed [`BORDER`].
///
/// # Errors
///
/// Returns [`DwaError::MarginViolation`] for windows reaching further than
/// 32 pixels.
pub fn morph_linear_dwa(pix: &Bitmap, kernel: &LinearKernel, config: &DwaConfig) -> DwaResult<Bitmap> {
    run_passes(pix, std::slice::from_ref(kernel), config)
}

/// Dilate or erode with an `hsize x vsize` brick.
///
/// # Errors
///
/// Returns [`DwaError::InvalidParameters`] if either size is 0.
pub fn morph_brick_dwa(
    pix: &Bitmap,
    op: MorphOp,
    hsize: u32,
    vsize: u32,
    config: &DwaConfig,
) -> DwaResult<Bitmap> {
    check_sizes(hsize, vsize)?;
    if hsize == 1 && vsize == 1 {
        return Ok(pix.deep_clone());
    }
    let passes = brick_passes(op, hsize, vsize)?;
    log::debug!(
        "{op:?} brick {hsize}x{vsize} on {}x{}: {} passes ({:?})",
        pix.width(),
        pix.height(),
        passes.len(),
        config.boundary
    );
    run_passes(pix, &passes, config)
}

/// Dilate with an `hsize x vsize` brick, asymmetric boundary.
pub fn dilate_brick_dwa(pix: &Bitmap, hsize: u32, vsize: u32) -> DwaResult<Bitmap> {
    morph_brick_dwa(pix, MorphOp::Dilate, hsize, vsize, &DwaConfig::default())
}

/// Erode with an `hsize x vsize` brick, asymmetric boundary.
pub fn erode_brick_dwa(pix: &Bitmap, hsize: u32, vsize: u32) -> DwaResult<Bitmap> {
    morph_brick_dwa(pix, MorphOp::Erode, hsize, vsize, &DwaConfig::default())
}

/// Open with an `hsize x vsize` brick.
///
/// Opening = Erosion followed by Dilation.
pub fn open_brick_dwa(pix: &Bitmap, hsize: u32, vsize: u32) -> DwaResult<Bitmap> {
    let config = DwaConfig::default();
    let eroded = morph_brick_dwa(pix, MorphOp::Erode, hsize, vsize, &config)?;
    morph_brick_dwa(&eroded, MorphOp::Dilate, hsize, vsize, &config)
}

/// Close with an `hsize x vsize` brick.
///
/// Closing = Dilation followed by Erosion. The image is first padded with
/// enough OFF pixels to hold everything the dilation spreads outside it,
/// so the erosion never sees a false OFF edge and the result is extensive
/// (a "safe" closing).
pub fn close_brick_dwa(pix: &Bitmap, hsize: u32, vsize: u32) -> DwaResult<Bitmap> {
    check_sizes(hsize, vsize)?;
    if hsize == 1 && vsize == 1 {
        return Ok(pix.deep_clone());
    }
    let config = DwaConfig::default();
    let extra = (hsize.max(vsize) / 2).next_multiple_of(BORDER);
    let padded = pix.add_border(extra, 0)?;
    let dilated = morph_brick_dwa(&padded, MorphOp::Dilate, hsize, vsize, &config)?;
    let closed = morph_brick_dwa(&dilated, MorphOp::Erode, hsize, vsize, &config)?;
    Ok(closed.remove_border(extra)?)
}
