//! Pixel-at-a-time reference implementation
//!
//! These functions compute the same results as the word-parallel kernels
//! one pixel at a time, with no packing tricks. They are slow and exist to
//! cross-check the compositors.

use crate::brick::BoundaryCondition;
use crate::error::{DwaError, DwaResult};
use crate::window::{Direction, LinearKernel, MorphOp, Window};
use bitmorph_core::{Bitmap, BitmapMut};

fn pixel_at(pix: &Bitmap, x: i64, y: i64, outside: u32) -> u32 {
    if x < 0 || y < 0 || x >= i64::from(pix.width()) || y >= i64::from(pix.height()) {
        outside
    } else {
        pix.get_pixel_unchecked(x as u32, y as u32)
    }
}

fn reduce(op: MorphOp, mut taps: impl Iterator<Item = u32>) -> u32 {
    match op {
        MorphOp::Dilate => u32::from(taps.any(|v| v != 0)),
        MorphOp::Erode => u32::from(taps.all(|v| v != 0)),
    }
}

/// Apply `kernel` to every pixel; pixels outside the image read as
/// `outside`.
pub fn linear(pix: &Bitmap, kernel: &LinearKernel, outside: u32) -> Bitmap {
    let mut out = pix.create_template().into_mut();
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let taps = kernel.window.offsets().map(|o| {
                let (dx, dy) = match kernel.direction {
                    Direction::Horizontal => (i64::from(o), 0),
                    Direction::Vertical => (0, i64::from(o)),
                };
                pixel_at(pix, i64::from(x) + dx, i64::from(y) + dy, outside)
            });
            out.set_pixel_unchecked(x, y, reduce(kernel.op, taps));
        }
    }
    out.into()
}

/// Dilate or erode with an `hsize x vsize` brick using the same origin,
/// reflection and boundary rules as the DWA brick operations.
///
/// # Errors
///
/// Returns [`DwaError::InvalidParameters`] if either size is 0.
pub fn brick(
    pix: &Bitmap,
    op: MorphOp,
    hsize: u32,
    vsize: u32,
    boundary: BoundaryCondition,
) -> DwaResult<Bitmap> {
    if hsize == 0 || vsize == 0 {
        return Err(DwaError::InvalidParameters(format!(
            "brick size must be at least 1x1, got {hsize}x{vsize}"
        )));
    }
    let window = |size: u32| match op {
        MorphOp::Dilate => Window::for_length(size),
        MorphOp::Erode => Window::for_length(size).reflect(),
    };
    let (wh, wv) = (window(hsize), window(vsize));
    let outside = boundary.border_value(op);
    let mut out: BitmapMut = pix.create_template().into_mut();
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let taps = wv.offsets().flat_map(|dy| {
                wh.offsets().map(move |dx| {
                    pixel_at(pix, i64::from(x) + i64::from(dx), i64::from(y) + i64::from(dy), outside)
                })
            });
            out.set_pixel_unchecked(x, y, reduce(op, taps));
        }
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_matches_hand_computed() {
        let pix = Bitmap::from_ascii("..x....").unwrap();
        let kernel = LinearKernel::new(Direction::Horizontal, MorphOp::Dilate, Window::for_length(4));
        // window [-1, 2]: output x is ON if any of x-1..=x+2 is ON
        assert_eq!(linear(&pix, &kernel, 0).to_ascii(), "xxxx...\n");
    }

    #[test]
    fn test_outside_value() {
        let pix = Bitmap::from_ascii("xxx").unwrap();
        let kernel = LinearKernel::new(Direction::Horizontal, MorphOp::Erode, Window::for_length(3));
        assert_eq!(linear(&pix, &kernel, 0).to_ascii(), ".x.\n");
        assert_eq!(linear(&pix, &kernel, 1).to_ascii(), "xxx\n");
    }

    #[test]
    fn test_brick_dilation() {
        let pix = Bitmap::from_ascii(".....\n..x..\n.....").unwrap();
        let out = brick(&pix, MorphOp::Dilate, 3, 2, BoundaryCondition::Asymmetric).unwrap();
        // vertical window [0, 1] pulls row 1 into row 0
        assert_eq!(out.to_ascii(), ".xxx.\n.xxx.\n.....\n");
    }
}
