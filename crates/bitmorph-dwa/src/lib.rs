//! bitmorph-dwa - Word-parallel binary dilation and erosion
//!
//! DWA (Destination Word Accumulation) computes each 32-pixel output word
//! in a register by combining shifted source words, then stores it once.
//! This crate implements DWA for linear (horizontal or vertical) run
//! structuring elements:
//!
//! - [`Window`] / [`LinearRun`] - the offset window a run combines
//! - Horizontal and vertical compositors (shift with carry, word stride)
//! - [`LINEAR_KERNELS`] / [`apply_linear_kernel`] - integer-indexed kernel
//!   table for lengths 2 through 63
//! - Brick operations ([`dilate_brick_dwa`], [`open_brick_dwa`], ...) built
//!   from separable linear passes
//! - [`reference`] - a pixel-at-a-time implementation for cross-checks
//!
//! # Example
//!
//! ```
//! use bitmorph_core::Bitmap;
//! use bitmorph_dwa::{Direction, KernelIndex, MorphOp, apply_linear_kernel};
//!
//! let mut pix = Bitmap::new(64, 1).unwrap().into_mut();
//! pix.set_pixel(32, 0, 1).unwrap();
//! let src = Bitmap::from(pix).add_border(32, 0).unwrap();
//! let mut dst = src.create_template().into_mut();
//!
//! let index = KernelIndex::new(Direction::Horizontal, MorphOp::Dilate, 3).unwrap();
//! apply_linear_kernel(
//!     &mut dst.as_padded_mut(32).unwrap(),
//!     &src.as_padded(32).unwrap(),
//!     index.raw(),
//! )
//! .unwrap();
//!
//! let out = Bitmap::from(dst).remove_border(32).unwrap();
//! assert_eq!(out.count_pixels(), 3);
//! ```

pub mod brick;
mod composite;
pub mod dispatch;
mod error;
#[cfg(feature = "rayon")]
pub mod parallel;
pub mod reference;
pub mod window;

pub use error::{DwaError, DwaResult};

pub use window::{Direction, LinearKernel, LinearRun, MAX_RUN_LENGTH, MorphOp, Window};

pub use dispatch::{
    KERNEL_COUNT, KernelIndex, LINEAR_KERNELS, MAX_TABLE_LENGTH, MIN_TABLE_LENGTH, RUN_COUNT,
    apply_kernel, apply_linear_kernel,
};

#[cfg(feature = "rayon")]
pub use parallel::{apply_kernel_par, apply_linear_kernel_par};

pub use brick::{
    BORDER, BoundaryCondition, DwaConfig, close_brick_dwa, dilate_brick_dwa, erode_brick_dwa,
    get_extended_composite_parameters, morph_brick_dwa, morph_linear_dwa, open_brick_dwa,
};
