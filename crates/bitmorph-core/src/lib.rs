//! bitmorph-core - Bit-packed binary rasters
//!
//! This crate provides the data structures the word-parallel morphology
//! kernels operate on:
//!
//! - [`Bitmap`] / [`BitmapMut`] - 1-bpp raster, 32 pixels per word, MSB first
//! - [`PaddedView`] / [`PaddedViewMut`] - the interior of a bordered raster,
//!   carrying the margin that makes unchecked neighbor reads safe
//!
//! Rasters are padded with [`Bitmap::add_border`] before a kernel runs and
//! trimmed with [`Bitmap::remove_border`] afterwards.

pub mod bitmap;
pub mod error;
pub mod view;

pub use bitmap::{
    Bitmap, BitmapMut, PIXELS_PER_WORD, clear_data_bit, get_data_bit, set_data_bit,
    set_data_bit_val,
};
pub use error::{Error, Result};
pub use view::{PaddedView, PaddedViewMut};
