//! bitmorph - Word-parallel binary morphology for Rust
//!
//! # Overview
//!
//! bitmorph dilates and erodes 1-bpp rasters with linear (horizontal or
//! vertical) run structuring elements, 32 pixels at a time:
//!
//! - Bit-packed rasters and padded views ([`Bitmap`], [`PaddedView`])
//! - Integer-indexed linear kernels for run lengths 2 through 63
//!   ([`dwa::apply_linear_kernel`])
//! - Brick dilation, erosion, opening and closing of any size
//!   ([`dwa::dilate_brick_dwa`] and friends)
//!
//! Enable the `rayon` feature to split rows across threads.
//!
//! # Example
//!
//! ```
//! use bitmorph::Bitmap;
//! use bitmorph::dwa::{close_brick_dwa, dilate_brick_dwa};
//!
//! let pix = Bitmap::from_ascii(
//!     "........\n\
//!      ..x.x...\n\
//!      ........",
//! )
//! .unwrap();
//! let dilated = dilate_brick_dwa(&pix, 3, 1).unwrap();
//! assert_eq!(dilated.count_pixels(), 5);
//!
//! // closing bridges the one-pixel gap
//! let closed = close_brick_dwa(&pix, 3, 1).unwrap();
//! assert_eq!(closed.get_pixel(3, 1), Some(1));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use bitmorph_core::*;

// Re-export the DWA crate as a module to avoid name conflicts
pub use bitmorph_dwa as dwa;
