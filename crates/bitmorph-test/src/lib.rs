//! bitmorph-test - Regression test framework for bitmorph
//!
//! Regression tests live in `crates/<crate>/tests/*_reg.rs` and record each
//! comparison through [`RegParams`], reporting every failure at the end
//! instead of stopping at the first one:
//!
//! - **Compare**: compare results and record failures (default)
//! - **Display**: additionally print compared bitmaps as ASCII art
//!
//! # Usage
//!
//! ```
//! use bitmorph_test::{RegParams, random_bitmap};
//!
//! let pix = random_bitmap(64, 16, 0.25, 1).unwrap();
//! let mut rp = RegParams::new("example");
//! rp.compare_bitmaps(&pix, &pix.deep_clone());
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod patterns;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use patterns::{SimpleRng, random_bitmap, random_blocks, single_pixel, solid_bitmap};
