//! Deterministic test patterns
//!
//! Regression tests need varied but reproducible inputs. Everything here is
//! driven by a seeded linear congruential generator, so a failing case can
//! be replayed from its seed.

use crate::error::{TestError, TestResult};
use bitmorph_core::{Bitmap, BitmapMut};

/// Simple linear congruential generator for reproducible randomness
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a generator from a seed
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed),
        }
    }

    /// Next raw 64-bit value
    pub fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Next 32-bit value, taken from the high bits
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[0, bound)`
    pub fn below(&mut self, bound: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(bound)) >> 32) as u32
    }
}

/// A bitmap whose pixels are ON with probability `density`
///
/// # Errors
///
/// Returns [`TestError::InvalidPattern`] if `density` is outside `[0, 1]`.
pub fn random_bitmap(width: u32, height: u32, density: f64, seed: u32) -> TestResult<Bitmap> {
    if !(0.0..=1.0).contains(&density) {
        return Err(TestError::InvalidPattern(format!(
            "density {density} not in [0, 1]"
        )));
    }
    let mut rng = SimpleRng::new(seed);
    let mut pix = BitmapMut::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            if rng.next_f64() < density {
                pix.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(pix.into())
}

/// Random filled rectangles, the kind of blobs morphology is used on
pub fn random_blocks(width: u32, height: u32, count: u32, max_side: u32, seed: u32) -> TestResult<Bitmap> {
    if max_side == 0 {
        return Err(TestError::InvalidPattern("max_side must be positive".to_string()));
    }
    let mut rng = SimpleRng::new(seed);
    let mut pix = BitmapMut::new(width, height)?;
    for _ in 0..count {
        let x0 = rng.below(width);
        let y0 = rng.below(height);
        let w = 1 + rng.below(max_side);
        let h = 1 + rng.below(max_side);
        for y in y0..(y0 + h).min(height) {
            for x in x0..(x0 + w).min(width) {
                pix.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(pix.into())
}

/// A bitmap with every pixel ON
pub fn solid_bitmap(width: u32, height: u32) -> TestResult<Bitmap> {
    let mut pix = BitmapMut::new(width, height)?;
    pix.set_all();
    Ok(pix.into())
}

/// A bitmap with a single ON pixel at `(x, y)`
pub fn single_pixel(width: u32, height: u32, x: u32, y: u32) -> TestResult<Bitmap> {
    let mut pix = BitmapMut::new(width, height)?;
    pix.set_pixel(x, y, 1)?;
    Ok(pix.into())
}
