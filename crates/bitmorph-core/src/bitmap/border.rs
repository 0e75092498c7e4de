//! Border operations for bitmaps
//!
//! The word-parallel kernels read neighbors outside the nominal image
//! without checking bounds, so callers pad the image first:
//!
//! - Uniform borders (same size on all sides)
//! - General borders (different size per side)
//! - Refilling the border of an already padded bitmap

use super::{Bitmap, BitmapMut, get_data_bit, set_data_bit};
use crate::error::{Error, Result};

impl Bitmap {
    /// Add a uniform border around the image.
    ///
    /// Creates a new bitmap with `npix` pixels of border on all sides,
    /// filled with `val` (0 = OFF, nonzero = ON).
    ///
    /// # Returns
    ///
    /// New bitmap with dimensions `(width + 2*npix, height + 2*npix)`.
    pub fn add_border(&self, npix: u32, val: u32) -> Result<Bitmap> {
        self.add_border_general(npix, npix, npix, npix, val)
    }

    /// Add a general border with different sizes per side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the padded size overflows.
    pub fn add_border_general(
        &self,
        left: u32,
        right: u32,
        top: u32,
        bot: u32,
        val: u32,
    ) -> Result<Bitmap> {
        let w = self.width();
        let h = self.height();
        let wd = w
            .checked_add(left)
            .and_then(|v| v.checked_add(right))
            .ok_or(Error::InvalidDimension { width: w, height: h })?;
        let hd = h
            .checked_add(top)
            .and_then(|v| v.checked_add(bot))
            .ok_or(Error::InvalidDimension { width: w, height: h })?;

        let mut out = BitmapMut::new(wd, hd)?;
        if val != 0 {
            out.set_all();
        }
        for y in 0..h {
            copy_row_bits(out.row_data_mut(y + top), left, self.row_data(y), 0, w);
        }
        Ok(out.into())
    }

    /// Remove a uniform border from the image.
    ///
    /// # Returns
    ///
    /// New bitmap with dimensions `(width - 2*npix, height - 2*npix)`.
    pub fn remove_border(&self, npix: u32) -> Result<Bitmap> {
        self.remove_border_general(npix, npix, npix, npix)
    }

    /// Remove a general border with different sizes per side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the border consumes the
    /// whole image.
    pub fn remove_border_general(&self, left: u32, right: u32, top: u32, bot: u32) -> Result<Bitmap> {
        let w = self.width();
        let h = self.height();
        let lr = u64::from(left) + u64::from(right);
        let tb = u64::from(top) + u64::from(bot);
        if lr >= u64::from(w) || tb >= u64::from(h) {
            return Err(Error::InvalidParameter(format!(
                "border ({left}, {right}, {top}, {bot}) too large for {w}x{h}"
            )));
        }
        let wd = w - left - right;
        let hd = h - top - bot;

        let mut out = BitmapMut::new(wd, hd)?;
        for y in 0..hd {
            copy_row_bits(out.row_data_mut(y), 0, self.row_data(y + top), left, wd);
        }
        Ok(out.into())
    }
}

impl BitmapMut {
    /// Fill the border region of a padded bitmap with `val`.
    ///
    /// Every pixel outside the interior rectangle
    /// `[left, width - right) x [top, height - bot)` is set to `val`;
    /// the interior is left untouched.
    pub fn set_border_val(&mut self, left: u32, right: u32, top: u32, bot: u32, val: u32) {
        let w = self.width();
        let h = self.height();
        let fill = if val != 0 { !0u32 } else { 0 };
        let x_end = w.saturating_sub(right);
        let y_end = h.saturating_sub(bot);

        for y in 0..h {
            let line = self.row_data_mut(y);
            if y < top || y >= y_end {
                line.fill(fill);
                continue;
            }
            fill_bits(line, 0, left.min(w), val);
            if x_end > left {
                fill_bits(line, x_end, w - x_end, val);
            }
        }
        self.clear_unused_bits();
    }
}

/// Copy `n` pixels from `src` starting at `sx` into `dst` starting at `dx`.
///
/// Uses whole-word moves when both positions are word aligned.
fn copy_row_bits(dst: &mut [u32], dx: u32, src: &[u32], sx: u32, n: u32) {
    if dx % 32 == 0 && sx % 32 == 0 {
        let d0 = (dx / 32) as usize;
        let s0 = (sx / 32) as usize;
        let full = (n / 32) as usize;
        dst[d0..d0 + full].copy_from_slice(&src[s0..s0 + full]);
        let rem = n % 32;
        if rem != 0 {
            let mask = !0u32 << (32 - rem);
            let d = &mut dst[d0 + full];
            *d = (*d & !mask) | (src[s0 + full] & mask);
        }
        return;
    }
    for i in 0..n {
        set_data_bit(dst, dx + i, get_data_bit(src, sx + i));
    }
}

/// Set `n` pixels starting at `x` to `val`.
fn fill_bits(line: &mut [u32], x: u32, n: u32, val: u32) {
    for i in x..x + n {
        set_data_bit(line, i, val);
    }
}
