//! Whole-raster operations
//!
//! Logical combinations, comparison, counting and transposition of
//! bitmaps. These are the building blocks the regression tests use to
//! state duality, monotonicity and direction-equivalence properties.

use super::{Bitmap, BitmapMut, get_data_bit, set_data_bit_val};
use crate::error::{Error, Result};

impl Bitmap {
    /// Bitwise complement of every pixel.
    pub fn invert(&self) -> Bitmap {
        let mut out = self.to_mut();
        for word in out.data_mut() {
            *word = !*word;
        }
        out.clear_unused_bits();
        out.into()
    }

    /// Pixelwise AND of two bitmaps of equal size.
    pub fn and(&self, other: &Bitmap) -> Result<Bitmap> {
        self.combine(other, |a, b| a & b)
    }

    /// Pixelwise OR of two bitmaps of equal size.
    pub fn or(&self, other: &Bitmap) -> Result<Bitmap> {
        self.combine(other, |a, b| a | b)
    }

    /// Pixelwise XOR of two bitmaps of equal size.
    pub fn xor(&self, other: &Bitmap) -> Result<Bitmap> {
        self.combine(other, |a, b| a ^ b)
    }

    fn combine(&self, other: &Bitmap, f: impl Fn(u32, u32) -> u32) -> Result<Bitmap> {
        self.check_same_size(other)?;
        let mut out = self.to_mut();
        for (d, &s) in out.data_mut().iter_mut().zip(other.data()) {
            *d = f(*d, s);
        }
        out.clear_unused_bits();
        Ok(out.into())
    }

    fn check_same_size(&self, other: &Bitmap) -> Result<()> {
        if !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (other.width(), other.height()),
            });
        }
        Ok(())
    }

    /// Check whether every ON pixel of `self` is also ON in `other`.
    pub fn is_subset_of(&self, other: &Bitmap) -> Result<bool> {
        self.check_same_size(other)?;
        let mask = self.last_word_mask();
        let wpl = self.wpl() as usize;
        for y in 0..self.height() {
            let a = self.row_data(y);
            let b = other.row_data(y);
            for j in 0..wpl {
                let m = if j + 1 == wpl { mask } else { !0 };
                if a[j] & !b[j] & m != 0 {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Compare pixel contents, ignoring the padding bits past `width`.
    pub fn equals(&self, other: &Bitmap) -> bool {
        if !self.sizes_equal(other) {
            return false;
        }
        let mask = self.last_word_mask();
        let wpl = self.wpl() as usize;
        (0..self.height()).all(|y| {
            let a = self.row_data(y);
            let b = other.row_data(y);
            a[..wpl - 1] == b[..wpl - 1] && (a[wpl - 1] ^ b[wpl - 1]) & mask == 0
        })
    }

    /// Count ON pixels, ignoring padding bits.
    pub fn count_pixels(&self) -> u64 {
        let mask = self.last_word_mask();
        let wpl = self.wpl() as usize;
        (0..self.height())
            .map(|y| {
                let row = self.row_data(y);
                let body: u64 = row[..wpl - 1].iter().map(|w| u64::from(w.count_ones())).sum();
                body + u64::from((row[wpl - 1] & mask).count_ones())
            })
            .sum()
    }

    /// Check whether no pixel is ON.
    pub fn is_zero(&self) -> bool {
        self.count_pixels() == 0
    }

    /// Swap rows and columns: pixel (x, y) moves to (y, x).
    pub fn transpose(&self) -> Bitmap {
        let w = self.width();
        let h = self.height();
        let mut out = BitmapMut::zeroed(h, w);
        for y in 0..h {
            let row = self.row_data(y);
            for x in 0..w {
                if get_data_bit(row, x) != 0 {
                    set_data_bit_val(out.row_data_mut(x), y);
                }
            }
        }
        out.into()
    }

    /// Mask selecting the valid pixels in the last word of a row.
    fn last_word_mask(&self) -> u32 {
        match self.width() % 32 {
            0 => !0,
            extra => !0u32 << (32 - extra),
        }
    }

    /// Parse a bitmap from rows of `x` (ON) and `.` (OFF).
    ///
    /// Blank lines and surrounding whitespace are ignored; all rows must
    /// have the same length.
    ///
    /// ```
    /// use bitmorph_core::Bitmap;
    ///
    /// let bm = Bitmap::from_ascii("x..\n.x.\n..x").unwrap();
    /// assert_eq!(bm.count_pixels(), 3);
    /// ```
    pub fn from_ascii(text: &str) -> Result<Bitmap> {
        let rows: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect();
        let Some(&(_, first)) = rows.first() else {
            return Err(Error::InvalidParameter("empty bitmap text".to_string()));
        };
        let width = first.chars().count() as u32;
        let mut out = BitmapMut::new(width, rows.len() as u32)?;
        for (y, &(line, row)) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(Error::Parse {
                    line,
                    message: format!("expected {width} columns"),
                });
            }
            for (x, c) in row.chars().enumerate() {
                match c {
                    'x' | 'X' | '1' => out.set_pixel_unchecked(x as u32, y as u32, 1),
                    '.' | '0' => {}
                    other => {
                        return Err(Error::Parse {
                            line,
                            message: format!("unexpected character {other:?}"),
                        });
                    }
                }
            }
        }
        Ok(out.into())
    }

    /// Render the bitmap as rows of `x` and `.`.
    pub fn to_ascii(&self) -> String {
        let mut s = String::with_capacity(((self.width() + 1) * self.height()) as usize);
        for y in 0..self.height() {
            let row = self.row_data(y);
            for x in 0..self.width() {
                s.push(if get_data_bit(row, x) != 0 { 'x' } else { '.' });
            }
            s.push('\n');
        }
        s
    }
}

impl BitmapMut {
    /// Clear the padding bits past `width` in the last word of every row.
    pub fn clear_unused_bits(&mut self) {
        let extra = self.width() % 32;
        if extra == 0 {
            return;
        }
        // MSB-first: valid bits are the top `extra` bits
        let mask = !0u32 << (32 - extra);
        let wpl = self.wpl() as usize;
        for row in self.data_mut().chunks_exact_mut(wpl) {
            row[wpl - 1] &= mask;
        }
    }
}
