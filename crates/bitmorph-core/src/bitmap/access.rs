//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word:
//! pixel 0 occupies bit 31 (MSB) of the first word of its row.

use super::{Bitmap, BitmapMut};
use crate::error::{Error, Result};

impl Bitmap {
    /// Get a pixel value (0 or 1) at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without coordinate validation.
    ///
    /// # Panics
    ///
    /// Panics if the computed word lies outside the data buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_data_bit(self.row_data(y), x)
    }
}

impl BitmapMut {
    /// Get a pixel value (0 or 1) at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without coordinate validation.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_data_bit(self.row_data(y), x)
    }

    /// Set a pixel at (x, y). Any nonzero `val` turns the pixel ON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without coordinate validation.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        set_data_bit(self.row_data_mut(y), x, val);
    }
}

/// Get a 1-bit pixel value from a row of packed words.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel to `val` (nonzero means ON).
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    if val != 0 {
        set_data_bit_val(line, x);
    } else {
        clear_data_bit(line, x);
    }
}

/// Set a 1-bit pixel to 1.
#[inline]
pub fn set_data_bit_val(line: &mut [u32], x: u32) {
    line[(x >> 5) as usize] |= 0x8000_0000 >> (x & 31);
}

/// Clear a 1-bit pixel to 0.
#[inline]
pub fn clear_data_bit(line: &mut [u32], x: u32) {
    line[(x >> 5) as usize] &= !(0x8000_0000 >> (x & 31));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_packing() {
        let mut line = [0u32; 2];
        set_data_bit_val(&mut line, 0);
        set_data_bit_val(&mut line, 33);
        assert_eq!(line[0], 0x8000_0000);
        assert_eq!(line[1], 0x4000_0000);
        assert_eq!(get_data_bit(&line, 0), 1);
        assert_eq!(get_data_bit(&line, 1), 0);
        assert_eq!(get_data_bit(&line, 33), 1);
        clear_data_bit(&mut line, 33);
        assert_eq!(line[1], 0);
    }

    #[test]
    fn test_left_shift_moves_next_pixel_in() {
        let mut line = [0u32; 1];
        set_data_bit_val(&mut line, 5);
        let shifted = [line[0] << 1];
        assert_eq!(get_data_bit(&shifted, 4), 1);
    }

    #[test]
    fn test_set_pixel_bounds() {
        let mut bm = BitmapMut::new(10, 5).unwrap();
        assert!(bm.set_pixel(9, 4, 1).is_ok());
        assert!(bm.set_pixel(10, 0, 1).is_err());
        assert!(bm.set_pixel(0, 5, 1).is_err());
        assert_eq!(bm.get_pixel(9, 4), Some(1));
        assert_eq!(bm.get_pixel(10, 4), None);
    }
}
