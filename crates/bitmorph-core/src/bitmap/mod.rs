//! Bitmap - The bit-packed binary raster
//!
//! The `Bitmap` structure holds a 1-bpp image, one pixel per bit.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary (`wpl` words per line)
//! - Pixels are packed MSB to LSB within each word, so pixel 0 of a row
//!   lives in bit 31 of the row's first word. A logical left shift of a
//!   word therefore moves the pixel at `x + 1` into position `x`.
//! - Bits past `width` in the last word of a row are padding. Operations
//!   that compare or count pixels ignore them.
//!
//! # Ownership model
//!
//! `Bitmap` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `BitmapMut` via [`Bitmap::try_into_mut`]
//! or [`Bitmap::to_mut`], then convert back with `Into<Bitmap>`.

mod access;
mod border;
mod ops;

pub use access::{clear_data_bit, get_data_bit, set_data_bit, set_data_bit_val};

use crate::error::{Error, Result};
use std::sync::Arc;

/// Number of pixels packed into one word.
pub const PIXELS_PER_WORD: u32 = 32;

/// Internal bitmap data
#[derive(Debug)]
struct BitmapData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// 32-bit words per line
    wpl: u32,
    /// The image data (packed 32-bit words, row-major)
    data: Vec<u32>,
}

impl BitmapData {
    fn zeroed(width: u32, height: u32) -> Self {
        let wpl = compute_wpl(width);
        BitmapData {
            width,
            height,
            wpl,
            data: vec![0u32; (wpl as usize) * (height as usize)],
        }
    }
}

/// Compute words per line for a given width.
///
/// Uses u64 arithmetic to prevent overflow for large widths.
#[inline]
fn compute_wpl(width: u32) -> u32 {
    // ceil(u32::MAX / 32) always fits in u32
    u64::from(width).div_ceil(u64::from(PIXELS_PER_WORD)) as u32
}

/// Bitmap - Bit-packed binary raster
///
/// `Bitmap` is the container the morphology kernels read from and write to.
/// It uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use bitmorph_core::Bitmap;
///
/// let bitmap = Bitmap::new(640, 480).unwrap();
/// assert_eq!(bitmap.width(), 640);
/// assert_eq!(bitmap.wpl(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct Bitmap {
    inner: Arc<BitmapData>,
}

impl Bitmap {
    /// Create a new bitmap with all pixels OFF.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Bitmap {
            inner: Arc::new(BitmapData::zeroed(width, height)),
        })
    }

    /// Create a bitmap from raw packed words.
    ///
    /// `data` must hold exactly `wpl * height` words, with
    /// `wpl = ceil(width / 32)`.
    pub fn from_words(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = compute_wpl(width);
        let expected = (wpl as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "expected {expected} words for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Bitmap {
            inner: Arc::new(BitmapData {
                width,
                height,
                wpl,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this bitmap.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the words of a single row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Create a zeroed bitmap with the same dimensions.
    pub fn create_template(&self) -> Self {
        Bitmap {
            inner: Arc::new(BitmapData::zeroed(self.inner.width, self.inner.height)),
        }
    }

    /// Check if two bitmaps have the same width and height.
    pub fn sizes_equal(&self, other: &Bitmap) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Create a deep copy of this bitmap.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Bitmap {
            inner: Arc::new(BitmapData {
                width: self.inner.width,
                height: self.inner.height,
                wpl: self.inner.wpl,
                data: self.inner.data.clone(),
            }),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<BitmapMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(BitmapMut { inner: data }),
            Err(arc) => Err(Bitmap { inner: arc }),
        }
    }

    /// Get mutable access, copying the data only if it is shared.
    pub fn into_mut(self) -> BitmapMut {
        self.try_into_mut().unwrap_or_else(|shared| shared.to_mut())
    }

    /// Create a mutable copy of this bitmap.
    pub fn to_mut(&self) -> BitmapMut {
        BitmapMut {
            inner: BitmapData {
                width: self.inner.width,
                height: self.inner.height,
                wpl: self.inner.wpl,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable bitmap
///
/// Allows modification of image data. Convert back to an immutable
/// [`Bitmap`] using `Into<Bitmap>`. Exclusive access is enforced at
/// compile time, which is also what keeps a kernel's destination from
/// aliasing its source.
#[derive(Debug)]
pub struct BitmapMut {
    inner: BitmapData,
}

impl BitmapMut {
    /// Allocate without validating; callers guarantee nonzero dimensions.
    fn zeroed(width: u32, height: u32) -> Self {
        BitmapMut {
            inner: BitmapData::zeroed(width, height),
        }
    }

    /// Create a new mutable bitmap with all pixels OFF.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Bitmap::new(width, height)?.into_mut())
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get the words of a single row.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Get the words of a single row for modification.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &mut self.inner.data[start..end]
    }

    /// Clear every pixel to OFF.
    pub fn clear_all(&mut self) {
        self.inner.data.fill(0);
    }

    /// Set every pixel to ON, leaving the padding bits clear.
    pub fn set_all(&mut self) {
        self.inner.data.fill(!0);
        self.clear_unused_bits();
    }
}

impl From<BitmapMut> for Bitmap {
    fn from(bitmap: BitmapMut) -> Self {
        Bitmap {
            inner: Arc::new(bitmap.inner),
        }
    }
}
