//! Padded views over packed word buffers
//!
//! The word-parallel kernels read taps up to a fixed radius outside the
//! logical image without per-pixel edge checks. A padded view records the
//! margin that the surrounding buffer guarantees, so the margin contract
//! is validated once when the view is built instead of being trusted at
//! every call site.
//!
//! A view addresses the interior of a larger buffer:
//!
//! ```text
//!  <- margin ->|<------- width ------->|<- >= margin ->
//!  +-----------+-----------------------+--------------+  ^
//!  |                                                  |  margin rows
//!  +-----------+-----------------------+--------------+  v
//!  |           | interior (the view)   |              |  height rows
//!  +-----------+-----------------------+--------------+
//!  |                                                  |  >= margin rows
//!  +--------------------------------------------------+
//! ```
//!
//! The margin is measured in pixels and must be a multiple of 32, so the
//! interior starts on a word boundary.

use crate::bitmap::{Bitmap, BitmapMut, PIXELS_PER_WORD};
use crate::error::{Error, Result};

/// Geometry shared by the read-only and mutable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    wpl: usize,
    width: u32,
    height: u32,
    margin: u32,
}

impl Layout {
    fn validate(len: usize, wpl: usize, width: u32, height: u32, margin: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if margin % PIXELS_PER_WORD != 0 {
            return Err(Error::InvalidView(format!(
                "margin {margin} is not a multiple of {PIXELS_PER_WORD}"
            )));
        }
        let needed_bits = u64::from(width) + 2 * u64::from(margin);
        if (wpl as u64) * u64::from(PIXELS_PER_WORD) < needed_bits {
            return Err(Error::InvalidView(format!(
                "wpl {wpl} cannot hold width {width} plus two {margin}-pixel margins"
            )));
        }
        let rows = u64::from(height) + 2 * u64::from(margin);
        let needed_words = rows * wpl as u64;
        if (len as u64) < needed_words {
            return Err(Error::InvalidView(format!(
                "buffer of {len} words is smaller than {rows} rows of {wpl} words"
            )));
        }
        Ok(Layout {
            wpl,
            width,
            height,
            margin,
        })
    }

    #[inline]
    fn origin(&self) -> usize {
        self.margin as usize * self.wpl + (self.margin / PIXELS_PER_WORD) as usize
    }

    #[inline]
    fn proper_wpl(&self) -> usize {
        self.width.div_ceil(PIXELS_PER_WORD) as usize
    }
}

/// Read-only view of a padded raster's interior.
#[derive(Debug, Clone, Copy)]
pub struct PaddedView<'a> {
    data: &'a [u32],
    layout: Layout,
}

impl<'a> PaddedView<'a> {
    /// Build a view over `data`, whose rows are `wpl` words long.
    ///
    /// `width` and `height` describe the interior; the buffer must provide
    /// `margin` pixels of valid data on all four sides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidView`] if the margin is not word aligned or
    /// the buffer is too small for the requested geometry.
    pub fn new(data: &'a [u32], wpl: usize, width: u32, height: u32, margin: u32) -> Result<Self> {
        let layout = Layout::validate(data.len(), wpl, width, height, margin)?;
        Ok(PaddedView { data, layout })
    }

    /// Interior width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.layout.width
    }

    /// Interior height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.layout.height
    }

    /// Row stride of the underlying buffer, in words.
    #[inline]
    pub fn wpl(&self) -> usize {
        self.layout.wpl
    }

    /// Guaranteed margin on every side, in pixels.
    #[inline]
    pub fn margin(&self) -> u32 {
        self.layout.margin
    }

    /// Number of words covering one interior row.
    #[inline]
    pub fn proper_wpl(&self) -> usize {
        self.layout.proper_wpl()
    }

    /// Word index of interior pixel (0, 0) within [`Self::data`].
    #[inline]
    pub fn origin(&self) -> usize {
        self.layout.origin()
    }

    /// Largest horizontal tap offset, in pixels, that stays inside the
    /// buffer from any interior word.
    #[inline]
    pub fn horizontal_reach(&self) -> u32 {
        self.layout.margin
    }

    /// Largest vertical tap offset, in rows, that stays inside the buffer.
    #[inline]
    pub fn vertical_reach(&self) -> u32 {
        self.layout.margin
    }

    /// Word index of the first interior word of row `y`.
    #[inline]
    pub fn row_start(&self, y: u32) -> usize {
        self.layout.origin() + y as usize * self.layout.wpl
    }

    /// The whole underlying buffer, margins included.
    #[inline]
    pub fn data(&self) -> &'a [u32] {
        self.data
    }
}

/// Mutable view of a padded raster's interior.
#[derive(Debug)]
pub struct PaddedViewMut<'a> {
    data: &'a mut [u32],
    layout: Layout,
}

impl<'a> PaddedViewMut<'a> {
    /// Build a mutable view; see [`PaddedView::new`].
    pub fn new(data: &'a mut [u32], wpl: usize, width: u32, height: u32, margin: u32) -> Result<Self> {
        let layout = Layout::validate(data.len(), wpl, width, height, margin)?;
        Ok(PaddedViewMut { data, layout })
    }

    /// Interior width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.layout.width
    }

    /// Interior height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.layout.height
    }

    /// Row stride of the underlying buffer, in words.
    #[inline]
    pub fn wpl(&self) -> usize {
        self.layout.wpl
    }

    /// Guaranteed margin on every side, in pixels.
    #[inline]
    pub fn margin(&self) -> u32 {
        self.layout.margin
    }

    /// Number of words covering one interior row.
    #[inline]
    pub fn proper_wpl(&self) -> usize {
        self.layout.proper_wpl()
    }

    /// Word index of the first interior word of row `y`.
    #[inline]
    pub fn row_start(&self, y: u32) -> usize {
        self.layout.origin() + y as usize * self.layout.wpl
    }

    /// The interior words of row `y`, for writing.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = self.row_start(y);
        let end = start + self.layout.proper_wpl();
        &mut self.data[start..end]
    }

    /// The buffer from the start of interior row 0 through the end of the
    /// last interior row's stride, so it splits into `height` chunks of
    /// `wpl` words whose first `proper_wpl` words are the interior.
    pub fn interior_rows_mut(&mut self) -> &mut [u32] {
        let start = self.layout.origin();
        let end = (start + self.layout.height as usize * self.layout.wpl).min(self.data.len());
        &mut self.data[start..end]
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> PaddedView<'_> {
        PaddedView {
            data: &self.data[..],
            layout: self.layout,
        }
    }
}

impl Bitmap {
    /// View the interior of a bitmap that was padded by `margin` pixels on
    /// every side (for example with [`Bitmap::add_border`]).
    pub fn as_padded(&self, margin: u32) -> Result<PaddedView<'_>> {
        let (w, h) = interior_size(self.width(), self.height(), margin)?;
        PaddedView::new(self.data(), self.wpl() as usize, w, h, margin)
    }
}

impl BitmapMut {
    /// Read-only view of the interior of a bitmap padded by `margin`.
    pub fn as_padded(&self, margin: u32) -> Result<PaddedView<'_>> {
        let (w, h) = interior_size(self.width(), self.height(), margin)?;
        PaddedView::new(self.data(), self.wpl() as usize, w, h, margin)
    }

    /// Mutable view of the interior of a bitmap padded by `margin`.
    pub fn as_padded_mut(&mut self, margin: u32) -> Result<PaddedViewMut<'_>> {
        let (w, h) = interior_size(self.width(), self.height(), margin)?;
        let wpl = self.wpl() as usize;
        PaddedViewMut::new(self.data_mut(), wpl, w, h, margin)
    }
}

fn interior_size(width: u32, height: u32, margin: u32) -> Result<(u32, u32)> {
    let twice = 2 * u64::from(margin);
    if u64::from(width) <= twice || u64::from(height) <= twice {
        return Err(Error::InvalidView(format!(
            "{width}x{height} bitmap has no interior inside a {margin}-pixel margin"
        )));
    }
    Ok((width - 2 * margin, height - 2 * margin))
}
