//! Word-parallel compositors
//!
//! Each output word is the OR (dilation) or AND (erosion) of the source
//! words found at every offset of a window. Both compositors accumulate
//! into a register and store once per output word.
//!
//! Horizontal taps need a bit shift. For offset `o = 32q + r` with
//! `0 <= r < 32`, the 32 pixels starting `o` to the right of word `i` are
//!
//! ```text
//! r == 0:  src[i + q]
//! r >  0:  (src[i + q] << r) | (src[i + q + 1] >> (32 - r))
//! ```
//!
//! which covers both signs: `o = -1` gives `q = -1, r = 31`, i.e.
//! `(prev << 31) | (cur >> 1)`.
//!
//! Vertical taps are whole words `o * wpl` away and need no shift.

use crate::window::Window;

/// Bitwise reduction used to combine taps.
pub(crate) trait Combine {
    /// Value that leaves any word unchanged under [`Combine::combine`].
    const IDENTITY: u32;

    fn combine(acc: u32, tap: u32) -> u32;
}

/// OR of taps (dilation).
pub(crate) struct Union;

/// AND of taps (erosion).
pub(crate) struct Intersection;

impl Combine for Union {
    const IDENTITY: u32 = 0;

    #[inline(always)]
    fn combine(acc: u32, tap: u32) -> u32 {
        acc | tap
    }
}

impl Combine for Intersection {
    const IDENTITY: u32 = !0;

    #[inline(always)]
    fn combine(acc: u32, tap: u32) -> u32 {
        acc & tap
    }
}

/// A horizontal tap split into a word step and an in-word shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShiftTap {
    word: isize,
    shift: u32,
}

impl ShiftTap {
    fn new(offset: i32) -> Self {
        ShiftTap {
            word: offset.div_euclid(32) as isize,
            shift: offset.rem_euclid(32) as u32,
        }
    }
}

/// Taps for a horizontal window.
pub(crate) fn horizontal_taps(window: Window) -> Vec<ShiftTap> {
    window.offsets().map(ShiftTap::new).collect()
}

/// Word offsets for a vertical window over rows `wpl` words apart.
pub(crate) fn vertical_taps(window: Window, wpl: usize) -> Vec<isize> {
    window.offsets().map(|o| o as isize * wpl as isize).collect()
}

#[inline(always)]
fn at(base: usize, delta: isize) -> usize {
    base.wrapping_add_signed(delta)
}

/// Combine horizontal taps for every word of one row.
///
/// `src_start` is the index in `src` of the word aligned with `dst[0]`.
/// The caller guarantees every tap lands inside `src`.
pub(crate) fn horizontal_row<C: Combine>(
    dst: &mut [u32],
    src: &[u32],
    src_start: usize,
    taps: &[ShiftTap],
) {
    for (j, out) in dst.iter_mut().enumerate() {
        let base = src_start + j;
        let mut acc = C::IDENTITY;
        for tap in taps {
            let i = at(base, tap.word);
            let word = if tap.shift == 0 {
                src[i]
            } else {
                (src[i] << tap.shift) | (src[i + 1] >> (32 - tap.shift))
            };
            acc = C::combine(acc, word);
        }
        *out = acc;
    }
}

/// Combine vertical taps for every word of one row.
pub(crate) fn vertical_row<C: Combine>(
    dst: &mut [u32],
    src: &[u32],
    src_start: usize,
    taps: &[isize],
) {
    for (j, out) in dst.iter_mut().enumerate() {
        let base = src_start + j;
        *out = taps
            .iter()
            .fold(C::IDENTITY, |acc, &delta| C::combine(acc, src[at(base, delta)]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_tap_split() {
        assert_eq!(ShiftTap::new(0), ShiftTap { word: 0, shift: 0 });
        assert_eq!(ShiftTap::new(1), ShiftTap { word: 0, shift: 1 });
        assert_eq!(ShiftTap::new(-1), ShiftTap { word: -1, shift: 31 });
        assert_eq!(ShiftTap::new(32), ShiftTap { word: 1, shift: 0 });
        assert_eq!(ShiftTap::new(-32), ShiftTap { word: -1, shift: 0 });
        assert_eq!(ShiftTap::new(-31), ShiftTap { word: -1, shift: 1 });
    }

    #[test]
    fn test_horizontal_carry() {
        // one margin word on each side; pixel 32 is the first bit of word 2
        let src = [0, 0, 0x8000_0000, 0];
        let taps = horizontal_taps(Window::for_length(3));
        let mut dst = [0u32; 1];
        horizontal_row::<Union>(&mut dst, &src, 1, &taps);
        // pixel 31 sees pixel 32 through the +1 tap
        assert_eq!(dst[0], 0x0000_0001);
        horizontal_row::<Union>(&mut dst, &src, 2, &taps);
        assert_eq!(dst[0], 0xc000_0000);
    }

    #[test]
    fn test_horizontal_intersection() {
        let src = [!0, !0, !0];
        let taps = horizontal_taps(Window::for_length(8));
        let mut dst = [0u32; 1];
        horizontal_row::<Intersection>(&mut dst, &src, 1, &taps);
        assert_eq!(dst[0], !0);
    }

    #[test]
    fn test_vertical_stride() {
        // three rows of two words; only the last row is set
        let src = [0, 0, 0, 0, 0xf0f0_f0f0, 1];
        let taps = vertical_taps(Window::for_length(2), 2);
        let mut dst = [0u32; 2];
        vertical_row::<Union>(&mut dst, &src, 2, &taps);
        assert_eq!(dst, [0xf0f0_f0f0, 1]);
        vertical_row::<Intersection>(&mut dst, &src, 2, &taps);
        assert_eq!(dst, [0, 0]);
    }
}
