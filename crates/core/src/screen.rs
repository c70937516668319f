//! The drawing surface contract consumed by layers and the compositor.

use anyhow::Result;

use crate::types::CellStyle;

/// A character-grid surface.
///
/// Coordinates are signed because sprites routinely sit partly or fully
/// outside the visible area; implementations drop out-of-range cells.
/// Cells persist between `show` calls, so layers only repaint what moved.
pub trait Screen {
    /// Current grid size as `(width, height)`.
    fn size(&self) -> (u16, u16);

    /// Adopt a new grid size. Existing content may be discarded.
    fn resize(&mut self, width: u16, height: u16);

    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: CellStyle);

    /// Blank every cell.
    fn clear(&mut self);

    /// Flush pending cells to the output.
    fn show(&mut self) -> Result<()>;

    /// Write a string left to right starting at `(x, y)`.
    fn put_str(&mut self, x: i32, y: i32, s: &str, style: CellStyle) {
        for (dx, ch) in s.chars().enumerate() {
            self.set_cell(x + dx as i32, y, ch, style);
        }
    }
}
