//! The real terminal as a [`Screen`].
//!
//! Layers draw into a back buffer; `show` hands it to the renderer, which
//! writes only what changed since the previous frame.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::terminal;

use crate::core::{Cell, FrameBuffer, Screen};
use crate::renderer::TerminalRenderer;
use crate::types::CellStyle;

pub struct TerminalScreen<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    back: FrameBuffer,
    entered: bool,
}

impl TerminalScreen<io::Stdout> {
    /// Switch the terminal into raw alternate-screen mode at its current size.
    pub fn open() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let mut screen = Self::with_renderer(TerminalRenderer::new(), width, height);
        screen.renderer.enter()?;
        screen.entered = true;
        Ok(screen)
    }
}

impl<W: Write> TerminalScreen<W> {
    /// A screen over `renderer` that never touches terminal modes.
    pub fn with_renderer(renderer: TerminalRenderer<W>, width: u16, height: u16) -> Self {
        Self {
            renderer,
            back: FrameBuffer::new(width, height),
            entered: false,
        }
    }

    pub fn back(&self) -> &FrameBuffer {
        &self.back
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn close(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.renderer.exit()
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn size(&self) -> (u16, u16) {
        (self.back.width(), self.back.height())
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.back.resize(width, height);
        self.renderer.invalidate();
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        self.back.set(x, y, Cell { ch, style });
    }

    fn clear(&mut self) {
        self.back.fill(Cell::default());
    }

    fn show(&mut self) -> Result<()> {
        self.renderer.present(&self.back)
    }
}

impl<W: Write> Drop for TerminalScreen<W> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
