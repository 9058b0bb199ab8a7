//! Renderer seam: generation reports every cell write through [`Renderer`].
//!
//! The core never decides how a cell looks. It hands over the coordinate and the
//! logical [`CellState`] and the renderer maps that to whatever visual it owns.

use thiserror::Error;

use crate::types::{CellState, Pos};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("renderer failed to paint: {message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

pub trait Renderer {
    /// Called once per generation run before any cell is painted.
    fn begin_map(&mut self, _width: usize, _height: usize) -> Result<(), RenderError> {
        Ok(())
    }

    fn paint_cell(&mut self, pos: Pos, state: CellState) -> Result<(), RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn begin_map(&mut self, width: usize, height: usize) -> Result<(), RenderError> {
        (**self).begin_map(width, height)
    }

    fn paint_cell(&mut self, pos: Pos, state: CellState) -> Result<(), RenderError> {
        (**self).paint_cell(pos, state)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn paint_cell(&mut self, _pos: Pos, _state: CellState) -> Result<(), RenderError> {
        Ok(())
    }
}

/// One renderer notification, in the order generation issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintEvent {
    pub pos: Pos,
    pub state: CellState,
}

/// Keeps every paint event so a host can replay the carving afterwards.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub width: usize,
    pub height: usize,
    pub events: Vec<PaintEvent>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for RecordingRenderer {
    fn begin_map(&mut self, width: usize, height: usize) -> Result<(), RenderError> {
        self.width = width;
        self.height = height;
        self.events.clear();
        Ok(())
    }

    fn paint_cell(&mut self, pos: Pos, state: CellState) -> Result<(), RenderError> {
        self.events.push(PaintEvent { pos, state });
        Ok(())
    }
}

pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Empty => ' ',
        CellState::Floor => '.',
        CellState::Start => 'S',
        CellState::Boss => 'B',
        CellState::Shop => '$',
        CellState::Challenge => '!',
        CellState::Camp => '^',
    }
}

/// Character-cell renderer used by the command-line tools.
#[derive(Clone, Debug, Default)]
pub struct TextRenderer {
    width: usize,
    height: usize,
    glyphs: Vec<char>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows top to bottom, so the highest `y` is printed first.
    pub fn lines(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| self.glyphs[y * self.width..(y + 1) * self.width].iter().collect())
            .collect()
    }
}

impl Renderer for TextRenderer {
    fn begin_map(&mut self, width: usize, height: usize) -> Result<(), RenderError> {
        self.width = width;
        self.height = height;
        self.glyphs = vec![glyph(CellState::Empty); width * height];
        Ok(())
    }

    fn paint_cell(&mut self, pos: Pos, state: CellState) -> Result<(), RenderError> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height
        {
            return Err(RenderError::new(format!(
                "cell ({}, {}) outside {}x{} text buffer",
                pos.x, pos.y, self.width, self.height
            )));
        }
        self.glyphs[pos.y as usize * self.width + pos.x as usize] = glyph(state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_renderer_prints_highest_row_first() {
        let mut renderer = TextRenderer::new();
        renderer.begin_map(3, 2).expect("begin");
        renderer.paint_cell(Pos::new(0, 0), CellState::Start).expect("paint");
        renderer.paint_cell(Pos::new(2, 1), CellState::Boss).expect("paint");

        assert_eq!(renderer.lines(), vec!["  B".to_string(), "S  ".to_string()]);
    }

    #[test]
    fn text_renderer_rejects_cells_outside_its_buffer() {
        let mut renderer = TextRenderer::new();
        renderer.begin_map(2, 2).expect("begin");
        let err = renderer.paint_cell(Pos::new(2, 0), CellState::Floor).expect_err("off buffer");
        assert!(err.message.contains("outside"), "unexpected message: {err}");
    }

    #[test]
    fn recording_renderer_clears_on_new_map() {
        let mut renderer = RecordingRenderer::new();
        renderer.begin_map(4, 4).expect("begin");
        renderer.paint_cell(Pos::new(1, 1), CellState::Floor).expect("paint");
        renderer.begin_map(5, 6).expect("begin");

        assert!(renderer.events.is_empty());
        assert_eq!((renderer.width, renderer.height), (5, 6));
    }

    #[test]
    fn every_state_has_a_distinct_glyph() {
        let states = [
            CellState::Empty,
            CellState::Floor,
            CellState::Start,
            CellState::Boss,
            CellState::Shop,
            CellState::Challenge,
            CellState::Camp,
        ];
        let mut glyphs: Vec<char> = states.iter().map(|&state| glyph(state)).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), states.len());
    }
}
