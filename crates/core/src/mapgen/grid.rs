//! Cell storage with non-empty tile bookkeeping.

use std::mem;

use crate::error::MapGenError;
use crate::render::Renderer;
use crate::types::{CellState, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    tile_count: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, MapGenError> {
        if width == 0 || height == 0 {
            return Err(MapGenError::InvalidDimension { width, height });
        }
        Ok(Self { width, height, cells: vec![CellState::Empty; width * height], tile_count: 0 })
    }

    pub fn reset(&mut self) {
        self.cells.fill(CellState::Empty);
        self.tile_count = 0;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Number of cells whose state is not `Empty`.
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    pub fn fill_ratio(&self) -> f64 {
        self.tile_count as f64 / self.area() as f64
    }

    pub fn center(&self) -> Pos {
        Pos::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn clamp(&self, pos: Pos) -> Pos {
        Pos::new(pos.x.clamp(0, self.width as i32 - 1), pos.y.clamp(0, self.height as i32 - 1))
    }

    pub fn get(&self, pos: Pos) -> Result<CellState, MapGenError> {
        let index = self.index(pos)?;
        Ok(self.cells[index])
    }

    /// Like [`Grid::get`], but off-grid coordinates read as `Empty`.
    pub fn get_or_empty(&self, pos: Pos) -> CellState {
        self.get(pos).unwrap_or(CellState::Empty)
    }

    /// Writes `state` and keeps the tile count in step. Returns the previous state.
    pub fn set(&mut self, pos: Pos, state: CellState) -> Result<CellState, MapGenError> {
        let index = self.index(pos)?;
        let previous = mem::replace(&mut self.cells[index], state);
        match (previous.is_empty(), state.is_empty()) {
            (true, false) => self.tile_count += 1,
            (false, true) => self.tile_count -= 1,
            _ => {}
        }
        Ok(previous)
    }

    /// [`Grid::set`] followed by a renderer notification for the cell.
    pub fn paint(
        &mut self,
        pos: Pos,
        state: CellState,
        renderer: &mut dyn Renderer,
    ) -> Result<CellState, MapGenError> {
        let previous = self.set(pos, state)?;
        renderer.paint_cell(pos, state)?;
        Ok(previous)
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Every cell paired with its coordinate, in raster order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, CellState)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height).map(move |y| {
                let pos = Pos::new(x as i32, y as i32);
                (pos, self.cells[y * self.width + x])
            })
        })
    }

    /// Row-major copy of the cells (`y * width + x`).
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    fn index(&self, pos: Pos) -> Result<usize, MapGenError> {
        if !self.contains(pos) {
            return Err(MapGenError::OutOfBounds { pos, width: self.width, height: self.height });
        }
        Ok(pos.y as usize * self.width + pos.x as usize)
    }
}
