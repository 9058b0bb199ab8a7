//! Public snapshot of a finished map.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{CellState, Pos};

use super::carver::CarveReport;
use super::grid::Grid;
use super::rooms::RoomPlacement;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    pub carve: CarveReport,
    pub placements: Vec<RoomPlacement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedMap {
    pub width: usize,
    pub height: usize,
    /// Row-major, `y * width + x`.
    pub cells: Vec<CellState>,
    pub start: Pos,
    pub tile_count: usize,
    pub placements: Vec<RoomPlacement>,
}

impl GeneratedMap {
    pub fn from_grid(grid: &Grid, placements: Vec<RoomPlacement>) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().to_vec(),
            start: grid.center(),
            tile_count: grid.tile_count(),
            placements,
        }
    }

    pub fn cell_at(&self, pos: Pos) -> CellState {
        if pos.x < 0 || pos.y < 0 {
            return CellState::Empty;
        }
        let x = pos.x as usize;
        let y = pos.y as usize;
        if x >= self.width || y >= self.height {
            return CellState::Empty;
        }
        self.cells[y * self.width + x]
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    pub fn positions_of(&self, state: CellState) -> Vec<Pos> {
        let mut positions: Vec<Pos> = self
            .cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == state)
            .map(|(index, _)| Pos::new((index % self.width) as i32, (index / self.width) as i32))
            .collect();
        positions.sort();
        positions
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for cell in &self.cells {
            bytes.push(match cell {
                CellState::Empty => 0,
                CellState::Floor => 1,
                CellState::Start => 2,
                CellState::Boss => 3,
                CellState::Challenge => 4,
                CellState::Shop => 5,
                CellState::Camp => 6,
            });
        }
        bytes.extend(self.start.x.to_le_bytes());
        bytes.extend(self.start.y.to_le_bytes());

        bytes.extend((self.placements.len() as u32).to_le_bytes());
        for placement in &self.placements {
            bytes.extend(placement.pos.x.to_le_bytes());
            bytes.extend(placement.pos.y.to_le_bytes());
            bytes.push(placement.connectivity);
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
