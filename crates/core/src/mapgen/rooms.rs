//! Special-room site selection by connectivity.
//!
//! Searches are early-exit: thresholds are tried in order and the first floor
//! cell in raster order that satisfies the current threshold wins, which is not
//! necessarily the global extreme.

use serde::{Deserialize, Serialize};

use crate::error::MapGenError;
use crate::render::Renderer;
use crate::types::{CellState, Pos, SpecialRoom};

use super::config::EdgePolicy;
use super::connectivity::{candidate_floor_cells, connectivity_count};
use super::grid::Grid;

/// Which end of the connectivity range a special room wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectivityGoal {
    /// Dead ends and corridor tips: thresholds `<= 1`, `<= 2`, `<= 3`.
    Sparsest,
    /// Open junctions: thresholds `>= 4`, `>= 3`, `>= 2`, `>= 1`.
    Densest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPlacement {
    pub room: SpecialRoom,
    pub pos: Pos,
    /// Connectivity of the site when it was chosen.
    pub connectivity: u8,
}

/// Placement order for one map. Earlier rooms claim the sparse sites first.
pub const PLACEMENT_PLAN: [(SpecialRoom, ConnectivityGoal); 5] = [
    (SpecialRoom::Boss, ConnectivityGoal::Sparsest),
    (SpecialRoom::Shop, ConnectivityGoal::Sparsest),
    (SpecialRoom::Challenge, ConnectivityGoal::Sparsest),
    (SpecialRoom::Challenge, ConnectivityGoal::Sparsest),
    (SpecialRoom::Camp, ConnectivityGoal::Densest),
];

pub fn find_min_connected(grid: &Grid, policy: EdgePolicy) -> Result<Pos, MapGenError> {
    for threshold in 1..=3 {
        let qualifies = |pos: &Pos| connectivity_count(grid, *pos) <= threshold;
        if let Some(pos) = candidate_floor_cells(grid, policy).find(qualifies) {
            return Ok(pos);
        }
    }
    log::warn!("no floor cell with at most 3 occupied neighbours");
    Err(MapGenError::NotFound { goal: ConnectivityGoal::Sparsest })
}

pub fn find_max_connected(grid: &Grid, policy: EdgePolicy) -> Result<Pos, MapGenError> {
    for threshold in (1..=4).rev() {
        let qualifies = |pos: &Pos| connectivity_count(grid, *pos) >= threshold;
        if let Some(pos) = candidate_floor_cells(grid, policy).find(qualifies) {
            return Ok(pos);
        }
    }
    log::warn!("no floor cell with any occupied neighbour");
    Err(MapGenError::NotFound { goal: ConnectivityGoal::Densest })
}

pub fn place_special_room(
    grid: &mut Grid,
    room: SpecialRoom,
    goal: ConnectivityGoal,
    policy: EdgePolicy,
    renderer: &mut dyn Renderer,
) -> Result<RoomPlacement, MapGenError> {
    let pos = match goal {
        ConnectivityGoal::Sparsest => find_min_connected(grid, policy)?,
        ConnectivityGoal::Densest => find_max_connected(grid, policy)?,
    };

    let found = grid.get(pos)?;
    if found != CellState::Floor {
        return Err(MapGenError::NotFloor { pos, found });
    }

    let connectivity = connectivity_count(grid, pos);
    grid.paint(pos, room.into(), renderer)?;
    log::debug!("placed {room:?} at ({}, {}) with connectivity {connectivity}", pos.x, pos.y);

    Ok(RoomPlacement { room, pos, connectivity })
}
