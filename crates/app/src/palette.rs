//! Cell colours for the viewer.

use dungeon_core::CellState;
use macroquad::color::{Color, colors};

pub const BACKGROUND: Color = Color::new(0.06, 0.06, 0.08, 1.0);
pub const GRID_LINE: Color = Color::new(0.14, 0.14, 0.18, 1.0);

pub fn cell_color(state: CellState) -> Color {
    match state {
        CellState::Empty => BACKGROUND,
        CellState::Floor => colors::LIGHTGRAY,
        CellState::Start => colors::GREEN,
        CellState::Boss => colors::RED,
        CellState::Shop => colors::GOLD,
        CellState::Challenge => colors::ORANGE,
        CellState::Camp => colors::SKYBLUE,
    }
}

/// Legend entries for every non-empty state, in drawing order.
pub fn legend() -> [(CellState, &'static str); 6] {
    [
        (CellState::Start, "Start"),
        (CellState::Floor, "Floor"),
        (CellState::Boss, "Boss"),
        (CellState::Shop, "Shop"),
        (CellState::Challenge, "Challenge"),
        (CellState::Camp, "Camp"),
    ]
}
