//! Walker-based map generation split into coherent submodules.

pub mod config;
pub mod random;

mod carver;
mod connectivity;
mod generator;
mod grid;
mod model;
mod rooms;
mod walker;

pub use carver::{CarveReport, FloorCarver};
pub use config::{EdgePolicy, GeneratorConfig, WalkerTuning};
pub use connectivity::{candidate_floor_cells, connectivity_count};
pub use generator::MapGenerator;
pub use grid::Grid;
pub use model::{GeneratedMap, GenerationReport};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use rooms::{
    ConnectivityGoal, PLACEMENT_PLAN, RoomPlacement, find_max_connected, find_min_connected,
    place_special_room,
};
pub use walker::{Walker, choose_direction};

use crate::error::MapGenError;
use crate::render::NullRenderer;

/// Generates one map from `seed` with no renderer attached.
pub fn generate_map(seed: u64, config: GeneratorConfig) -> Result<GeneratedMap, MapGenError> {
    let mut generator = MapGenerator::new(config)?;
    generator.generate(&mut SeededRandom::new(seed), &mut NullRenderer)?;
    Ok(generator.snapshot())
}
