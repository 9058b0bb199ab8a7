//! High-level map generation: reset, start room, carving, special rooms.

use crate::error::MapGenError;
use crate::render::Renderer;
use crate::types::CellState;

use super::carver::FloorCarver;
use super::config::GeneratorConfig;
use super::grid::Grid;
use super::model::{GeneratedMap, GenerationReport};
use super::random::RandomSource;
use super::rooms::{PLACEMENT_PLAN, RoomPlacement, place_special_room};

pub struct MapGenerator {
    config: GeneratorConfig,
    grid: Grid,
    placements: Vec<RoomPlacement>,
}

impl MapGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, MapGenError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        Ok(Self { config, grid, placements: Vec::new() })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The grid left by the most recent run, including a partially built one
    /// if that run failed.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snapshot(&self) -> GeneratedMap {
        GeneratedMap::from_grid(&self.grid, self.placements.clone())
    }

    pub fn generate(
        &mut self,
        random: &mut dyn RandomSource,
        renderer: &mut dyn Renderer,
    ) -> Result<GenerationReport, MapGenError> {
        self.grid.reset();
        self.placements.clear();
        renderer.begin_map(self.grid.width(), self.grid.height())?;

        let start = self.grid.center();
        self.grid.paint(start, CellState::Start, renderer)?;

        let carve = FloorCarver::new(&self.config, &self.grid, random).run(
            &mut self.grid,
            random,
            renderer,
        )?;

        for (room, goal) in PLACEMENT_PLAN {
            let placement =
                place_special_room(&mut self.grid, room, goal, self.config.edge_policy, renderer)?;
            self.placements.push(placement);
        }

        log::info!(
            "generated {}x{} map: {} tiles ({:.1}%), {} carving iterations, {} special rooms",
            self.grid.width(),
            self.grid.height(),
            self.grid.tile_count(),
            self.grid.fill_ratio() * 100.0,
            carve.iterations,
            self.placements.len()
        );

        Ok(GenerationReport { carve, placements: self.placements.clone() })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::mapgen::config::EdgePolicy;
    use crate::mapgen::random::SeededRandom;
    use crate::mapgen::rooms::ConnectivityGoal;
    use crate::render::{NullRenderer, RecordingRenderer, RenderError};
    use crate::types::{Pos, SpecialRoom};

    #[test]
    fn default_run_places_every_special_room_on_distinct_former_floor() {
        let mut generator = MapGenerator::new(GeneratorConfig::default()).expect("valid config");
        let mut random = SeededRandom::new(31_337);
        let mut renderer = RecordingRenderer::new();

        let report = generator.generate(&mut random, &mut renderer).expect("generation");
        let grid = generator.grid();

        assert!(grid.tile_count() >= 36);
        assert_eq!(grid.count(CellState::Start), 1);
        assert_eq!(grid.get(Pos::new(6, 6)), Ok(CellState::Start));
        assert_eq!(grid.count(CellState::Boss), 1);
        assert_eq!(grid.count(CellState::Shop), 1);
        assert_eq!(grid.count(CellState::Challenge), 2);
        assert_eq!(grid.count(CellState::Camp), 1);

        let sites: BTreeSet<Pos> = report.placements.iter().map(|p| p.pos).collect();
        assert_eq!(sites.len(), 5);
        assert!(!sites.contains(&grid.center()));

        // Each site was painted as floor during carving before it was promoted.
        for placement in &report.placements {
            let history: Vec<CellState> = renderer
                .events
                .iter()
                .filter(|event| event.pos == placement.pos)
                .map(|event| event.state)
                .collect();
            assert_eq!(history, vec![CellState::Floor, placement.room.into()]);
        }
    }

    #[test]
    fn sparse_rooms_take_low_connectivity_and_camp_takes_the_densest_remaining() {
        let mut generator = MapGenerator::new(GeneratorConfig::default()).expect("valid config");
        let report =
            generator.generate(&mut SeededRandom::new(8), &mut NullRenderer).expect("generation");

        for placement in &report.placements[..4] {
            assert!(placement.connectivity <= 3, "{placement:?} is not sparse");
        }
        let camp = report.placements[4];
        assert_eq!(camp.room, SpecialRoom::Camp);
        assert!(camp.connectivity >= 1);
    }

    #[test]
    fn zero_fill_aborts_placement_with_not_found() {
        let config = GeneratorConfig { fill_percentage: 0.0, ..GeneratorConfig::default() };
        let mut generator = MapGenerator::new(config).expect("valid config");

        let err = generator
            .generate(&mut SeededRandom::new(1), &mut NullRenderer)
            .expect_err("no floor to promote");

        assert_eq!(err, MapGenError::NotFound { goal: ConnectivityGoal::Sparsest });
        assert_eq!(generator.grid().tile_count(), 1);
        assert_eq!(generator.grid().count(CellState::Start), 1);
        assert!(generator.snapshot().placements.is_empty());
    }

    #[test]
    fn regenerating_resets_the_previous_map() {
        let mut generator = MapGenerator::new(GeneratorConfig::default()).expect("valid config");
        generator.generate(&mut SeededRandom::new(1), &mut NullRenderer).expect("first run");
        generator.generate(&mut SeededRandom::new(2), &mut NullRenderer).expect("second run");

        assert_eq!(generator.grid().count(CellState::Start), 1);
        assert_eq!(generator.grid().count(CellState::Boss), 1);
        assert_eq!(generator.snapshot().placements.len(), 5);
    }

    #[test]
    fn same_seed_and_config_produce_identical_grids() {
        let mut first = MapGenerator::new(GeneratorConfig::default()).expect("valid config");
        let mut second = MapGenerator::new(GeneratorConfig::default()).expect("valid config");
        first.generate(&mut SeededRandom::new(4_242), &mut NullRenderer).expect("first");
        second.generate(&mut SeededRandom::new(4_242), &mut NullRenderer).expect("second");

        assert_eq!(first.grid(), second.grid());
        assert_eq!(first.snapshot().fingerprint(), second.snapshot().fingerprint());
    }

    #[test]
    fn clipped_edge_policy_never_places_on_last_row_or_column() {
        let config = GeneratorConfig {
            edge_policy: EdgePolicy::ClipLastRowAndColumn,
            fill_percentage: 0.4,
            ..GeneratorConfig::default()
        };
        for seed in 0..20 {
            let mut generator = MapGenerator::new(config.clone()).expect("valid config");
            let Ok(report) = generator.generate(&mut SeededRandom::new(seed), &mut NullRenderer)
            else {
                continue;
            };
            for placement in report.placements {
                assert!(placement.pos.x < 11 && placement.pos.y < 11, "{placement:?}");
            }
        }
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = GeneratorConfig { height: 0, ..GeneratorConfig::default() };
        assert!(matches!(
            MapGenerator::new(config),
            Err(MapGenError::InvalidDimension { width: 12, height: 0 })
        ));
    }

    struct FailingRenderer {
        remaining: usize,
    }

    impl Renderer for FailingRenderer {
        fn paint_cell(&mut self, _pos: Pos, _state: CellState) -> Result<(), RenderError> {
            if self.remaining == 0 {
                return Err(RenderError::new("texture atlas missing"));
            }
            self.remaining -= 1;
            Ok(())
        }
    }

    #[test]
    fn renderer_failures_abort_generation() {
        let mut generator = MapGenerator::new(GeneratorConfig::default()).expect("valid config");
        let err = generator
            .generate(&mut SeededRandom::new(9), &mut FailingRenderer { remaining: 3 })
            .expect_err("renderer gives out");

        assert_eq!(err, MapGenError::Render(RenderError::new("texture atlas missing")));
    }
}
