//! Walker-driven floor carving.
//!
//! Each iteration runs five phases in a fixed order: paint, remove, redirect,
//! spawn, move. Carving stops as soon as the grid's fill ratio reaches the
//! configured fill percentage; the check happens before every iteration, so a
//! target that is already met carves nothing.

use crate::error::MapGenError;
use crate::render::Renderer;
use crate::types::CellState;

use super::config::{GeneratorConfig, WalkerTuning};
use super::grid::Grid;
use super::random::RandomSource;
use super::walker::{Walker, choose_direction};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarveReport {
    pub iterations: u64,
    pub tiles_painted: usize,
    pub walkers_spawned: usize,
    pub walkers_removed: usize,
    pub peak_walkers: usize,
}

pub struct FloorCarver {
    fill_percentage: f64,
    max_walkers: usize,
    tuning: WalkerTuning,
    max_iterations: Option<u64>,
    walkers: Vec<Walker>,
    report: CarveReport,
}

impl FloorCarver {
    /// Starts with a single walker on the grid centre.
    pub fn new(config: &GeneratorConfig, grid: &Grid, random: &mut dyn RandomSource) -> Self {
        let first = Walker::new(grid.center(), choose_direction(random), config.walker);
        Self::with_walkers(config, vec![first])
    }

    /// Starts from an explicit population, e.g. walkers with individual tuning.
    pub fn with_walkers(config: &GeneratorConfig, walkers: Vec<Walker>) -> Self {
        let peak_walkers = walkers.len();
        Self {
            fill_percentage: config.fill_percentage,
            max_walkers: config.max_walkers,
            tuning: config.walker,
            max_iterations: config.max_iterations,
            walkers,
            report: CarveReport { peak_walkers, ..CarveReport::default() },
        }
    }

    pub fn walkers(&self) -> &[Walker] {
        &self.walkers
    }

    pub fn report(&self) -> CarveReport {
        self.report
    }

    pub fn is_complete(&self, grid: &Grid) -> bool {
        grid.fill_ratio() >= self.fill_percentage
    }

    pub fn run(
        mut self,
        grid: &mut Grid,
        random: &mut dyn RandomSource,
        renderer: &mut dyn Renderer,
    ) -> Result<CarveReport, MapGenError> {
        while !self.is_complete(grid) {
            if let Some(limit) = self.max_iterations.filter(|&limit| self.report.iterations >= limit)
            {
                log::warn!(
                    "carving stopped at fill {:.3} after {limit} iterations",
                    grid.fill_ratio()
                );
                return Err(MapGenError::IterationLimit { limit });
            }
            self.step(grid, random, renderer)?;
        }

        log::debug!(
            "carved {} tiles in {} iterations (peak walkers {}, spawned {}, removed {})",
            self.report.tiles_painted,
            self.report.iterations,
            self.report.peak_walkers,
            self.report.walkers_spawned,
            self.report.walkers_removed
        );
        Ok(self.report)
    }

    /// Runs one iteration regardless of the fill target.
    pub fn step(
        &mut self,
        grid: &mut Grid,
        random: &mut dyn RandomSource,
        renderer: &mut dyn Renderer,
    ) -> Result<(), MapGenError> {
        if self.walkers.is_empty() {
            return Err(MapGenError::PopulationExhausted);
        }
        self.report.iterations += 1;

        self.paint_floors(grid, renderer)?;
        self.remove_one(random);
        self.redirect(random);
        self.spawn(grid, random);
        self.move_walkers(grid);

        log::trace!(
            "iteration {}: {} walkers, {} tiles",
            self.report.iterations,
            self.walkers.len(),
            grid.tile_count()
        );

        if self.walkers.is_empty() {
            return Err(MapGenError::PopulationExhausted);
        }
        Ok(())
    }

    fn paint_floors(
        &mut self,
        grid: &mut Grid,
        renderer: &mut dyn Renderer,
    ) -> Result<(), MapGenError> {
        for walker in &self.walkers {
            if grid.get(walker.pos)? != CellState::Empty {
                continue;
            }
            grid.paint(walker.pos, CellState::Floor, renderer)?;
            self.report.tiles_painted += 1;
        }
        Ok(())
    }

    /// Removes at most one walker and never the last one.
    fn remove_one(&mut self, random: &mut dyn RandomSource) {
        for index in 0..self.walkers.len() {
            if random.roll(self.walkers[index].tuning.chance_to_remove) && self.walkers.len() > 1 {
                self.walkers.remove(index);
                self.report.walkers_removed += 1;
                break;
            }
        }
    }

    fn redirect(&mut self, random: &mut dyn RandomSource) {
        for walker in &mut self.walkers {
            if random.roll(walker.tuning.chance_to_change_direction) {
                walker.direction = choose_direction(random);
            }
        }
    }

    /// Only walkers alive when the phase starts get a spawn roll.
    fn spawn(&mut self, grid: &Grid, random: &mut dyn RandomSource) {
        let parents = self.walkers.len();
        for index in 0..parents {
            if random.roll(self.walkers[index].tuning.chance_to_create)
                && self.walkers.len() < self.max_walkers
            {
                let child = Walker::new(grid.center(), choose_direction(random), self.tuning);
                self.walkers.push(child);
                self.report.walkers_spawned += 1;
            }
        }
        self.report.peak_walkers = self.report.peak_walkers.max(self.walkers.len());
    }

    fn move_walkers(&mut self, grid: &Grid) {
        for walker in &mut self.walkers {
            walker.advance();
            walker.clamp_within_grid(grid.width(), grid.height());
        }
    }
}
