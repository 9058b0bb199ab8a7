//! Frame-by-frame viewer state: generates a map into a recording and replays
//! its paint events onto a canvas.

use dungeon_core::mapgen::{GenerationReport, Grid, SeededRandom};
use dungeon_core::{GeneratorConfig, MapGenError, MapGenerator, RecordingRenderer};
use macroquad::prelude::KeyCode;

/// Frames an animated reveal should take, regardless of map size.
pub const ANIMATION_FRAMES: usize = 120;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewerMode {
    #[default]
    Animating,
    Paused,
    Revealed,
}

pub struct ViewerState {
    pub mode: ViewerMode,
    /// Set when the current `tick()` generated a new map.
    /// Cleared at the start of every tick.
    pub regenerated: bool,
    seed: u64,
    generator: MapGenerator,
    recording: RecordingRenderer,
    outcome: Result<GenerationReport, MapGenError>,
    fingerprint: Option<u64>,
    canvas: Grid,
    revealed: usize,
}

impl ViewerState {
    pub fn new(config: GeneratorConfig, seed: u64) -> Result<Self, MapGenError> {
        let canvas = Grid::new(config.width, config.height)?;
        let mut generator = MapGenerator::new(config)?;
        let mut recording = RecordingRenderer::new();
        let outcome = generate_recorded(&mut generator, &mut recording, seed);
        let fingerprint = finished_fingerprint(&generator, &outcome);
        let mode =
            if recording.events.is_empty() { ViewerMode::Revealed } else { ViewerMode::Animating };
        Ok(Self {
            mode,
            regenerated: false,
            seed,
            generator,
            recording,
            outcome,
            fingerprint,
            canvas,
            revealed: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.generator.config()
    }

    pub fn generator(&self) -> &MapGenerator {
        &self.generator
    }

    /// Cells revealed so far.
    pub fn canvas(&self) -> &Grid {
        &self.canvas
    }

    pub fn outcome(&self) -> &Result<GenerationReport, MapGenError> {
        &self.outcome
    }

    /// Fingerprint of the current map, or `None` when its run failed.
    pub fn fingerprint(&self) -> Option<u64> {
        self.fingerprint
    }

    /// `(revealed, total)` paint events.
    pub fn progress(&self) -> (usize, usize) {
        (self.revealed, self.recording.events.len())
    }

    pub fn tick(&mut self, keys_pressed: &[KeyCode]) {
        self.regenerated = false;

        if keys_pressed.contains(&KeyCode::R) {
            self.regenerate(self.seed.wrapping_add(1));
            self.regenerated = true;
            return;
        }

        if keys_pressed.contains(&KeyCode::Enter) {
            self.reveal(self.recording.events.len());
            return;
        }

        if keys_pressed.contains(&KeyCode::Space) {
            self.mode = match self.mode {
                ViewerMode::Animating => ViewerMode::Paused,
                ViewerMode::Paused => ViewerMode::Animating,
                ViewerMode::Revealed => ViewerMode::Revealed,
            };
        }

        if self.mode == ViewerMode::Animating {
            let per_frame = self.recording.events.len().div_ceil(ANIMATION_FRAMES).max(1);
            self.reveal(per_frame);
        }
    }

    fn regenerate(&mut self, seed: u64) {
        self.seed = seed;
        self.outcome = generate_recorded(&mut self.generator, &mut self.recording, seed);
        self.fingerprint = finished_fingerprint(&self.generator, &self.outcome);
        self.canvas.reset();
        self.revealed = 0;
        self.mode = ViewerMode::Animating;
        if self.recording.events.is_empty() {
            self.mode = ViewerMode::Revealed;
        }
    }

    fn reveal(&mut self, count: usize) {
        let end = (self.revealed + count).min(self.recording.events.len());
        for event in &self.recording.events[self.revealed..end] {
            if let Err(err) = self.canvas.set(event.pos, event.state) {
                log::warn!("skipping paint event: {err}");
            }
        }
        self.revealed = end;
        if self.revealed == self.recording.events.len() {
            self.mode = ViewerMode::Revealed;
        }
    }
}

fn generate_recorded(
    generator: &mut MapGenerator,
    recording: &mut RecordingRenderer,
    seed: u64,
) -> Result<GenerationReport, MapGenError> {
    let outcome = generator.generate(&mut SeededRandom::new(seed), recording);
    match &outcome {
        Ok(report) => log::info!(
            "seed {seed}: {} paint events, {} special rooms",
            recording.events.len(),
            report.placements.len()
        ),
        Err(err) => log::warn!("seed {seed}: generation stopped early: {err}"),
    }
    outcome
}

fn finished_fingerprint(
    generator: &MapGenerator,
    outcome: &Result<GenerationReport, MapGenError>,
) -> Option<u64> {
    outcome.as_ref().ok().map(|_| generator.snapshot().fingerprint())
}
