//! Generator configuration, loadable from JSON and validated before use.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MapGenError;

pub const DEFAULT_WIDTH: usize = 12;
pub const DEFAULT_HEIGHT: usize = 12;
pub const DEFAULT_FILL_PERCENTAGE: f64 = 0.25;
pub const DEFAULT_MAX_WALKERS: usize = 3;

/// Per-walker probabilities, rolled once per carving iteration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerTuning {
    pub chance_to_remove: f64,
    pub chance_to_change_direction: f64,
    pub chance_to_create: f64,
}

impl Default for WalkerTuning {
    fn default() -> Self {
        Self { chance_to_remove: 0.1, chance_to_change_direction: 0.5, chance_to_create: 0.05 }
    }
}

/// Which cells the special-room searches consider as candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Every cell is a candidate; off-grid neighbours count as empty.
    #[default]
    BoundsChecked,
    /// The last column and last row are never candidates.
    ClipLastRowAndColumn,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    pub fill_percentage: f64,
    pub max_walkers: usize,
    pub walker: WalkerTuning,
    pub edge_policy: EdgePolicy,
    /// Upper bound on carving iterations. `None` carves until the fill target is met.
    pub max_iterations: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fill_percentage: DEFAULT_FILL_PERCENTAGE,
            max_walkers: DEFAULT_MAX_WALKERS,
            walker: WalkerTuning::default(),
            edge_policy: EdgePolicy::default(),
            max_iterations: None,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), MapGenError> {
        if self.width == 0 || self.height == 0 {
            return Err(MapGenError::InvalidDimension { width: self.width, height: self.height });
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(MapGenError::InvalidConfig(format!(
                "grid {}x{} does not fit 32-bit coordinates",
                self.width, self.height
            )));
        }
        check_unit_interval("fill_percentage", self.fill_percentage)?;
        if self.max_walkers == 0 {
            return Err(MapGenError::InvalidConfig("max_walkers must be at least 1".to_string()));
        }
        check_unit_interval("walker.chance_to_remove", self.walker.chance_to_remove)?;
        check_unit_interval(
            "walker.chance_to_change_direction",
            self.walker.chance_to_change_direction,
        )?;
        check_unit_interval("walker.chance_to_create", self.walker.chance_to_create)?;
        if self.max_iterations == Some(0) {
            return Err(MapGenError::InvalidConfig(
                "max_iterations must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of non-empty cells carving must reach.
    pub fn target_tiles(&self) -> usize {
        (self.fill_percentage * (self.width * self.height) as f64).ceil() as usize
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<(), MapGenError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MapGenError::InvalidConfig(format!("{name} must be within [0, 1], got {value}")))
    }
}
