use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use dungeon_core::mapgen::{EdgePolicy, MapGenerator, SeededRandom};
use dungeon_core::{GeneratorConfig, TextRenderer};
use log::LevelFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EdgePolicyArg {
    BoundsChecked,
    Clip,
}

impl From<EdgePolicyArg> for EdgePolicy {
    fn from(arg: EdgePolicyArg) -> Self {
        match arg {
            EdgePolicyArg::BoundsChecked => Self::BoundsChecked,
            EdgePolicyArg::Clip => Self::ClipLastRowAndColumn,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Carve a dungeon layout with random walkers", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// JSON generator config; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// Target share of non-empty cells, 0.0 to 1.0
    #[arg(long)]
    fill: Option<f64>,
    #[arg(long)]
    max_walkers: Option<usize>,
    #[arg(long, value_enum)]
    edge_policy: Option<EdgePolicyArg>,
    #[arg(long)]
    max_iterations: Option<u64>,
    /// Print the generated map as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?,
            None => GeneratorConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fill) = self.fill {
            config.fill_percentage = fill;
        }
        if let Some(max_walkers) = self.max_walkers {
            config.max_walkers = max_walkers;
        }
        if let Some(edge_policy) = self.edge_policy {
            config.edge_policy = edge_policy.into();
        }
        if self.max_iterations.is_some() {
            config.max_iterations = self.max_iterations;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the flag-derived level.
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.resolve_config()?;
    let mut generator = MapGenerator::new(config).context("Invalid generator configuration")?;
    let mut renderer = TextRenderer::new();
    let report = generator
        .generate(&mut SeededRandom::new(args.seed), &mut renderer)
        .with_context(|| format!("Generation failed for seed {}", args.seed))?;

    if args.json {
        let json = serde_json::to_string_pretty(&generator.snapshot())
            .context("Failed to serialize generated map")?;
        println!("{json}");
        return Ok(());
    }

    let grid = generator.grid();
    println!("Seed: {}", args.seed);
    println!(
        "Size: {}x{}  Tiles: {} ({:.1}%)  Iterations: {}  Peak walkers: {}",
        grid.width(),
        grid.height(),
        grid.tile_count(),
        grid.fill_ratio() * 100.0,
        report.carve.iterations,
        report.carve.peak_walkers
    );
    println!("+{}+", "-".repeat(grid.width()));
    for line in renderer.lines() {
        println!("|{line}|");
    }
    println!("+{}+", "-".repeat(grid.width()));
    for placement in &report.placements {
        println!(
            "{:<10} ({:>2}, {:>2})  connectivity {}",
            format!("{:?}", placement.room),
            placement.pos.x,
            placement.pos.y,
            placement.connectivity
        );
    }
    println!("Fingerprint: 0x{:016x}", generator.snapshot().fingerprint());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "dungeon-gen",
            "--width",
            "20",
            "--fill",
            "0.4",
            "--edge-policy",
            "clip",
            "-vv",
        ]);
        let config = args.resolve_config().expect("no config file involved");

        assert_eq!(config.width, 20);
        assert_eq!(config.height, 12);
        assert_eq!(config.fill_percentage, 0.4);
        assert_eq!(config.edge_policy, EdgePolicy::ClipLastRowAndColumn);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn missing_config_file_is_reported_with_its_path() {
        let args = Args::parse_from(["dungeon-gen", "--config", "/nonexistent/walker.json"]);
        let err = args.resolve_config().expect_err("file does not exist");
        assert!(format!("{err:#}").contains("/nonexistent/walker.json"));
    }
}
