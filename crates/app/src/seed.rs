use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    /// The seed shown when the previous session closed.
    Resumed(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Resumed(seed) | Self::Generated(seed) => seed,
        }
    }
}

/// Viewer command line: `[--seed N | --seed=N] [--config PATH] [--resume]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    pub seed: Option<u64>,
    pub config_path: Option<PathBuf>,
    pub resume: bool,
}

impl LaunchArgs {
    /// `--seed` wins over `--resume`; without either the generated seed is used.
    pub fn choose_seed(&self, saved_seed: Option<u64>, generated_seed: u64) -> SeedChoice {
        match (self.seed, saved_seed) {
            (Some(seed), _) => SeedChoice::Cli(seed),
            (None, Some(saved)) if self.resume => SeedChoice::Resumed(saved),
            _ => SeedChoice::Generated(generated_seed),
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

pub fn parse_launch_args(args: &[String]) -> Result<LaunchArgs, String> {
    let mut launch = LaunchArgs::default();
    let mut index = 1usize;

    while index < args.len() {
        let argument = args[index].as_str();

        match argument {
            "--seed" => {
                let Some(value) = args.get(index + 1) else {
                    return Err("missing value for --seed".to_string());
                };
                set_seed(&mut launch, value)?;
                index += 2;
                continue;
            }
            "--config" => {
                let Some(value) = args.get(index + 1) else {
                    return Err("missing value for --config".to_string());
                };
                launch.config_path = Some(PathBuf::from(value));
                index += 2;
                continue;
            }
            "--resume" => launch.resume = true,
            _ => {
                if let Some(value) = argument.strip_prefix("--seed=") {
                    set_seed(&mut launch, value)?;
                } else if let Some(value) = argument.strip_prefix("--config=") {
                    launch.config_path = Some(PathBuf::from(value));
                }
            }
        }
        index += 1;
    }

    Ok(launch)
}

fn set_seed(launch: &mut LaunchArgs, raw_value: &str) -> Result<(), String> {
    if launch.seed.is_some() {
        return Err("seed provided more than once".to_string());
    }
    let seed =
        raw_value.parse::<u64>().map_err(|_| format!("seed value '{raw_value}' must be a number"))?;
    launch.seed = Some(seed);
    Ok(())
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
