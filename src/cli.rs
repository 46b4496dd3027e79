use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use blockfall::core::GameConfig;

pub const USAGE: &str = "usage: blockfall [--seed N] [--steps N] [--config PATH]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    pub seed: u32,
    /// Pieces the autopilot places before stopping
    pub steps: u32,
    pub config: Option<PathBuf>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            seed: 1,
            steps: 100,
            config: None,
        }
    }
}

/// Parse arguments (without the program name); `None` means help was asked for
pub fn parse_args(args: &[String]) -> Result<Option<RunArgs>> {
    let mut parsed = RunArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                parsed.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--steps" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --steps"))?;
                parsed.steps = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --steps value: {}", v))?;
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                parsed.config = Some(PathBuf::from(v));
            }
            other => {
                return Err(anyhow!("unknown argument: {}\n{}", other, USAGE));
            }
        }
        i += 1;
    }

    Ok(Some(parsed))
}

/// Read a JSON game config, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))
}
