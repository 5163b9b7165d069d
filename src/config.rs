//! Game configuration.
//!
//! Everything is optional in the JSON file; missing fields take the values
//! the game was balanced with. World units are "pixels": the terminal grid is
//! scaled up by `cell_width` × `cell_height` so the physics constants keep
//! their balanced magnitudes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "JACK_FLAP_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "jack_flap.json";
const DEFAULT_SCORE_FILE: &str = ".jack_flap_score.json";

// ── Simulation constants ─────────────────────────────────────────────────────

/// Physics and obstacle constants consumed by `compute`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vertical velocity every tick.
    pub gravity: f32,
    /// Velocity set by an impulse (negative = upward).
    pub flap_velocity: f32,
    pub actor_radius: f32,
    /// Actor x as a fraction of viewport width at run start.
    pub actor_x_fraction: f32,
    pub obstacle_width: f32,
    /// Vertical size of the passable gap.
    pub gap_height: f32,
    /// Leftward movement per tick.
    pub obstacle_speed: f32,
    /// Minimum distance kept between a gap and the viewport edges.
    pub gap_margin: f32,
    /// Spawn happens on frames divisible by this.
    pub spawn_interval: u64,
    /// No spawn before this frame.
    pub warmup_frames: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            flap_velocity: -10.0,
            actor_radius: 50.0,
            actor_x_fraction: 0.25,
            obstacle_width: 300.0,
            gap_height: 350.0,
            obstacle_speed: 5.0,
            gap_margin: 100.0,
            spawn_interval: 120,
            warmup_frames: 60,
        }
    }
}

// ── Whole-program configuration ──────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tuning: Tuning,
    /// Target frames per second of the loop driver.
    pub fps: u32,
    /// World units covered by one terminal column.
    pub cell_width: f32,
    /// World units covered by one terminal row.
    pub cell_height: f32,
    /// Override for the high score file location.
    pub high_score_path: Option<PathBuf>,
    /// Used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            fps: 60,
            cell_width: 16.0,
            cell_height: 32.0,
            high_score_path: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Read and validate a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `$JACK_FLAP_CONFIG` or `./jack_flap.json`, falling back to
    /// defaults when the file is unreadable or invalid.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tuning;
        if t.spawn_interval == 0 {
            return invalid("tuning.spawn_interval", "must be at least 1");
        }
        if t.actor_radius <= 0.0 {
            return invalid("tuning.actor_radius", "must be positive");
        }
        if t.obstacle_width <= 0.0 {
            return invalid("tuning.obstacle_width", "must be positive");
        }
        if t.gap_height <= 0.0 {
            return invalid("tuning.gap_height", "must be positive");
        }
        if t.obstacle_speed <= 0.0 {
            return invalid("tuning.obstacle_speed", "must be positive");
        }
        if !(0.0..=1.0).contains(&t.actor_x_fraction) {
            return invalid("tuning.actor_x_fraction", "must be within 0..=1");
        }
        if self.fps == 0 {
            return invalid("fps", "must be at least 1");
        }
        if self.cell_width <= 0.0 || self.cell_height <= 0.0 {
            return invalid("cell_width/cell_height", "must be positive");
        }
        Ok(())
    }

    /// Where the high score lives: the configured path, else `$HOME`.
    pub fn high_score_path(&self) -> PathBuf {
        if let Some(path) = &self.high_score_path {
            return path.clone();
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(DEFAULT_SCORE_FILE)
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }

    /// Frame budget of the loop driver.
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_nanos(1_000_000_000 / u64::from(self.fps.max(1)))
    }
}

fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid { field, reason })
}
