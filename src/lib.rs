//! Jack Flap — a falling-sprite arcade game for the terminal.
//!
//! The library holds everything except terminal I/O:
//! - `entities`: plain data (actor, obstacles, run state, characters)
//! - `compute`: pure per-tick simulation functions
//! - `score`: persisted high score behind a store trait
//! - `driver`: Menu / Running / Ended state machine and frame scheduling
//! - `config`: tunable constants loaded from JSON
//! - `error`: error types

pub mod compute;
pub mod config;
pub mod driver;
pub mod entities;
pub mod error;
pub mod score;

pub use config::{Config, Tuning};
pub use driver::{Driver, Phase};
pub use error::{ConfigError, Error, StoreError};
