//! Loop driver: owns the run state, reacts to the discrete input events and
//! decides when a simulation tick may run.
//!
//! The driver never sleeps or reads a clock. The caller polls
//! `pending_frame`, waits for the next display refresh, then hands the token
//! back through `on_frame`. A tick schedules its successor at the end of its
//! body, so at most one frame is ever outstanding.

use rand::Rng;

use crate::compute::{init_run, step};
use crate::config::Tuning;
use crate::entities::{Character, FrameInput, RunState, Viewport};
use crate::score::{HighScore, HighScoreStore};

// ── Frame scheduling ─────────────────────────────────────────────────────────

/// Identifies one scheduled tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameToken(u64);

/// Single-slot scheduler. Requesting while a frame is pending replaces it.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<FrameToken>,
}

impl FrameScheduler {
    pub fn request(&mut self) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        if let Some(old) = self.pending.replace(token) {
            log::debug!("frame {:?} superseded by {:?}", old, token);
        }
        token
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Claim `token` for execution. Fails for cancelled or superseded tokens.
    pub fn take(&mut self, token: FrameToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

// ── State machine ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a character selection.
    Menu,
    Running,
    /// Simulation frozen, overlay shown.
    Ended,
}

pub struct Driver<S: HighScoreStore> {
    phase: Phase,
    tuning: Tuning,
    run: RunState,
    selection: Option<Character>,
    high_score: HighScore<S>,
    scheduler: FrameScheduler,
    input: FrameInput,
}

impl<S: HighScoreStore> Driver<S> {
    pub fn new(tuning: Tuning, viewport: Viewport, high_score: HighScore<S>) -> Self {
        let run = init_run(viewport, high_score.best(), &tuning);
        Self {
            phase: Phase::Menu,
            tuning,
            run,
            selection: None,
            high_score,
            scheduler: FrameScheduler::default(),
            input: FrameInput::default(),
        }
    }

    // ── Read-only view for the renderer ─────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &RunState {
        &self.run
    }

    pub fn selection(&self) -> Option<&Character> {
        self.selection.as_ref()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn high_score(&self) -> &HighScore<S> {
        &self.high_score
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.scheduler.pending()
    }

    // ── Input events ────────────────────────────────────────────────────────

    /// Start a run with `character`. Only valid from the menu.
    pub fn select(&mut self, character: Character) {
        if self.phase != Phase::Menu {
            return;
        }
        log::info!("run started as {}", character.name);
        self.selection = Some(character);
        self.begin_run();
    }

    /// Buffer an impulse for the next tick. Ignored unless running.
    pub fn impulse(&mut self) {
        if self.phase == Phase::Running {
            self.input.impulse = true;
        }
    }

    /// Start over with the same character. Ignored unless ended.
    pub fn restart(&mut self) {
        if self.phase != Phase::Ended {
            return;
        }
        log::info!("run restarted");
        self.begin_run();
    }

    /// Abandon the finished run and go back to character selection.
    pub fn choose_new(&mut self) {
        if self.phase != Phase::Ended {
            return;
        }
        self.scheduler.cancel();
        self.run = init_run(self.run.viewport, self.high_score.best(), &self.tuning);
        self.input = FrameInput::default();
        self.selection = None;
        self.phase = Phase::Menu;
        log::info!("back to character selection");
    }

    /// New drawable area. Applies to later spawns, bounds checks and resets.
    pub fn resize(&mut self, viewport: Viewport) {
        self.run.viewport = viewport;
    }

    // ── Ticks ───────────────────────────────────────────────────────────────

    /// Run the tick identified by `token` and schedule the next one.
    /// Returns false when the token is stale and nothing ran.
    pub fn on_frame(&mut self, token: FrameToken, rng: &mut impl Rng) -> bool {
        if !self.scheduler.take(token) {
            return false;
        }

        let input = std::mem::take(&mut self.input);
        self.run = step(&self.run, &input, &self.tuning, rng);
        self.high_score.record(self.run.score);

        if self.phase == Phase::Running && self.run.ended {
            self.phase = Phase::Ended;
            log::info!(
                "run ended: score {} (best {})",
                self.run.score,
                self.high_score.best()
            );
        }

        self.scheduler.request();
        true
    }

    fn begin_run(&mut self) {
        self.scheduler.cancel();
        self.run = init_run(self.run.viewport, self.high_score.best(), &self.tuning);
        self.input = FrameInput::default();
        self.phase = Phase::Running;
        self.scheduler.request();
    }
}
