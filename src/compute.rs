//! Pure game-logic functions.
//!
//! Every public function takes immutable references (plus, where needed, an
//! RNG handle) and returns new values.  Side effects are limited to the
//! injected RNG.

use rand::Rng;

use crate::config::Tuning;
use crate::entities::{Actor, FrameInput, Obstacle, RunState, Viewport};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Actor at the start position for the given viewport.
pub fn init_actor(viewport: Viewport, tuning: &Tuning) -> Actor {
    Actor {
        x: viewport.width * tuning.actor_x_fraction,
        y: viewport.height / 2.0,
        vy: 0.0,
        radius: tuning.actor_radius,
    }
}

/// Fresh run state. Only the high score carries over between runs.
pub fn init_run(viewport: Viewport, high_score: u32, tuning: &Tuning) -> RunState {
    RunState {
        actor: init_actor(viewport, tuning),
        obstacles: Vec::new(),
        score: 0,
        high_score,
        ended: false,
        frame: 0,
        viewport,
    }
}

// ── Actor physics ────────────────────────────────────────────────────────────

/// Integrate one tick. An impulse replaces the accumulated velocity instead
/// of adding to it; no terminal velocity.
pub fn integrate_actor(actor: &Actor, impulse: bool, tuning: &Tuning) -> Actor {
    let vy = if impulse {
        tuning.flap_velocity
    } else {
        actor.vy + tuning.gravity
    };
    Actor {
        y: actor.y + vy,
        vy,
        ..actor.clone()
    }
}

// ── Obstacle set ─────────────────────────────────────────────────────────────

/// Spawn rule: past the warm-up and on a multiple of the interval.
pub fn should_spawn(frame: u64, tuning: &Tuning) -> bool {
    frame >= tuning.warmup_frames && frame % tuning.spawn_interval.max(1) == 0
}

/// Inclusive range `gap_top` is drawn from. Collapses to the lower bound
/// when the viewport is too short to honour both margins.
pub fn gap_top_bounds(viewport: Viewport, tuning: &Tuning) -> (f32, f32) {
    let min = tuning.gap_margin;
    let max = viewport.height - tuning.gap_height - tuning.gap_margin;
    (min, max.max(min))
}

/// New obstacle at the right edge of the viewport.
pub fn spawn_obstacle(viewport: Viewport, tuning: &Tuning, rng: &mut impl Rng) -> Obstacle {
    let (min, max) = gap_top_bounds(viewport, tuning);
    let gap_top = if max > min { rng.gen_range(min..=max) } else { min };
    Obstacle {
        x: viewport.width,
        gap_top,
        gap_bottom: gap_top + tuning.gap_height,
        passed: false,
    }
}

/// Move every obstacle left and drop those fully past the left edge.
/// Order is preserved.
pub fn advance_obstacles(obstacles: &[Obstacle], tuning: &Tuning) -> Vec<Obstacle> {
    obstacles
        .iter()
        .map(|o| Obstacle {
            x: o.x - tuning.obstacle_speed,
            ..o.clone()
        })
        .filter(|o| o.x + tuning.obstacle_width > 0.0)
        .collect()
}

// ── Score ────────────────────────────────────────────────────────────────────

/// Flag obstacles whose right edge is strictly left of the actor.
/// Returns the updated set and the number newly passed.
pub fn mark_passed(obstacles: &[Obstacle], actor: &Actor, tuning: &Tuning) -> (Vec<Obstacle>, u32) {
    let mut gained = 0;
    let obstacles = obstacles
        .iter()
        .map(|o| {
            if !o.passed && o.x + tuning.obstacle_width < actor.x {
                gained += 1;
                Obstacle { passed: true, ..o.clone() }
            } else {
                o.clone()
            }
        })
        .collect();
    (obstacles, gained)
}

// ── Collision ────────────────────────────────────────────────────────────────

/// True if the actor leaves the viewport vertically, or overlaps an obstacle
/// horizontally while sticking out of its gap.
pub fn collided(actor: &Actor, obstacles: &[Obstacle], viewport: Viewport, tuning: &Tuning) -> bool {
    let top = actor.y - actor.radius;
    let bottom = actor.y + actor.radius;
    if top < 0.0 || bottom > viewport.height {
        return true;
    }

    obstacles.iter().any(|o| {
        actor.x + actor.radius > o.x
            && actor.x - actor.radius < o.x + tuning.obstacle_width
            && (top < o.gap_top || bottom > o.gap_bottom)
    })
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  An ended run is returned unchanged.
pub fn step(
    state: &RunState,
    input: &FrameInput,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> RunState {
    if state.ended {
        return state.clone();
    }

    // ── 1. Physics ───────────────────────────────────────────────────────────
    let actor = integrate_actor(&state.actor, input.impulse, tuning);

    // ── 2. Spawn on cadence ──────────────────────────────────────────────────
    let frame = state.frame + 1;
    let mut obstacles = state.obstacles.clone();
    if should_spawn(frame, tuning) {
        let spawned = spawn_obstacle(state.viewport, tuning, rng);
        log::debug!("frame {frame}: obstacle gap at {:.0}", spawned.gap_top);
        obstacles.push(spawned);
    }

    // ── 3. Advance & prune ───────────────────────────────────────────────────
    let obstacles = advance_obstacles(&obstacles, tuning);

    // ── 4. Score ─────────────────────────────────────────────────────────────
    let (obstacles, gained) = mark_passed(&obstacles, &actor, tuning);
    let score = state.score + gained;
    let high_score = state.high_score.max(score);

    // ── 5. Collision ─────────────────────────────────────────────────────────
    let ended = collided(&actor, &obstacles, state.viewport, tuning);

    RunState {
        actor,
        obstacles,
        score,
        high_score,
        ended,
        frame,
        ..state.clone()
    }
}
