//! All game entity types — pure data, no logic.

// ── Characters ────────────────────────────────────────────────────────────────

/// One selectable character: a display name and the skins used for the
/// actor and the obstacles. Skin references are resolved by the renderer;
/// unknown references fall back to plain shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    pub name: &'static str,
    pub actor_skin: &'static str,
    pub obstacle_skin: &'static str,
}

pub const CHARACTERS: &[Character] = &[
    Character { name: "Jack Sparrow", actor_skin: "sparrow", obstacle_skin: "sparrow_pipe" },
    Character { name: "Jack Dawson", actor_skin: "titanic", obstacle_skin: "titanic_pipe" },
    Character { name: "Jack Jack", actor_skin: "jackjack", obstacle_skin: "jackjack_pipe" },
    Character { name: "Jack Black", actor_skin: "black", obstacle_skin: "black_pipe" },
    Character { name: "Jack Torrance", actor_skin: "shining", obstacle_skin: "shining_pipe" },
    Character { name: "Jack Skellington", actor_skin: "skellington", obstacle_skin: "skellington_pipe" },
    Character { name: "Beanstalk Jack", actor_skin: "jackBean", obstacle_skin: "jackBean_pipe" },
    Character { name: "Jack Johnson", actor_skin: "bananaJack", obstacle_skin: "bananaJack_pipe" },
    Character { name: "Jack Daniels", actor_skin: "daniels", obstacle_skin: "daniels_pipe" },
    Character { name: "Jack My Brother", actor_skin: "weaver", obstacle_skin: "pipeNorth" },
];

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Drawable area in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

// ── Actor & obstacles ─────────────────────────────────────────────────────────

/// The controlled sprite. `x` stays fixed for the whole run.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity, positive = downward.
    pub vy: f32,
    pub radius: f32,
}

/// A gate: barriers above `gap_top` and below `gap_bottom`.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    /// Left edge.
    pub x: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    /// Set once the obstacle has been scored.
    pub passed: bool,
}

// ── Per-tick input ────────────────────────────────────────────────────────────

/// Discrete inputs consumed by one simulation tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub impulse: bool,
}

// ── Run state ─────────────────────────────────────────────────────────────────

/// Everything that changes during a run. Cloneable so the step function can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct RunState {
    pub actor: Actor,
    /// Oldest first.
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Best score across runs, updated live during play.
    pub high_score: u32,
    pub ended: bool,
    /// Running ticks since the run started.
    pub frame: u64,
    pub viewport: Viewport,
}
