use jack_flap::compute::*;
use jack_flap::config::Tuning;
use jack_flap::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const VIEW: Viewport = Viewport { width: 1280.0, height: 768.0 };

fn tuning() -> Tuning {
    Tuning::default()
}

fn make_state() -> RunState {
    RunState {
        actor: Actor { x: 320.0, y: 384.0, vy: 0.0, radius: 50.0 },
        obstacles: Vec::new(),
        score: 0,
        high_score: 0,
        ended: false,
        frame: 0,
        viewport: VIEW,
    }
}

fn obstacle(x: f32, gap_top: f32) -> Obstacle {
    Obstacle { x, gap_top, gap_bottom: gap_top + 350.0, passed: false }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── init_run ──────────────────────────────────────────────────────────────────

#[test]
fn init_run_places_actor_at_quarter_width_mid_height() {
    let s = init_run(VIEW, 0, &tuning());
    assert_eq!(s.actor.x, 320.0);
    assert_eq!(s.actor.y, 384.0);
    assert_eq!(s.actor.vy, 0.0);
    assert_eq!(s.actor.radius, 50.0);
}

#[test]
fn init_run_starts_empty_and_keeps_high_score() {
    let s = init_run(VIEW, 12, &tuning());
    assert!(s.obstacles.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.high_score, 12);
    assert_eq!(s.frame, 0);
    assert!(!s.ended);
}

// ── integrate_actor ───────────────────────────────────────────────────────────

#[test]
fn gravity_accumulates_velocity() {
    let a = make_state().actor;
    let a1 = integrate_actor(&a, false, &tuning());
    assert_eq!(a1.vy, 0.5);
    assert_eq!(a1.y, 384.5);
    let a2 = integrate_actor(&a1, false, &tuning());
    assert_eq!(a2.vy, 1.0);
    assert_eq!(a2.y, 385.5);
}

#[test]
fn impulse_overrides_velocity() {
    let mut a = make_state().actor;
    a.vy = 7.5;
    let a1 = integrate_actor(&a, true, &tuning());
    assert_eq!(a1.vy, -10.0);
    assert_eq!(a1.y, 374.0);
}

#[test]
fn fall_speed_is_unbounded() {
    let mut a = make_state().actor;
    for _ in 0..1000 {
        a = integrate_actor(&a, false, &tuning());
    }
    assert_eq!(a.vy, 500.0);
}

#[test]
fn integrate_does_not_touch_x_or_radius() {
    let a = make_state().actor;
    let a1 = integrate_actor(&a, true, &tuning());
    assert_eq!(a1.x, a.x);
    assert_eq!(a1.radius, a.radius);
}

// ── spawn cadence ─────────────────────────────────────────────────────────────

#[test]
fn no_spawn_during_warmup_or_off_cadence() {
    let t = tuning();
    assert!(!should_spawn(0, &t)); // multiple of 120 but before warm-up
    assert!(!should_spawn(60, &t));
    assert!(!should_spawn(119, &t));
    assert!(!should_spawn(121, &t));
}

#[test]
fn spawn_on_multiples_of_interval_after_warmup() {
    let t = tuning();
    assert!(should_spawn(120, &t));
    assert!(should_spawn(240, &t));
    assert!(should_spawn(1200, &t));
}

#[test]
fn warmup_past_first_multiple_delays_spawn() {
    let t = Tuning { warmup_frames: 130, ..tuning() };
    assert!(!should_spawn(120, &t));
    assert!(should_spawn(240, &t));
}

// ── spawn_obstacle ────────────────────────────────────────────────────────────

#[test]
fn spawn_places_obstacle_at_right_edge() {
    let o = spawn_obstacle(VIEW, &tuning(), &mut seeded_rng());
    assert_eq!(o.x, 1280.0);
    assert!(!o.passed);
}

#[test]
fn spawned_gaps_stay_within_margins_and_keep_height() {
    let t = tuning();
    let mut rng = seeded_rng();
    let (min, max) = gap_top_bounds(VIEW, &t);
    assert_eq!((min, max), (100.0, 318.0));
    for _ in 0..500 {
        let o = spawn_obstacle(VIEW, &t, &mut rng);
        assert!(o.gap_top >= min && o.gap_top <= max, "gap_top {}", o.gap_top);
        assert!((o.gap_bottom - o.gap_top - t.gap_height).abs() < 1e-3);
    }
}

#[test]
fn short_viewport_collapses_gap_range_to_margin() {
    let short = Viewport { width: 1280.0, height: 400.0 };
    let o = spawn_obstacle(short, &tuning(), &mut seeded_rng());
    assert_eq!(o.gap_top, 100.0);
    assert_eq!(o.gap_bottom, 450.0);
}

// ── advance_obstacles ─────────────────────────────────────────────────────────

#[test]
fn obstacles_move_left_by_speed() {
    let moved = advance_obstacles(&[obstacle(600.0, 150.0)], &tuning());
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].x, 595.0);
    assert_eq!(moved[0].gap_top, 150.0);
}

#[test]
fn obstacles_removed_once_right_edge_leaves_viewport() {
    let t = tuning();
    // After moving: -295 (right edge 5, kept), -300 (right edge 0, removed), -301
    let set = [obstacle(-290.0, 100.0), obstacle(-295.0, 100.0), obstacle(-296.0, 100.0)];
    let moved = advance_obstacles(&set, &t);
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].x, -295.0);
}

#[test]
fn advance_preserves_order() {
    let set = [obstacle(-299.0, 100.0), obstacle(300.0, 110.0), obstacle(900.0, 120.0)];
    let moved = advance_obstacles(&set, &tuning());
    let tops: Vec<f32> = moved.iter().map(|o| o.gap_top).collect();
    assert_eq!(tops, vec![110.0, 120.0]);
}

// ── mark_passed ───────────────────────────────────────────────────────────────

#[test]
fn obstacle_passed_when_right_edge_strictly_left_of_actor() {
    let s = make_state(); // actor.x = 320
    let (set, gained) = mark_passed(&[obstacle(19.0, 100.0)], &s.actor, &tuning());
    assert_eq!(gained, 1);
    assert!(set[0].passed);
}

#[test]
fn obstacle_level_with_actor_not_passed() {
    let s = make_state();
    let (set, gained) = mark_passed(&[obstacle(20.0, 100.0)], &s.actor, &tuning());
    assert_eq!(gained, 0);
    assert!(!set[0].passed);
}

#[test]
fn passed_obstacle_scores_only_once() {
    let s = make_state();
    let mut o = obstacle(-100.0, 100.0);
    o.passed = true;
    let (_, gained) = mark_passed(&[o, obstacle(0.0, 100.0)], &s.actor, &tuning());
    assert_eq!(gained, 1);
}

// ── collided ──────────────────────────────────────────────────────────────────

#[test]
fn actor_at_top_inside_overlapping_pipe_collides() {
    let actor = Actor { x: 320.0, y: 0.0, vy: 0.0, radius: 50.0 };
    assert!(collided(&actor, &[obstacle(300.0, 100.0)], VIEW, &tuning()));
}

#[test]
fn actor_mid_screen_without_pipes_is_clear() {
    let s = make_state();
    assert!(!collided(&s.actor, &[], VIEW, &tuning()));
}

#[test]
fn actor_touching_top_edge_is_clear() {
    let actor = Actor { x: 320.0, y: 50.0, vy: 0.0, radius: 50.0 };
    assert!(!collided(&actor, &[], VIEW, &tuning()));
}

#[test]
fn actor_past_bottom_edge_collides() {
    let actor = Actor { x: 320.0, y: 719.0, vy: 0.0, radius: 50.0 };
    assert!(collided(&actor, &[], VIEW, &tuning()));
}

#[test]
fn actor_inside_gap_is_clear() {
    let actor = Actor { x: 320.0, y: 300.0, vy: 0.0, radius: 50.0 };
    // gap 200..550, actor extent 250..350
    assert!(!collided(&actor, &[obstacle(300.0, 200.0)], VIEW, &tuning()));
}

#[test]
fn actor_below_gap_collides() {
    let actor = Actor { x: 320.0, y: 420.0, vy: 0.0, radius: 50.0 };
    // gap 100..450, actor bottom 470
    assert!(collided(&actor, &[obstacle(300.0, 100.0)], VIEW, &tuning()));
}

#[test]
fn obstacle_not_overlapping_horizontally_is_ignored() {
    let actor = Actor { x: 320.0, y: 600.0, vy: 0.0, radius: 50.0 };
    // ahead: left edge 370 == actor right edge; behind: right edge 270 == actor left edge
    let set = [obstacle(370.0, 100.0), obstacle(-30.0, 100.0)];
    assert!(!collided(&actor, &set, VIEW, &tuning()));
}

#[test]
fn any_single_hit_is_enough() {
    let actor = Actor { x: 320.0, y: 300.0, vy: 0.0, radius: 50.0 };
    let set = [obstacle(300.0, 200.0), obstacle(250.0, 280.0)];
    assert!(collided(&actor, &set, VIEW, &tuning()));
}

// ── step ──────────────────────────────────────────────────────────────────────

#[test]
fn step_increments_frame_and_applies_gravity() {
    let s = make_state();
    let s2 = step(&s, &FrameInput::default(), &tuning(), &mut seeded_rng());
    assert_eq!(s2.frame, 1);
    assert_eq!(s2.actor.vy, 0.5);
    assert_eq!(s2.actor.y, 384.5);
}

#[test]
fn step_with_impulse_sets_flap_velocity() {
    let mut s = make_state();
    s.actor.vy = 4.0;
    let s2 = step(&s, &FrameInput { impulse: true }, &tuning(), &mut seeded_rng());
    assert_eq!(s2.actor.vy, -10.0);
}

#[test]
fn step_spawns_and_advances_on_cadence() {
    let mut s = make_state();
    s.frame = 119;
    let s2 = step(&s, &FrameInput::default(), &tuning(), &mut seeded_rng());
    assert_eq!(s2.obstacles.len(), 1);
    assert_eq!(s2.obstacles[0].x, 1275.0);
}

#[test]
fn step_does_not_spawn_off_cadence() {
    let mut s = make_state();
    s.frame = 1;
    let s2 = step(&s, &FrameInput::default(), &tuning(), &mut seeded_rng());
    assert!(s2.obstacles.is_empty());
}

#[test]
fn step_scores_and_raises_high_score() {
    let mut s = make_state();
    // gap wide open around the actor; moves to x = 19, right edge 319 < 320
    s.obstacles.push(Obstacle { x: 24.0, gap_top: 0.0, gap_bottom: 768.0, passed: false });
    let s2 = step(&s, &FrameInput::default(), &tuning(), &mut seeded_rng());
    assert_eq!(s2.score, 1);
    assert_eq!(s2.high_score, 1);
    assert!(s2.obstacles[0].passed);
    assert!(!s2.ended);
}

#[test]
fn step_keeps_higher_previous_high_score() {
    let mut s = make_state();
    s.score = 4;
    s.high_score = 12;
    s.obstacles.push(Obstacle { x: 24.0, gap_top: 0.0, gap_bottom: 768.0, passed: false });
    let s2 = step(&s, &FrameInput::default(), &tuning(), &mut seeded_rng());
    assert_eq!(s2.score, 5);
    assert_eq!(s2.high_score, 12);
}

#[test]
fn step_ends_run_on_collision() {
    let mut s = make_state();
    s.actor.y = 718.0;
    s.actor.vy = 5.0;
    let s2 = step(&s, &FrameInput::default(), &tuning(), &mut seeded_rng());
    assert!(s2.ended);
}

#[test]
fn step_on_ended_run_is_frozen() {
    let mut s = make_state();
    s.ended = true;
    s.obstacles.push(obstacle(500.0, 150.0));
    let s2 = step(&s, &FrameInput { impulse: true }, &tuning(), &mut seeded_rng());
    assert_eq!(s2, s);
}

#[test]
fn step_does_not_mutate_original() {
    let s = make_state();
    let _ = step(&s, &FrameInput { impulse: true }, &tuning(), &mut seeded_rng());
    assert_eq!(s, make_state());
}

#[test]
fn long_run_keeps_invariants() {
    let t = tuning();
    let mut rng = seeded_rng();
    let mut s = make_state();
    for i in 0..3000u32 {
        // Hold mid-screen with periodic impulses
        let impulse = s.actor.y > 384.0 && i % 2 == 0;
        let next = step(&s, &FrameInput { impulse }, &t, &mut rng);

        if impulse {
            assert_eq!(next.actor.vy, t.flap_velocity);
        } else {
            assert_eq!(next.actor.vy, s.actor.vy + t.gravity);
        }
        assert!(next.score >= s.score);
        assert!(next.score - s.score <= 1);
        assert_eq!(next.high_score, s.high_score.max(next.score));
        for o in &next.obstacles {
            assert!(o.gap_top >= 100.0 && o.gap_top <= 318.0);
            assert!((o.gap_bottom - o.gap_top - t.gap_height).abs() < 1e-3);
        }

        s = next;
        if s.ended {
            break;
        }
    }
}
