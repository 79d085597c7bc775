//! Per-frame physics step
//!
//! Advances the simulation by one clamped time delta. The order of effects
//! matters: paddle movement, serve countdown, ball integration, wall
//! collision, paddle collision, scoring. Audio cues are returned as an
//! ordered event list rather than played inline, keeping the step pure.

use glam::Vec2;

use super::collision::{deflection_velocity, intersects_paddle, rest_x_against};
use super::input::TickInput;
use super::state::{Cue, GameState, Side};
use crate::consts::*;

/// Guard a raw frame delta: NaN or negative deltas mean no movement, and
/// anything above `MAX_FRAME_DT` (tab backgrounding, frame hitches) is capped.
pub fn clamp_frame_dt(raw_dt: f32) -> f32 {
    if raw_dt.is_nan() || raw_dt < 0.0 {
        0.0
    } else {
        raw_dt.min(MAX_FRAME_DT)
    }
}

/// Advance the game by `dt` seconds, returning the cues fired this frame.
///
/// `dt` is expected to come through [`clamp_frame_dt`]; the loop driver owns
/// that guard so tests can drive arbitrary deltas directly.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<Cue> {
    let mut cues = Vec::new();

    // One-shot actions apply even while paused
    if input.restart {
        state.reset_game();
    }
    if input.pause {
        state.paused = !state.paused;
    }
    if state.paused {
        return cues;
    }

    move_paddles(state, input, dt);
    update_ball(state, dt, &mut cues);

    cues
}

fn move_paddles(state: &mut GameState, input: &TickInput, dt: f32) {
    // Opposed controls apply additively: both held nets to zero
    if input.left_up {
        state.left_paddle.shift(-PADDLE_SPEED * dt);
    }
    if input.left_down {
        state.left_paddle.shift(PADDLE_SPEED * dt);
    }
    if input.right_up {
        state.right_paddle.shift(-PADDLE_SPEED * dt);
    }
    if input.right_down {
        state.right_paddle.shift(PADDLE_SPEED * dt);
    }
}

fn update_ball(state: &mut GameState, dt: f32, cues: &mut Vec<Cue>) {
    // Serve countdown: ball stays parked at center until the timer expires
    if state.serve_timer_ms > 0.0 {
        state.serve_timer_ms -= dt * 1000.0;
        if state.serve_timer_ms <= 0.0 {
            state.serve_timer_ms = 0.0;
            state.ball.vel = Vec2::new(BASE_BALL_SPEED * state.serve_direction, 0.0);
        }
        return;
    }

    state.ball.pos += state.ball.vel * dt;

    // Wall bounce: clamp to the boundary so the ball can't tunnel or stick
    if state.ball.pos.y - BALL_RADIUS <= 0.0 {
        state.ball.pos.y = BALL_RADIUS;
        state.ball.vel.y = -state.ball.vel.y;
        cues.push(Cue::Hit);
    } else if state.ball.pos.y + BALL_RADIUS >= COURT_HEIGHT {
        state.ball.pos.y = COURT_HEIGHT - BALL_RADIUS;
        state.ball.vel.y = -state.ball.vel.y;
        cues.push(Cue::Hit);
    }

    check_paddle_collision(state, cues);

    // Scoring: the ball must fully exit the court; at most one per frame.
    // The serve relaunches toward whichever side just conceded.
    if state.ball.pos.x + BALL_RADIUS < 0.0 {
        state.right_score += 1;
        cues.push(Cue::Score);
        state.reset_ball(-1.0);
    } else if state.ball.pos.x - BALL_RADIUS > COURT_WIDTH {
        state.left_score += 1;
        cues.push(Cue::Score);
        state.reset_ball(1.0);
    }
}

fn check_paddle_collision(state: &mut GameState, cues: &mut Vec<Cue>) {
    for side in [Side::Left, Side::Right] {
        let paddle = *state.paddle(side);
        if intersects_paddle(&state.ball, &paddle, side) {
            state.ball.pos.x = rest_x_against(&paddle, side);
            let (vel, speed) =
                deflection_velocity(state.ball.pos.y, &paddle, state.ball.speed, side);
            state.ball.vel = vel;
            state.ball.speed = speed;
            cues.push(Cue::Hit);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Paddle;
    use proptest::prelude::*;

    fn held(left_up: bool, left_down: bool, right_up: bool, right_down: bool) -> TickInput {
        TickInput {
            left_up,
            left_down,
            right_up,
            right_down,
            ..Default::default()
        }
    }

    /// State mid-rally: serve finished, ball free at center
    fn rallying(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        let cues = tick(&mut state, &TickInput::default(), 1.0);
        assert!(cues.is_empty());
        assert!(!state.serving());
        state
    }

    #[test]
    fn test_clamp_frame_dt_guards_bad_deltas() {
        assert_eq!(clamp_frame_dt(f32::NAN), 0.0);
        assert_eq!(clamp_frame_dt(-0.5), 0.0);
        assert_eq!(clamp_frame_dt(5.0), MAX_FRAME_DT);
        assert_eq!(clamp_frame_dt(0.016), 0.016);
    }

    #[test]
    fn test_serve_countdown_launches_without_movement() {
        let mut state = GameState::new(3);
        state.serve_direction = 1.0;
        state.serve_timer_ms = SERVE_DELAY_MS;
        let center = state.ball.pos;

        // dt exactly exhausts the 1000 ms timer on this frame
        let cues = tick(&mut state, &TickInput::default(), 1.0);
        assert!(cues.is_empty());
        assert_eq!(state.serve_timer_ms, 0.0);
        assert_eq!(state.ball.vel, Vec2::new(BASE_BALL_SPEED, 0.0));
        assert_eq!(state.ball.pos, center);
    }

    #[test]
    fn test_ball_frozen_while_serving() {
        let mut state = GameState::new(3);
        let center = state.ball.pos;
        tick(&mut state, &TickInput::default(), 0.02);
        assert!(state.serving());
        assert_eq!(state.ball.pos, center);
    }

    #[test]
    fn test_wall_bounce_clamps_and_inverts() {
        let mut state = rallying(3);
        state.ball.pos = Vec2::new(400.0, BALL_RADIUS + 1.0);
        state.ball.vel = Vec2::new(0.0, -300.0);

        let cues = tick(&mut state, &TickInput::default(), 0.02);
        assert_eq!(cues, vec![Cue::Hit]);
        assert_eq!(state.ball.pos.y, BALL_RADIUS);
        assert_eq!(state.ball.vel.y, 300.0);
    }

    #[test]
    fn test_dead_center_right_paddle_hit() {
        let mut state = rallying(3);
        let paddle = state.right_paddle;
        state.ball.pos = Vec2::new(paddle.x - BALL_RADIUS - 1.0, paddle.center_y());
        state.ball.vel = Vec2::new(370.0, 0.0);
        state.ball.speed = 370.0;

        let cues = tick(&mut state, &TickInput::default(), 0.02);
        assert_eq!(cues, vec![Cue::Hit]);
        // 370 * 1.06 = 392.2, under the cap, angle 0
        assert!((state.ball.vel.x - (-392.2)).abs() < 0.01);
        assert!(state.ball.vel.y.abs() < 0.001);
        assert_eq!(state.ball.pos.x, paddle.x - BALL_RADIUS);
    }

    #[test]
    fn test_left_exit_scores_for_right() {
        let mut state = rallying(3);
        state.ball.pos = Vec2::new(-BALL_RADIUS - 0.5, 270.0);
        state.ball.vel = Vec2::new(-400.0, 0.0);

        let cues = tick(&mut state, &TickInput::default(), 0.001);
        assert_eq!(cues, vec![Cue::Score]);
        assert_eq!(state.right_score, 1);
        assert_eq!(state.left_score, 0);
        assert_eq!(state.ball.pos.x, COURT_WIDTH / 2.0);
        assert_eq!(state.serve_direction, -1.0);
        assert_eq!(state.serve_timer_ms, SERVE_DELAY_MS);
    }

    #[test]
    fn test_right_exit_serves_rightward() {
        let mut state = rallying(3);
        state.ball.pos = Vec2::new(COURT_WIDTH + BALL_RADIUS + 0.5, 270.0);
        state.ball.vel = Vec2::new(400.0, 0.0);

        tick(&mut state, &TickInput::default(), 0.001);
        assert_eq!(state.left_score, 1);
        assert_eq!(state.serve_direction, 1.0);
    }

    #[test]
    fn test_score_increments_once_per_exit() {
        let mut state = rallying(3);
        state.ball.pos = Vec2::new(-BALL_RADIUS - 100.0, 270.0);
        state.ball.vel = Vec2::new(-760.0, 0.0);

        let cues = tick(&mut state, &TickInput::default(), 0.02);
        assert_eq!(cues.iter().filter(|c| **c == Cue::Score).count(), 1);
        assert_eq!(state.right_score, 1);
    }

    #[test]
    fn test_paddle_movement_and_net_zero() {
        let mut state = rallying(3);
        let start = state.left_paddle.y;

        tick(&mut state, &held(true, false, false, false), 0.02);
        assert!((state.left_paddle.y - (start - PADDLE_SPEED * 0.02)).abs() < 1e-4);

        // Both directions held: additive, nets to zero
        let y = state.left_paddle.y;
        tick(&mut state, &held(true, true, false, false), 0.02);
        assert!((state.left_paddle.y - y).abs() < 1e-4);

        // Right paddle moves independently
        let ry = state.right_paddle.y;
        tick(&mut state, &held(false, false, false, true), 0.02);
        assert!((state.right_paddle.y - (ry + PADDLE_SPEED * 0.02)).abs() < 1e-4);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = rallying(3);
        let toggle = TickInput {
            pause: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &toggle, 0.02).is_empty());
        assert!(state.paused);

        let ball_pos = state.ball.pos;
        let paddle_y = state.left_paddle.y;
        for _ in 0..10 {
            let cues = tick(&mut state, &held(true, false, true, false), 0.02);
            assert!(cues.is_empty());
        }
        assert_eq!(state.ball.pos, ball_pos);
        assert_eq!(state.left_paddle.y, paddle_y);

        // Second toggle resumes
        tick(&mut state, &toggle, 0.02);
        assert!(!state.paused);
    }

    #[test]
    fn test_restart_while_paused_resumes_fresh() {
        let mut state = rallying(3);
        state.left_score = 2;
        state.paused = true;

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.02);
        assert_eq!(state.left_score, 0);
        assert!(!state.paused);
        assert!(state.serving());
    }

    #[test]
    fn test_deflection_skipped_when_moving_away() {
        let mut state = rallying(3);
        let paddle = state.right_paddle;
        // Overlapping the right paddle but already heading left
        state.ball.pos = Vec2::new(paddle.x + 1.0, paddle.center_y());
        state.ball.vel = Vec2::new(-400.0, 0.0);
        let speed_before = state.ball.speed;

        let cues = tick(&mut state, &TickInput::default(), 0.001);
        assert!(cues.is_empty());
        assert_eq!(state.ball.speed, speed_before);
    }

    proptest! {
        /// Paddles never leave the court, whatever the inputs
        #[test]
        fn prop_paddle_stays_in_bounds(
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..200),
            dt in 0.0f32..MAX_FRAME_DT,
        ) {
            let mut state = GameState::new(11);
            for (lu, ld, ru, rd) in moves {
                tick(&mut state, &held(lu, ld, ru, rd), dt);
                prop_assert!(state.left_paddle.y >= 0.0);
                prop_assert!(state.left_paddle.y <= COURT_HEIGHT - PADDLE_HEIGHT);
                prop_assert!(state.right_paddle.y >= 0.0);
                prop_assert!(state.right_paddle.y <= COURT_HEIGHT - PADDLE_HEIGHT);
            }
        }

        /// Within a rally the ball's speed never decreases and never
        /// exceeds the cap
        #[test]
        fn prop_rally_speed_monotone_and_capped(frames in 1usize..2000) {
            let mut state = rallying(11);
            let mut last_speed = state.ball.speed;
            for _ in 0..frames {
                let cues = tick(&mut state, &TickInput::default(), MAX_FRAME_DT);
                if cues.contains(&Cue::Score) {
                    // New rally: speed resets to base
                    last_speed = state.ball.speed;
                }
                prop_assert!(state.ball.speed >= last_speed);
                prop_assert!(state.ball.speed <= MAX_BALL_SPEED);
                last_speed = state.ball.speed;
            }
        }

        /// Identical impacts produce identical deflections
        #[test]
        fn prop_deflection_pure(offset in -80.0f32..80.0, speed in 100.0f32..760.0) {
            let paddle = Paddle::new(Side::Left);
            let y = paddle.center_y() + offset;
            let a = deflection_velocity(y, &paddle, speed, Side::Left);
            let b = deflection_velocity(y, &paddle, speed, Side::Left);
            prop_assert_eq!(a, b);
        }
    }
}
