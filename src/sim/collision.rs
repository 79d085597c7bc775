//! Paddle collision tests and deflection response
//!
//! The ball is treated as its bounding box for overlap tests. Each test is
//! restricted to the half of the court nearest the paddle and to balls
//! moving toward it, so a ball already moving away can never re-collide.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::consts::*;

/// Does the ball's bounding box overlap this paddle, approaching it?
pub fn intersects_paddle(ball: &Ball, paddle: &Paddle, side: Side) -> bool {
    let overlap = match side {
        Side::Left => {
            ball.pos.x - BALL_RADIUS <= paddle.x + PADDLE_WIDTH
                && ball.pos.x > paddle.x
                && ball.pos.y + BALL_RADIUS >= paddle.y
                && ball.pos.y - BALL_RADIUS <= paddle.y + PADDLE_HEIGHT
        }
        Side::Right => {
            ball.pos.x + BALL_RADIUS >= paddle.x
                && ball.pos.x < paddle.x + PADDLE_WIDTH
                && ball.pos.y + BALL_RADIUS >= paddle.y
                && ball.pos.y - BALL_RADIUS <= paddle.y + PADDLE_HEIGHT
        }
    };
    // Only count hits while the ball moves toward the paddle
    let approaching = match side {
        Side::Left => ball.vel.x < 0.0,
        Side::Right => ball.vel.x > 0.0,
    };
    overlap && approaching
}

/// Post-hit velocity as a pure function of impact point and pre-hit speed.
///
/// The vertical offset from the paddle center, normalized by half the paddle
/// height and clamped to [-1, 1], scales the bounce angle up to
/// `MAX_BOUNCE_ANGLE`. Speed grows by `BALL_SPEED_GAIN` per hit, capped at
/// `MAX_BALL_SPEED`. Returns the new velocity and the new scalar speed.
pub fn deflection_velocity(ball_y: f32, paddle: &Paddle, speed: f32, side: Side) -> (Vec2, f32) {
    let offset = (ball_y - paddle.center_y()) / (PADDLE_HEIGHT / 2.0);
    let bounce_angle = offset.clamp(-1.0, 1.0) * MAX_BOUNCE_ANGLE;

    let new_speed = (speed * BALL_SPEED_GAIN).min(MAX_BALL_SPEED);
    let vel = Vec2::new(
        bounce_angle.cos() * new_speed * side.sign(),
        bounce_angle.sin() * new_speed,
    );
    (vel, new_speed)
}

/// X position that parks the ball just outside the paddle face, preventing
/// it from sinking into the paddle on the next frame
pub fn rest_x_against(paddle: &Paddle, side: Side) -> f32 {
    match side {
        Side::Left => paddle.x + PADDLE_WIDTH + BALL_RADIUS,
        Side::Right => paddle.x - BALL_RADIUS,
    }
}
