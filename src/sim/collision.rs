//! Collision detection and response
//!
//! Everything is axis-aligned. Walls flip a velocity component, blocks flip
//! the vertical component, and the paddle replaces the velocity outright with
//! one whose angle depends on where the ball struck.

use glam::Vec2;

use super::rect::Rect;

/// Reflect off the side walls and the ceiling.
///
/// The two checks are independent, so a corner hit flips both components in
/// the same tick. Only signs change, never magnitudes.
pub fn reflect_off_walls(ball: &Rect, vel: &mut Vec2, board_width: f32) {
    if ball.left() <= 0.0 || ball.right() >= board_width {
        vel.x = -vel.x;
    }
    if ball.top() <= 0.0 {
        vel.y = -vel.y;
    }
}

/// Whether the ball has reached the bottom edge of the board
#[inline]
pub fn bottomed_out(ball: &Rect, board_height: f32) -> bool {
    ball.bottom() >= board_height
}

/// Paddle contact test.
///
/// Deliberately not a full AABB: the ball only needs to overlap the paddle
/// horizontally and have its bottom edge below the paddle top. A ball that is
/// already below the paddle top but within its span still bounces.
#[inline]
pub fn paddle_contact(ball: &Rect, paddle: &Rect) -> bool {
    ball.left() < paddle.right() && ball.right() > paddle.left() && ball.bottom() > paddle.top()
}

/// Deflection angle from vertical for a hit `hit` pixels right of the paddle
/// center.
///
/// Linear in the offset and clamped to `±max_deflection` (hits past the
/// paddle edge by up to half a ball width would otherwise exceed it).
pub fn deflection_angle(hit: f32, paddle_width: f32, max_deflection: f32) -> f32 {
    let normalized = (hit / (paddle_width / 2.0)).clamp(-1.0, 1.0);
    normalized * max_deflection
}

/// New ball velocity after a paddle bounce: full `speed`, always upward
pub fn paddle_bounce_velocity(
    ball_center_x: f32,
    paddle_center_x: f32,
    paddle_width: f32,
    speed: f32,
    max_deflection: f32,
) -> Vec2 {
    let hit = ball_center_x - paddle_center_x;
    let angle = deflection_angle(hit, paddle_width, max_deflection);
    Vec2::new(speed * angle.sin(), -(speed * angle.cos()).abs())
}
