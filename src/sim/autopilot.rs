//! Demo mode: an AI that produces input intents
//!
//! Tracks the ball with a slowly drifting aim offset so the paddle does not
//! return every ball straight up and the run visits the whole grid.

use super::state::{RunMode, Session};
use super::tick::InputIntent;

/// Fraction of the paddle half-width the aim point drifts across
const AIM_SPREAD: f32 = 0.6;

/// Choose this tick's intent for the session
pub fn steer(session: &Session) -> InputIntent {
    if session.mode != RunMode::Running {
        return InputIntent::default();
    }

    let paddle = &session.paddle;
    let ball = &session.ball;

    // Oscillating offset based on time, same shape as a slow wobble
    let t = session.time_ticks as f32 * 0.01;
    let wobble = t.sin() * 0.7 + (t * 0.37).sin() * 0.3;
    let aim = ball.center_x() - wobble * AIM_SPREAD * paddle.width / 2.0;

    let delta = aim - paddle.center_x();
    // Dead zone of one paddle step prevents jitter around the target
    if delta < -paddle.speed {
        InputIntent {
            left: true,
            right: false,
        }
    } else if delta > paddle.speed {
        InputIntent {
            left: false,
            right: true,
        }
    } else {
        InputIntent::default()
    }
}
